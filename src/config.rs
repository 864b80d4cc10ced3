// Wire-level constants shared across the booking pages. The endpoints are
// relative so the widget always talks to the origin that served it.

pub const AVAILABILITY_PATH: &str = "/api/availability";
pub const BOOK_PATH: &str = "/api/book";

/// Message type posted to the parent frame after a successful booking. Must
/// stay in sync with the embed loader's relay.
pub const BOOKED_MESSAGE_TYPE: &str = "calbook:booked";
