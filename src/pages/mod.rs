pub mod book;
pub mod booking_widget;
pub mod slot_grid;
