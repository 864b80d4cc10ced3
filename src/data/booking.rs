use serde::{Deserialize, Serialize};

use crate::config::BOOKED_MESSAGE_TYPE;

/// One bookable interval, start and end as unix seconds. The grid renders
/// slots in whatever order the availability endpoint returns them; the whole
/// list is replaced on every date change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start_time: i64,
    pub end_time: i64,
}

/// How the booking page is addressed: `?owner_id=` on the generic page or
/// the second path segment of `/book/<slug>`. Serializes to the payload key
/// the booking endpoint expects for that addressing mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Identity {
    #[serde(rename = "owner_id")]
    Owner(String),
    #[serde(rename = "slug")]
    Slug(String),
}

impl Identity {
    /// Empty or missing owner ids resolve to no identity at all.
    pub fn from_owner_id(owner_id: Option<String>) -> Option<Identity> {
        match owner_id {
            Some(id) if !id.is_empty() => Some(Identity::Owner(id)),
            _ => None,
        }
    }

    pub fn from_slug(slug: Option<String>) -> Option<Identity> {
        match slug {
            Some(slug) if !slug.is_empty() => Some(Identity::Slug(slug)),
            _ => None,
        }
    }

    /// Query-string key used against the availability endpoint.
    pub fn query_key(&self) -> &'static str {
        match self {
            Identity::Owner(_) => "owner_id",
            Identity::Slug(_) => "slug",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Identity::Owner(value) | Identity::Slug(value) => value,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityResponse {
    /// Display label for the calendar owner; absent on older backends.
    #[serde(default)]
    pub owner_email: Option<String>,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

/// Body of `POST /api/book`. Only constructed once validation passed, so the
/// name and email are already trimmed and non-empty.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    #[serde(flatten)]
    pub identity: Identity,
    pub start_time: i64,
    pub end_time: i64,
    pub customer_name: String,
    pub customer_email: String,
}

/// What the booking endpoint confirms. The backend sends more (event id,
/// status, title); the widget only ever renders these four fields and never
/// re-submits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub start_time: i64,
    pub end_time: i64,
    pub customer_name: String,
    pub customer_email: String,
}

/// Envelope posted to the parent frame after a successful booking, and the
/// shape the embed loader re-dispatches to host pages.
#[derive(Debug, Clone, Serialize)]
pub struct BookedMessage {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub detail: BookingConfirmation,
}

impl BookedMessage {
    pub fn new(detail: BookingConfirmation) -> Self {
        Self {
            kind: BOOKED_MESSAGE_TYPE,
            detail,
        }
    }
}
