use gloo_net::http::{Request, Response};
use serde::Deserialize;
use thiserror::Error;

use super::booking::{AvailabilityResponse, BookingConfirmation, BookingRequest, Identity};
use crate::config::{AVAILABILITY_PATH, BOOK_PATH};

/// What the two booking endpoints can hand back besides a usable body. The
/// display string is exactly what the inline error banner shows.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx answer; the message comes from the body's `detail` field when
    /// the body is JSON and carries one, otherwise the caller's fallback.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The request never completed (network failure, bad JSON, ...).
    #[error("{0}")]
    Transport(#[from] gloo_net::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail)
}

pub fn availability_url(identity: &Identity, date: &str) -> String {
    format!(
        "{}?{}={}&date={}",
        AVAILABILITY_PATH,
        identity.query_key(),
        urlencoding::encode(identity.value()),
        date
    )
}

/// Slots for one owner and one `YYYY-MM-DD` date. No retry and no timeout;
/// racing fetches are sorted out by the flow's sequence numbers.
pub async fn fetch_availability(
    identity: &Identity,
    date: &str,
) -> Result<AvailabilityResponse, ApiError> {
    let response = Request::get(&availability_url(identity, date)).send().await?;
    if !response.ok() {
        let fallback = format!("Error {}", response.status());
        return Err(status_error(response, fallback).await);
    }
    Ok(response.json().await?)
}

/// Submits the booking form. The caller disables the book action for the
/// duration, so at most one of these is in flight.
pub async fn submit_booking(request: &BookingRequest) -> Result<BookingConfirmation, ApiError> {
    let response = Request::post(BOOK_PATH).json(request)?.send().await?;
    if !response.ok() {
        return Err(status_error(response, "Booking failed".to_string()).await);
    }
    Ok(response.json().await?)
}

async fn status_error(response: Response, fallback: String) -> ApiError {
    let status = response.status();
    let detail = response
        .text()
        .await
        .ok()
        .and_then(|body| error_detail(&body));
    ApiError::Status {
        status,
        message: detail.unwrap_or(fallback),
    }
}
