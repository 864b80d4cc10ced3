use leptos::logging::warn;
use web_sys::js_sys;
use web_sys::wasm_bindgen::JsValue;

use crate::data::booking::{BookedMessage, BookingConfirmation};

/// Posts the `calbook:booked` message to the parent frame so an embedding
/// page can observe the completed booking. A no-op on a top-level page.
/// The target origin is the wildcard: the payload is the visitor's own
/// confirmation, already on their screen, and the receiving side does the
/// origin filtering.
pub fn notify_parent(confirmation: &BookingConfirmation) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let parent = match window.parent() {
        Ok(Some(parent)) => parent,
        _ => return,
    };
    // window.parent is the window itself outside an iframe.
    let window_value: &JsValue = window.as_ref();
    let parent_value: &JsValue = parent.as_ref();
    if parent_value == window_value {
        return;
    }

    let message = BookedMessage::new(confirmation.clone());
    let payload = serde_json::to_string(&message)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok());
    match payload {
        Some(payload) => {
            if parent.post_message(&payload, "*").is_err() {
                warn!("could not post booked message to the parent frame");
            }
        }
        None => warn!("could not serialize booked message"),
    }
}
