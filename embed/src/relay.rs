use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, MessageEvent, Window, console, js_sys};

/// Event type re-dispatched to the host page, and the payload `type` the
/// booking page posts. The two sides never share code, only this string.
pub const BOOKED_EVENT: &str = "calbook:booked";

/// The one acceptance decision for incoming messages: the sender origin must
/// match `expected_origin` exactly and the payload must declare itself a
/// booked event. Returns the event type to dispatch on the host window.
pub fn accept_message(
    expected_origin: &str,
    origin: &str,
    message_type: Option<&str>,
) -> Option<&'static str> {
    if origin != expected_origin {
        return None;
    }
    if message_type != Some(BOOKED_EVENT) {
        return None;
    }
    Some(BOOKED_EVENT)
}

/// Listens for `message` events for the lifetime of the page and
/// re-dispatches accepted ones on the host window as a `CustomEvent` whose
/// detail is the posted payload.
pub fn install_message_relay(window: &Window) {
    let target = window.clone();
    let callback = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        let data = event.data();
        // Reflect tolerates payloads that are not objects at all.
        let message_type = js_sys::Reflect::get(&data, &JsValue::from_str("type"))
            .ok()
            .and_then(|value| value.as_string());
        let accepted = accept_message(
            crate::BOOKING_ORIGIN,
            &event.origin(),
            message_type.as_deref(),
        );
        let Some(event_type) = accepted else {
            return;
        };

        let init = CustomEventInit::new();
        init.set_detail(&data);
        match CustomEvent::new_with_event_init_dict(event_type, &init) {
            Ok(custom) => {
                let _ = target.dispatch_event(&custom);
            }
            Err(err) => {
                console::warn_2(&"calbook embed: could not build booked event".into(), &err);
            }
        }
    });

    if window
        .add_event_listener_with_callback("message", callback.as_ref().unchecked_ref())
        .is_err()
    {
        console::warn_1(&"calbook embed: could not attach message listener".into());
    }
    callback.forget();
}
