//! Drop-in loader for host pages: mounts the booking widget as an iframe
//! wherever the page asks for one, and relays the widget's booked
//! notification as a DOM event the host can subscribe to.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, HtmlIFrameElement};

pub mod relay;

/// Origin the booking pages are served from. Iframes point here and the
/// relay accepts messages from nowhere else.
pub const BOOKING_ORIGIN: &str = "https://calendar-book-omega.vercel.app";

/// Host pages mark mount points with this attribute; its value is the
/// booking page slug.
pub const SLUG_ATTR: &str = "data-calbook-slug";

#[wasm_bindgen(start)]
pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    mount_booking_iframes(&document);
    relay::install_message_relay(&window);
}

/// Iframe URL for one slug: the slug-addressed booking page on the booking
/// origin, slug percent-encoded, compact styling requested.
pub fn booking_url(origin: &str, slug: &str) -> String {
    format!("{origin}/book/{}?embed=true", urlencoding::encode(slug))
}

/// Appends a booking iframe to every element carrying a non-empty slug
/// attribute. Elements with an empty value are left alone.
pub fn mount_booking_iframes(document: &Document) {
    let Ok(mounts) = document.query_selector_all(&format!("[{SLUG_ATTR}]")) else {
        return;
    };
    for index in 0..mounts.length() {
        let element = mounts
            .get(index)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok());
        let Some(element) = element else {
            continue;
        };
        let slug = element.get_attribute(SLUG_ATTR).unwrap_or_default();
        if slug.is_empty() {
            continue;
        }
        let Some(iframe) = create_iframe(document, &slug) else {
            continue;
        };
        let _ = element.append_child(&iframe);
    }
}

fn create_iframe(document: &Document, slug: &str) -> Option<HtmlIFrameElement> {
    let iframe: HtmlIFrameElement = document.create_element("iframe").ok()?.dyn_into().ok()?;
    iframe.set_src(&booking_url(BOOKING_ORIGIN, slug));
    let style = iframe.style();
    let _ = style.set_property("width", "100%");
    let _ = style.set_property("height", "600px");
    let _ = style.set_property("border", "none");
    let _ = iframe.set_attribute("allow", "clipboard-write");
    Some(iframe)
}
