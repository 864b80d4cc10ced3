use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::data::booking::Identity;
use crate::pages::booking_widget::BookingWidget;

const OWNER_ID_HINT: &str = "Missing owner_id in URL. Use ?owner_id=YOUR_UUID";
const SLUG_HINT: &str = "Missing booking page slug in URL.";

/// `/` with `?owner_id=<uuid>`. The URL is read once on mount; without a
/// usable owner id the widget comes up disabled with the hint as its error.
#[component]
pub fn BookPage() -> impl IntoView {
    let query = use_query_map();
    let identity = Identity::from_owner_id(query.with_untracked(|q| q.get("owner_id")));
    let embedded = query.with_untracked(|q| q.get("embed")).as_deref() == Some("true");

    view! { <BookingWidget identity=identity missing_hint=OWNER_ID_HINT embedded=embedded /> }
}

/// `/book/<slug>`, the shareable per-owner page the embed loader frames
/// with `?embed=true`.
#[component]
pub fn BookSlugPage() -> impl IntoView {
    let params = use_params_map();
    let query = use_query_map();
    let identity = Identity::from_slug(params.with_untracked(|p| p.get("slug")));
    let embedded = query.with_untracked(|q| q.get("embed")).as_deref() == Some("true");

    view! { <BookingWidget identity=identity missing_hint=SLUG_HINT embedded=embedded /> }
}
