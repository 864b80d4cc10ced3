use leptos::prelude::*;

use crate::data::api::{fetch_availability, submit_booking};
use crate::data::booking::{BookingRequest, Identity};
use crate::data::flow::BookingFlow;
use crate::pages::slot_grid::SlotGrid;
use crate::utils::date::{today_ymd, unix_to_local_hhmm};
use crate::utils::messaging::notify_parent;

/// The booking wizard. Both addressed pages render this with whatever
/// identity their URL resolved; everything past that point is identical.
///
/// All wizard state lives in one [`BookingFlow`] signal, so a response from
/// a date the visitor has already moved away from is recognized by its
/// sequence number and dropped instead of clobbering the newer slot list.
#[component]
pub fn BookingWidget(
    identity: Option<Identity>,
    missing_hint: &'static str,
    embedded: bool,
) -> impl IntoView {
    let today = today_ymd();
    let picker_disabled = identity.is_none();
    let initial = match &identity {
        Some(_) => BookingFlow::new(today.clone()),
        None => BookingFlow::missing_identity(today.clone(), missing_hint),
    };

    let (flow, set_flow) = create_signal(initial);
    let (name_input, set_name_input) = create_signal(String::new());
    let (email_input, set_email_input) = create_signal(String::new());
    let identity = StoredValue::new(identity);

    let fetch_slots = move |date: String| {
        let Some(identity) = identity.get_value() else {
            return;
        };
        let mut seq = None;
        set_flow.update(|flow| seq = flow.begin_availability(&date));
        let Some(seq) = seq else {
            return;
        };

        leptos::task::spawn_local(async move {
            match fetch_availability(&identity, &date).await {
                Ok(data) => {
                    set_flow.update(|flow| {
                        flow.availability_loaded(seq, data.owner_email, data.slots);
                    });
                }
                Err(err) => {
                    set_flow.update(|flow| {
                        flow.availability_failed(seq, err.to_string());
                    });
                }
            }
        });
    };

    let handle_book = move |_| {
        let Some(identity) = identity.get_value() else {
            return;
        };
        let customer_name = name_input.get();
        let customer_email = email_input.get();
        let mut payload = None;
        set_flow.update(|flow| {
            payload = flow.begin_booking(&customer_name, &customer_email);
        });
        let Some((slot, customer_name, customer_email)) = payload else {
            return;
        };

        let request = BookingRequest {
            identity,
            start_time: slot.start_time,
            end_time: slot.end_time,
            customer_name,
            customer_email,
        };
        leptos::task::spawn_local(async move {
            match submit_booking(&request).await {
                Ok(confirmation) => {
                    notify_parent(&confirmation);
                    set_flow.update(|flow| flow.booking_confirmed(confirmation));
                }
                Err(err) => {
                    set_flow.update(|flow| flow.booking_failed(err.to_string()));
                }
            }
        });
    };

    // Load today's slots straight away when the URL resolved an identity.
    #[cfg(not(feature = "ssr"))]
    if identity.with_value(|identity| identity.is_some()) {
        fetch_slots(today.clone());
    }

    view! {
        <div class={if embedded { "max-w-md mx-auto p-3" } else { "max-w-md mx-auto p-4 mt-8" }}>
            {(!embedded).then(|| view! {
                <h2 class="text-2xl font-bold text-gray-800 mb-4">"Book a time"</h2>
            })}

            {move || match flow.with(|f| f.owner_email().map(str::to_string)) {
                Some(email) => view! {
                    <div class="text-sm text-gray-600 mb-2">{format!("Booking with {email}")}</div>
                }.into_any(),
                None => view! { <div class="hidden"></div> }.into_any(),
            }}

            {move || match flow.with(|f| f.error().map(str::to_string)) {
                Some(message) => view! {
                    <div class="mb-2 px-3 py-2 text-sm text-red-700 bg-red-50 border border-red-200 rounded-md">
                        {message}
                    </div>
                }.into_any(),
                None => view! { <div class="hidden"></div> }.into_any(),
            }}

            <div class:hidden=move || !flow.with(|f| f.shows_date())>
                <label for="datePicker" class="text-sm font-medium text-gray-700 mb-1 block">
                    "Pick a date"
                </label>
                <input
                    id="datePicker"
                    type="date"
                    class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                    min=today.clone()
                    value=today.clone()
                    prop:value=move || flow.with(|f| f.date().to_string())
                    disabled=picker_disabled
                    on:change=move |ev| {
                        let date = event_target_value(&ev);
                        if !date.is_empty() {
                            fetch_slots(date);
                        }
                    }
                />
            </div>

            <div class="mt-4" class:hidden=move || !flow.with(|f| f.shows_slots())>
                <SlotGrid flow=flow set_flow=set_flow />
            </div>

            <div class="mt-4 flex flex-col gap-2" class:hidden=move || !flow.with(|f| f.shows_form())>
                <input
                    type="text"
                    class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="Your name"
                    prop:value={name_input}
                    on:input=move |ev| set_name_input.set(event_target_value(&ev))
                />
                <input
                    type="email"
                    class="px-3 py-2 border border-gray-300 rounded-md"
                    placeholder="you@example.com"
                    prop:value={email_input}
                    on:input=move |ev| set_email_input.set(event_target_value(&ev))
                />
                <button
                    class="px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed"
                    disabled=move || !flow.with(|f| f.can_book())
                    on:click=move |_| handle_book(())
                >
                    {move || if flow.with(|f| f.submitting()) {
                        view! { <span class="spinner"></span> " Booking…" }.into_any()
                    } else {
                        view! { "Confirm Booking" }.into_any()
                    }}
                </button>
            </div>

            {move || match flow.with(|f| f.confirmation().cloned()) {
                Some(confirmation) => view! {
                    <div class="mt-4 p-4 bg-green-50 border border-green-200 rounded-md">
                        <h3 class="text-lg font-semibold text-green-800">"Booking confirmed"</h3>
                        <div class="mt-2 text-sm text-gray-700">
                            <div class="flex justify-between py-1 border-b border-green-100">
                                <span class="font-medium">"Date"</span>
                                <span>{flow.with(|f| f.date().to_string())}</span>
                            </div>
                            <div class="flex justify-between py-1 border-b border-green-100">
                                <span class="font-medium">"Time"</span>
                                <span>{format!(
                                    "{} – {}",
                                    unix_to_local_hhmm(confirmation.start_time),
                                    unix_to_local_hhmm(confirmation.end_time),
                                )}</span>
                            </div>
                            <div class="flex justify-between py-1 border-b border-green-100">
                                <span class="font-medium">"Name"</span>
                                <span>{confirmation.customer_name}</span>
                            </div>
                            <div class="flex justify-between py-1">
                                <span class="font-medium">"Email"</span>
                                <span>{confirmation.customer_email}</span>
                            </div>
                        </div>
                    </div>
                }.into_any(),
                None => view! { <div class="hidden"></div> }.into_any(),
            }}
        </div>
    }
}
