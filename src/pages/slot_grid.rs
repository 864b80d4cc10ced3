use leptos::prelude::*;

use crate::data::flow::BookingFlow;
use crate::utils::date::unix_to_local_hhmm;

/// The middle of the wizard: loading indicator, empty notice, or one button
/// per slot in the order the availability endpoint returned them. Clicking a
/// button makes it the single selection and opens the details form.
#[component]
pub fn SlotGrid(
    flow: ReadSignal<BookingFlow>,
    set_flow: WriteSignal<BookingFlow>,
) -> impl IntoView {
    view! {
        <div>
            {move || if flow.with(|f| f.loading_slots()) {
                view! {
                    <div class="text-sm text-gray-500">"Loading available times…"</div>
                }.into_any()
            } else {
                view! { <div class="hidden"></div> }.into_any()
            }}

            {move || if flow.with(|f| f.no_slots()) {
                view! {
                    <div class="text-sm text-gray-500">"No available slots for this date."</div>
                }.into_any()
            } else {
                view! { <div class="hidden"></div> }.into_any()
            }}

            <div class="grid grid-cols-3 gap-2">
                {move || {
                    flow.with(|f| f.slots().to_vec())
                        .into_iter()
                        .map(|slot| {
                            view! {
                                <button
                                    class=move || if flow.with(|f| f.is_selected(&slot)) {
                                        "slot-btn selected"
                                    } else {
                                        "slot-btn"
                                    }
                                    on:click=move |_| set_flow.update(|f| f.select_slot(slot))
                                >
                                    {unix_to_local_hhmm(slot.start_time)}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
        </div>
    }
}
