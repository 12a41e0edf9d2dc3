use leptos::prelude::*;

use crate::components::icons::{MapPin, Search};
use crate::components::modal::Modal;
use crate::listing::search_locations;
use crate::notify::use_toaster;
use crate::services::use_listing;

#[component]
pub fn LocationModal(open: RwSignal<bool>) -> impl IntoView {
    let listing = use_listing();
    let toaster = use_toaster();
    let term = RwSignal::new(String::new());

    let choose = move |location: Option<String>| {
        let description = match &location {
            Some(loc) => format!("Showing results for {loc}"),
            None => "Showing results for all locations".to_string(),
        };
        listing.set_location(location);
        toaster.success("Location updated", &description);
        term.set(String::new());
        open.set(false);
    };

    view! {
        <Modal open=open title="Choose your location" class="max-w-md">
            <div class="space-y-4">
                <label class="input input-bordered flex items-center gap-2">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="search"
                        class="grow"
                        placeholder="Search city, area or locality"
                        prop:value=move || term.get()
                        on:input=move |ev| term.set(event_target_value(&ev))
                    />
                </label>

                <button
                    class="btn btn-outline btn-primary w-full justify-start gap-2"
                    on:click=move |_| choose(None)
                >
                    <MapPin attr:class="h-4 w-4" />
                    "All India"
                </button>

                <div class="border-t border-base-300 pt-4">
                    <p class="text-sm font-medium opacity-60 mb-3">"Popular locations"</p>
                    <ul class="menu p-0 w-full">
                        {move || {
                            let matches = term.with(|t| search_locations(t));
                            if matches.is_empty() {
                                return view! {
                                    <li class="text-sm opacity-60 p-3">"No matching locations"</li>
                                }
                                .into_any();
                            }
                            matches
                                .into_iter()
                                .map(|location| view! {
                                    <li>
                                        <button on:click=move |_| choose(Some(location.to_string()))>
                                            <MapPin attr:class="h-4 w-4 opacity-60" />
                                            {location}
                                        </button>
                                    </li>
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </ul>
                </div>
            </div>
        </Modal>
    }
}
