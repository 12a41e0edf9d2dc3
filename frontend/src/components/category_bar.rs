use leptos::prelude::*;
use listaria_shared::catalog::CATEGORIES;

use crate::services::use_listing;

/// Clicking the selected category again clears it.
#[component]
pub fn CategoryBar() -> impl IntoView {
    let listing = use_listing();

    let toggle = move |id: &'static str| {
        listing.query.update(|q| {
            q.category = match q.category.as_deref() {
                Some(current) if current == id => None,
                _ => Some(id.to_string()),
            };
        });
    };

    view! {
        <nav class="border-b border-base-300 bg-base-100">
            <div class="max-w-7xl mx-auto px-4 md:px-6 lg:px-8">
                <div class="flex items-center gap-6 overflow-x-auto py-3">
                    {CATEGORIES
                        .iter()
                        .map(|category| {
                            let id = category.id;
                            let selected = move || {
                                listing.query.with(|q| q.category.as_deref() == Some(id))
                            };
                            view! {
                                <button
                                    class="text-sm whitespace-nowrap px-2 py-1 rounded"
                                    class=("text-primary", selected)
                                    class=("font-medium", selected)
                                    class=("text-base-content/60", move || !selected())
                                    on:click=move |_| toggle(id)
                                >
                                    {category.name}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </nav>
    }
}
