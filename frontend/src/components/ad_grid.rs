use std::collections::HashSet;

use leptos::prelude::*;
use listaria_shared::Ad;

use crate::components::ad_card::{AdCard, AdCardSkeleton};
use crate::components::empty_state::EmptyState;

const SKELETON_CARDS: usize = 8;

/// Skeletons while the first page loads, an empty state when nothing matched.
#[component]
pub fn AdGrid(
    #[prop(into)] ads: Signal<Vec<Ad>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] favorites: Signal<HashSet<String>>,
    #[prop(default = None)] on_favorite: Option<Callback<String>>,
    #[prop(optional, into)] title: Option<String>,
) -> impl IntoView {
    let is_empty = move || ads.with(Vec::is_empty);

    let body = move || {
        if is_empty() && loading.get() {
            return view! {
                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6">
                    {(0..SKELETON_CARDS).map(|_| view! { <AdCardSkeleton /> }).collect_view()}
                </div>
            }
            .into_any();
        }
        if is_empty() {
            return view! { <EmptyState /> }.into_any();
        }
        view! {
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6">
                <For each=move || ads.get() key=|ad| ad.id.clone() let:ad>
                    {
                        let id = ad.id.clone();
                        let favorited = Signal::derive(move || favorites.with(|f| f.contains(&id)));
                        view! { <AdCard ad=ad favorited=favorited on_favorite=on_favorite /> }
                    }
                </For>
            </div>
        }
        .into_any()
    };

    view! {
        <section class="py-8">
            <div class="max-w-7xl mx-auto px-4 md:px-6 lg:px-8">
                {title.map(|title| view! { <h2 class="text-2xl font-semibold mb-6">{title}</h2> })}
                {body}
            </div>
        </section>
    }
}
