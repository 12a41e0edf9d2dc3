use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use listaria_shared::Ad;
use tracing::debug;

use super::actions::FavoriteToggle;
use crate::auth::use_auth;
use crate::components::ad_grid::AdGrid;
use crate::components::category_bar::CategoryBar;
use crate::components::popular_categories::PopularCategories;
use crate::generation::ViewGeneration;
use crate::notify::use_toaster;
use crate::services::{use_listing, use_services};

#[component]
pub fn HomePage() -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    let listing = use_listing();
    let toaster = use_toaster();
    let favorite = FavoriteToggle::new();
    let page_size = services.page_size();

    let ads = RwSignal::new(Vec::<Ad>::new());
    let loading = RwSignal::new(true);
    let page = RwSignal::new(1u32);
    let has_more = RwSignal::new(false);
    let favorites = RwSignal::new(HashSet::<String>::new());
    let generation = StoredValue::new(ViewGeneration::new());
    let favorites_generation = StoredValue::new(ViewGeneration::new());

    on_cleanup(move || {
        if let Some(generation) = generation.try_get_value() {
            generation.invalidate();
        }
        if let Some(generation) = favorites_generation.try_get_value() {
            generation.invalidate();
        }
    });

    let load = move |page_no: u32| {
        let query = listing.query.get_untracked();
        let ticket = generation.with_value(|g| g.next_ticket());
        let api = services.api();
        if page_no == 1 {
            ads.set(Vec::new());
        }
        loading.set(true);

        spawn_local(async move {
            let result = api.list_ads(query.to_filters(page_no, page_size)).await;
            if !ticket.is_current() {
                debug!(page = page_no, "dropping stale listing page");
                return;
            }
            loading.set(false);
            match result {
                Ok(resp) => {
                    has_more.set(resp.has_more(page_size));
                    let refined = query.refine(resp.ads);
                    if page_no == 1 {
                        ads.set(refined);
                    } else {
                        ads.update(|list| list.extend(refined));
                    }
                    page.set(page_no);
                }
                Err(err) => {
                    has_more.set(false);
                    toaster.failure("Could not load ads", &err);
                }
            }
        });
    };

    // Any change to the search, category or location restarts from page 1.
    Effect::new(move |_| {
        listing.query.track();
        load(1);
    });

    let signed_in = auth.is_signed_in_signal();
    Effect::new(move |_| {
        if !signed_in.get() {
            favorites_generation.with_value(|g| g.invalidate());
            favorites.set(HashSet::new());
            return;
        }
        let ticket = favorites_generation.with_value(|g| g.next_ticket());
        let api = services.api();
        spawn_local(async move {
            let Some(result) = ticket.accept(api.favorites().await) else {
                debug!("dropping stale favorites");
                return;
            };
            match result {
                Ok(list) => {
                    favorites.try_set(list.into_iter().map(|ad| ad.id).collect());
                }
                Err(err) => debug!(error = %err, "favorites unavailable"),
            }
        });
    });

    let on_favorite = Callback::new(move |id: String| {
        let current = favorites.with_untracked(|f| f.contains(&id));
        let key = id.clone();
        favorite.toggle(id, current, move |now| {
            favorites.try_update(|f| {
                if now {
                    f.insert(key);
                } else {
                    f.remove(&key);
                }
            });
        });
    });

    let grid_title = move || {
        if listing.query.with(|q| q.is_filtered()) {
            "Search Results"
        } else {
            "All Ads"
        }
    };

    view! {
        <CategoryBar />
        <PopularCategories />
        <div class="max-w-7xl mx-auto px-4 md:px-6 lg:px-8 pt-4">
            <h2 class="text-2xl font-semibold">{grid_title}</h2>
        </div>
        <AdGrid
            ads=ads
            loading=loading
            favorites=favorites
            on_favorite=Some(on_favorite)
        />
        <Show when=move || has_more.get() && !ads.with(Vec::is_empty)>
            <div class="flex justify-center pb-12">
                <button
                    class="btn btn-outline btn-primary"
                    disabled=move || loading.get()
                    on:click=move |_| load(page.get_untracked() + 1)
                >
                    {move || if loading.get() {
                        view! { <span class="loading loading-spinner"></span> "Loading..." }.into_any()
                    } else {
                        "Load more".into_any()
                    }}
                </button>
            </div>
        </Show>
    }
}
