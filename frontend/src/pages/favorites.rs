use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use listaria_shared::Ad;
use tracing::debug;

use super::actions::FavoriteToggle;
use crate::components::ad_grid::AdGrid;
use crate::components::empty_state::EmptyState;
use crate::generation::ViewGeneration;
use crate::notify::use_toaster;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn FavoritesPage() -> impl IntoView {
    let services = use_services();
    let toaster = use_toaster();
    let router = use_router();
    let favorite = FavoriteToggle::new();

    let ads = RwSignal::new(Vec::<Ad>::new());
    let loading = RwSignal::new(true);
    // Every listed ad is a favorite; the grid only needs the ids for its hearts.
    let ids = Signal::derive(move || ads.with(|list| list.iter().map(|ad| ad.id.clone()).collect::<HashSet<_>>()));

    let generation = ViewGeneration::new();
    let ticket = generation.next_ticket();
    on_cleanup(move || generation.invalidate());

    let api = services.api();
    spawn_local(async move {
        let Some(result) = ticket.accept(api.favorites().await) else {
            debug!("dropping stale favorites");
            return;
        };
        match result {
            Ok(list) => {
                ads.try_set(list);
            }
            Err(err) => toaster.failure("Could not load favorites", &err),
        }
        loading.try_set(false);
    });

    let on_favorite = Callback::new(move |id: String| {
        let key = id.clone();
        favorite.toggle(id, true, move |still_favorite| {
            if !still_favorite {
                ads.try_update(|list| list.retain(|ad| ad.id != key));
            }
        });
    });

    let count = move || match ads.with(Vec::len) {
        1 => "1 saved item".to_string(),
        n => format!("{n} saved items"),
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 md:px-6 lg:px-8 pt-8">
            <h1 class="text-2xl font-semibold">"My Favorites"</h1>
            <Show when=move || !loading.get()>
                <p class="text-sm opacity-60">{count}</p>
            </Show>
        </div>
        <Show
            when=move || loading.get() || !ads.with(Vec::is_empty)
            fallback=move || view! {
                <div class="max-w-7xl mx-auto px-4 py-8">
                    <EmptyState
                        title="No Favorites Yet"
                        description="You haven't added any items to your favorites. Start browsing and save items you like!"
                    >
                        <button class="btn btn-primary" on:click=move |_| router.go(AppRoute::Home)>
                            "Browse Listings"
                        </button>
                    </EmptyState>
                </div>
            }
        >
            <AdGrid ads=ads loading=loading favorites=ids on_favorite=Some(on_favorite) />
        </Show>
    }
}
