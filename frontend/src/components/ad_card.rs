use leptos::prelude::*;
use listaria_shared::Ad;
use listaria_shared::date::posted_label;
use listaria_shared::price::format_price;

use crate::components::icons::{Heart, ImageIcon, MapPin};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn AdCard(
    ad: Ad,
    #[prop(into)] favorited: Signal<bool>,
    /// Without a handler the heart is hidden.
    #[prop(default = None)]
    on_favorite: Option<Callback<String>>,
) -> impl IntoView {
    let router = use_router();
    let route = AppRoute::AdDetails(ad.id.clone());
    let id = ad.id.clone();
    let price = format_price(ad.price, &ad.currency);
    let posted = posted_label(ad.created_at, chrono::Utc::now());
    let cover = ad.cover_image().map(str::to_string);
    let title = ad.title.clone();
    let featured = ad.is_featured;

    view! {
        <div
            class="card bg-base-100 shadow-sm hover:shadow-md overflow-hidden cursor-pointer group"
            on:click=move |_| router.go(route.clone())
        >
            <figure class="relative aspect-[4/3] overflow-hidden bg-base-200">
                {match cover {
                    Some(src) => view! {
                        <img
                            src=src
                            alt=title.clone()
                            loading="lazy"
                            class="w-full h-full object-cover transition-transform group-hover:scale-105"
                        />
                    }.into_any(),
                    None => view! {
                        <ImageIcon attr:class="h-10 w-10 opacity-30" />
                    }.into_any(),
                }}
                <Show when=move || featured>
                    <span class="badge badge-primary absolute top-2 left-2">"Featured"</span>
                </Show>
                {on_favorite.map(|on_favorite| {
                    let id = id.clone();
                    view! {
                        <button
                            class="btn btn-circle btn-sm absolute top-2 right-2 bg-base-100/80 border-none"
                            class=("text-error", move || favorited.get())
                            aria-label="Favorite"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_favorite.run(id.clone());
                            }
                        >
                            <Heart attr:class=move || {
                                if favorited.get() { "h-4 w-4 fill-current" } else { "h-4 w-4" }
                            } />
                        </button>
                    }
                })}
            </figure>
            <div class="card-body p-4 gap-1">
                <p class="text-xl font-bold text-primary">{price}</p>
                <h3 class="font-semibold line-clamp-2">{title}</h3>
                <div class="flex items-center justify-between text-sm text-base-content/60 mt-1">
                    <span class="flex items-center gap-1 min-w-0">
                        <MapPin attr:class="h-3 w-3 shrink-0" />
                        <span class="truncate">{ad.location.clone()}</span>
                    </span>
                    <span class="shrink-0">{posted}</span>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn AdCardSkeleton() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-sm overflow-hidden">
            <div class="skeleton aspect-[4/3] rounded-none"></div>
            <div class="p-4 space-y-2">
                <div class="skeleton h-6 w-1/2"></div>
                <div class="skeleton h-4 w-full"></div>
                <div class="skeleton h-4 w-2/3"></div>
            </div>
        </div>
    }
}
