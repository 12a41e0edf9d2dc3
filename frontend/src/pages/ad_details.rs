use leptos::prelude::*;
use leptos::task::spawn_local;
use listaria_shared::date::{full_date, posted_label};
use listaria_shared::price::format_price;
use listaria_shared::{Ad, catalog};
use tracing::{debug, warn};
use wasm_bindgen_futures::JsFuture;

use super::actions::FavoriteToggle;
use crate::auth::use_auth;
use crate::components::empty_state::EmptyState;
use crate::components::icons::{
    ArrowLeft, Calendar, ChevronLeft, ChevronRight, Heart, ImageIcon, MapPin, MessageSquare,
    Phone, Share, Tag,
};
use crate::error::AppError;
use crate::generation::ViewGeneration;
use crate::notify::use_toaster;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready(Box<Ad>),
    NotFound,
    Failed(String),
}

async fn copy_to_clipboard(text: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let promise = window.navigator().clipboard().write_text(text);
    match JsFuture::from(promise).await {
        Ok(_) => true,
        Err(err) => {
            warn!(error = ?err, "clipboard write failed");
            false
        }
    }
}

fn current_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

#[component]
fn Carousel(images: Vec<String>, title: String, featured: bool) -> impl IntoView {
    let count = images.len();
    let index = RwSignal::new(0usize);
    let images = StoredValue::new(images);

    let step = move |delta: isize| {
        if count > 0 {
            index.update(|i| *i = (*i as isize + delta).rem_euclid(count as isize) as usize);
        }
    };
    let current = move || images.with_value(|imgs| imgs.get(index.get()).cloned());

    view! {
        <div class="card bg-base-100 shadow-sm overflow-hidden">
            <div class="relative aspect-[4/3] bg-base-200 flex items-center justify-center">
                {move || match current() {
                    Some(src) => view! {
                        <img src=src alt=title.clone() class="w-full h-full object-contain" />
                    }.into_any(),
                    None => view! { <ImageIcon attr:class="h-16 w-16 opacity-30" /> }.into_any(),
                }}
                <Show when=move || featured>
                    <span class="badge badge-primary absolute top-3 left-3">"Featured"</span>
                </Show>
                <Show when=move || { count > 1 }>
                    <button
                        class="btn btn-circle btn-sm absolute left-3 top-1/2 -translate-y-1/2 bg-base-100/80 border-none"
                        aria-label="Previous image"
                        on:click=move |_| step(-1)
                    >
                        <ChevronLeft attr:class="h-4 w-4" />
                    </button>
                    <button
                        class="btn btn-circle btn-sm absolute right-3 top-1/2 -translate-y-1/2 bg-base-100/80 border-none"
                        aria-label="Next image"
                        on:click=move |_| step(1)
                    >
                        <ChevronRight attr:class="h-4 w-4" />
                    </button>
                    <span class="badge badge-neutral absolute bottom-3 right-3">
                        {move || format!("{} / {}", index.get() + 1, count)}
                    </span>
                </Show>
            </div>
            <Show when=move || { count > 1 }>
                <div class="flex gap-2 p-3 overflow-x-auto">
                    {images
                        .get_value()
                        .into_iter()
                        .enumerate()
                        .map(|(i, src)| view! {
                            <button
                                class="w-16 h-16 rounded-md overflow-hidden shrink-0 border-2"
                                class=("border-primary", move || index.get() == i)
                                class=("border-transparent", move || index.get() != i)
                                on:click=move |_| index.set(i)
                            >
                                <img src=src class="w-full h-full object-cover" />
                            </button>
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn AdView(ad: Ad) -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    let toaster = use_toaster();
    let favorite = FavoriteToggle::new();

    let is_favorite = RwSignal::new(false);
    let phone_revealed = RwSignal::new(false);
    let ad_id = ad.id.clone();

    // Favorite state is per user; re-check whenever the session changes.
    let signed_in = auth.is_signed_in_signal();
    let favorite_generation = ViewGeneration::new();
    on_cleanup({
        let generation = favorite_generation.clone();
        move || generation.invalidate()
    });
    Effect::new({
        let ad_id = ad_id.clone();
        move |_| {
            if !signed_in.get() {
                favorite_generation.invalidate();
                is_favorite.set(false);
                return;
            }
            let ticket = favorite_generation.next_ticket();
            let api = services.api();
            let ad_id = ad_id.clone();
            spawn_local(async move {
                let Some(result) = ticket.accept(api.is_favorite(&ad_id).await) else {
                    debug!("dropping stale favorite check");
                    return;
                };
                match result {
                    Ok(value) => {
                        is_favorite.try_set(value);
                    }
                    Err(err) => debug!(error = %err, "favorite check failed"),
                }
            });
        }
    });

    let on_favorite = {
        let ad_id = ad_id.clone();
        move |_| {
            favorite.toggle(ad_id.clone(), is_favorite.get_untracked(), move |now| {
                is_favorite.try_set(now);
            });
        }
    };

    let on_share = move |_| {
        let url = current_url();
        spawn_local(async move {
            if copy_to_clipboard(&url).await {
                toaster.success("Link copied!", "Ad link has been copied to clipboard.");
            } else {
                toaster.error("Could not copy link", &url);
            }
        });
    };

    let on_chat = move |_| {
        if favorite.require_sign_in() {
            toaster.info("Chat coming soon", "Chat feature will be available soon!");
        }
    };

    let owner_id = ad.user_id.clone();
    let is_own = move || {
        auth.state
            .with(|s| s.user.as_ref().is_some_and(|u| !owner_id.is_empty() && u.uid == owner_id))
    };

    let phone = ad.visible_phone().map(str::to_string);
    let seller = if ad.user_name.trim().is_empty() {
        "Seller".to_string()
    } else {
        ad.user_name.clone()
    };
    let seller_initial = seller
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('S');
    let member_since = full_date(ad.created_at);

    view! {
        <div class="grid lg:grid-cols-3 gap-6">
            <div class="lg:col-span-2 space-y-6">
                <Carousel images=ad.images.clone() title=ad.title.clone() featured=ad.is_featured />

                <div class="card bg-base-100 shadow-sm">
                    <div class="card-body">
                        <div class="flex items-start justify-between gap-4">
                            <div>
                                <h1 class="text-2xl font-bold">{ad.title.clone()}</h1>
                                <p class="text-3xl font-bold text-primary mt-2">
                                    {format_price(ad.price, &ad.currency)}
                                </p>
                            </div>
                            <div class="flex gap-2">
                                <button
                                    class="btn btn-circle btn-outline"
                                    class=("text-error", move || is_favorite.get())
                                    aria-label="Favorite"
                                    on:click=on_favorite
                                >
                                    <Heart attr:class=move || {
                                        if is_favorite.get() { "h-5 w-5 fill-current" } else { "h-5 w-5" }
                                    } />
                                </button>
                                <button class="btn btn-circle btn-outline" aria-label="Share" on:click=on_share>
                                    <Share attr:class="h-5 w-5" />
                                </button>
                            </div>
                        </div>

                        <div class="flex flex-wrap gap-4 text-sm opacity-70 mt-4">
                            <span class="flex items-center gap-1">
                                <MapPin attr:class="h-4 w-4" />
                                {ad.location.clone()}
                            </span>
                            <span class="flex items-center gap-1">
                                <Calendar attr:class="h-4 w-4" />
                                {format!("Posted {}", posted_label(ad.created_at, chrono::Utc::now()))}
                            </span>
                            <span class="flex items-center gap-1">
                                <Tag attr:class="h-4 w-4" />
                                {ad.condition.label()}
                            </span>
                            <span class="badge badge-outline">
                                {catalog::display_name(&ad.category).to_string()}
                                {(!ad.subcategory.is_empty()).then(|| format!(" · {}", ad.subcategory))}
                            </span>
                        </div>

                        <div class="divider"></div>
                        <h2 class="text-lg font-semibold">"Description"</h2>
                        <p class="whitespace-pre-line opacity-80">{ad.description.clone()}</p>
                    </div>
                </div>
            </div>

            <div class="space-y-4">
                <div class="card bg-base-100 shadow-sm">
                    <div class="card-body gap-4">
                        <div class="flex items-center gap-3">
                            <div class="avatar placeholder">
                                <div class="bg-primary text-primary-content w-12 rounded-full">
                                    <span class="text-lg">{seller_initial}</span>
                                </div>
                            </div>
                            <div>
                                <p class="font-semibold">{seller}</p>
                                <p class="text-sm opacity-60">{format!("Listed on {member_since}")}</p>
                            </div>
                        </div>
                        <div class="divider my-0"></div>

                        {match phone {
                            Some(number) => view! {
                                <Show
                                    when=move || phone_revealed.get()
                                    fallback=move || view! {
                                        <button class="btn btn-primary w-full gap-2" on:click=move |_| phone_revealed.set(true)>
                                            <Phone attr:class="h-4 w-4" />
                                            "Show Phone Number"
                                        </button>
                                    }
                                >
                                    <a href=format!("tel:{number}") class="flex items-center gap-2 p-3 bg-base-200 rounded-lg font-medium">
                                        <Phone attr:class="h-5 w-5 text-primary" />
                                        {number.clone()}
                                    </a>
                                </Show>
                            }.into_any(),
                            None => view! {
                                <p class="text-sm opacity-60 text-center">"The seller has chosen not to show a phone number."</p>
                            }.into_any(),
                        }}

                        <Show
                            when=is_own
                            fallback=move || view! {
                                <button class="btn btn-outline w-full gap-2" on:click=on_chat>
                                    <MessageSquare attr:class="h-4 w-4" />
                                    "Chat with Seller"
                                </button>
                            }
                        >
                            <Link route=AppRoute::MyAds class="btn btn-outline w-full">
                                "This is your ad: manage it"
                            </Link>
                        </Show>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-sm">
                    <div class="card-body">
                        <h3 class="font-semibold mb-1">"Safety Tips"</h3>
                        <ul class="list-disc list-inside text-sm opacity-70 space-y-1">
                            <li>"Meet in a safe public place"</li>
                            <li>"Check the item before you buy"</li>
                            <li>"Pay only after inspecting the item"</li>
                            <li>"Never pay in advance"</li>
                        </ul>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn DetailsSkeleton() -> impl IntoView {
    view! {
        <div class="grid lg:grid-cols-3 gap-6">
            <div class="lg:col-span-2 space-y-6">
                <div class="skeleton aspect-[4/3] w-full"></div>
                <div class="skeleton h-40 w-full"></div>
            </div>
            <div class="skeleton h-80 w-full"></div>
        </div>
    }
}

#[component]
pub fn AdDetailsPage(id: String) -> impl IntoView {
    let services = use_services();
    let router = use_router();
    let state = RwSignal::new(LoadState::Loading);
    let generation = ViewGeneration::new();
    let ticket = generation.next_ticket();

    on_cleanup(move || generation.invalidate());

    let api = services.api();
    spawn_local(async move {
        let result = api.get_ad(&id).await;
        if !ticket.is_current() {
            return;
        }
        let next = match result {
            Ok(ad) => LoadState::Ready(Box::new(ad)),
            Err(AppError::Network(err)) if err.is_not_found() => LoadState::NotFound,
            Err(err) => {
                warn!(ad_id = %id, error = %err, "ad failed to load");
                LoadState::Failed(err.user_message())
            }
        };
        state.set(next);
    });

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8">
            <button class="btn btn-ghost btn-sm gap-2 mb-6" on:click=move |_| router.go(AppRoute::Home)>
                <ArrowLeft attr:class="h-4 w-4" />
                "Back"
            </button>
            {move || match state.get() {
                LoadState::Loading => view! { <DetailsSkeleton /> }.into_any(),
                LoadState::Ready(ad) => view! { <AdView ad=*ad /> }.into_any(),
                LoadState::NotFound => view! {
                    <EmptyState
                        title="Ad not found"
                        description="This ad may have been sold or removed."
                    />
                }.into_any(),
                LoadState::Failed(message) => view! {
                    <EmptyState title="Could not load this ad" description=message />
                }.into_any(),
            }}
        </div>
    }
}
