use leptos::prelude::*;
use leptos::task::spawn_local;
use listaria_shared::catalog::CATEGORIES;

use crate::auth::use_auth;
use crate::components::footer::Logo;
use crate::components::icons::{ChevronDown, Heart, LogOut, MapPin, Menu, Plus, Receipt, Search, User, X};
use crate::components::location_modal::LocationModal;
use crate::listing::ALL_CATEGORIES;
use crate::notify::use_toaster;
use crate::services::{AuthTab, use_listing, use_modals};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

/// Action that opens the sell form, or the login dialog while signed out.
///
/// Call during component setup; the returned closure only touches signals.
pub fn use_start_selling() -> impl Fn() + Copy + 'static {
    let auth = use_auth();
    let modals = use_modals();
    let toaster = use_toaster();
    move || {
        if auth.state.with_untracked(|s| s.user.is_some()) {
            modals.sell_open.set(true);
        } else {
            toaster.error("Login required", "Please log in to post an advertisement.");
            modals.open_auth(AuthTab::Login);
        }
    }
}

#[component]
fn SearchBar(#[prop(optional, into)] class: String) -> impl IntoView {
    let listing = use_listing();
    let router = use_router();

    let initial = listing.query.get_untracked();
    let term = RwSignal::new(initial.search);
    let category = RwSignal::new(initial.search_category);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        listing.query.update(|q| {
            q.search = term.get_untracked().trim().to_string();
            q.search_category = category.get_untracked();
        });
        router.go(AppRoute::Home);
    };

    view! {
        <form on:submit=on_submit class=format!("join w-full {class}")>
            <select
                class="select select-bordered join-item w-36"
                aria-label="Category"
                on:change=move |ev| category.set(event_target_value(&ev))
                prop:value=move || category.get()
            >
                <option value=ALL_CATEGORIES>"All Categories"</option>
                {CATEGORIES
                    .iter()
                    .map(|c| view! { <option value=c.id>{c.name}</option> })
                    .collect_view()}
            </select>
            <input
                type="search"
                placeholder="Search for products, brands and more..."
                class="input input-bordered join-item flex-1 min-w-0"
                prop:value=move || term.get()
                on:input=move |ev| term.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-primary join-item gap-2">
                <Search attr:class="h-4 w-4" />
                <span class="hidden sm:inline">"Search"</span>
            </button>
        </form>
    }
}

#[component]
fn UserMenu() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let label = move || auth.user().map(|u| u.label()).unwrap_or_default();
    let initial = move || auth.user().map(|u| u.initial()).unwrap_or('?');

    let on_logout = move |_| {
        spawn_local(async move {
            let _ = auth.logout().await;
            router.go(AppRoute::Home);
        });
    };

    view! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                <div class="avatar placeholder">
                    <div class="bg-primary text-primary-content w-8 rounded-full">
                        <span>{initial}</span>
                    </div>
                </div>
                <span class="hidden lg:inline max-w-32 truncate">{label}</span>
                <ChevronDown attr:class="h-4 w-4" />
            </div>
            <ul tabindex="0" class="dropdown-content menu bg-base-100 rounded-box z-50 w-52 p-2 shadow">
                <li>
                    <Link route=AppRoute::Profile>
                        <User attr:class="h-4 w-4" /> "My Profile"
                    </Link>
                </li>
                <li>
                    <Link route=AppRoute::MyAds>
                        <Receipt attr:class="h-4 w-4" /> "My Advertisement"
                    </Link>
                </li>
                <li>
                    <Link route=AppRoute::Favorites>
                        <Heart attr:class="h-4 w-4" /> "Favorites"
                    </Link>
                </li>
                <li>
                    <button class="text-error" on:click=on_logout>
                        <LogOut attr:class="h-4 w-4" /> "Sign out"
                    </button>
                </li>
            </ul>
        </div>
    }
}

#[component]
fn AuthLinks() -> impl IntoView {
    let modals = use_modals();
    view! {
        <div class="flex items-center gap-1 text-sm">
            <button class="btn btn-ghost btn-sm" on:click=move |_| modals.open_auth(AuthTab::Login)>
                "Log in"
            </button>
            <span class="opacity-40">"|"</span>
            <button class="btn btn-ghost btn-sm" on:click=move |_| modals.open_auth(AuthTab::Register)>
                "Register"
            </button>
        </div>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let listing = use_listing();
    let signed_in = auth.is_signed_in_signal();
    let location_open = RwSignal::new(false);
    let mobile_open = RwSignal::new(false);
    let start_selling = use_start_selling();

    let location_label = move || {
        listing
            .query
            .with(|q| q.location.clone())
            .unwrap_or_else(|| "All India".to_string())
    };

    view! {
        <header class="sticky top-0 z-40 bg-base-100 border-b border-base-300">
            <div class="max-w-7xl mx-auto px-4 md:px-6 lg:px-8">
                <div class="flex items-center gap-4 h-16">
                    <Link route=AppRoute::Home class="flex items-center gap-2 text-xl font-bold text-primary shrink-0">
                        <Logo />
                        "Listaria"
                    </Link>

                    <button
                        class="btn btn-ghost btn-sm gap-1 hidden md:flex"
                        on:click=move |_| location_open.set(true)
                    >
                        <MapPin attr:class="h-4 w-4" />
                        <span class="max-w-36 truncate">{location_label}</span>
                        <ChevronDown attr:class="h-3 w-3" />
                    </button>

                    <SearchBar class="hidden md:flex flex-1" />

                    <div class="hidden md:flex items-center gap-2 ml-auto">
                        <Show when=move || signed_in.get() fallback=|| view! { <AuthLinks /> }>
                            <UserMenu />
                        </Show>
                        <button class="btn btn-primary gap-1" on:click=move |_| start_selling()>
                            <Plus attr:class="h-4 w-4" /> "Sell"
                        </button>
                    </div>

                    <button
                        class="btn btn-ghost btn-square md:hidden ml-auto"
                        aria-label="Menu"
                        on:click=move |_| mobile_open.update(|open| *open = !*open)
                    >
                        <Show when=move || mobile_open.get() fallback=|| view! { <Menu attr:class="h-5 w-5" /> }>
                            <X attr:class="h-5 w-5" />
                        </Show>
                    </button>
                </div>

                <Show when=move || mobile_open.get()>
                    <div class="md:hidden pb-4 space-y-3">
                        <SearchBar />
                        <button
                            class="btn btn-ghost btn-sm gap-1 w-full justify-start"
                            on:click=move |_| {
                                mobile_open.set(false);
                                location_open.set(true);
                            }
                        >
                            <MapPin attr:class="h-4 w-4" />
                            {location_label}
                        </button>
                        <div class="flex items-center justify-between">
                            <Show when=move || signed_in.get() fallback=|| view! { <AuthLinks /> }>
                                <UserMenu />
                            </Show>
                            <button
                                class="btn btn-primary btn-sm gap-1"
                                on:click=move |_| {
                                    mobile_open.set(false);
                                    start_selling();
                                }
                            >
                                <Plus attr:class="h-4 w-4" /> "Sell"
                            </button>
                        </div>
                    </div>
                </Show>
            </div>
        </header>
        <LocationModal open=location_open />
    }
}
