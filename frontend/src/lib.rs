//! Listaria browser client
//!
//! Context-driven layout:
//! - `web::route` / `web::router`: route table and History API router
//! - `session` / `auth`: sign-in state and its Leptos bridge
//! - `api`: typed REST client over the `http::HttpClient` seam
//! - `wizard`: the ad posting flow, independent of the DOM
//! - `components` / `pages`: UI

mod api;
mod auth;
pub mod config;
mod error;
mod generation;
mod http;
mod listing;
pub mod logging;
mod notify;
mod services;
mod session;
mod web;
mod wizard;

mod components {
    pub mod ad_card;
    pub mod ad_grid;
    pub mod auth_modal;
    pub mod category_bar;
    pub mod empty_state;
    pub mod footer;
    pub mod header;
    pub mod icons;
    pub mod location_modal;
    pub mod login_required;
    pub mod modal;
    pub mod popular_categories;
    pub mod sell_form;
    pub mod sell_modal;
    pub mod toast;
}

mod pages {
    mod actions;
    pub mod ad_details;
    pub mod favorites;
    pub mod home;
    pub mod my_ads;
    pub mod profile;
    pub mod sell;
}

use leptos::prelude::*;

use crate::auth::{AuthContext, init_auth, use_auth};
use crate::components::auth_modal::AuthModal;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::login_required::LoginRequired;
use crate::components::sell_modal::SellModal;
use crate::components::toast::ToastHost;
use crate::config::RuntimeConfig;
use crate::notify::Toaster;
use crate::pages::ad_details::AdDetailsPage;
use crate::pages::favorites::FavoritesPage;
use crate::pages::home::HomePage;
use crate::pages::my_ads::MyAdsPage;
use crate::pages::profile::ProfilePage;
use crate::pages::sell::SellPage;
use crate::services::{ListingContext, ModalContext, Services, ServicesContext};
use crate::web::route::AppRoute;
use crate::web::router::{Link, Router, RouterOutlet};

fn login_message(route: &AppRoute) -> &'static str {
    match route {
        AppRoute::Sell => "Please log in to post an advertisement.",
        AppRoute::MyAds => "Please log in to view your advertisements.",
        AppRoute::Favorites => "Please log in to view your favorite items.",
        AppRoute::Profile => "Please log in to view your profile.",
        _ => "Please log in to continue.",
    }
}

fn page(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::AdDetails(id) => view! { <AdDetailsPage id=id /> }.into_any(),
        AppRoute::Sell => view! { <SellPage /> }.into_any(),
        AppRoute::MyAds => view! { <MyAdsPage /> }.into_any(),
        AppRoute::Favorites => view! { <FavoritesPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFound /> }.into_any(),
    }
}

/// Renders `route` while signed in and the login card otherwise.
///
/// Only a sign-in or sign-out swaps the view; other auth state changes do not
/// remount the page.
#[component]
fn Guarded(route: AppRoute) -> impl IntoView {
    let auth = use_auth();
    let signed_in = Memo::new(move |_| auth.state.with(|s| s.user.is_some()));
    let message = login_message(&route);

    move || {
        if signed_in.get() {
            page(route.clone())
        } else {
            view! { <LoginRequired message=message /> }.into_any()
        }
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-24">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <Link route=AppRoute::Home class="btn btn-primary mt-6">
                    "Back to home"
                </Link>
            </div>
        </div>
    }
}

fn route_matcher(route: AppRoute) -> AnyView {
    if route.requires_auth() {
        view! { <Guarded route=route /> }.into_any()
    } else {
        page(route)
    }
}

#[component]
pub fn App(config: RuntimeConfig) -> impl IntoView {
    // 1. Toasts first; every other context reports through them.
    let toaster = Toaster::new();
    provide_context(toaster);

    // 2. Concrete collaborators.
    let services = ServicesContext::new(Services::new(config));
    provide_context(services);

    // 3. Session bridge, seeded from the stored session.
    let auth_ctx = AuthContext::new(services, toaster);
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 4. Shared UI state.
    provide_context(ModalContext::new());
    provide_context(ListingContext::new());

    view! {
        <Router>
            <div class="min-h-screen flex flex-col bg-base-200">
                <Header />
                <main class="flex-1">
                    <RouterOutlet matcher=route_matcher />
                </main>
                <Footer />
            </div>
            <AuthModal />
            <SellModal />
            <ToastHost />
        </Router>
    }
}
