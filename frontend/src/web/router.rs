//! History API router.
//!
//! Every `window.history` call lives here. The current `AppRoute` is a signal;
//! `RouterOutlet` renders whatever the matcher returns for it. Guarding is the
//! matcher's job: protected pages render a login card instead of redirecting.

use leptos::prelude::*;
use tracing::debug;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
}

impl RouterService {
    fn new() -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        Self {
            current_route,
            set_route,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn navigate(&self, path: &str) {
        self.go(AppRoute::from_path(path));
    }

    pub fn go(&self, route: AppRoute) {
        if self.current_route.get_untracked() == route {
            return;
        }
        debug!(to = %route, "navigate");
        push_history_state(&route.to_path());
        self.set_route.set(route);
        scroll_to_top();
    }

    /// Back/forward buttons.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // The listener lives as long as the page.
        closure.forget();
    }
}

fn provide_router() -> RouterService {
    let router = RouterService::new();
    router.init_popstate_listener();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// =========================================================
// UI components
// =========================================================

#[component]
pub fn Router(children: Children) -> impl IntoView {
    provide_router();
    children()
}

#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// In-app link: plain clicks go through the router, modified clicks (new
/// tab, new window) keep the browser default.
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = route.to_path();

    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.go(route.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
