//! Application wiring.
//!
//! `Services` holds the concrete collaborators (API client, session gate,
//! image codec). They are `!Send`, so the context carries them in a local
//! `StoredValue`. `ModalContext` and `ListingContext` are the UI state shared
//! across pages.

use std::rc::Rc;

use leptos::prelude::*;

use crate::api::MarketplaceApi;
use crate::config::RuntimeConfig;
use crate::listing::ListingQuery;
use crate::session::identity::IdentityToolkit;
use crate::session::{SessionGate, SessionStore};
use crate::web::{BrowserStorage, CanvasCodec, GlooHttpClient};

pub type Api = MarketplaceApi<GlooHttpClient>;
pub type Gate = SessionGate<IdentityToolkit<GlooHttpClient>, Api>;

pub struct Services {
    pub config: RuntimeConfig,
    pub store: SessionStore,
    pub api: Api,
    pub gate: Rc<Gate>,
    pub codec: CanvasCodec,
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

impl Services {
    pub fn new(config: RuntimeConfig) -> Self {
        let store = SessionStore::new();
        let client = Rc::new(GlooHttpClient);
        let api = MarketplaceApi::new(client.clone(), &config.api_base_url, store.clone());

        let mut identity = IdentityToolkit::new(
            client,
            &config.identity_endpoint,
            config.identity_api_key.clone(),
        );
        if let Some(origin) = page_origin() {
            identity = identity.with_request_uri(origin);
        }
        let gate = Rc::new(SessionGate::new(store.clone(), identity, api.clone()));

        Self {
            config,
            store,
            api,
            gate,
            codec: CanvasCodec,
        }
    }
}

#[derive(Clone, Copy)]
pub struct ServicesContext(StoredValue<Services, LocalStorage>);

impl ServicesContext {
    pub fn new(services: Services) -> Self {
        Self(StoredValue::new_local(services))
    }

    pub fn api(&self) -> Api {
        self.0.with_value(|s| s.api.clone())
    }

    pub fn gate(&self) -> Rc<Gate> {
        self.0.with_value(|s| s.gate.clone())
    }

    pub fn store(&self) -> SessionStore {
        self.0.with_value(|s| s.store.clone())
    }

    pub fn codec(&self) -> CanvasCodec {
        self.0.with_value(|s| s.codec)
    }

    pub fn page_size(&self) -> u32 {
        self.0.with_value(|s| s.config.page_size)
    }

    pub fn google_client_id(&self) -> Option<String> {
        self.0.with_value(|s| s.config.google_client_id.clone())
    }
}

pub fn use_services() -> ServicesContext {
    use_context::<ServicesContext>().expect("ServicesContext should be provided")
}

// =========================================================
// Shared UI state
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// Modals that can be opened from anywhere in the tree.
#[derive(Clone, Copy)]
pub struct ModalContext {
    pub auth_open: RwSignal<bool>,
    pub auth_tab: RwSignal<AuthTab>,
    pub sell_open: RwSignal<bool>,
}

impl ModalContext {
    pub fn new() -> Self {
        Self {
            auth_open: RwSignal::new(false),
            auth_tab: RwSignal::new(AuthTab::Login),
            sell_open: RwSignal::new(false),
        }
    }

    pub fn open_auth(&self, tab: AuthTab) {
        self.auth_tab.set(tab);
        self.auth_open.set(true);
    }
}

impl Default for ModalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_modals() -> ModalContext {
    use_context::<ModalContext>().expect("ModalContext should be provided")
}

/// Home page query, fed by the header search and the location picker.
#[derive(Clone, Copy)]
pub struct ListingContext {
    pub query: RwSignal<ListingQuery>,
}

impl ListingContext {
    /// Starts from the location remembered in local storage.
    pub fn new() -> Self {
        let query = ListingQuery {
            location: BrowserStorage::location(),
            ..Default::default()
        };
        Self {
            query: RwSignal::new(query),
        }
    }

    pub fn set_location(&self, location: Option<String>) {
        BrowserStorage::set_location(location.as_deref());
        self.query.update(|q| q.location = location);
    }
}

impl Default for ListingContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_listing() -> ListingContext {
    use_context::<ListingContext>().expect("ListingContext should be provided")
}
