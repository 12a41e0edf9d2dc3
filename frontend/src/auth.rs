//! Leptos bridge for the session.
//!
//! `AuthContext` mirrors the `SessionStore` into a signal so components can
//! react to sign-in and sign-out. Its actions wrap the `SessionGate` with the
//! loading flag and a toast for either outcome; errors are still returned to
//! the caller so forms can keep their own state.

use leptos::prelude::*;

use crate::error::{AppError, AppResult};
use crate::notify::Toaster;
use crate::services::ServicesContext;
use crate::session::{ProviderCredential, Registration, UserIdentity};
use crate::web::BrowserStorage;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserIdentity>,
    /// A sign-in or registration is in flight.
    pub is_loading: bool,
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
    services: ServicesContext,
    toaster: Toaster,
}

impl AuthContext {
    pub fn new(services: ServicesContext, toaster: Toaster) -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self {
            state,
            set_state,
            services,
            toaster,
        }
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.state.with(|s| s.user.clone())
    }

    pub fn is_signed_in_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.is_some()))
    }

    pub fn is_loading_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_loading))
    }

    fn set_loading(&self, loading: bool) {
        self.set_state.update(|s| s.is_loading = loading);
    }

    fn report<T>(&self, result: &AppResult<T>, success: (&str, &str), failure: &str) {
        match result {
            Ok(_) => self.toaster.success(success.0, success.1),
            Err(AppError::Busy) => {}
            Err(err) => self.toaster.failure(failure, err),
        }
    }

    pub async fn login(&self, email: String, password: String) -> AppResult<UserIdentity> {
        let gate = self.services.gate();
        self.set_loading(true);
        let result = gate.login(&email, &password).await;
        self.set_loading(gate.is_busy());
        if let Ok(user) = &result {
            BrowserStorage::remember_email(&user.email);
        }
        self.report(
            &result,
            ("Welcome back!", "You have successfully logged in."),
            "Login failed",
        );
        result
    }

    pub async fn register(&self, form: Registration) -> AppResult<UserIdentity> {
        let gate = self.services.gate();
        self.set_loading(true);
        let result = gate.register(&form).await;
        self.set_loading(gate.is_busy());
        if let Ok(user) = &result {
            BrowserStorage::remember_email(&user.email);
        }
        self.report(
            &result,
            ("Account created!", "Welcome to Listaria."),
            "Registration failed",
        );
        result
    }

    pub async fn login_google(&self, id_token: String) -> AppResult<UserIdentity> {
        let gate = self.services.gate();
        let credential = ProviderCredential::Google { id_token };
        self.set_loading(true);
        let result = gate.login_with_provider(&credential).await;
        self.set_loading(gate.is_busy());
        self.report(
            &result,
            ("Welcome!", "You have successfully logged in with Google."),
            "Login failed",
        );
        result
    }

    /// The session is cleared even when this returns `Err`.
    pub async fn logout(&self) -> AppResult<()> {
        let result = self.services.gate().logout().await;
        self.report(
            &result,
            ("Logged out", "You have been logged out successfully."),
            "Logout failed",
        );
        result
    }

    pub async fn update_display_name(&self, name: String) -> AppResult<UserIdentity> {
        self.services.gate().update_display_name(&name).await
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Feeds every session change into the context signal.
///
/// The subscription lives as long as the app.
pub fn init_auth(ctx: &AuthContext) {
    let store = ctx.services.store();
    let set_state = ctx.set_state;
    set_state.update(|s| s.user = store.current_user());
    store.subscribe(move |session| {
        set_state.update(|s| s.user = session.user().cloned());
    });
}
