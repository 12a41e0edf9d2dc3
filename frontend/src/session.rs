//! Session state.
//!
//! `SessionStore` is the single owner of the current `Session`. Only the
//! `session` module can change it (through `SessionGate`); everything else
//! reads snapshots or subscribes to changes.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

mod gate;
pub mod identity;
mod validation;

pub use gate::{ProfileDirectory, Registration, SessionGate};
pub use identity::ProviderCredential;
pub use validation::{validate_login, validate_registration};

// =========================================================
// Session model
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl UserIdentity {
    /// Display name, or the local part of the email when there is none.
    pub fn label(&self) -> String {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Avatar letter.
    pub fn initial(&self) -> char {
        self.label()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// Bearer token issued by the identity provider. Kept in memory only.
#[derive(Clone, PartialEq, Eq)]
pub struct IdToken(String);

impl IdToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdToken(..)")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn { user: UserIdentity, token: IdToken },
}

impl Session {
    pub fn user(&self) -> Option<&UserIdentity> {
        match self {
            Session::SignedIn { user, .. } => Some(user),
            Session::SignedOut => None,
        }
    }

    pub fn token(&self) -> Option<&IdToken> {
        match self {
            Session::SignedIn { token, .. } => Some(token),
            Session::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn { .. })
    }
}

// =========================================================
// Store
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&Session)>;

#[derive(Default)]
struct StoreInner {
    session: Session,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

/// Shared handle to the session. Clones observe the same state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.set(session);
        store
    }

    pub fn snapshot(&self) -> Session {
        self.inner.borrow().session.clone()
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.inner.borrow().session.user().cloned()
    }

    pub fn bearer_token(&self) -> Option<IdToken> {
        self.inner.borrow().session.token().cloned()
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.borrow().session.is_signed_in()
    }

    /// Registers a listener called after every change.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(existing, _)| *existing != id);
    }

    /// Replaces the session and notifies listeners.
    ///
    /// Listeners run after the borrow is released, so they may read the store.
    fn set(&self, session: Session) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            inner.session = session.clone();
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(&session);
        }
    }
}

#[cfg(test)]
mod tests;
