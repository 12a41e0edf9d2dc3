use std::cell::Cell;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::identity::{AuthGrant, IdentityProvider, ProviderCredential};
use super::validation::{validate_login, validate_registration};
use super::{Session, SessionStore, UserIdentity};
use crate::error::{AppError, AppResult, AuthError, FormField, ValidationError};

/// Backend profile records, created after every sign-in.
#[async_trait(?Send)]
pub trait ProfileDirectory {
    async fn ensure_profile(&self, user: &UserIdentity) -> AppResult<()>;
}

/// Registration form values.
///
/// `confirm_password` is `None` when the form has no confirmation field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
}

/// Clears the in-flight flag however the operation ends.
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// The only writer of the session.
///
/// Sign-in operations validate locally first, then call the identity
/// provider, then publish the new session and try to create the backend
/// profile. Only one sign-in operation may be in flight.
pub struct SessionGate<I, P> {
    store: SessionStore,
    identity: I,
    profiles: P,
    in_flight: Cell<bool>,
}

impl<I: IdentityProvider, P: ProfileDirectory> SessionGate<I, P> {
    pub fn new(store: SessionStore, identity: I, profiles: P) -> Self {
        Self {
            store,
            identity,
            profiles,
            in_flight: Cell::new(false),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    fn begin(&self) -> AppResult<InFlight<'_>> {
        if self.in_flight.replace(true) {
            return Err(AppError::Busy);
        }
        Ok(InFlight(&self.in_flight))
    }

    /// Publishes the session, then attempts the profile side effect.
    async fn establish(&self, grant: AuthGrant) -> UserIdentity {
        let user = grant.user.clone();
        self.store.set(Session::SignedIn {
            user: grant.user,
            token: grant.token,
        });
        info!(uid = %user.uid, "signed in");

        if let Err(err) = self.profiles.ensure_profile(&user).await {
            debug!(uid = %user.uid, error = %err, "profile sync skipped");
        }
        user
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<UserIdentity> {
        let email = validate_login(email, password)?;
        let _guard = self.begin()?;

        let grant = self
            .identity
            .sign_in(&email, password)
            .await
            .inspect_err(|err| warn!(error = %err, "login rejected"))?;
        Ok(self.establish(grant).await)
    }

    pub async fn register(&self, form: &Registration) -> AppResult<UserIdentity> {
        let (name, email) = validate_registration(form)?;
        let _guard = self.begin()?;

        let grant = self
            .identity
            .sign_up(&name, &email, &form.password)
            .await
            .inspect_err(|err| warn!(error = %err, "registration rejected"))?;
        Ok(self.establish(grant).await)
    }

    pub async fn login_with_provider(
        &self,
        credential: &ProviderCredential,
    ) -> AppResult<UserIdentity> {
        let _guard = self.begin()?;

        let grant = self
            .identity
            .sign_in_with(credential)
            .await
            .inspect_err(|err| warn!(error = %err, "federated login rejected"))?;
        Ok(self.establish(grant).await)
    }

    /// Clears the session, then reports the remote sign-out outcome.
    ///
    /// The local session is gone even when this returns `Err`.
    pub async fn logout(&self) -> AppResult<()> {
        let previous = self.store.current_user();
        self.store.set(Session::SignedOut);
        if let Some(user) = previous {
            info!(uid = %user.uid, "signed out");
        }

        self.identity
            .sign_out()
            .await
            .inspect_err(|err| warn!(error = %err, "remote sign-out failed"))
    }

    /// Pushes a new display name to the identity provider and republishes
    /// the session with it.
    pub async fn update_display_name(&self, name: &str) -> AppResult<UserIdentity> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Missing(FormField::Name).into());
        }
        let Session::SignedIn { mut user, token } = self.store.snapshot() else {
            return Err(AuthError::SignInRequired.into());
        };

        self.identity.update_display_name(&token, name).await?;

        // Skip the publish if the user signed out meanwhile.
        if self.store.bearer_token().as_ref() != Some(&token) {
            return Ok(user);
        }
        user.display_name = Some(name.to_string());
        self.store.set(Session::SignedIn {
            user: user.clone(),
            token,
        });
        Ok(user)
    }
}
