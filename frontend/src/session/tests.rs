use super::identity::{AuthGrant, IdentityProvider};
use super::*;
use crate::error::{AppError, AppResult, AuthError, FormField, ValidationError};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};

// =========================================================
// Test doubles
// =========================================================

type CallLog = Rc<RefCell<Vec<String>>>;

/// Identity provider with canned outcomes and a shared call log.
struct ScriptedIdentity {
    calls: CallLog,
    reject_with: Option<AuthError>,
    fail_sign_out: bool,
}

impl ScriptedIdentity {
    fn accepting(calls: &CallLog) -> Self {
        Self {
            calls: calls.clone(),
            reject_with: None,
            fail_sign_out: false,
        }
    }

    fn rejecting(calls: &CallLog, err: AuthError) -> Self {
        Self {
            reject_with: Some(err),
            ..Self::accepting(calls)
        }
    }

    async fn reply(&self, call: String, email: &str, name: Option<&str>) -> AppResult<AuthGrant> {
        self.calls.borrow_mut().push(call);
        // Give concurrently polled callers a chance to run.
        tokio::task::yield_now().await;
        if let Some(err) = &self.reject_with {
            return Err(err.clone().into());
        }
        Ok(AuthGrant {
            user: UserIdentity {
                uid: format!("uid-{email}"),
                email: email.to_string(),
                display_name: name.map(str::to_string),
                photo_url: None,
            },
            token: IdToken::new("token-1"),
        })
    }
}

#[async_trait(?Send)]
impl IdentityProvider for ScriptedIdentity {
    async fn sign_in(&self, email: &str, _password: &str) -> AppResult<AuthGrant> {
        self.reply(format!("sign_in {email}"), email, None).await
    }

    async fn sign_up(&self, name: &str, email: &str, _password: &str) -> AppResult<AuthGrant> {
        self.reply(format!("sign_up {email}"), email, Some(name)).await
    }

    async fn sign_in_with(&self, credential: &ProviderCredential) -> AppResult<AuthGrant> {
        let ProviderCredential::Google { id_token } = credential;
        self.reply(format!("sign_in_with {id_token}"), "g@listaria.in", Some("G"))
            .await
    }

    async fn update_display_name(&self, _token: &IdToken, name: &str) -> AppResult<()> {
        self.calls.borrow_mut().push(format!("rename {name}"));
        Ok(())
    }

    async fn sign_out(&self) -> AppResult<()> {
        self.calls.borrow_mut().push("sign_out".to_string());
        if self.fail_sign_out {
            return Err(crate::error::NetworkError::unreachable("offline").into());
        }
        Ok(())
    }
}

/// Profile directory that records uids and can be told to fail.
struct RecordingProfiles {
    created: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

#[async_trait(?Send)]
impl ProfileDirectory for RecordingProfiles {
    async fn ensure_profile(&self, user: &UserIdentity) -> AppResult<()> {
        self.created.borrow_mut().push(user.uid.clone());
        if self.fail {
            return Err(crate::error::NetworkError::status(409, "exists").into());
        }
        Ok(())
    }
}

struct Fixture {
    gate: SessionGate<ScriptedIdentity, RecordingProfiles>,
    calls: CallLog,
    profiles: Rc<RefCell<Vec<String>>>,
}

fn fixture_with(identity: impl FnOnce(&CallLog) -> ScriptedIdentity, fail_profiles: bool) -> Fixture {
    let calls: CallLog = Rc::default();
    let profiles: Rc<RefCell<Vec<String>>> = Rc::default();
    let gate = SessionGate::new(
        SessionStore::new(),
        identity(&calls),
        RecordingProfiles {
            created: profiles.clone(),
            fail: fail_profiles,
        },
    );
    Fixture {
        gate,
        calls,
        profiles,
    }
}

fn fixture() -> Fixture {
    fixture_with(ScriptedIdentity::accepting, false)
}

fn registration(password: &str, confirm: Option<&str>) -> Registration {
    Registration {
        name: "Asha".to_string(),
        email: "asha@listaria.in".to_string(),
        password: password.to_string(),
        confirm_password: confirm.map(str::to_string),
    }
}

// =========================================================
// Store
// =========================================================

#[test]
fn test_store_notifies_subscribers_until_unsubscribed() {
    let store = SessionStore::new();
    let seen = Rc::new(Cell::new(0));
    let counter = seen.clone();
    let id = store.subscribe(move |_| counter.set(counter.get() + 1));

    store.set(Session::SignedOut);
    assert_eq!(seen.get(), 1);

    store.unsubscribe(id);
    store.set(Session::SignedOut);
    assert_eq!(seen.get(), 1);
}

#[test]
fn test_listener_can_read_store() {
    let store = SessionStore::new();
    let reader = store.clone();
    let observed = Rc::new(RefCell::new(None));
    let sink = observed.clone();
    store.subscribe(move |_| *sink.borrow_mut() = reader.current_user());

    let user = UserIdentity {
        uid: "u1".into(),
        email: "u1@listaria.in".into(),
        display_name: None,
        photo_url: None,
    };
    store.set(Session::SignedIn {
        user: user.clone(),
        token: IdToken::new("t"),
    });
    assert_eq!(*observed.borrow(), Some(user));
}

#[test]
fn test_identity_label_falls_back_to_email() {
    let user = UserIdentity {
        uid: "u".into(),
        email: "ravi.k@listaria.in".into(),
        display_name: Some("  ".into()),
        photo_url: None,
    };
    assert_eq!(user.label(), "ravi.k");
    assert_eq!(user.initial(), 'R');
    assert_eq!(format!("{:?}", IdToken::new("secret")), "IdToken(..)");
}

// =========================================================
// Login
// =========================================================

#[tokio::test]
async fn test_login_with_empty_password_never_calls_network() {
    let f = fixture();
    let err = f.gate.login("asha@listaria.in", "").await.unwrap_err();

    assert_eq!(
        err,
        AppError::Validation(ValidationError::Missing(FormField::Password))
    );
    assert!(f.calls.borrow().is_empty());
    assert!(!f.gate.store().is_signed_in());
}

#[tokio::test]
async fn test_login_with_empty_email_fails_locally() {
    let f = fixture();
    let err = f.gate.login("   ", "secret1").await.unwrap_err();
    assert_eq!(
        err,
        AppError::Validation(ValidationError::Missing(FormField::Email))
    );
    assert!(f.calls.borrow().is_empty());
}

#[tokio::test]
async fn test_login_success_signs_in_and_creates_profile() {
    let f = fixture();
    let user = f.gate.login(" asha@listaria.in ", "secret1").await.unwrap();

    assert_eq!(user.email, "asha@listaria.in");
    assert!(f.gate.store().is_signed_in());
    assert_eq!(f.gate.store().bearer_token(), Some(IdToken::new("token-1")));
    assert_eq!(*f.calls.borrow(), vec!["sign_in asha@listaria.in"]);
    assert_eq!(*f.profiles.borrow(), vec!["uid-asha@listaria.in"]);
    assert!(!f.gate.is_busy());
}

#[tokio::test]
async fn test_login_rejected_with_invalid_credentials() {
    let f = fixture_with(
        |calls| ScriptedIdentity::rejecting(calls, AuthError::InvalidCredentials),
        false,
    );
    let err = f.gate.login("asha@listaria.in", "wrong-pw").await.unwrap_err();

    assert_eq!(err, AppError::Auth(AuthError::InvalidCredentials));
    assert!(!f.gate.store().is_signed_in());
    assert!(f.profiles.borrow().is_empty());
    assert!(!f.gate.is_busy());
}

#[tokio::test]
async fn test_profile_failure_does_not_roll_back_session() {
    let f = fixture_with(ScriptedIdentity::accepting, true);
    f.gate.login("asha@listaria.in", "secret1").await.unwrap();

    assert!(f.gate.store().is_signed_in());
    assert_eq!(f.profiles.borrow().len(), 1);
}

#[tokio::test]
async fn test_second_login_while_in_flight_is_busy() {
    let f = fixture();
    let (first, second) = futures::join!(
        f.gate.login("a@listaria.in", "secret1"),
        f.gate.login("b@listaria.in", "secret1"),
    );

    assert!(first.is_ok());
    assert_eq!(second.unwrap_err(), AppError::Busy);
    assert_eq!(*f.calls.borrow(), vec!["sign_in a@listaria.in"]);
}

#[tokio::test]
async fn test_federated_login_uses_same_side_effect() {
    let f = fixture();
    let credential = ProviderCredential::Google {
        id_token: "jwt".into(),
    };
    let user = f.gate.login_with_provider(&credential).await.unwrap();

    assert_eq!(user.display_name.as_deref(), Some("G"));
    assert_eq!(*f.profiles.borrow(), vec!["uid-g@listaria.in"]);
}

// =========================================================
// Registration
// =========================================================

#[tokio::test]
async fn test_register_password_of_five_fails_locally() {
    let f = fixture();
    let err = f.gate.register(&registration("12345", None)).await.unwrap_err();

    assert_eq!(err, AppError::Validation(ValidationError::PasswordTooShort));
    assert!(f.calls.borrow().is_empty());
}

#[tokio::test]
async fn test_register_password_of_six_passes_length_check() {
    let f = fixture();
    let user = f.gate.register(&registration("123456", None)).await.unwrap();

    assert_eq!(user.display_name.as_deref(), Some("Asha"));
    assert_eq!(*f.calls.borrow(), vec!["sign_up asha@listaria.in"]);
}

#[tokio::test]
async fn test_register_mismatch_fails_locally() {
    let f = fixture();
    let err = f
        .gate
        .register(&registration("secret1", Some("secret2")))
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Validation(ValidationError::PasswordMismatch));

    // A mismatch fails even when the password itself is too short.
    let err = f
        .gate
        .register(&registration("abc", Some("abd")))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(f.calls.borrow().is_empty());
}

#[tokio::test]
async fn test_register_requires_name() {
    let f = fixture();
    let mut form = registration("secret1", Some("secret1"));
    form.name = " ".into();

    let err = f.gate.register(&form).await.unwrap_err();
    assert_eq!(
        err,
        AppError::Validation(ValidationError::Missing(FormField::Name))
    );
}

#[tokio::test]
async fn test_register_maps_backend_rejection() {
    let f = fixture_with(
        |calls| ScriptedIdentity::rejecting(calls, AuthError::EmailAlreadyInUse),
        false,
    );
    let err = f
        .gate
        .register(&registration("secret1", Some("secret1")))
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Auth(AuthError::EmailAlreadyInUse));
}

// =========================================================
// Logout & profile
// =========================================================

#[tokio::test]
async fn test_logout_clears_session_even_when_remote_fails() {
    let f = fixture_with(
        |calls| ScriptedIdentity {
            fail_sign_out: true,
            ..ScriptedIdentity::accepting(calls)
        },
        false,
    );
    f.gate.login("asha@listaria.in", "secret1").await.unwrap();
    assert!(f.gate.store().is_signed_in());

    let result = f.gate.logout().await;

    assert!(result.is_err());
    assert_eq!(f.gate.store().snapshot(), Session::SignedOut);
    assert_eq!(f.gate.store().bearer_token(), None);
}

#[tokio::test]
async fn test_logout_notifies_subscribers() {
    let f = fixture();
    f.gate.login("asha@listaria.in", "secret1").await.unwrap();

    let signed_in = Rc::new(Cell::new(true));
    let flag = signed_in.clone();
    f.gate
        .store()
        .subscribe(move |session| flag.set(session.is_signed_in()));

    f.gate.logout().await.unwrap();
    assert!(!signed_in.get());
}

#[tokio::test]
async fn test_update_display_name_republishes_session() {
    let f = fixture();
    f.gate.login("asha@listaria.in", "secret1").await.unwrap();

    let user = f.gate.update_display_name(" Asha R ").await.unwrap();

    assert_eq!(user.display_name.as_deref(), Some("Asha R"));
    assert_eq!(
        f.gate.store().current_user().and_then(|u| u.display_name),
        Some("Asha R".to_string())
    );
    assert!(f.calls.borrow().contains(&"rename Asha R".to_string()));
}

#[tokio::test]
async fn test_update_display_name_requires_session() {
    let f = fixture();
    let err = f.gate.update_display_name("Asha").await.unwrap_err();
    assert_eq!(err, AppError::Auth(AuthError::SignInRequired));
}
