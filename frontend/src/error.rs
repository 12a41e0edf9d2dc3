//! Client error taxonomy
//!
//! - `ValidationError`: local, raised before any network call
//! - `AuthError`: identity provider rejections, mapped from provider codes
//! - `NetworkError`: transport failures and non-2xx responses
//! - `UploadError`: per-file image failures (decode, encode or transfer)

use std::fmt;
use thiserror::Error;

// =========================================================
// Validation
// =========================================================

pub const MIN_PASSWORD_LEN: usize = 6;

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Password,
    Category,
    Subcategory,
    Title,
    Description,
    Price,
    Images,
    Location,
    Phone,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Password => "Password",
            FormField::Category => "Category",
            FormField::Subcategory => "Subcategory",
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Price => "Price",
            FormField::Images => "Photos",
            FormField::Location => "Location",
            FormField::Phone => "Phone number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Missing(FormField),
    #[error("Enter a valid price")]
    InvalidPrice,
    #[error("Password should be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Field the message should be shown next to, if any.
    pub fn field(&self) -> Option<FormField> {
        match self {
            ValidationError::Missing(field) => Some(*field),
            ValidationError::InvalidPrice => Some(FormField::Price),
            ValidationError::PasswordTooShort | ValidationError::PasswordMismatch => {
                Some(FormField::Password)
            }
        }
    }
}

// =========================================================
// Authentication
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
    EmailAlreadyInUse,
    WeakPassword,
    InvalidEmail,
    UserDisabled,
    TooManyAttempts,
    PopupClosed,
    Misconfigured,
    /// The operation needs a signed-in session.
    SignInRequired,
    /// A code with no entry in the lookup table.
    Unknown(String),
}

/// Provider codes, in both the REST (`EMAIL_EXISTS`) and SDK
/// (`auth/email-already-in-use`) spellings.
const AUTH_CODES: &[(&str, AuthError)] = &[
    ("INVALID_LOGIN_CREDENTIALS", AuthError::InvalidCredentials),
    ("INVALID_PASSWORD", AuthError::InvalidCredentials),
    ("EMAIL_NOT_FOUND", AuthError::InvalidCredentials),
    ("auth/invalid-credential", AuthError::InvalidCredentials),
    ("auth/wrong-password", AuthError::InvalidCredentials),
    ("auth/user-not-found", AuthError::InvalidCredentials),
    ("EMAIL_EXISTS", AuthError::EmailAlreadyInUse),
    ("auth/email-already-in-use", AuthError::EmailAlreadyInUse),
    ("WEAK_PASSWORD", AuthError::WeakPassword),
    ("auth/weak-password", AuthError::WeakPassword),
    ("INVALID_EMAIL", AuthError::InvalidEmail),
    ("auth/invalid-email", AuthError::InvalidEmail),
    ("USER_DISABLED", AuthError::UserDisabled),
    ("auth/user-disabled", AuthError::UserDisabled),
    ("TOO_MANY_ATTEMPTS_TRY_LATER", AuthError::TooManyAttempts),
    ("auth/too-many-requests", AuthError::TooManyAttempts),
    ("auth/popup-closed-by-user", AuthError::PopupClosed),
    ("API_KEY_INVALID", AuthError::Misconfigured),
    ("CONFIGURATION_NOT_FOUND", AuthError::Misconfigured),
];

impl AuthError {
    /// Maps a provider code to an `AuthError`.
    ///
    /// The REST API appends details after a colon
    /// (`"WEAK_PASSWORD : Password should be at least 6 characters"`), so only
    /// the leading token is looked up.
    pub fn from_code(raw: &str) -> Self {
        let code = raw.split(':').next().unwrap_or(raw).trim();
        AUTH_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, err)| err.clone())
            .unwrap_or_else(|| AuthError::Unknown(code.to_string()))
    }

    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::EmailAlreadyInUse => "An account with this email already exists".to_string(),
            AuthError::WeakPassword => {
                format!("Password should be at least {MIN_PASSWORD_LEN} characters")
            }
            AuthError::InvalidEmail => "Please enter a valid email address".to_string(),
            AuthError::UserDisabled => "This account has been disabled".to_string(),
            AuthError::TooManyAttempts => {
                "Too many attempts. Please wait a moment and try again".to_string()
            }
            AuthError::PopupClosed => "Sign-in was cancelled".to_string(),
            AuthError::Misconfigured => "Sign-in is not configured for this site".to_string(),
            AuthError::SignInRequired => "Please log in to continue".to_string(),
            AuthError::Unknown(code) => format!("Authentication failed ({code})"),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for AuthError {}

// =========================================================
// Network & upload
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkError {
    /// HTTP status; `None` when the backend was unreachable.
    pub status: Option<u16>,
    /// Machine-readable code from the error body, if the backend sent one.
    pub code: Option<String>,
    pub message: String,
}

impl NetworkError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            code: None,
            message: message.into(),
        }
    }

    /// A body that could not be encoded or decoded.
    pub fn malformed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some("MALFORMED_BODY".to_string()),
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.code) {
            (_, Some(code)) if code == "MALFORMED_BODY" => {
                write!(f, "Unexpected response from the server: {}", self.message)
            }
            (None, _) => write!(f, "Could not reach the server: {}", self.message),
            (Some(status), Some(code)) => write!(f, "{} ({code}, HTTP {status})", self.message),
            (Some(status), None) => write!(f, "{} (HTTP {status})", self.message),
        }
    }
}

impl std::error::Error for NetworkError {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}: {reason}")]
pub struct UploadError {
    pub file: String,
    pub reason: String,
}

impl UploadError {
    pub fn new(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            reason: reason.into(),
        }
    }
}

// =========================================================
// Application error
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("Please wait for the current request to finish")]
    Busy,
}

impl AppError {
    /// Text for inline banners and toasts.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_map_in_both_spellings() {
        assert_eq!(AuthError::from_code("EMAIL_EXISTS"), AuthError::EmailAlreadyInUse);
        assert_eq!(
            AuthError::from_code("auth/email-already-in-use"),
            AuthError::EmailAlreadyInUse
        );
        assert_eq!(
            AuthError::from_code("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn test_code_details_after_colon_are_ignored() {
        assert_eq!(
            AuthError::from_code("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthError::WeakPassword
        );
    }

    #[test]
    fn test_unmapped_code_is_echoed() {
        let err = AuthError::from_code("OPERATION_NOT_ALLOWED");
        assert_eq!(err, AuthError::Unknown("OPERATION_NOT_ALLOWED".into()));
        assert_eq!(err.user_message(), "Authentication failed (OPERATION_NOT_ALLOWED)");
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::Missing(FormField::Email).to_string(),
            "Email is required"
        );
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password should be at least 6 characters"
        );
        assert_eq!(ValidationError::InvalidPrice.field(), Some(FormField::Price));
    }

    #[test]
    fn test_app_error_is_transparent() {
        let err: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(err.user_message(), "Invalid email or password");
        let err: AppError = NetworkError::status(500, "Could not load ads").into();
        assert_eq!(err.user_message(), "Could not load ads (HTTP 500)");
        assert!(AppError::from(ValidationError::PasswordMismatch).is_validation());
    }
}
