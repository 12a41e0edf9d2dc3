//! Local storage preferences.
//!
//! Only non-secret values are kept here: the last email used to sign in and
//! the chosen browse location. Passwords and tokens never touch storage.

use gloo_storage::{LocalStorage, Storage};
use tracing::debug;

const LAST_EMAIL_KEY: &str = "listaria_last_email";
const LOCATION_KEY: &str = "listaria_location";

/// Static accessors over `window.localStorage`.
pub struct BrowserStorage;

impl BrowserStorage {
    fn get(key: &str) -> Option<String> {
        LocalStorage::get::<String>(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    fn set(key: &str, value: &str) {
        if let Err(err) = LocalStorage::set(key, value) {
            debug!(key, error = %err, "local storage write failed");
        }
    }

    pub fn last_email() -> Option<String> {
        Self::get(LAST_EMAIL_KEY)
    }

    pub fn remember_email(email: &str) {
        Self::set(LAST_EMAIL_KEY, email);
    }

    pub fn location() -> Option<String> {
        Self::get(LOCATION_KEY)
    }

    /// Stores the chosen location; `None` clears it.
    pub fn set_location(location: Option<&str>) {
        match location {
            Some(location) => Self::set(LOCATION_KEY, location),
            None => LocalStorage::delete(LOCATION_KEY),
        }
    }
}
