//! Runtime configuration.
//!
//! Values are baked in at build time (`LISTARIA_*` environment variables seen
//! by `trunk build`) and fall back to the defaults below.

use listaria_shared::filter::DEFAULT_PAGE_SIZE;
use tracing::Level;

const DEFAULT_API_BASE_URL: &str = "/api";
const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_LOG_LEVEL: Level = Level::INFO;

pub const VAR_API_BASE_URL: &str = "LISTARIA_API_BASE_URL";
pub const VAR_IDENTITY_ENDPOINT: &str = "LISTARIA_IDENTITY_ENDPOINT";
pub const VAR_IDENTITY_API_KEY: &str = "LISTARIA_IDENTITY_API_KEY";
pub const VAR_GOOGLE_CLIENT_ID: &str = "LISTARIA_GOOGLE_CLIENT_ID";
pub const VAR_PAGE_SIZE: &str = "LISTARIA_PAGE_SIZE";
pub const VAR_LOG_LEVEL: &str = "LISTARIA_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// REST base URL without trailing slash.
    pub api_base_url: String,
    pub identity_endpoint: String,
    pub identity_api_key: Option<String>,
    /// OAuth client id of the Google sign-in button; no button without it.
    pub google_client_id: Option<String>,
    pub page_size: u32,
    pub log_level: Level,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RuntimeConfig {
    /// Reads the variables captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name| {
            let value = match name {
                VAR_API_BASE_URL => option_env!("LISTARIA_API_BASE_URL"),
                VAR_IDENTITY_ENDPOINT => option_env!("LISTARIA_IDENTITY_ENDPOINT"),
                VAR_IDENTITY_API_KEY => option_env!("LISTARIA_IDENTITY_API_KEY"),
                VAR_GOOGLE_CLIENT_ID => option_env!("LISTARIA_GOOGLE_CLIENT_ID"),
                VAR_PAGE_SIZE => option_env!("LISTARIA_PAGE_SIZE"),
                VAR_LOG_LEVEL => option_env!("LISTARIA_LOG_LEVEL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// Unparsable numbers and levels fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| non_empty(lookup(name));

        let api_base_url = get(VAR_API_BASE_URL)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let identity_endpoint = get(VAR_IDENTITY_ENDPOINT)
            .unwrap_or_else(|| DEFAULT_IDENTITY_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();
        let page_size = get(VAR_PAGE_SIZE)
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let log_level = get(VAR_LOG_LEVEL)
            .and_then(|v| v.parse::<Level>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            api_base_url,
            identity_endpoint,
            identity_api_key: get(VAR_IDENTITY_API_KEY),
            google_client_id: get(VAR_GOOGLE_CLIENT_ID),
            page_size,
            log_level,
        }
    }

    /// Logs settings that will make features unusable.
    pub fn warn_if_incomplete(&self) {
        if self.identity_api_key.is_none() {
            tracing::warn!(
                var = VAR_IDENTITY_API_KEY,
                "identity API key not set; sign-in requests will be rejected"
            );
        }
    }
}
