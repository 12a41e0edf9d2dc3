//! Route table.
//!
//! Pure data: parsing and printing paths plus the guard flag. Nothing here
//! touches the DOM.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    /// `/ad/{id}`
    AdDetails(String),
    Sell,
    MyAds,
    Favorites,
    Profile,
    NotFound,
}

impl AppRoute {
    /// Parses a pathname. Query string and fragment are ignored, as is a
    /// trailing slash.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" => Self::Home,
            "/sell" => Self::Sell,
            "/my-ads" => Self::MyAds,
            "/favorites" => Self::Favorites,
            "/profile" => Self::Profile,
            _ => match path.strip_prefix("/ad/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::AdDetails(id.to_string()),
                _ => Self::NotFound,
            },
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::AdDetails(id) => format!("/ad/{id}"),
            Self::Sell => "/sell".to_string(),
            Self::MyAds => "/my-ads".to_string(),
            Self::Favorites => "/favorites".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Guarded routes render a "Login required" card while signed out.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Sell | Self::MyAds | Self::Favorites | Self::Profile
        )
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
