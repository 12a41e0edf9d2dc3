//! Browser adapters.
//!
//! Everything that needs `window` lives under this module: fetch, canvas,
//! local storage, the History API router and the Google sign-in button.
//! The rest of the crate only sees the traits these implement.

pub mod google;
mod http;
mod image;
pub mod route;
pub mod router;
mod storage;

pub use http::GlooHttpClient;
pub use image::CanvasCodec;
pub use storage::BrowserStorage;
