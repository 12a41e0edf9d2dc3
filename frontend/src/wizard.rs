//! Ad posting wizard and its image pipeline.
//!
//! - `draft`: steps, per-step data and the `SellWizard` state machine
//! - `gallery`: ordered photos with previews, capped at `MAX_AD_IMAGES`
//! - `image`: dimension math and the `ImageCodec` seam
//! - `intake`: concurrent normalization of a picker/drop batch
//! - `publish`: upload then create

mod draft;
mod gallery;
pub mod image;
mod intake;
mod publish;

pub use draft::{ContactInfo, ItemDetails, SellWizard, WizardStep, parse_price};
pub use gallery::GalleryImage;
pub use image::ImageCodec;
pub use intake::intake;
pub use publish::publish;

#[cfg(test)]
mod tests;
