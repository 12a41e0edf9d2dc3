//! Image normalization seam.
//!
//! Every accepted photo is scaled so its longer side is at most
//! `MAX_DIMENSION` and re-encoded as JPEG at `JPEG_QUALITY`.

use async_trait::async_trait;

use crate::error::UploadError;
use crate::http::FilePart;

pub const MAX_DIMENSION: u32 = 800;
pub const JPEG_QUALITY: f64 = 0.7;
pub const OUTPUT_MIME: &str = "image/jpeg";

/// Target size preserving aspect ratio, with the longer side at most `max`.
/// Never upscales.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max && height <= max) {
        return (width, height);
    }
    let longer = width.max(height) as f64;
    let scale = max as f64 / longer;
    let scaled = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max);
    (scaled(width), scaled(height))
}

/// Whether a declared MIME type is an image.
pub fn is_image_type(mime: &str) -> bool {
    mime.trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// `photo.png` → `photo.jpg`.
pub fn jpeg_name(original: &str) -> String {
    let stem = match original.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => original,
    };
    format!("{stem}.jpg")
}

/// A photo after scaling and re-encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl NormalizedImage {
    pub fn to_part(&self) -> FilePart {
        FilePart {
            name: self.name.clone(),
            mime: OUTPUT_MIME.to_string(),
            bytes: self.bytes.clone(),
        }
    }
}

/// A file offered by the picker or a drop.
pub trait ImageSource {
    fn name(&self) -> String;
    fn mime_type(&self) -> String;
}

#[async_trait(?Send)]
pub trait ImageCodec {
    type Source: ImageSource;

    /// Decodes, scales and re-encodes one file.
    async fn normalize(&self, source: &Self::Source) -> Result<NormalizedImage, UploadError>;

    /// Object URL for showing the image before upload.
    fn preview_url(&self, image: &NormalizedImage) -> Result<String, UploadError>;

    fn release_preview(&self, url: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_is_capped_on_width() {
        assert_eq!(fit_within(4000, 3000, MAX_DIMENSION), (800, 600));
    }

    #[test]
    fn test_portrait_is_capped_on_height() {
        assert_eq!(fit_within(1080, 1920, MAX_DIMENSION), (450, 800));
    }

    #[test]
    fn test_small_images_are_not_upscaled() {
        assert_eq!(fit_within(640, 480, MAX_DIMENSION), (640, 480));
        assert_eq!(fit_within(800, 800, MAX_DIMENSION), (800, 800));
    }

    #[test]
    fn test_aspect_ratio_is_kept_within_rounding() {
        for (w, h) in [(3001, 1999), (1234, 5678), (801, 3), (9000, 1)] {
            let (tw, th) = fit_within(w, h, MAX_DIMENSION);
            assert_eq!(tw.max(th), MAX_DIMENSION);
            let scale = MAX_DIMENSION as f64 / w.max(h) as f64;
            for (target, side) in [(tw, w), (th, h)] {
                let exact = side as f64 * scale;
                assert!(
                    (target as f64 - exact).abs() <= 0.5 || target == 1,
                    "{w}x{h} -> {tw}x{th}"
                );
            }
        }
    }

    #[test]
    fn test_image_type_check() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("IMAGE/HEIC"));
        assert!(!is_image_type("application/pdf"));
        assert!(!is_image_type(""));
    }

    #[test]
    fn test_jpeg_name() {
        assert_eq!(jpeg_name("front.PNG"), "front.jpg");
        assert_eq!(jpeg_name("archive.tar.gz"), "archive.tar.jpg");
        assert_eq!(jpeg_name("noext"), "noext.jpg");
        assert_eq!(jpeg_name(".hidden"), ".hidden.jpg");
    }

    #[test]
    fn test_encoder_settings() {
        assert_eq!(JPEG_QUALITY, 0.7);
        assert_eq!(MAX_DIMENSION, 800);
        assert_eq!(OUTPUT_MIME, "image/jpeg");
    }
}
