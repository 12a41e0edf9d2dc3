use futures::future::join_all;
use tracing::{debug, warn};

use super::gallery::GalleryImage;
use super::image::{ImageCodec, ImageSource, is_image_type};
use crate::error::UploadError;

/// Outcome of one picker or drop batch.
#[derive(Debug, Default)]
pub struct IntakeReport {
    /// Normalized photos, in the order they were offered.
    pub accepted: Vec<GalleryImage>,
    /// Files whose declared type was not an image.
    pub skipped: usize,
    pub failures: Vec<UploadError>,
}

/// Normalizes a batch of files.
///
/// Non-image types are dropped before any decoding. The rest are compressed
/// concurrently; one failure does not affect the others and the output keeps
/// the input order.
pub async fn intake<C: ImageCodec>(codec: &C, sources: &[C::Source]) -> IntakeReport {
    let (images, others): (Vec<&C::Source>, Vec<&C::Source>) = sources
        .iter()
        .partition(|source| is_image_type(&source.mime_type()));
    if !others.is_empty() {
        debug!(count = others.len(), "skipping non-image files");
    }

    let results = join_all(images.into_iter().map(|source| async move {
        let image = codec.normalize(source).await?;
        let preview = codec.preview_url(&image)?;
        Ok::<_, UploadError>(GalleryImage::new(image, preview))
    }))
    .await;

    let mut report = IntakeReport {
        skipped: others.len(),
        ..Default::default()
    };
    for result in results {
        match result {
            Ok(image) => report.accepted.push(image),
            Err(err) => {
                warn!(file = %err.file, reason = %err.reason, "image rejected");
                report.failures.push(err);
            }
        }
    }
    report
}
