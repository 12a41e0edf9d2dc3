use listaria_shared::Ad;
use tracing::info;

use super::draft::SubmittedAd;
use crate::api::MarketplaceApi;
use crate::error::AppResult;
use crate::http::HttpClient;

/// Uploads the photos, then creates the ad with the stored URLs.
///
/// No ad is created when the upload fails.
pub async fn publish<C: HttpClient>(api: &MarketplaceApi<C>, ad: SubmittedAd) -> AppResult<Ad> {
    let parts = ad.upload_parts();
    let count = parts.len();
    let urls = api.upload_images(parts).await?;

    let created = api.create_ad(&ad.into_request(urls)).await?;
    info!(ad_id = %created.id, images = count, "ad published");
    Ok(created)
}
