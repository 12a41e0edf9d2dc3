use std::rc::Rc;

use async_trait::async_trait;
use listaria_shared::protocol::{
    AddFavorite, ApiRequest, CheckFavorite, DeleteAd, GetAd, GetProfile, ListAds, ListFavorites,
    ListMyAds, RemoveFavorite, UpdateAd,
};
use listaria_shared::{
    Ad, AdFilters, AdPage, AdPatch, ApiErrorBody, CreateAdRequest, CreateProfileRequest,
    HEADER_AUTHORIZATION, ProfileUpdate, UPLOAD_FIELD_NAME, UploadedImages, UserProfile,
};
use tracing::debug;

use crate::error::{AppResult, NetworkError, UploadError};
use crate::http::{FilePart, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::session::{ProfileDirectory, SessionStore, UserIdentity};

/// Typed client for the marketplace REST API.
///
/// Every call carries the current session's bearer token, if any.
pub struct MarketplaceApi<C> {
    client: Rc<C>,
    base_url: String,
    session: SessionStore,
}

impl<C> Clone for MarketplaceApi<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            session: self.session.clone(),
        }
    }
}

fn status_message(status: u16) -> &'static str {
    match status {
        400 => "The request was not accepted",
        401 => "Please log in again",
        403 => "You are not allowed to do that",
        404 => "Not found",
        413 => "The upload is too large",
        500..=599 => "The server had a problem, please try again",
        _ => "Request failed",
    }
}

/// Builds a `NetworkError` from a non-2xx response, preferring the
/// backend's own code and message.
fn error_from_response(res: &HttpResponse) -> NetworkError {
    let body: ApiErrorBody = serde_json::from_str(&res.body).unwrap_or_default();
    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| status_message(res.status).to_string());
    let err = NetworkError::status(res.status, message);
    match body.code {
        Some(code) => err.with_code(code),
        None => err,
    }
}

impl<C: HttpClient> MarketplaceApi<C> {
    pub fn new(client: Rc<C>, base_url: &str, session: SessionStore) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn authorize(&self, req: HttpRequest) -> HttpRequest {
        match self.session.bearer_token() {
            Some(token) => {
                req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token.as_str()))
            }
            None => req,
        }
    }

    /// Sends any `ApiRequest` and decodes its response type.
    pub async fn send<R: ApiRequest>(&self, request: &R) -> AppResult<R::Response> {
        let mut req =
            HttpRequest::new(&self.url(&request.path()), R::METHOD).with_query(request.query());
        if let Some(body) = request.body() {
            req = req
                .with_header("Content-Type", "application/json")
                .with_json(body)
                .map_err(|e| NetworkError::malformed(None, e.to_string()))?;
        }

        let res = self.client.send(self.authorize(req)).await?;
        if !res.is_success() {
            let err = error_from_response(&res);
            debug!(method = R::METHOD.as_str(), path = %request.path(), status = res.status, "request failed");
            return Err(err.into());
        }
        res.json::<R::Response>()
            .map_err(|e| NetworkError::malformed(Some(res.status), e.to_string()).into())
    }

    // =========================================================
    // Ads
    // =========================================================

    pub async fn list_ads(&self, filters: AdFilters) -> AppResult<AdPage> {
        self.send(&ListAds { filters }).await
    }

    pub async fn get_ad(&self, id: &str) -> AppResult<Ad> {
        self.send(&GetAd { id: id.to_string() }).await
    }

    pub async fn create_ad(&self, ad: &CreateAdRequest) -> AppResult<Ad> {
        self.send(ad).await
    }

    pub async fn update_ad(&self, id: &str, patch: AdPatch) -> AppResult<Ad> {
        self.send(&UpdateAd {
            id: id.to_string(),
            patch,
        })
        .await
    }

    pub async fn delete_ad(&self, id: &str) -> AppResult<()> {
        self.send(&DeleteAd { id: id.to_string() }).await.map(|_| ())
    }

    pub async fn my_ads(&self) -> AppResult<Vec<Ad>> {
        self.send(&ListMyAds).await
    }

    /// `POST /upload`: stores the images and returns their URLs in order.
    pub async fn upload_images(&self, files: Vec<FilePart>) -> AppResult<Vec<String>> {
        let names = files
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let expected = files.len();
        let req = HttpRequest::new(&self.url("/upload"), HttpMethod::Post)
            .with_files(UPLOAD_FIELD_NAME, files);

        let res = self
            .client
            .send(self.authorize(req))
            .await
            .map_err(|e| UploadError::new(&names, e.message))?;
        if !res.is_success() {
            return Err(UploadError::new(&names, error_from_response(&res).to_string()).into());
        }
        let uploaded: UploadedImages = res
            .json()
            .map_err(|e| UploadError::new(&names, format!("unreadable upload response: {e}")))?;
        if uploaded.urls.len() != expected {
            return Err(UploadError::new(
                &names,
                format!("stored {} of {} images", uploaded.urls.len(), expected),
            )
            .into());
        }
        Ok(uploaded.urls)
    }

    // =========================================================
    // Users
    // =========================================================

    pub async fn profile(&self) -> AppResult<UserProfile> {
        self.send(&GetProfile).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> AppResult<UserProfile> {
        self.send(update).await
    }

    // =========================================================
    // Favorites
    // =========================================================

    pub async fn favorites(&self) -> AppResult<Vec<Ad>> {
        self.send(&ListFavorites).await
    }

    pub async fn add_favorite(&self, ad_id: &str) -> AppResult<()> {
        self.send(&AddFavorite {
            ad_id: ad_id.to_string(),
        })
        .await
        .map(|_| ())
    }

    pub async fn remove_favorite(&self, ad_id: &str) -> AppResult<()> {
        self.send(&RemoveFavorite {
            ad_id: ad_id.to_string(),
        })
        .await
        .map(|_| ())
    }

    pub async fn is_favorite(&self, ad_id: &str) -> AppResult<bool> {
        self.send(&CheckFavorite {
            ad_id: ad_id.to_string(),
        })
        .await
        .map(|status| status.is_favorite)
    }
}

#[async_trait(?Send)]
impl<C: HttpClient> ProfileDirectory for MarketplaceApi<C> {
    async fn ensure_profile(&self, user: &UserIdentity) -> AppResult<()> {
        let request = CreateProfileRequest {
            uid: user.uid.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone().unwrap_or_default(),
            photo_url: user.photo_url.clone(),
        };
        self.send(&request).await.map(|_| ())
    }
}
