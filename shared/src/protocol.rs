use crate::{
    Ack, Ad, AdFilters, AdPage, AdPatch, CreateAdRequest, CreateProfileRequest, FavoriteStatus,
    ProfileUpdate, UserProfile,
};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// JSON body type; `()` for requests without a body.
    type Body: Serialize;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Path relative to the API base URL.
    fn path(&self) -> String;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

// =========================================================
// Ads
// =========================================================

/// `GET /ads`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAds {
    pub filters: AdFilters,
}

impl ApiRequest for ListAds {
    type Response = AdPage;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/ads".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.filters.to_query_pairs()
    }
}

/// `GET /ads/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct GetAd {
    pub id: String,
}

impl ApiRequest for GetAd {
    type Response = Ad;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/ads/{}", self.id)
    }
}

/// `POST /ads`
impl ApiRequest for CreateAdRequest {
    type Response = Ad;
    type Body = CreateAdRequest;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/ads".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// `PUT /ads/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAd {
    pub id: String,
    pub patch: AdPatch,
}

impl ApiRequest for UpdateAd {
    type Response = Ad;
    type Body = AdPatch;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/ads/{}", self.id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.patch)
    }
}

/// `DELETE /ads/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAd {
    pub id: String,
}

impl ApiRequest for DeleteAd {
    type Response = Ack;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/ads/{}", self.id)
    }
}

/// `GET /ads/my`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListMyAds;

impl ApiRequest for ListMyAds {
    type Response = Vec<Ad>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/ads/my".to_string()
    }
}

// =========================================================
// Users
// =========================================================

/// `GET /users/profile`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GetProfile;

impl ApiRequest for GetProfile {
    type Response = UserProfile;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/users/profile".to_string()
    }
}

/// `PUT /users/profile`
impl ApiRequest for ProfileUpdate {
    type Response = UserProfile;
    type Body = ProfileUpdate;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        "/users/profile".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// `POST /users`
impl ApiRequest for CreateProfileRequest {
    type Response = UserProfile;
    type Body = CreateProfileRequest;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/users".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

// =========================================================
// Favorites
// =========================================================

/// `GET /favorites`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListFavorites;

impl ApiRequest for ListFavorites {
    type Response = Vec<Ad>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/favorites".to_string()
    }
}

/// `POST /favorites/{adId}`
#[derive(Debug, Clone, PartialEq)]
pub struct AddFavorite {
    pub ad_id: String,
}

impl ApiRequest for AddFavorite {
    type Response = Ack;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/favorites/{}", self.ad_id)
    }
}

/// `DELETE /favorites/{adId}`
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveFavorite {
    pub ad_id: String,
}

impl ApiRequest for RemoveFavorite {
    type Response = Ack;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/favorites/{}", self.ad_id)
    }
}

/// `GET /favorites/check/{adId}`
#[derive(Debug, Clone, PartialEq)]
pub struct CheckFavorite {
    pub ad_id: String,
}

impl ApiRequest for CheckFavorite {
    type Response = FavoriteStatus;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/favorites/check/{}", self.ad_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_embed_ids() {
        assert_eq!(GetAd { id: "a1".into() }.path(), "/ads/a1");
        assert_eq!(DeleteAd { id: "a1".into() }.path(), "/ads/a1");
        assert_eq!(CheckFavorite { ad_id: "a9".into() }.path(), "/favorites/check/a9");
        assert_eq!(ListMyAds.path(), "/ads/my");
    }

    #[test]
    fn test_bodyless_requests_have_no_body() {
        assert!(GetAd { id: "x".into() }.body().is_none());
        assert!(AddFavorite { ad_id: "x".into() }.body().is_none());
        assert_eq!(<AddFavorite as ApiRequest>::METHOD, HttpMethod::Post);
    }

    #[test]
    fn test_update_sends_patch() {
        let req = UpdateAd {
            id: "a1".into(),
            patch: AdPatch {
                price: Some(500.0),
                ..Default::default()
            },
        };
        assert_eq!(req.body().and_then(|p| p.price), Some(500.0));
        assert_eq!(<UpdateAd as ApiRequest>::METHOD.as_str(), "PUT");
    }

    #[test]
    fn test_list_ads_query_comes_from_filters() {
        let req = ListAds {
            filters: AdFilters {
                search: Some("galaxy".into()),
                page: Some(1),
                ..Default::default()
            },
        };
        assert_eq!(
            req.query(),
            vec![("search", "galaxy".to_string()), ("page", "1".to_string())]
        );
    }
}
