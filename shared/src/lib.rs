use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::IgnoredAny};

pub mod catalog;
pub mod date;
pub mod filter;
pub mod price;
pub mod protocol;

pub use filter::AdFilters;

// =========================================================
// Constants
// =========================================================

pub const DEFAULT_CURRENCY: &str = "INR";
pub const MAX_AD_IMAGES: usize = 12;
pub const TITLE_MAX_CHARS: usize = 70;
pub const UPLOAD_FIELD_NAME: &str = "images";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// Domain Models
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    LikeNew,
    #[default]
    Used,
    Refurbished,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::New,
        Condition::LikeNew,
        Condition::Used,
        Condition::Refurbished,
    ];

    /// Wire value, also used as the `<option value>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like-new",
            Condition::Used => "used",
            Condition::Refurbished => "refurbished",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::Used => "Used",
            Condition::Refurbished => "Refurbished",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    #[default]
    Active,
    Sold,
    Expired,
}

impl AdStatus {
    pub const ALL: [AdStatus; 3] = [AdStatus::Active, AdStatus::Sold, AdStatus::Expired];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdStatus::Active => "active",
            AdStatus::Sold => "sold",
            AdStatus::Expired => "expired",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdStatus::Active => "Active",
            AdStatus::Sold => "Sold",
            AdStatus::Expired => "Expired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// A marketplace listing as returned by the REST API.
///
/// `images` is ordered; the first entry is the cover image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub show_phone: bool,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub status: AdStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ad {
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn is_owned_by(&self, uid: &str) -> bool {
        !self.user_id.is_empty() && self.user_id == uid
    }

    /// Phone number to display, honouring the seller's visibility flag.
    pub fn visible_phone(&self) -> Option<&str> {
        (self.show_phone && !self.phone.trim().is_empty()).then_some(self.phone.as_str())
    }
}

/// Payload of `POST /ads`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdRequest {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub subcategory: String,
    pub condition: Condition,
    pub images: Vec<String>,
    pub location: String,
    pub phone: String,
    pub show_phone: bool,
}

/// Partial update of `PUT /ads/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AdStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_phone: Option<bool>,
}

impl AdPatch {
    pub fn is_empty(&self) -> bool {
        *self == AdPatch::default()
    }
}

/// One page of `GET /ads`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdPage {
    #[serde(default)]
    pub ads: Vec<Ad>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

impl AdPage {
    pub fn has_more(&self, limit: u32) -> bool {
        u64::from(self.page) * u64::from(limit) < self.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload of `POST /users`, sent after every successful sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Payload of `PUT /users/profile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedImages {
    pub urls: Vec<String>,
}

/// Error body returned by the REST API on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

/// Response of endpoints whose body carries nothing the client needs.
///
/// Accepts any JSON value, including `null` for an empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ack;

impl<'de> Deserialize<'de> for Ack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer).map(|_| Ack)
    }
}

impl Serialize for Ack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AD_JSON: &str = r#"{
        "_id": "a1",
        "title": "iPhone 14 Pro Max",
        "description": "Like new",
        "price": 89999,
        "category": "mobile",
        "subcategory": "Smartphones",
        "condition": "like-new",
        "images": ["https://cdn/1.jpg", "https://cdn/2.jpg"],
        "location": "Mumbai, Maharashtra",
        "phone": "9876543210",
        "showPhone": false,
        "userId": "u1",
        "status": "sold",
        "createdAt": "2026-10-01T10:00:00Z",
        "updatedAt": "2026-10-02T10:00:00Z"
    }"#;

    #[test]
    fn test_ad_deserializes_wire_shape() {
        let ad: Ad = serde_json::from_str(AD_JSON).unwrap();
        assert_eq!(ad.id, "a1");
        assert_eq!(ad.currency, DEFAULT_CURRENCY);
        assert_eq!(ad.condition, Condition::LikeNew);
        assert_eq!(ad.status, AdStatus::Sold);
        assert_eq!(ad.cover_image(), Some("https://cdn/1.jpg"));
        assert!(ad.is_owned_by("u1"));
        assert!(!ad.is_owned_by(""));
    }

    #[test]
    fn test_hidden_phone_is_not_visible() {
        let mut ad: Ad = serde_json::from_str(AD_JSON).unwrap();
        assert_eq!(ad.visible_phone(), None);
        ad.show_phone = true;
        assert_eq!(ad.visible_phone(), Some("9876543210"));
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = AdPatch {
            status: Some(AdStatus::Sold),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"status":"sold"}"#);
        assert!(AdPatch::default().is_empty());
    }

    #[test]
    fn test_create_request_uses_camel_case() {
        let req = CreateAdRequest {
            title: "t".into(),
            description: "d".into(),
            price: 10.0,
            category: "car".into(),
            subcategory: "Cars".into(),
            condition: Condition::Used,
            images: vec![],
            location: "Pune".into(),
            phone: "1".into(),
            show_phone: true,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["showPhone"], true);
        assert_eq!(value["condition"], "used");
    }

    #[test]
    fn test_ack_accepts_anything() {
        let _: Ack = serde_json::from_str("null").unwrap();
        let _: Ack = serde_json::from_str(r#"{"message":"deleted"}"#).unwrap();
    }

    #[test]
    fn test_page_has_more() {
        let page = AdPage {
            ads: vec![],
            total: 45,
            page: 2,
        };
        assert!(page.has_more(20));
        assert!(!AdPage { page: 3, ..page }.has_more(20));
    }

    #[test]
    fn test_condition_parse() {
        assert_eq!(Condition::parse("Like-New"), Some(Condition::LikeNew));
        assert_eq!(Condition::parse("broken"), None);
        assert_eq!(AdStatus::parse("expired"), Some(AdStatus::Expired));
    }
}
