//! Listing filters.
//!
//! The same `AdFilters` value is sent to `GET /ads` as query parameters and
//! applied again on the client to whatever page came back.

use crate::{Ad, Condition};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Trimmed, non-empty text or nothing.
fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl AdFilters {
    /// Query parameters for `GET /ads`, skipping absent and empty fields.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = text(&self.category) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(search) = text(&self.search) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(location) = text(&self.location) {
            pairs.push(("location", location.to_string()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(condition) = self.condition {
            pairs.push(("condition", condition.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }

    /// Client-side predicate mirroring the server filter.
    ///
    /// Category is an exact match ignoring case, search is a substring of the
    /// title ignoring case, location is a substring ignoring case.
    pub fn matches(&self, ad: &Ad) -> bool {
        if let Some(category) = text(&self.category) {
            if !ad.category.trim().eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(search) = text(&self.search) {
            if !contains_ignore_case(&ad.title, search) {
                return false;
            }
        }
        if let Some(location) = text(&self.location) {
            if !contains_ignore_case(&ad.location, location) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| ad.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| ad.price > max) {
            return false;
        }
        if self.condition.is_some_and(|c| ad.condition != c) {
            return false;
        }
        true
    }

    pub fn apply(&self, ads: impl IntoIterator<Item = Ad>) -> Vec<Ad> {
        ads.into_iter().filter(|ad| self.matches(ad)).collect()
    }

    pub fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ad(id: &str, title: &str, category: &str, location: &str, price: f64) -> Ad {
        Ad {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            price,
            currency: "INR".into(),
            category: category.to_string(),
            subcategory: String::new(),
            condition: Condition::Used,
            images: vec![],
            location: location.to_string(),
            phone: String::new(),
            show_phone: true,
            user_id: "u".into(),
            user_name: String::new(),
            user_email: String::new(),
            is_featured: false,
            status: Default::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Ad> {
        vec![
            ad("1", "Samsung Galaxy S23 Ultra", "mobile", "Chennai, Tamil Nadu", 124999.0),
            ad("2", "Galaxy Book3 Pro", "electronics", "Delhi, NCR", 99000.0),
            ad("3", "iPhone 14 Pro Max", "mobile", "Mumbai, Maharashtra", 89999.0),
            ad("4", "GALAXY Tab S9", "Mobile", "Pune, Maharashtra", 72000.0),
        ]
    }

    #[test]
    fn test_category_and_search_combine() {
        let filters = AdFilters {
            category: Some("mobile".into()),
            search: Some("galaxy".into()),
            ..Default::default()
        };
        let ids: Vec<_> = filters.apply(sample()).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_empty_fields_impose_nothing() {
        let filters = AdFilters {
            category: Some("  ".into()),
            search: Some(String::new()),
            location: None,
            ..Default::default()
        };
        assert_eq!(filters.apply(sample()).len(), 4);
        assert!(filters.to_query_pairs().is_empty());
    }

    #[test]
    fn test_location_is_substring_match() {
        let filters = AdFilters {
            location: Some("maharashtra".into()),
            ..Default::default()
        };
        let ids: Vec<_> = filters.apply(sample()).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["3", "4"]);
    }

    #[test]
    fn test_category_is_exact_not_substring() {
        let filters = AdFilters {
            category: Some("mob".into()),
            ..Default::default()
        };
        assert!(filters.apply(sample()).is_empty());
    }

    #[test]
    fn test_price_bounds() {
        let filters = AdFilters {
            min_price: Some(80000.0),
            max_price: Some(100000.0),
            ..Default::default()
        };
        let ids: Vec<_> = filters.apply(sample()).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_query_pairs_use_wire_names() {
        let filters = AdFilters {
            category: Some("car".into()),
            search: Some(" honda ".into()),
            min_price: Some(1000.0),
            condition: Some(Condition::LikeNew),
            page: Some(2),
            limit: Some(20),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query_pairs(),
            vec![
                ("category", "car".to_string()),
                ("search", "honda".to_string()),
                ("minPrice", "1000".to_string()),
                ("condition", "like-new".to_string()),
                ("page", "2".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }
}
