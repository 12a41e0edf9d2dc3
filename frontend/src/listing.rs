//! Home page listing query.
//!
//! Three inputs feed one `AdFilters`: the header search (term plus its
//! category dropdown), the category bar and the chosen location. The filter
//! is sent to `GET /ads` and applied again to the page that comes back.

use listaria_shared::{Ad, AdFilters};

/// Value of the header dropdown meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

pub const POPULAR_LOCATIONS: [&str; 8] = [
    "Mumbai, Maharashtra",
    "Delhi, NCR",
    "Bangalore, Karnataka",
    "Chennai, Tamil Nadu",
    "Hyderabad, Telangana",
    "Pune, Maharashtra",
    "Kolkata, West Bengal",
    "Ahmedabad, Gujarat",
];

/// Popular locations containing `term`, ignoring case. An empty term matches
/// all of them.
pub fn search_locations(term: &str) -> Vec<&'static str> {
    let term = term.trim().to_lowercase();
    POPULAR_LOCATIONS
        .into_iter()
        .filter(|location| location.to_lowercase().contains(&term))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub search: String,
    /// Header dropdown; `ALL_CATEGORIES` imposes nothing.
    pub search_category: String,
    /// Category bar selection.
    pub category: Option<String>,
    pub location: Option<String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            search_category: ALL_CATEGORIES.to_string(),
            category: None,
            location: None,
        }
    }
}

fn selected(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl ListingQuery {
    fn dropdown_category(&self) -> Option<&str> {
        selected(Some(&self.search_category))
            .filter(|c| !c.eq_ignore_ascii_case(ALL_CATEGORIES))
    }

    fn bar_category(&self) -> Option<&str> {
        selected(self.category.as_deref())
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.trim().is_empty()
            || self.dropdown_category().is_some()
            || self.bar_category().is_some()
            || selected(self.location.as_deref()).is_some()
    }

    /// Server filter for one page. The category bar wins over the dropdown;
    /// `refine` enforces both.
    pub fn to_filters(&self, page: u32, limit: u32) -> AdFilters {
        let category = self.bar_category().or_else(|| self.dropdown_category());
        AdFilters {
            category: category.map(str::to_string),
            search: selected(Some(&self.search)).map(str::to_string),
            location: selected(self.location.as_deref()).map(str::to_string),
            page: Some(page.max(1)),
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Client-side pass over a page of results.
    pub fn refine(&self, ads: Vec<Ad>) -> Vec<Ad> {
        let filters = self.to_filters(1, 0);
        let dropdown = self.dropdown_category();
        ads.into_iter()
            .filter(|ad| filters.matches(ad))
            .filter(|ad| dropdown.is_none_or(|c| ad.category.trim().eq_ignore_ascii_case(c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ad(id: &str, title: &str, category: &str, location: &str) -> Ad {
        Ad {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            price: 1000.0,
            currency: "INR".to_string(),
            category: category.to_string(),
            subcategory: String::new(),
            condition: Default::default(),
            images: vec![],
            location: location.to_string(),
            phone: String::new(),
            show_phone: true,
            user_id: String::new(),
            user_name: String::new(),
            user_email: String::new(),
            is_featured: false,
            status: Default::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ids(ads: &[Ad]) -> Vec<&str> {
        ads.iter().map(|a| a.id.as_str()).collect()
    }

    fn sample() -> Vec<Ad> {
        vec![
            ad("1", "Samsung Galaxy S23", "mobile", "Mumbai, Maharashtra"),
            ad("2", "Galaxy Tab S9", "electronics", "Pune, Maharashtra"),
            ad("3", "iPhone 14", "mobile", "Delhi, NCR"),
            ad("4", "galaxy buds case", "Mobile", "Delhi, NCR"),
            ad("5", "Honda City", "car", "Mumbai, Maharashtra"),
        ]
    }

    #[test]
    fn test_category_and_search_narrow_together() {
        let query = ListingQuery {
            search: "galaxy".into(),
            category: Some("mobile".into()),
            ..Default::default()
        };
        let refined = query.refine(sample());
        assert_eq!(ids(&refined), vec!["1", "4"]);
    }

    #[test]
    fn test_empty_query_imposes_nothing() {
        let query = ListingQuery::default();
        assert!(!query.is_filtered());
        assert_eq!(query.refine(sample()).len(), 5);

        let filters = query.to_filters(1, 20);
        assert_eq!(filters.category, None);
        assert_eq!(filters.search, None);
        assert_eq!(
            filters.to_query_pairs(),
            vec![("page", "1".to_string()), ("limit", "20".to_string())]
        );
    }

    #[test]
    fn test_dropdown_all_means_no_category() {
        let query = ListingQuery {
            search_category: "ALL".into(),
            search: "  ".into(),
            ..Default::default()
        };
        assert!(!query.is_filtered());
        assert_eq!(query.to_filters(2, 20).category, None);
    }

    #[test]
    fn test_both_category_selectors_are_enforced() {
        let query = ListingQuery {
            search_category: "electronics".into(),
            category: Some("mobile".into()),
            ..Default::default()
        };
        assert_eq!(query.to_filters(1, 20).category.as_deref(), Some("mobile"));
        assert!(query.refine(sample()).is_empty());

        let dropdown_only = ListingQuery {
            search_category: "electronics".into(),
            ..Default::default()
        };
        assert_eq!(ids(&dropdown_only.refine(sample())), vec!["2"]);
    }

    #[test]
    fn test_location_is_substring_match() {
        let query = ListingQuery {
            location: Some("maharashtra".into()),
            ..Default::default()
        };
        assert_eq!(ids(&query.refine(sample())), vec!["1", "2", "5"]);
    }

    #[test]
    fn test_page_is_at_least_one() {
        let filters = ListingQuery::default().to_filters(0, 20);
        assert_eq!(filters.page, Some(1));
    }

    #[test]
    fn test_search_locations() {
        assert_eq!(search_locations("").len(), POPULAR_LOCATIONS.len());
        assert_eq!(
            search_locations("MAHA"),
            vec!["Mumbai, Maharashtra", "Pune, Maharashtra"]
        );
        assert!(search_locations("Goa").is_empty());
    }
}
