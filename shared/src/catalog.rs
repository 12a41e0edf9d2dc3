//! Category catalogue shared by the sell wizard, the category bar and the
//! popular-category tiles.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Wire value stored in `Ad::category`.
    pub id: &'static str,
    pub name: &'static str,
    pub subcategories: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        id: "electronics",
        name: "Electronics",
        subcategories: &[
            "Laptops",
            "Computers",
            "Cameras",
            "TV & Audio",
            "Gaming",
            "Accessories",
        ],
    },
    Category {
        id: "car",
        name: "Car",
        subcategories: &[
            "Cars",
            "Motorcycles",
            "Scooters",
            "Bicycles",
            "Spare Parts",
            "Accessories",
        ],
    },
    Category {
        id: "mobile",
        name: "Mobile",
        subcategories: &[
            "Smartphones",
            "Tablets",
            "Accessories",
            "Smartwatches",
            "Feature Phones",
        ],
    },
    Category {
        id: "clothing",
        name: "Clothing",
        subcategories: &[
            "Men",
            "Women",
            "Kids",
            "Footwear",
            "Accessories",
            "Sportswear",
        ],
    },
];

/// Looks a category up by id, ignoring case.
pub fn find(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id.eq_ignore_ascii_case(id.trim()))
}

pub fn display_name(id: &str) -> &str {
    find(id).map(|c| c.name).unwrap_or(id)
}

impl Category {
    pub fn has_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| *s == name)
    }
}
