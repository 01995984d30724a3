//! Storefront catalog and synthetic test data
//!
//! Categories, brands, subcategories and languages are closed enums with
//! exhaustive mappings. Parsing an unknown name fails at construction time
//! with [`VitrinaError::UnsupportedName`] instead of silently doing nothing.

use crate::result::VitrinaError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn parse_label<T: Copy>(all: &[T], label: fn(T) -> &'static str, kind: &'static str, s: &str) -> Result<T, VitrinaError> {
    let wanted = s.trim();
    all.iter()
        .copied()
        .find(|v| label(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| VitrinaError::unsupported(kind, s))
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Top-level product category reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    HandTools,
    PowerTools,
    Other,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::HandTools, Self::PowerTools, Self::Other];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HandTools => "Hand Tools",
            Self::PowerTools => "Power Tools",
            Self::Other => "Other",
        }
    }

    /// URL slug under `/category/`
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::HandTools => "hand-tools",
            Self::PowerTools => "power-tools",
            Self::Other => "other",
        }
    }

    /// `data-test` id of the navigation link
    #[must_use]
    pub const fn nav_test_id(self) -> &'static str {
        match self {
            Self::HandTools => "nav-hand-tools",
            Self::PowerTools => "nav-power-tools",
            Self::Other => "nav-other",
        }
    }

    /// Every product name in the category contains one of these
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::HandTools => &[
                "Hammer",
                "Saw",
                "Wrench",
                "Spanner",
                "Screwdriver",
                "Pliers",
                "Cutters",
                "Chisels",
                "Tape",
                "Ruler",
            ],
            Self::PowerTools => &["Sander", "Saw", "Drill", "Excavator", "Bulldozer", "Crane"],
            Self::Other => &[
                "toolbelt",
                "Cabinet",
                "Workbench",
                "Goggles",
                "Helmet",
                "Gloves",
                "Protection",
                "Nuts",
                "Screws",
                "Washers",
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = VitrinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "Category", s)
    }
}

// =============================================================================
// BRAND
// =============================================================================

/// Brand filter option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    ForgeFlexTools,
    MightyCraftHardware,
}

impl Brand {
    pub const ALL: [Self; 2] = [Self::ForgeFlexTools, Self::MightyCraftHardware];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ForgeFlexTools => "ForgeFlex Tools",
            Self::MightyCraftHardware => "MightyCraft Hardware",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Brand {
    type Err = VitrinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "Brand", s)
    }
}

// =============================================================================
// SUBCATEGORY
// =============================================================================

/// Subcategory checkbox in the filter sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subcategory {
    Hammer,
    HandSaw,
    Wrench,
    Screwdriver,
    Pliers,
    Chisels,
    Measures,
    Grinder,
    Sander,
    Saw,
    Drill,
    ToolBelts,
    StorageSolutions,
    Workbench,
    SafetyGear,
    Fasteners,
}

impl Subcategory {
    pub const ALL: [Self; 16] = [
        Self::Hammer,
        Self::HandSaw,
        Self::Wrench,
        Self::Screwdriver,
        Self::Pliers,
        Self::Chisels,
        Self::Measures,
        Self::Grinder,
        Self::Sander,
        Self::Saw,
        Self::Drill,
        Self::ToolBelts,
        Self::StorageSolutions,
        Self::Workbench,
        Self::SafetyGear,
        Self::Fasteners,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hammer => "Hammer",
            Self::HandSaw => "Hand Saw",
            Self::Wrench => "Wrench",
            Self::Screwdriver => "Screwdriver",
            Self::Pliers => "Pliers",
            Self::Chisels => "Chisels",
            Self::Measures => "Measures",
            Self::Grinder => "Grinder",
            Self::Sander => "Sander",
            Self::Saw => "Saw",
            Self::Drill => "Drill",
            Self::ToolBelts => "Tool Belts",
            Self::StorageSolutions => "Storage Solutions",
            Self::Workbench => "Workbench",
            Self::SafetyGear => "Safety Gear",
            Self::Fasteners => "Fasteners",
        }
    }

    /// Product-name keywords; empty for subcategories with no products
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Hammer => &["Hammer"],
            Self::HandSaw | Self::Saw => &["Saw"],
            Self::Wrench => &["Wrench", "Spanner"],
            Self::Screwdriver => &["Screwdriver"],
            Self::Pliers => &["Pliers", "Cutters"],
            Self::Chisels => &["Chisels"],
            Self::Measures => &["Measur", "Ruler"],
            Self::Grinder => &[],
            Self::Sander => &["Sander"],
            Self::Drill => &["Drill"],
            Self::ToolBelts => &["toolbelt"],
            Self::StorageSolutions => &["Cabinet"],
            Self::Workbench => &["Workbench"],
            Self::SafetyGear => &["Gloves", "Helmet", "Protection", "Goggles"],
            Self::Fasteners => &["Screws", "Nuts", "Washers"],
        }
    }

    /// Whether the storefront lists products for this subcategory
    #[must_use]
    pub const fn expects_results(self) -> bool {
        !matches!(self, Self::Grinder)
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Subcategory {
    type Err = VitrinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::label, "Subcategory", s)
    }
}

// =============================================================================
// LANGUAGE
// =============================================================================

/// Storefront UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    En,
    De,
    Es,
    Fr,
    Nl,
    Tr,
}

impl Language {
    pub const ALL: [Self; 6] = [Self::En, Self::De, Self::Es, Self::Fr, Self::Nl, Self::Tr];

    /// Upper-case code shown in the language dropdown
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::De => "DE",
            Self::Es => "ES",
            Self::Fr => "FR",
            Self::Nl => "NL",
            Self::Tr => "TR",
        }
    }

    /// `data-test` id of the dropdown option
    #[must_use]
    pub fn option_test_id(self) -> String {
        format!("lang-{}", self.code().to_ascii_lowercase())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = VitrinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, Self::code, "Language", s)
    }
}

// =============================================================================
// FIXTURE DATA
// =============================================================================

/// Category plus brand, applied together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub category: Category,
    pub brand: Brand,
}

/// Filter combinations exercised by the multiple-filter scenarios
pub const MULTIPLE_FILTERS: [FilterSelection; 2] = [
    FilterSelection {
        category: Category::HandTools,
        brand: Brand::ForgeFlexTools,
    },
    FilterSelection {
        category: Category::PowerTools,
        brand: Brand::MightyCraftHardware,
    },
];

/// Products used by search and detail scenarios
pub const SEARCH_PRODUCTS: [&str; 3] = ["Bolt Cutters", "Belt Sander", "Safety Goggles"];

/// Phone update accepted by the profile form
pub const VALID_PHONE_UPDATE: &str = "3384518342";

/// Phone update rejected as longer than 24 characters
pub const INVALID_PHONE_UPDATE: &str = "2294333810192371892738127";

/// Products and quantity per product for cart subtotal scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfiguration {
    pub product_count: usize,
    pub quantity_per_product: u32,
}

pub const CART_CONFIGURATIONS: [CartConfiguration; 3] = [
    CartConfiguration {
        product_count: 1,
        quantity_per_product: 1,
    },
    CartConfiguration {
        product_count: 2,
        quantity_per_product: 3,
    },
    CartConfiguration {
        product_count: 3,
        quantity_per_product: 2,
    },
];

/// Registration data for one synthetic user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub state: String,
    /// ISO country code for the `#country` select
    pub country: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// `test-<unix millis>-<0..10000>@yopmail.com`
#[must_use]
pub fn unique_email() -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("test-{timestamp}-{suffix}@yopmail.com")
}

/// A registrable user with a fresh unique email
#[must_use]
pub fn generate_valid_user() -> UserProfile {
    UserProfile {
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        date_of_birth: "1990-01-01".to_string(),
        address: "123 Test Street".to_string(),
        postcode: "12345".to_string(),
        city: "Test City".to_string(),
        state: "Test State".to_string(),
        country: "MX".to_string(),
        phone: "3384518349".to_string(),
        email: unique_email(),
        password: "Cn20nH1]".to_string(),
    }
}
