//! Search criteria for the catalog filter pipeline

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Named price range selectable on the category page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBracket {
    /// Effective price below 2000
    #[serde(rename = "under2000")]
    Under2000,
    /// Effective price from 2000 to 5000, both ends included
    #[serde(rename = "2000to5000")]
    From2000To5000,
    /// Effective price above 5000
    #[serde(rename = "over5000")]
    Over5000,
}

impl PriceBracket {
    pub const ALL: [PriceBracket; 3] = [
        PriceBracket::Under2000,
        PriceBracket::From2000To5000,
        PriceBracket::Over5000,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBracket::Under2000 => "under2000",
            PriceBracket::From2000To5000 => "2000to5000",
            PriceBracket::Over5000 => "over5000",
        }
    }

    /// Check whether a price falls inside this bracket
    pub fn contains(&self, price: f64) -> bool {
        match self {
            PriceBracket::Under2000 => price < 2000.0,
            PriceBracket::From2000To5000 => (2000.0..=5000.0).contains(&price),
            PriceBracket::Over5000 => price > 5000.0,
        }
    }
}

impl FromStr for PriceBracket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "under2000" => Ok(PriceBracket::Under2000),
            "2000to5000" => Ok(PriceBracket::From2000To5000),
            "over5000" => Ok(PriceBracket::Over5000),
            other => Err(format!("unknown price bracket: {}", other)),
        }
    }
}

/// Sort key for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Promoted items last, then rating descending
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    /// Descending id
    Newest,
    /// Descending rating
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Newest => "newest",
            SortKey::Rating => "rating",
        }
    }

    /// Parse a sort key, falling back to featured for anything unknown
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // the storefront has used both camelCase and kebab-case spellings
        match s.trim() {
            "featured" | "" => Ok(SortKey::Featured),
            "price-asc" | "priceAsc" | "price_asc" => Ok(SortKey::PriceAsc),
            "price-desc" | "priceDesc" | "price_desc" => Ok(SortKey::PriceDesc),
            "newest" => Ok(SortKey::Newest),
            "rating" => Ok(SortKey::Rating),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Everything a shopper can narrow the catalog by.
///
/// Every empty field means "no filtering" for that predicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Free text matched against name, description and category
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price_brackets: Vec<PriceBracket>,
    /// Exact product color names
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub min_rating: Option<f64>,
    /// Dominant color names from a visual search, matched with synonyms
    #[serde(default)]
    pub visual_colors: Vec<String>,
    #[serde(default)]
    pub sort: SortKey,
}
