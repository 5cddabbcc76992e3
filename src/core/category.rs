//! Keyword-based category guessing for visual search.
//!
//! This looks only at the image reference and the shopper's query text, not
//! at pixel content.

/// Keyword rules, checked in order; the first rule with a hit wins
const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("Dresses", &["dress", "gown"]),
    ("Bags", &["bag", "tote", "purse"]),
    ("Shoes", &["shoe", "sandal", "footwear"]),
    ("Outerwear", &["jacket", "coat"]),
    ("Accessories", &["necklace", "earring", "jewelry"]),
];

/// Guess a catalog category from an image reference and an optional query
pub fn guess_category(image_ref: &str, query: &str) -> Option<&'static str> {
    let combined = format!("{} {}", image_ref, query).to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| combined.contains(k)))
        .map(|(category, _)| *category)
}
