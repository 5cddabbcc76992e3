//! Seed catalog and catalog accessors
//!
//! The seed catalog ships inside the binary as `data/products.json`. A
//! different catalog file can be loaded at startup; entries that fail to
//! parse or break the product invariants are skipped with a warning.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::path::Path;
use tracing::warn;

use crate::models::{Product, BADGE_BESTSELLER, BADGE_NEW_ARRIVAL};

const SEED_CATALOG: &str = include_str!("../../data/products.json");

/// Minimum rating for the featured collection
pub const FEATURED_MIN_RATING: f64 = 4.7;
/// Rating that qualifies a product as a bestseller without the badge
pub const BESTSELLER_MIN_RATING: f64 = 4.8;
/// Reviews needed before a product can be top rated
pub const TOP_RATED_MIN_REVIEWS: u32 = 20;

static SEED_PRODUCTS: Lazy<Vec<Product>> = Lazy::new(|| parse_catalog(SEED_CATALOG));

/// A copy of the built-in catalog
pub fn seed_products() -> Vec<Product> {
    SEED_PRODUCTS.clone()
}

/// Parse a JSON array of products, skipping malformed entries
pub fn parse_catalog(json: &str) -> Vec<Product> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(json) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Catalog is not a JSON array of products: {}", e);
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let product: Product = match serde_json::from_value(entry) {
                Ok(product) => product,
                Err(e) => {
                    warn!("Skipping catalog entry {}: {}", index, e);
                    return None;
                }
            };

            if let Err(reason) = product.validate() {
                warn!("Skipping catalog entry {}: {}", index, reason);
                return None;
            }

            Some(product)
        })
        .collect()
}

/// Load a catalog file from disk
pub fn load_catalog_file(path: &Path) -> Result<Vec<Product>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {:?}", path))?;
    Ok(parse_catalog(&content))
}

pub fn product_by_id(products: &[Product], id: u32) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Products in a category, ignoring case
pub fn products_by_category(products: &[Product], category: &str) -> Vec<Product> {
    let category = category.to_lowercase();
    products
        .iter()
        .filter(|p| p.category.to_lowercase() == category)
        .cloned()
        .collect()
}

pub fn featured_products(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.rating >= FEATURED_MIN_RATING)
        .cloned()
        .collect()
}

pub fn new_arrivals(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.has_badge(BADGE_NEW_ARRIVAL))
        .cloned()
        .collect()
}

pub fn bestsellers(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.has_badge(BADGE_BESTSELLER) || p.rating >= BESTSELLER_MIN_RATING)
        .cloned()
        .collect()
}

pub fn on_sale_products(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.is_on_sale).cloned().collect()
}

/// Products whose effective price lies in `[min_price, max_price]`
pub fn products_by_price_range(products: &[Product], min_price: f64, max_price: f64) -> Vec<Product> {
    products
        .iter()
        .filter(|p| {
            let price = p.effective_price();
            price >= min_price && price <= max_price
        })
        .cloned()
        .collect()
}

/// Products whose material contains `material`, ignoring case
pub fn products_by_material(products: &[Product], material: &str) -> Vec<Product> {
    let material = material.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.material
                .as_ref()
                .map_or(false, |m| m.to_lowercase().contains(&material))
        })
        .cloned()
        .collect()
}

/// Well-reviewed products, best rated first
pub fn top_rated_products(products: &[Product]) -> Vec<Product> {
    let mut rated: Vec<Product> = products
        .iter()
        .filter(|p| p.review_count >= TOP_RATED_MIN_REVIEWS)
        .cloned()
        .collect();
    rated.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    rated
}
