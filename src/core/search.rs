//! Catalog filtering and sorting

use serde::Serialize;

use super::colorlib::ColorLib;
use super::sorting::SortLib;
use crate::models::{Product, SearchCriteria};

/// Search library
pub struct SearchLib;

impl SearchLib {
    /// Filter the catalog by every predicate in `criteria`, then sort.
    ///
    /// Predicates are conjunctive and each empty predicate is skipped, so
    /// default criteria return the whole catalog in featured order.
    pub fn search(products: &[Product], criteria: &SearchCriteria) -> Vec<Product> {
        let query = criteria.query.trim().to_lowercase();
        let category = criteria
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase);

        let mut results: Vec<Product> = products
            .iter()
            .filter(|p| query.is_empty() || Self::matches_query(p, &query))
            .filter(|p| {
                category
                    .as_deref()
                    .map_or(true, |c| p.category.to_lowercase() == c)
            })
            .filter(|p| Self::matches_price(p, criteria))
            .filter(|p| Self::any_selected(&p.colors, &criteria.colors))
            .filter(|p| Self::any_selected(&p.sizes, &criteria.sizes))
            .filter(|p| Self::matches_material(p, &criteria.materials))
            .filter(|p| criteria.min_rating.map_or(true, |min| p.rating >= min))
            .filter(|p| Self::matches_visual_colors(p, &criteria.visual_colors))
            .cloned()
            .collect();

        SortLib::sort_products(&mut results, criteria.sort);
        results
    }

    /// Case-insensitive substring match on name, description or category.
    /// `query` must already be lower-cased.
    fn matches_query(product: &Product, query: &str) -> bool {
        product.name.to_lowercase().contains(query)
            || product.description.to_lowercase().contains(query)
            || product.category.to_lowercase().contains(query)
    }

    fn matches_price(product: &Product, criteria: &SearchCriteria) -> bool {
        if criteria.price_brackets.is_empty() {
            return true;
        }

        let price = product.effective_price();
        criteria.price_brackets.iter().any(|b| b.contains(price))
    }

    /// True when nothing is selected or the product has a selected value
    fn any_selected(values: &[String], selected: &[String]) -> bool {
        selected.is_empty() || values.iter().any(|v| selected.contains(v))
    }

    fn matches_material(product: &Product, selected: &[String]) -> bool {
        if selected.is_empty() {
            return true;
        }

        product
            .material
            .as_ref()
            .map_or(false, |m| selected.contains(m))
    }

    fn matches_visual_colors(product: &Product, wanted: &[String]) -> bool {
        if wanted.is_empty() {
            return true;
        }

        wanted.iter().any(|w| {
            product
                .colors
                .iter()
                .any(|c| ColorLib::color_matches(c, w))
        })
    }
}

/// Distinct filter values offered alongside a product listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub materials: Vec<String>,
}

impl Facets {
    /// Collect distinct colors, sizes and materials in first-seen order
    pub fn from_products(products: &[Product]) -> Self {
        let mut facets = Facets::default();

        for product in products {
            for color in &product.colors {
                push_unique(&mut facets.colors, color);
            }
            for size in &product.sizes {
                push_unique(&mut facets.sizes, size);
            }
            if let Some(material) = &product.material {
                push_unique(&mut facets.materials, material);
            }
        }

        facets
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
