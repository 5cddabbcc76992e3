//! Visual similarity search
//!
//! Ranks catalog products against an image using its dominant colors, a
//! keyword category guess, and finally a random sample so the shopper always
//! sees something. Results are "similar" on a best-effort basis only.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, error, warn};

use super::category::guess_category;
use super::colorlib::{ColorLib, NamedColor};
use super::dominant::{extract_dominant_colors, SamplingOptions, DEFAULT_MAX_COLORS};
use crate::imaging::{ImageLoader, ImageSource};
use crate::models::Product;

/// Default number of similar products returned
pub const DEFAULT_VISUAL_LIMIT: usize = 6;

/// Fewer matches than this moves on to the next stage
const MIN_USEFUL_MATCHES: usize = 2;

/// Which stage produced the final result list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStage {
    Color,
    Category,
    Random,
}

/// Result of a visual search
#[derive(Debug, Clone, Serialize)]
pub struct VisualMatches {
    pub colors: Vec<NamedColor>,
    pub category: Option<&'static str>,
    pub stage: MatchStage,
    pub products: Vec<Product>,
}

impl VisualMatches {
    fn empty() -> Self {
        Self {
            colors: Vec::new(),
            category: None,
            stage: MatchStage::Random,
            products: Vec::new(),
        }
    }
}

/// Products with at least one color matching a dominant color, by name or synonym
pub fn match_by_color(products: &[Product], dominant: &[NamedColor], limit: usize) -> Vec<Product> {
    if dominant.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|p| {
            dominant.iter().any(|d| {
                p.colors
                    .iter()
                    .any(|c| ColorLib::color_matches(c, d.as_str()))
            })
        })
        .take(limit)
        .cloned()
        .collect()
}

/// Products in a category, ignoring case
pub fn match_by_category(products: &[Product], category: &str, limit: usize) -> Vec<Product> {
    if category.is_empty() {
        return Vec::new();
    }

    let category = category.to_lowercase();
    products
        .iter()
        .filter(|p| p.category.to_lowercase() == category)
        .take(limit)
        .cloned()
        .collect()
}

/// Rank products against already extracted dominant colors.
///
/// Color matches come first. With fewer than two, category matches from the
/// image reference and query are appended (deduplicated by id). With still
/// fewer than two, a uniform random sample of the catalog is returned.
pub fn rank_visual_matches<R: Rng + ?Sized>(
    products: &[Product],
    dominant: &[NamedColor],
    image_ref: &str,
    query: &str,
    limit: usize,
    rng: &mut R,
) -> VisualMatches {
    let mut results = match_by_color(products, dominant, limit);
    let mut stage = MatchStage::Color;
    let mut category = None;

    if results.len() < MIN_USEFUL_MATCHES {
        category = guess_category(image_ref, query);
        let by_category = category
            .map(|c| match_by_category(products, c, limit))
            .unwrap_or_default();

        let mut seen: HashSet<u32> = results.iter().map(|p| p.id).collect();
        for product in by_category {
            if seen.insert(product.id) {
                results.push(product);
            }
        }
        results.truncate(limit);
        stage = MatchStage::Category;
    }

    if results.len() < MIN_USEFUL_MATCHES {
        results = products.to_vec();
        results.shuffle(rng);
        results.truncate(limit);
        stage = MatchStage::Random;
    }

    debug!(
        "Visual search: colors={:?} category={:?} stage={:?} matches={}",
        dominant,
        category,
        stage,
        results.len()
    );

    VisualMatches {
        colors: dominant.to_vec(),
        category,
        stage,
        products: results,
    }
}

/// Find catalog products that look like an image.
///
/// Never fails: an image that cannot be loaded or decoded is treated as
/// `[Multi]`, and an internal fault yields an empty result.
pub async fn find_visual_similar_products(
    loader: &dyn ImageLoader,
    source: &ImageSource,
    products: &[Product],
    query: &str,
    limit: usize,
    options: SamplingOptions,
) -> VisualMatches {
    let loaded = match loader.load(source).await {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            warn!("Failed to load image for visual search: {}", e);
            None
        }
    };

    let image_ref = source.reference_text();
    let query = query.to_string();
    let products = products.to_vec();

    let task = tokio::task::spawn_blocking(move || {
        let colors = match loaded.map(|l| l.into_rgba()) {
            Some(Ok(img)) => extract_dominant_colors(&img, DEFAULT_MAX_COLORS, options),
            Some(Err(e)) => {
                warn!("Failed to decode image for visual search: {}", e);
                vec![NamedColor::Multi]
            }
            None => vec![NamedColor::Multi],
        };

        rank_visual_matches(
            &products,
            &colors,
            &image_ref,
            &query,
            limit,
            &mut rand::thread_rng(),
        )
    });

    match task.await {
        Ok(matches) => matches,
        Err(e) => {
            error!("Visual search task failed: {}", e);
            VisualMatches::empty()
        }
    }
}
