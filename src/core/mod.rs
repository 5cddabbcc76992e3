//! Core catalog logic: color matching, visual search, filtering and sorting

pub mod category;
pub mod colorlib;
pub mod dominant;
pub mod search;
pub mod sorting;
pub mod visual;

pub use category::guess_category;
pub use colorlib::{ColorLib, NamedColor};
pub use dominant::{extract_dominant_colors, extract_dominant_colors_from, SamplingOptions};
pub use search::{Facets, SearchLib};
pub use sorting::SortLib;
pub use visual::{find_visual_similar_products, rank_visual_matches, MatchStage, VisualMatches};
