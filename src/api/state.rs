//! Shared state handed to every route

use anyhow::Result;
use std::sync::Arc;

use crate::config::{AppConfig, Paths};
use crate::imaging::{DefaultImageLoader, ImageLoader};
use crate::models::Product;
use crate::stores::{CartStore, InMemoryProductRepository, ProductRepository, WishlistStore};

pub struct AppState {
    pub repo: Arc<dyn ProductRepository>,
    pub cart: CartStore,
    pub wishlist: WishlistStore,
    pub loader: Arc<dyn ImageLoader>,
    pub config: AppConfig,
}

impl AppState {
    /// Build the production state: stores under the config directory and a
    /// loader that reads files and fetches urls
    pub fn new(paths: &Paths, config: AppConfig, catalog: Vec<Product>) -> Result<Self> {
        let loader = DefaultImageLoader::new(config.fetch_timeout(), config.asset_dir.clone())?;

        Ok(Self {
            repo: Arc::new(InMemoryProductRepository::new(catalog)),
            cart: CartStore::open(paths.cart_path())?,
            wishlist: WishlistStore::open(paths.wishlist_path())?,
            loader: Arc::new(loader),
            config,
        })
    }
}

/// State over the seed catalog with stores in a scratch directory
#[cfg(test)]
pub(crate) fn test_state(dir: &std::path::Path) -> actix_web::web::Data<AppState> {
    let paths = Paths::new(Some(dir.to_path_buf())).unwrap();
    let state = AppState::new(&paths, AppConfig::default(), crate::data::seed_products()).unwrap();
    actix_web::web::Data::new(state)
}
