//! REST API routes for the FabFierce storefront

pub mod cart;
pub mod colors;
pub mod error;
pub mod products;
pub mod search;
pub mod state;
pub mod wishlist;

use actix_web::web;

pub use error::ApiError;
pub use state::AppState;

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        // Catalog routes
        .service(web::scope("/products").configure(products::configure))
        // Text and visual search routes
        .service(web::scope("/search").configure(search::configure))
        // Color extraction routes
        .service(web::scope("/colors").configure(colors::configure))
        // Cart routes
        .service(web::scope("/cart").configure(cart::configure))
        // Wishlist routes
        .service(web::scope("/wishlist").configure(wishlist::configure));
}
