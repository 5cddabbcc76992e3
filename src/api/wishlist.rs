//! Wishlist routes

use actix_web::{delete, get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, AppState};
use crate::models::WishlistItem;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistBody {
    pub product_id: u32,
}

#[get("")]
pub async fn get_wishlist(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "items": state.wishlist.items() }))
}

/// Adding a product twice is a no-op reported with `added: false`
#[post("")]
pub async fn add_to_wishlist(
    state: web::Data<AppState>,
    body: web::Json<WishlistBody>,
) -> Result<HttpResponse, ApiError> {
    let product = state.repo.get(body.product_id)?;
    let added = state.wishlist.add_item(WishlistItem::from(&product))?;

    Ok(HttpResponse::Ok().json(json!({
        "added": added,
        "items": state.wishlist.items(),
    })))
}

#[delete("/{id}")]
pub async fn remove_from_wishlist(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    if !state.wishlist.remove_item(path.into_inner())? {
        return Err(ApiError::NotFound("Item not in wishlist".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({ "items": state.wishlist.items() })))
}

/// Configure wishlist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_wishlist)
        .service(add_to_wishlist)
        .service(remove_from_wishlist);
}
