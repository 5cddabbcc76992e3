//! Shopping cart routes

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, AppState};
use crate::models::CartItem;

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartBody {
    pub product_id: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityBody {
    pub quantity: i64,
}

fn cart_response(state: &AppState) -> HttpResponse {
    let cart = state.cart.snapshot();
    HttpResponse::Ok().json(json!({
        "items": cart.items,
        "total": cart.total(),
        "count": cart.count(),
    }))
}

#[get("")]
pub async fn get_cart(state: web::Data<AppState>) -> HttpResponse {
    cart_response(&state)
}

/// Add a product at its current effective price
#[post("")]
pub async fn add_to_cart(
    state: web::Data<AppState>,
    body: web::Json<AddToCartBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    if body.quantity == 0 {
        return Err(ApiError::BadRequest("quantity must be at least 1".to_string()));
    }

    let product = state.repo.get(body.product_id)?;
    state.cart.add_item(CartItem::from_product(
        &product,
        body.quantity,
        body.size,
        body.color,
    ))?;

    Ok(cart_response(&state))
}

/// Set the quantity of every line for a product; zero or less removes it
#[put("/{id}")]
pub async fn update_quantity(
    state: web::Data<AppState>,
    path: web::Path<u32>,
    body: web::Json<UpdateQuantityBody>,
) -> Result<HttpResponse, ApiError> {
    state.cart.update_quantity(path.into_inner(), body.quantity)?;
    Ok(cart_response(&state))
}

#[delete("/{id}")]
pub async fn remove_from_cart(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    if !state.cart.remove_item(path.into_inner())? {
        return Err(ApiError::NotFound("Item not in cart".to_string()));
    }

    Ok(cart_response(&state))
}

#[delete("")]
pub async fn clear_cart(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    state.cart.clear()?;
    Ok(cart_response(&state))
}

/// Configure cart routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_cart)
        .service(add_to_cart)
        .service(clear_cart)
        .service(update_quantity)
        .service(remove_from_cart);
}
