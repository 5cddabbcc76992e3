//! Product catalog routes

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

use super::{ApiError, AppState};
use crate::data;
use crate::models::Product;
use crate::stores::{NewProduct, ProductPatch};

#[get("")]
pub async fn list_products(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.repo.list())
}

#[post("")]
pub async fn create_product(
    state: web::Data<AppState>,
    body: web::Json<NewProduct>,
) -> Result<HttpResponse, ApiError> {
    let product = state.repo.create(body.into_inner())?;
    Ok(HttpResponse::Created().json(product))
}

#[get("/{id}")]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let product = state.repo.get(path.into_inner())?;
    Ok(HttpResponse::Ok().json(product))
}

#[put("/{id}")]
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<u32>,
    body: web::Json<ProductPatch>,
) -> Result<HttpResponse, ApiError> {
    let product = state.repo.update(path.into_inner(), body.into_inner())?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete("/{id}")]
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    state.repo.delete(path.into_inner())?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// An empty category answers 404 with an empty list
#[get("/category/{category}")]
pub async fn get_category(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let products = state.repo.by_category(&path);

    if products.is_empty() {
        return HttpResponse::NotFound().json(Vec::<Product>::new());
    }

    HttpResponse::Ok().json(products)
}

#[get("/collections/{name}")]
pub async fn get_collection(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let products = state.repo.list();

    let collection = match path.as_str() {
        "featured" => data::featured_products(&products),
        "new-arrivals" => data::new_arrivals(&products),
        "bestsellers" => data::bestsellers(&products),
        "on-sale" => data::on_sale_products(&products),
        "top-rated" => data::top_rated_products(&products),
        other => return Err(ApiError::NotFound(format!("Unknown collection '{}'", other))),
    };

    Ok(HttpResponse::Ok().json(collection))
}

/// Configure product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_products)
        .service(create_product)
        .service(get_category)
        .service(get_collection)
        .service(get_product)
        .service(update_product)
        .service(delete_product);
}
