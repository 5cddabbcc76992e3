//! Search API routes
//!
//! Text search with filter facets, and visual search from an image
//! reference or an uploaded file.

use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use futures::StreamExt;
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, AppState};
use crate::core::{find_visual_similar_products, Facets, SearchLib};
use crate::imaging::ImageSource;
use crate::models::{PriceBracket, SearchCriteria, SortKey};

/// Query string for `GET /search`; list parameters are comma separated
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
    pub price: Option<String>,
    pub colors: Option<String>,
    pub sizes: Option<String>,
    pub materials: Option<String>,
    pub min_rating: Option<f64>,
    pub sort: Option<String>,
    #[serde(rename = "type")]
    pub search_type: Option<String>,
    pub visual_colors: Option<String>,
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl SearchQuery {
    pub fn into_criteria(self) -> Result<SearchCriteria, ApiError> {
        let price_brackets = split_list(self.price.as_deref())
            .iter()
            .map(|p| p.parse::<PriceBracket>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(ApiError::BadRequest)?;

        // a visual search link carries the detected colors in `colors`
        let is_visual = self.search_type.as_deref() == Some("visual");
        let (colors, visual_colors) = match (is_visual, self.visual_colors.as_deref()) {
            (true, None) => (Vec::new(), split_list(self.colors.as_deref())),
            (true, Some(visual)) => (split_list(self.colors.as_deref()), split_list(Some(visual))),
            (false, _) => (split_list(self.colors.as_deref()), Vec::new()),
        };

        Ok(SearchCriteria {
            query: self.q,
            category: self.category.filter(|c| !c.trim().is_empty()),
            price_brackets,
            colors,
            sizes: split_list(self.sizes.as_deref()),
            materials: split_list(self.materials.as_deref()),
            min_rating: self.min_rating,
            visual_colors,
            sort: self
                .sort
                .as_deref()
                .map(SortKey::parse_lenient)
                .unwrap_or_default(),
        })
    }
}

/// Filter and sort the catalog.
///
/// Facets cover everything matching the text query and category, so
/// selecting a filter never hides the other options.
#[get("")]
pub async fn search_products(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let criteria = query.into_inner().into_criteria()?;
    let products = state.repo.list();

    let results = SearchLib::search(&products, &criteria);
    let scope = SearchLib::search(
        &products,
        &SearchCriteria {
            query: criteria.query.clone(),
            category: criteria.category.clone(),
            ..Default::default()
        },
    );

    Ok(HttpResponse::Ok().json(json!({
        "total": results.len(),
        "products": results,
        "facets": Facets::from_products(&scope),
    })))
}

#[derive(Debug, Deserialize)]
pub struct VisualSearchBody {
    pub image: String,
    #[serde(default)]
    pub query: String,
    pub limit: Option<usize>,
}

/// Find products that look like an image url, path or data uri
#[post("/visual")]
pub async fn visual_search(
    state: web::Data<AppState>,
    body: web::Json<VisualSearchBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let source = ImageSource::parse(&body.image);
    let limit = body.limit.unwrap_or(state.config.visual_search_limit);

    let matches = find_visual_similar_products(
        state.loader.as_ref(),
        &source,
        &state.repo.list(),
        &body.query,
        limit,
        state.config.sampling(),
    )
    .await;

    HttpResponse::Ok().json(matches)
}

/// Same as `/visual` for a multipart upload with an `image` file part
#[post("/visual/upload")]
pub async fn visual_search_upload(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let mut image: Option<(String, Vec<u8>)> = None;
    let mut query = String::new();
    let mut limit = state.config.visual_search_limit;

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let disp = field.content_disposition().clone();
        let name = disp.get_name().map(|s| s.to_string()).unwrap_or_default();
        let filename = disp.get_filename().map(|s| s.to_string()).unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| ApiError::BadRequest(e.to_string()))?;
            bytes.extend_from_slice(&data);
        }

        match name.as_str() {
            "image" => image = Some((filename, bytes)),
            "query" => query = String::from_utf8_lossy(&bytes).trim().to_string(),
            "limit" => {
                limit = String::from_utf8_lossy(&bytes)
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::BadRequest("limit must be a number".to_string()))?;
            }
            _ => {}
        }
    }

    let (name, data) =
        image.ok_or_else(|| ApiError::BadRequest("missing 'image' file".to_string()))?;
    let source = ImageSource::Bytes { name, data };

    let matches = find_visual_similar_products(
        state.loader.as_ref(),
        &source,
        &state.repo.list(),
        &query,
        limit,
        state.config.sampling(),
    )
    .await;

    Ok(HttpResponse::Ok().json(matches))
}

/// Configure search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search_products)
        .service(visual_search)
        .service(visual_search_upload);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_state;
    use crate::imaging::encode_png;
    use actix_web::test as actix_test;
    use actix_web::{http::StatusCode, App};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use image::{Rgba, RgbaImage};
    use serde_json::Value;

    const RED_IDS: [u64; 8] = [3, 10, 18, 19, 20, 29, 36, 38];

    fn ids(body: &Value) -> Vec<u64> {
        body["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect()
    }

    fn red_png() -> Vec<u8> {
        encode_png(&RgbaImage::from_pixel(40, 40, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn test_query_into_criteria() {
        let query = SearchQuery {
            price: Some("under2000, over5000".to_string()),
            sizes: Some("S,,M".to_string()),
            sort: Some("priceAsc".to_string()),
            ..Default::default()
        };
        let criteria = query.into_criteria().unwrap();
        assert_eq!(
            criteria.price_brackets,
            vec![PriceBracket::Under2000, PriceBracket::Over5000]
        );
        assert_eq!(criteria.sizes, vec!["S", "M"]);
        assert_eq!(criteria.sort, SortKey::PriceAsc);

        let bad = SearchQuery {
            price: Some("cheap".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad.into_criteria(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_visual_type_reads_colors() {
        let query = SearchQuery {
            search_type: Some("visual".to_string()),
            colors: Some("Red,Blue".to_string()),
            ..Default::default()
        };
        let criteria = query.into_criteria().unwrap();
        assert!(criteria.colors.is_empty());
        assert_eq!(criteria.visual_colors, vec!["Red", "Blue"]);
    }

    #[actix_web::test]
    async fn test_search_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(test_state(dir.path()))
                .service(web::scope("/search").configure(configure)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/search?category=Dresses&minRating=4.8&sort=newest")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&body), vec![22, 21, 10, 6, 1]);
        assert_eq!(body["total"], 5);
        // facets span every dress, not just the filtered ones
        assert!(!body["facets"]["colors"].as_array().unwrap().is_empty());

        let req = actix_test::TestRequest::get()
            .uri("/search?type=visual&colors=Red")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        let mut found = ids(&body);
        found.sort_unstable();
        assert_eq!(found, RED_IDS.to_vec());

        let req = actix_test::TestRequest::get()
            .uri("/search?price=cheap")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_visual_search_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(test_state(dir.path()))
                .service(web::scope("/search").configure(configure)),
        )
        .await;

        let uri = format!("data:image/png;base64,{}", STANDARD.encode(red_png()));
        let req = actix_test::TestRequest::post()
            .uri("/search/visual")
            .set_json(json!({ "image": uri, "limit": 4 }))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["colors"], json!(["Red"]));
        assert_eq!(body["stage"], "color");
        let found = ids(&body);
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|id| RED_IDS.contains(id)));
    }

    #[actix_web::test]
    async fn test_visual_search_upload() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(test_state(dir.path()))
                .service(web::scope("/search").configure(configure)),
        )
        .await;

        let boundary = "fabfierce-boundary";
        let mut payload = Vec::new();
        payload.extend_from_slice(
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"red.png\"\r\n\
                 Content-Type: image/png\r\n\r\n",
                b = boundary
            )
            .as_bytes(),
        );
        payload.extend_from_slice(&red_png());
        payload.extend_from_slice(
            format!(
                "\r\n--{b}\r\nContent-Disposition: form-data; name=\"limit\"\r\n\r\n3\r\n--{b}--\r\n",
                b = boundary
            )
            .as_bytes(),
        );

        let req = actix_test::TestRequest::post()
            .uri("/search/visual/upload")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            ))
            .set_payload(payload)
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["colors"], json!(["Red"]));
        assert_eq!(ids(&body).len(), 3);
    }

    #[actix_web::test]
    async fn test_visual_search_unreadable_image_still_answers() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(test_state(dir.path()))
                .service(web::scope("/search").configure(configure)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/search/visual")
            .set_json(json!({ "image": "/no/such/evening-dress.jpg" }))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        // undecodable images count as "Multi", which several products carry
        assert_eq!(body["colors"], json!(["Multi"]));
        assert_eq!(body["stage"], "color");
        assert!(body["category"].is_null());
        assert_eq!(ids(&body), vec![5, 8, 16, 22, 31, 33]);
    }
}
