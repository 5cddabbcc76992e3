//! Color API routes

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::core::{extract_dominant_colors_from, ColorLib, NamedColor};
use crate::imaging::ImageSource;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DominantColorsBody {
    pub image: String,
    pub max_colors: Option<usize>,
}

fn describe(color: NamedColor) -> serde_json::Value {
    json!({
        "name": color.as_str(),
        "hex": ColorLib::rgb_to_hex(color.reference()),
    })
}

/// Dominant named colors of an image, most frequent first
#[post("/dominant")]
pub async fn dominant_colors(
    state: web::Data<AppState>,
    body: web::Json<DominantColorsBody>,
) -> impl Responder {
    let source = ImageSource::parse(&body.image);
    let max_colors = body.max_colors.unwrap_or(state.config.dominant_colors);

    let colors = extract_dominant_colors_from(
        state.loader.as_ref(),
        &source,
        max_colors,
        state.config.sampling(),
    )
    .await;

    let colors: Vec<_> = colors.into_iter().map(describe).collect();
    HttpResponse::Ok().json(json!({ "colors": colors }))
}

/// Every named color bucket with its reference swatch and synonyms
#[get("/palette")]
pub async fn palette() -> impl Responder {
    let colors: Vec<_> = NamedColor::ALL
        .iter()
        .map(|c| {
            let mut entry = describe(*c);
            entry["synonyms"] = json!(c.synonyms());
            entry
        })
        .collect();

    HttpResponse::Ok().json(json!({ "colors": colors }))
}

/// Configure color routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dominant_colors).service(palette);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_state;
    use crate::imaging::encode_png;
    use actix_web::{test, App};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use image::{Rgba, RgbaImage};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_dominant_colors_of_split_image() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(test_state(dir.path()))
                .service(web::scope("/colors").configure(configure)),
        )
        .await;

        // left three quarters blue, right quarter green
        let img = RgbaImage::from_fn(40, 40, |x, _| {
            if x < 30 {
                Rgba([0, 0, 255, 255])
            } else {
                Rgba([0, 128, 0, 255])
            }
        });
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(encode_png(&img)));

        let req = test::TestRequest::post()
            .uri("/colors/dominant")
            .set_json(json!({ "image": uri }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["colors"],
            json!([
                { "name": "Blue", "hex": "#0000ff" },
                { "name": "Green", "hex": "#008000" },
            ])
        );

        let req = test::TestRequest::post()
            .uri("/colors/dominant")
            .set_json(json!({ "image": uri, "maxColors": 1 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["colors"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_broken_data_uri_is_multi() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(test_state(dir.path()))
                .service(web::scope("/colors").configure(configure)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/colors/dominant")
            .set_json(json!({ "image": "data:image/png;base64,@@@" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["colors"][0]["name"], "Multi");
    }

    #[actix_web::test]
    async fn test_palette_lists_every_bucket() {
        let app = test::init_service(
            App::new().service(web::scope("/colors").configure(configure)),
        )
        .await;

        let req = test::TestRequest::get().uri("/colors/palette").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let colors = body["colors"].as_array().unwrap();
        assert_eq!(colors.len(), NamedColor::ALL.len());
        assert_eq!(colors[0]["name"], "Red");
        assert_eq!(colors[0]["synonyms"][1], "maroon");
    }
}
