//! Error type for API routes and its JSON response mapping

use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::stores::{RepositoryError, StoreError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Repository(RepositoryError::NotFound(_)) | ApiError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Repository(RepositoryError::Validation(_))
            | ApiError::Store(StoreError::Cart(_))
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Repository(RepositoryError::NotFound(_)) => {
                json!({ "error": "Product not found" })
            }
            ApiError::Repository(RepositoryError::Validation(details)) => json!({
                "error": "Invalid product",
                "details": details,
            }),
            ApiError::Store(StoreError::Cart(e)) => json!({
                "error": "Invalid request",
                "details": e.to_string(),
            }),
            ApiError::Store(e) => {
                error!("Store write failed: {}", e);
                json!({ "error": "Failed to save", "details": e.to_string() })
            }
            ApiError::BadRequest(details) => json!({
                "error": "Invalid request",
                "details": details,
            }),
            ApiError::NotFound(what) => json!({ "error": what }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Answer malformed JSON bodies with the same error shape as other failures
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

/// Same for malformed query strings
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}
