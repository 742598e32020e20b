// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code; every error
/// renders as the shared `{ok: false, error}` body
#[derive(Error, Debug)]
pub enum SpotsError {
    #[error("{0}")]
    Validation(String),

    #[error("Not authorized")]
    Unauthorized,

    #[error("{0}")]
    Store(String),
}

/// Convert SpotsError to HTTP response
/// DOCUMENTATION: Validation errors are client faults (never logged as
/// server errors); store errors surface the upstream message
impl ResponseError for SpotsError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "ok": false,
            "error": self.to_string(),
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            SpotsError::Validation(_) => StatusCode::BAD_REQUEST,
            SpotsError::Unauthorized => StatusCode::UNAUTHORIZED,
            SpotsError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
