// demos/tracking_app/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use custodia::CustodiaError;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Unknown user: {0}")]
  UnknownUser(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from] // Allows conversion from custodia::CustodiaError
    source: CustodiaError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

// Allow anyhow::Error to be converted into ApiError::Internal for convenience
// in handlers using `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for ApiError {
  fn from(err: anyhow::Error) -> Self {
    ApiError::Internal(err.to_string())
  }
}

impl ResponseError for ApiError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(api_error = %self, "Responding with error");
    match self {
      ApiError::UnknownUser(m) => {
        HttpResponse::Unauthorized().json(json!({"error": format!("Unknown user: {}", m)}))
      }
      ApiError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      ApiError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      ApiError::Workflow { source } => workflow_error_response(source),
      ApiError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// One place maps the engine taxonomy to HTTP statuses: denial is 403,
// missing evidence is a 422 on the submitted entity, sequencing and stock
// conflicts are 409s, lookups are 404/400.
fn workflow_error_response(source: &CustodiaError) -> HttpResponse {
  let body = json!({"error": source.to_string()});
  match source {
    CustodiaError::AuthorizationDenied { .. } => HttpResponse::Forbidden().json(body),
    CustodiaError::MissingEvidence { field } => {
      HttpResponse::UnprocessableEntity().json(json!({"error": source.to_string(), "field": field.as_str()}))
    }
    CustodiaError::InvalidSequencing { .. } => HttpResponse::Conflict().json(body),
    CustodiaError::InsufficientStock { .. } => HttpResponse::Conflict().json(body),
    CustodiaError::OrderNotFound(_) => HttpResponse::NotFound().json(body),
    CustodiaError::StageKeyInvalid(_) => HttpResponse::BadRequest().json(body),
    CustodiaError::Validation(_) => HttpResponse::BadRequest().json(body),
    CustodiaError::Backend { .. } => {
      HttpResponse::InternalServerError().json(json!({"error": "Storage operation failed"}))
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = ApiError> = std::result::Result<T, E>;
