//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Internal(String),
}

/// Map the core taxonomy onto HTTP statuses. Tenant problems are the
/// caller's fault (missing or corrupt scope headers), so they surface as
/// 400/409 rather than 500.
impl From<sindico_core::Error> for ApiError {
  fn from(e: sindico_core::Error) -> Self {
    use sindico_core::Error as E;
    match e {
      E::Validation(_) | E::InvalidTransition { .. } | E::TenantUnresolved => {
        ApiError::BadRequest(e.to_string())
      }
      E::NotFound { .. } => ApiError::NotFound(e.to_string()),
      E::Conflict(_) | E::ForeignTenant => ApiError::Conflict(e.to_string()),
      E::Persistence(_) => ApiError::Internal(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    if status.is_server_error() {
      tracing::error!(%message, "request failed");
    }
    (status, Json(json!({ "error": message }))).into_response()
  }
}
