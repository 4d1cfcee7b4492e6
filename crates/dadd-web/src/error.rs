//! Error types and axum `IntoResponse` implementation.
//!
//! Every body is plain text. Store and render failures are logged here so
//! handlers can simply propagate them with `?`.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found: {0}")]
  NotFound(String),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
  #[error("render error: {0}")]
  Render(String),
}

impl Error {
  /// Box a backend error; usable directly as a `map_err` argument.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
      Error::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
      Error::Render(msg) => {
        tracing::error!(error = %msg, "render failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
    }
  }
}
