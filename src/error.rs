//! Service-level errors and their HTTP mapping.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::domain::QuestionError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("unknown question: {0}")]
  UnknownQuestion(String),

  #[error("unknown session: {0}")]
  UnknownSession(String),

  #[error("invalid question: {0}")]
  InvalidQuestion(#[from] QuestionError),

  #[error("question {0} already exists")]
  QuestionExists(String),

  #[error("session {session_id} is not ready to submit: {reason}")]
  NotSubmittable { session_id: String, reason: &'static str },

  #[error("failed to persist submission: {0}")]
  Persistence(#[from] StoreError),
}

impl AppError {
  pub fn status(&self) -> StatusCode {
    match self {
      AppError::UnknownQuestion(_) | AppError::UnknownSession(_) => StatusCode::NOT_FOUND,
      AppError::InvalidQuestion(_) => StatusCode::UNPROCESSABLE_ENTITY,
      AppError::QuestionExists(_) | AppError::NotSubmittable { .. } => StatusCode::CONFLICT,
      AppError::Persistence(_) => StatusCode::BAD_GATEWAY,
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> axum::response::Response {
    (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
  }
}
