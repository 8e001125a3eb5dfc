//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, State}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::connectors::MeasuredLayout;
use crate::domain::MatchingQuestion;
use crate::error::AppError;
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;
use crate::store::SubmissionRecord;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_list_questions(State(state): State<Arc<AppState>>) -> Json<QuestionsOut> {
  let questions = state.list_questions().await.iter().map(to_summary).collect();
  Json(QuestionsOut { questions })
}

/// Full definition including the answer key; meant for authoring tools.
#[instrument(level = "info", skip(state))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Path(question_id): Path<String>,
) -> Result<Json<MatchingQuestion>, AppError> {
  Ok(Json(state.get_question(&question_id).await?))
}

#[instrument(level = "info", skip(state, body), fields(id = %body.id, pairs = body.pairs.len()))]
pub async fn http_post_question(
  State(state): State<Arc<AppState>>,
  Json(body): Json<MatchingQuestion>,
) -> Result<(StatusCode, Json<QuestionSummary>), AppError> {
  let summary = to_summary(&body);
  state.insert_question(body).await?;
  info!(target: "matching_backend", id = %summary.id, "Question registered");
  Ok((StatusCode::CREATED, Json(summary)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_submissions(
  State(state): State<Arc<AppState>>,
  Path(question_id): Path<String>,
) -> Result<Json<SubmissionsOut>, AppError> {
  let submissions = logic::submissions(&state, &question_id).await?;
  Ok(Json(SubmissionsOut { submissions }))
}

#[instrument(level = "info", skip(state, body), fields(question_id = %body.question_id))]
pub async fn http_post_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<StartSessionIn>,
) -> Result<(StatusCode, Json<SessionOut>), AppError> {
  let out = logic::start_session(&state, body).await?;
  Ok((StatusCode::CREATED, Json(out)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> Result<Json<SessionOut>, AppError> {
  Ok(Json(logic::snapshot(&state, &session_id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> Result<Json<ClosedOut>, AppError> {
  Ok(Json(logic::close_session(&state, &session_id).await?))
}

#[instrument(level = "info", skip(state, body), fields(item_id = %body.item_id))]
pub async fn http_post_drag_start(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
  Json(body): Json<BeginDragIn>,
) -> Result<Json<DragStartOut>, AppError> {
  Ok(Json(logic::begin_drag(&state, &session_id, &body.item_id).await?))
}

#[instrument(level = "info", skip(state, body), fields(active_id = %body.active_id, over_id = %body.over_id))]
pub async fn http_post_drag_end(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
  Json(body): Json<CompleteDragIn>,
) -> Result<Json<DragOut>, AppError> {
  let out = logic::complete_drag(&state, &session_id, &body.active_id, &body.over_id).await?;
  info!(target: "exercise", %session_id, score = out.view.score, complete = out.view.complete, "HTTP drag_end applied");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_reset(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> Result<Json<SessionOut>, AppError> {
  Ok(Json(logic::reset(&state, &session_id).await?))
}

#[instrument(level = "info", skip(state, body), fields(muted = body.muted))]
pub async fn http_post_sounds(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
  Json(body): Json<SoundsIn>,
) -> Result<Json<SessionOut>, AppError> {
  Ok(Json(logic::set_sounds(&state, &session_id, body.muted).await?))
}

#[instrument(level = "debug", skip(state, layout))]
pub async fn http_post_connectors(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
  Json(layout): Json<MeasuredLayout>,
) -> Result<Json<ConnectorsOut>, AppError> {
  Ok(Json(logic::layout_connectors(&state, &session_id, &layout).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_submit(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> Result<(StatusCode, Json<SubmissionRecord>), AppError> {
  let record = logic::submit(&state, &session_id).await?;
  Ok((StatusCode::CREATED, Json(record)))
}
