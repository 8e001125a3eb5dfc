//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Starting sessions (shuffle, optional prior answer replay)
//!   - Driving drags through the gesture seam
//!   - Reset, sound toggle, snapshots and connector geometry
//!   - Saving answers: automatically on the first solve, or on explicit submit

use std::time::Instant;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::connectors::{connectors, MeasuredLayout};
use crate::domain::DragOutcome;
use crate::error::AppError;
use crate::exercise::{MatchingSession, SessionOptions};
use crate::gesture::GestureHandler;
use crate::protocol::{ClosedOut, ConnectorsOut, DragOut, DragStartOut, SaveStatus, SessionOut, StartSessionIn};
use crate::state::{AppState, SessionEntry};
use crate::store::SubmissionRecord;
use crate::util::unix_seconds;

fn session_out(session_id: &str, entry: &SessionEntry) -> SessionOut {
  SessionOut {
    session_id: session_id.to_string(),
    submission_id: entry.submission_id.clone(),
    saved: entry.saved,
    view: entry.session.view(Instant::now()),
  }
}

fn record_for(session_id: &str, entry: &SessionEntry) -> SubmissionRecord {
  SubmissionRecord {
    submission_id: entry.submission_id.clone(),
    question_id: entry.session.question_id().to_string(),
    session_id: session_id.to_string(),
    response: entry.session.to_response(),
    score: entry.session.score(),
    fully_correct: entry.session.is_fully_correct(),
    saved_at: unix_seconds(),
  }
}

#[instrument(level = "info", skip(state, req), fields(question_id = %req.question_id, read_only = req.read_only))]
pub async fn start_session(state: &AppState, req: StartSessionIn) -> Result<SessionOut, AppError> {
  let question = state.get_question(&req.question_id).await?;
  let options = SessionOptions {
    read_only: req.read_only,
    sounds_muted: req.sounds_muted,
    feedback: state.feedback.clone(),
  };
  let mut rng = StdRng::from_entropy();
  let session = MatchingSession::initialize(&question, req.prior_answer.as_ref(), options, &mut rng);
  // A resumed, already solved attempt has nothing left to save.
  let saved = req.prior_answer.is_some() && session.is_fully_correct();
  let entry = SessionEntry::new(session, Uuid::new_v4().to_string(), saved);

  let session_id = Uuid::new_v4().to_string();
  let out = session_out(&session_id, &entry);
  state.evict_idle(Instant::now()).await;
  state.sessions.write().await.insert(session_id.clone(), entry);
  info!(target: "matching_backend", %session_id, question_id = %req.question_id, "Session started");
  Ok(out)
}

#[instrument(level = "debug", skip(state))]
pub async fn snapshot(state: &AppState, session_id: &str) -> Result<SessionOut, AppError> {
  state.with_session(session_id, |entry| session_out(session_id, entry)).await
}

#[instrument(level = "debug", skip(state))]
pub async fn begin_drag(state: &AppState, session_id: &str, item_id: &str) -> Result<DragStartOut, AppError> {
  state
    .with_session(session_id, |entry| {
      let cue = entry.session.on_gesture_start(item_id);
      DragStartOut { cue, view: entry.session.view(Instant::now()) }
    })
    .await
}

/// Apply a drop. The first solve of a session triggers a best-effort save;
/// a failed save is reported in the reply and does not undo the drop.
/// The returned view is taken under the same lock as the outcome.
#[instrument(level = "info", skip(state))]
pub async fn complete_drag(
  state: &AppState,
  session_id: &str,
  active_id: &str,
  over_id: &str,
) -> Result<DragOut, AppError> {
  let (outcome, celebration, pending, view) = state
    .with_session(session_id, |entry| {
      let outcome = entry.session.on_gesture_end(active_id, over_id);
      let celebration = match outcome {
        DragOutcome::Matched { .. } => entry.session.celebrate(),
        DragOutcome::Ignored => None,
      };
      let pending = if celebration.is_some() && !entry.saved {
        entry.saved = true;
        Some(record_for(session_id, entry))
      } else {
        None
      };
      (outcome, celebration, pending, entry.session.view(Instant::now()))
    })
    .await?;

  if let DragOutcome::Matched { is_correct } = outcome {
    info!(target: "exercise", %session_id, %active_id, %over_id, is_correct, "Drop evaluated");
  }

  let save = match pending {
    Some(record) => Some(persist(state, session_id, record).await),
    None => None,
  };

  Ok(DragOut { outcome, celebration, save, view })
}

#[instrument(level = "info", skip(state))]
pub async fn reset(state: &AppState, session_id: &str) -> Result<SessionOut, AppError> {
  state
    .with_session(session_id, |entry| {
      let mut rng = StdRng::from_entropy();
      entry.session.reset(&mut rng);
      session_out(session_id, entry)
    })
    .await
}

#[instrument(level = "debug", skip(state))]
pub async fn set_sounds(state: &AppState, session_id: &str, muted: bool) -> Result<SessionOut, AppError> {
  state
    .with_session(session_id, |entry| {
      entry.session.set_sounds_muted(muted);
      session_out(session_id, entry)
    })
    .await
}

#[instrument(level = "debug", skip(state, layout), fields(items = layout.items.len()))]
pub async fn layout_connectors(
  state: &AppState,
  session_id: &str,
  layout: &MeasuredLayout,
) -> Result<ConnectorsOut, AppError> {
  state
    .with_session(session_id, |entry| ConnectorsOut {
      connectors: connectors(entry.session.matched_pairs(), layout),
    })
    .await
}

/// Explicit submit: every item must be paired and the session not yet saved.
/// Review sessions never create submissions.
#[instrument(level = "info", skip(state))]
pub async fn submit(state: &AppState, session_id: &str) -> Result<SubmissionRecord, AppError> {
  let record = state
    .with_session(session_id, |entry| {
      if entry.session.is_read_only() {
        return Err(AppError::NotSubmittable { session_id: session_id.to_string(), reason: "read-only session" });
      }
      if entry.saved {
        return Err(AppError::NotSubmittable { session_id: session_id.to_string(), reason: "already saved" });
      }
      if !entry.session.is_complete() {
        return Err(AppError::NotSubmittable { session_id: session_id.to_string(), reason: "not every item is paired" });
      }
      entry.saved = true;
      Ok(record_for(session_id, entry))
    })
    .await??;

  if let Err(e) = state.store.save(record.clone()).await {
    release_save(state, session_id).await;
    error!(target: "matching_backend", %session_id, error = %e, "Submission save failed");
    return Err(e.into());
  }
  info!(target: "matching_backend", %session_id, submission_id = %record.submission_id, score = record.score, "Submission saved");
  Ok(record)
}

/// Forget a session. Stored submissions are untouched.
#[instrument(level = "info", skip(state))]
pub async fn close_session(state: &AppState, session_id: &str) -> Result<ClosedOut, AppError> {
  let entry = state.remove_session(session_id).await?;
  info!(target: "matching_backend", %session_id, saved = entry.saved, "Session closed");
  Ok(ClosedOut { session_id: session_id.to_string(), saved: entry.saved })
}

#[instrument(level = "debug", skip(state))]
pub async fn submissions(state: &AppState, question_id: &str) -> Result<Vec<SubmissionRecord>, AppError> {
  state.get_question(question_id).await?;
  Ok(state.store.for_question(question_id).await?)
}

async fn persist(state: &AppState, session_id: &str, record: SubmissionRecord) -> SaveStatus {
  let submission_id = record.submission_id.clone();
  match state.store.save(record).await {
    Ok(()) => {
      info!(target: "matching_backend", %session_id, %submission_id, "Solved session saved");
      SaveStatus::Saved { submission_id }
    }
    Err(e) => {
      release_save(state, session_id).await;
      error!(target: "matching_backend", %session_id, %submission_id, error = %e, "Auto-save failed");
      SaveStatus::Failed { message: e.to_string() }
    }
  }
}

/// Clear the saved flag after a failed save so the client can submit again.
async fn release_save(state: &AppState, session_id: &str) {
  if state.with_session(session_id, |entry| entry.saved = false).await.is_err() {
    warn!(target: "matching_backend", %session_id, "Session vanished before save could be released");
  }
}
