//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::error::AppError;
use crate::logic;
use crate::protocol::{to_summary, ClientWsMessage, ServerWsMessage};
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "matching_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "matching_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "matching_backend", raw = %trunc_for_log(&txt, 200), "WS received");
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "matching_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "matching_backend", "WebSocket disconnected");
}

fn or_error<T>(res: Result<T, AppError>, wrap: impl FnOnce(T) -> ServerWsMessage) -> ServerWsMessage {
  match res {
    Ok(v) => wrap(v),
    Err(e) => ServerWsMessage::Error { message: e.to_string() },
  }
}

#[instrument(level = "info", skip(state))]
pub async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::ListQuestions => {
      let questions = state.list_questions().await.iter().map(to_summary).collect();
      ServerWsMessage::Questions { questions }
    }

    ClientWsMessage::StartSession(req) => {
      or_error(logic::start_session(state, req).await, ServerWsMessage::Session)
    }

    ClientWsMessage::BeginDrag { session_id, item_id } => {
      or_error(logic::begin_drag(state, &session_id, &item_id).await, ServerWsMessage::DragStarted)
    }

    ClientWsMessage::CompleteDrag { session_id, active_id, over_id } => {
      let res = logic::complete_drag(state, &session_id, &active_id, &over_id).await;
      if let Ok(out) = &res {
        info!(target: "exercise", %session_id, score = out.view.score, complete = out.view.complete, "WS complete_drag applied");
      }
      or_error(res, ServerWsMessage::DragResult)
    }

    ClientWsMessage::Reset { session_id } => {
      or_error(logic::reset(state, &session_id).await, ServerWsMessage::Session)
    }

    ClientWsMessage::Snapshot { session_id } => {
      or_error(logic::snapshot(state, &session_id).await, ServerWsMessage::Session)
    }

    ClientWsMessage::SetSounds { session_id, muted } => {
      or_error(logic::set_sounds(state, &session_id, muted).await, ServerWsMessage::Session)
    }

    ClientWsMessage::Layout { session_id, layout } => {
      or_error(logic::layout_connectors(state, &session_id, &layout).await, ServerWsMessage::Connectors)
    }

    ClientWsMessage::Submit { session_id } => {
      or_error(logic::submit(state, &session_id).await, |submission| ServerWsMessage::Submitted { submission })
    }

    ClientWsMessage::Close { session_id } => {
      or_error(logic::close_session(state, &session_id).await, ServerWsMessage::Closed)
    }
  }
}
