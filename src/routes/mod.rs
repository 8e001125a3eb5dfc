//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers); tighten for production
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route(
            "/api/v1/questions",
            get(http::http_list_questions).post(http::http_post_question),
        )
        .route("/api/v1/questions/:question_id", get(http::http_get_question))
        .route(
            "/api/v1/questions/:question_id/submissions",
            get(http::http_get_submissions),
        )
        .route("/api/v1/sessions", post(http::http_post_session))
        .route(
            "/api/v1/sessions/:session_id",
            get(http::http_get_session).delete(http::http_delete_session),
        )
        .route("/api/v1/sessions/:session_id/drag/start", post(http::http_post_drag_start))
        .route("/api/v1/sessions/:session_id/drag/end", post(http::http_post_drag_end))
        .route("/api/v1/sessions/:session_id/reset", post(http::http_post_reset))
        .route("/api/v1/sessions/:session_id/sounds", post(http::http_post_sounds))
        .route("/api/v1/sessions/:session_id/connectors", post(http::http_post_connectors))
        .route("/api/v1/sessions/:session_id/submit", post(http::http_post_submit))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
