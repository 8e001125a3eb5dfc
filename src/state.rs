//! Application state: question bank, live sessions, feedback settings and the response store.
//!
//! This module owns:
//!   - questions by id (seeds + TOML bank + questions registered at runtime)
//!   - sessions by id, each with its submission id and saved flag
//!   - the persistence collaborator used when answers are submitted

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::config::{load_app_config_from_env, AppConfig};
use crate::domain::MatchingQuestion;
use crate::error::AppError;
use crate::exercise::{FeedbackSettings, MatchingSession};
use crate::seeds::seed_questions;
use crate::store::{store_from_env, ResponseStore};

/// One student attempt.
pub struct SessionEntry {
    pub session: MatchingSession,
    pub submission_id: String,
    /// Set while a save is in flight or after it succeeded; at most one save per session.
    pub saved: bool,
    pub last_touched: Instant,
}

impl SessionEntry {
    pub fn new(session: MatchingSession, submission_id: String, saved: bool) -> Self {
        Self { session, submission_id, saved, last_touched: Instant::now() }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<RwLock<HashMap<String, MatchingQuestion>>>,
    pub sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    pub store: Arc<dyn ResponseStore>,
    pub feedback: FeedbackSettings,
    pub session_ttl: Duration,
}

impl AppState {
    /// Build state from env: load config, seed questions, pick the response store.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_app_config_from_env().unwrap_or_default();
        Self::from_parts(cfg, store_from_env())
    }

    /// Config questions win over built-in seeds with the same id.
    pub fn from_parts(cfg: AppConfig, store: Arc<dyn ResponseStore>) -> Self {
        let mut by_id = HashMap::<String, MatchingQuestion>::new();
        let mut from_config = 0usize;

        for q in cfg.questions {
            if let Err(e) = q.validate() {
                error!(target: "matching_backend", id = %q.id, error = %e, "Skipping invalid bank question");
                continue;
            }
            from_config += 1;
            by_id.insert(q.id.clone(), q);
        }

        let mut from_seeds = 0usize;
        for q in seed_questions() {
            if !by_id.contains_key(&q.id) {
                from_seeds += 1;
                by_id.insert(q.id.clone(), q);
            }
        }
        info!(target: "matching_backend", config = from_config, seeds = from_seeds, "Startup question inventory");

        Self {
            questions: Arc::new(RwLock::new(by_id)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            store,
            feedback: cfg.feedback.settings(),
            session_ttl: cfg.sessions.idle_ttl(),
        }
    }

    /// Register a validated question; ids are never overwritten.
    #[instrument(level = "debug", skip(self, q), fields(id = %q.id))]
    pub async fn insert_question(&self, q: MatchingQuestion) -> Result<(), AppError> {
        q.validate()?;
        let mut by_id = self.questions.write().await;
        if by_id.contains_key(&q.id) {
            return Err(AppError::QuestionExists(q.id));
        }
        by_id.insert(q.id.clone(), q);
        Ok(())
    }

    pub async fn get_question(&self, id: &str) -> Result<MatchingQuestion, AppError> {
        self.questions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::UnknownQuestion(id.to_string()))
    }

    /// All questions, ordered by id.
    pub async fn list_questions(&self) -> Vec<MatchingQuestion> {
        let mut all: Vec<MatchingQuestion> = self.questions.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Run `f` on a session under the write lock; counts as activity.
    pub async fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut SessionEntry) -> T,
    ) -> Result<T, AppError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(session_id)
            .ok_or_else(|| AppError::UnknownSession(session_id.to_string()))?;
        entry.last_touched = Instant::now();
        Ok(f(entry))
    }

    /// Drop sessions idle for at least `session_ttl` as of `now`. Returns how many went.
    pub async fn evict_idle(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let ttl = self.session_ttl;
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_touched) < ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(target: "matching_backend", evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    /// Drop a session for good; later lookups report it as unknown.
    pub async fn remove_session(&self, session_id: &str) -> Result<SessionEntry, AppError> {
        self.sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| AppError::UnknownSession(session_id.to_string()))
    }
}
