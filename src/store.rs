//! Persistence of finished answers.
//!
//! The session model never saves anything itself; the host hands a
//! `SubmissionRecord` to a `ResponseStore` once per session. Two backends:
//!   - in-memory (default, lost on restart)
//!   - JSON lines appended to `RESPONSES_PATH`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument, warn};

use crate::domain::MatchingResponse;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub submission_id: String,
    pub question_id: String,
    pub session_id: String,
    pub response: MatchingResponse,
    pub score: u8,
    pub fully_correct: bool,
    pub saved_at: u64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("submission {0} is already stored")]
    Duplicate(String),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait]
pub trait ResponseStore: Send + Sync {
    async fn save(&self, record: SubmissionRecord) -> Result<(), StoreError>;
    async fn for_question(&self, question_id: &str) -> Result<Vec<SubmissionRecord>, StoreError>;
}

#[derive(Default)]
pub struct InMemoryResponseStore {
    records: RwLock<Vec<SubmissionRecord>>,
}

impl InMemoryResponseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseStore for InMemoryResponseStore {
    async fn save(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.submission_id == record.submission_id) {
            return Err(StoreError::Duplicate(record.submission_id));
        }
        records.push(record);
        Ok(())
    }

    async fn for_question(&self, question_id: &str) -> Result<Vec<SubmissionRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.question_id == question_id).cloned().collect())
    }
}

/// Appends one JSON object per line. Writes are serialized by `lock`.
pub struct JsonlResponseStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlResponseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path: self.path.clone(), source }),
        };
        let mut out = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SubmissionRecord>(line) {
                Ok(r) => out.push(r),
                Err(e) => {
                    warn!(target: "matching_backend", path = %self.path.display(), line = lineno + 1, error = %e, "Skipping malformed submission line")
                }
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl ResponseStore for JsonlResponseStore {
    #[instrument(level = "debug", skip(self, record), fields(submission_id = %record.submission_id))]
    async fn save(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        if self.read_all().await?.iter().any(|r| r.submission_id == record.submission_id) {
            return Err(StoreError::Duplicate(record.submission_id));
        }

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        let io_err = |source| StoreError::Io { path: self.path.clone(), source };
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(io_err)?;
        file.write_all(line.as_bytes()).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        Ok(())
    }

    async fn for_question(&self, question_id: &str) -> Result<Vec<SubmissionRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .filter(|r| r.question_id == question_id)
            .collect())
    }
}

/// JSON-lines store when RESPONSES_PATH is set, in-memory otherwise.
pub fn store_from_env() -> Arc<dyn ResponseStore> {
    match std::env::var("RESPONSES_PATH") {
        Ok(path) if !path.trim().is_empty() => {
            info!(target: "matching_backend", %path, "Persisting submissions as JSON lines");
            Arc::new(JsonlResponseStore::new(path))
        }
        _ => {
            info!(target: "matching_backend", "RESPONSES_PATH not set; submissions kept in memory");
            Arc::new(InMemoryResponseStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResponsePair;

    fn record(submission_id: &str, question_id: &str) -> SubmissionRecord {
        SubmissionRecord {
            submission_id: submission_id.into(),
            question_id: question_id.into(),
            session_id: format!("session-{submission_id}"),
            response: MatchingResponse {
                pairs: vec![ResponsePair { left_id: "1".into(), right_id: "1".into() }],
            },
            score: 100,
            fully_correct: true,
            saved_at: 1,
        }
    }

    #[tokio::test]
    async fn memory_store_filters_and_rejects_duplicates() {
        let store = InMemoryResponseStore::new();
        store.save(record("s1", "q1")).await.unwrap();
        store.save(record("s2", "q2")).await.unwrap();
        assert!(matches!(store.save(record("s1", "q1")).await, Err(StoreError::Duplicate(id)) if id == "s1"));

        let q1 = store.for_question("q1").await.unwrap();
        assert_eq!(q1, vec![record("s1", "q1")]);
    }

    #[tokio::test]
    async fn jsonl_store_appends_and_reads_back() {
        let path = std::env::temp_dir().join(format!("matching-store-{}.jsonl", uuid::Uuid::new_v4()));
        let store = JsonlResponseStore::new(&path);
        assert!(store.for_question("q1").await.unwrap().is_empty());

        store.save(record("s1", "q1")).await.unwrap();
        store.save(record("s2", "q1")).await.unwrap();
        assert!(matches!(store.save(record("s2", "q1")).await, Err(StoreError::Duplicate(_))));

        tokio::fs::write(&path, format!("{}not json\n", tokio::fs::read_to_string(&path).await.unwrap()))
            .await
            .unwrap();
        let got = store.for_question("q1").await.unwrap();
        assert_eq!(got.len(), 2);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn jsonl_store_surfaces_io_failures() {
        let dir = std::env::temp_dir().join(format!("matching-store-dir-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        // A directory cannot be opened for appending.
        let store = JsonlResponseStore::new(&dir);
        assert!(matches!(store.save(record("s1", "q1")).await, Err(StoreError::Io { .. })));
        let _ = tokio::fs::remove_dir(&dir).await;
    }
}
