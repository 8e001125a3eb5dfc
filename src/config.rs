//! Loading service configuration (feedback settings + optional question bank) from TOML.
//!
//! Example:
//! ```toml
//! [feedback]
//! delay_ms = 1500
//! correct_message = "Great match!"
//!
//! [sessions]
//! idle_ttl_secs = 7200
//!
//! [[questions]]
//! id = "animals"
//! questionText = "Match each animal to its sound"
//! pairs = [
//!   { id = "cat", left = "Cat", right = "Meow" },
//!   { id = "dog", left = "Dog", right = "Woof" },
//! ]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::domain::{MatchingQuestion, QuestionError};
use crate::exercise::FeedbackSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {path}: {source}")]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config file {path}: {source}")]
  Parse { path: PathBuf, source: toml::de::Error },

  #[error("invalid question `{id}`: {source}")]
  InvalidQuestion { id: String, source: QuestionError },
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub feedback: FeedbackCfg,
  #[serde(default)]
  pub sessions: SessionsCfg,
  #[serde(default)]
  pub questions: Vec<MatchingQuestion>,
}

/// Sessions untouched for longer than `idle_ttl_secs` are dropped.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SessionsCfg {
  pub idle_ttl_secs: u64,
}

impl Default for SessionsCfg {
  fn default() -> Self {
    Self { idle_ttl_secs: 2 * 60 * 60 }
  }
}

impl SessionsCfg {
  pub fn idle_ttl(&self) -> Duration {
    Duration::from_secs(self.idle_ttl_secs)
  }
}

/// Per-drag feedback, as written in TOML. Missing keys keep the defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FeedbackCfg {
  pub delay_ms: u64,
  pub correct_message: String,
  pub incorrect_message: String,
  pub complete_message: String,
}

impl Default for FeedbackCfg {
  fn default() -> Self {
    let d = FeedbackSettings::default();
    Self {
      delay_ms: d.delay.as_millis() as u64,
      correct_message: d.correct_message,
      incorrect_message: d.incorrect_message,
      complete_message: d.complete_message,
    }
  }
}

impl FeedbackCfg {
  pub fn settings(&self) -> FeedbackSettings {
    FeedbackSettings {
      delay: Duration::from_millis(self.delay_ms),
      correct_message: self.correct_message.clone(),
      incorrect_message: self.incorrect_message.clone(),
      complete_message: self.complete_message.clone(),
    }
  }
}

/// Read and validate a config file. Every bank question must pass validation.
pub fn load_app_config(path: &Path) -> Result<AppConfig, ConfigError> {
  let text = std::fs::read_to_string(path)
    .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
  let cfg: AppConfig = toml::from_str(&text)
    .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
  for q in &cfg.questions {
    q.validate()
      .map_err(|source| ConfigError::InvalidQuestion { id: q.id.clone(), source })?;
  }
  Ok(cfg)
}

/// Attempt to load `AppConfig` from MATCHING_CONFIG_PATH. On any error, logs and returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("MATCHING_CONFIG_PATH").ok()?;
  match load_app_config(Path::new(&path)) {
    Ok(cfg) => {
      info!(target: "matching_backend", %path, questions = cfg.questions.len(), "Loaded config (TOML)");
      Some(cfg)
    }
    Err(e) => {
      error!(target: "matching_backend", %path, error = %e, "Failed to load config; using defaults");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_tmp(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("matching-config-{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn parses_feedback_and_questions() {
    let path = write_tmp(
      r#"
[feedback]
delay_ms = 900
incorrect_message = "Not quite"

[sessions]
idle_ttl_secs = 60

[[questions]]
id = "shapes"
questionText = "Match the shapes"
pairs = [
  { id = "circle", left = "Circle", right = "https://cdn.example/circle.png", rightType = "image" },
  { id = "square", left = "Square", right = "https://cdn.example/square.png", rightType = "image" },
]
"#,
    );
    let cfg = load_app_config(&path).unwrap();
    let fb = cfg.feedback.settings();
    assert_eq!(fb.delay, Duration::from_millis(900));
    assert_eq!(fb.incorrect_message, "Not quite");
    assert_eq!(fb.correct_message, "Great match!");
    assert_eq!(cfg.sessions.idle_ttl(), Duration::from_secs(60));
    assert_eq!(cfg.questions.len(), 1);
    assert_eq!(cfg.questions[0].pairs[1].pair_id, "square");
    let _ = std::fs::remove_file(path);
  }

  #[test]
  fn rejects_invalid_bank_questions() {
    let path = write_tmp(
      r#"
[[questions]]
id = "tiny"
pairs = [ { id = "a", left = "A", right = "a" } ]
"#,
    );
    assert!(matches!(
      load_app_config(&path),
      Err(ConfigError::InvalidQuestion { id, source: QuestionError::TooFewPairs { .. } }) if id == "tiny"
    ));
    let _ = std::fs::remove_file(path);
  }

  #[test]
  fn missing_file_is_a_read_error() {
    let path = std::env::temp_dir().join("matching-config-does-not-exist.toml");
    assert!(matches!(load_app_config(&path), Err(ConfigError::Read { .. })));
  }
}
