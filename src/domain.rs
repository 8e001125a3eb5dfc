//! Domain models for matching exercises: pair definitions, side markers,
//! display items, matched pairs, and the response shape handed to storage.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker prefixed to pair ids shown in the left (source) column.
pub const SOURCE_MARKER: &str = "source-";
/// Marker prefixed to pair ids shown in the right (target) column.
pub const TARGET_MARKER: &str = "target-";

/// Questions with fewer pairs than this are rejected at authoring time.
pub const MIN_PAIRS: usize = 2;

/// How one half of a pair is rendered.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
  #[default]
  Text,
  /// `content` is an image URL.
  Image,
}

/// Authoring-time ground truth. Left and right halves are a correct match
/// iff they come from the same `pair_id`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchingPairDefinition {
  #[serde(rename = "id")]
  pub pair_id: String,
  pub left: String,
  pub right: String,
  #[serde(default)] pub left_type: ItemKind,
  #[serde(default)] pub right_type: ItemKind,
}

/// A matching question as stored in the question bank.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchingQuestion {
  pub id: String,
  #[serde(default)] pub question_text: String,
  pub pairs: Vec<MatchingPairDefinition>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
  #[error("question id must not be empty")]
  MissingId,
  #[error("at least {min} pairs are required, got {got}")]
  TooFewPairs { min: usize, got: usize },
  #[error("pair #{index} has an empty id")]
  EmptyPairId { index: usize },
  #[error("pair id `{pair_id}` appears more than once")]
  DuplicatePairId { pair_id: String },
  #[error("pair id `{pair_id}` must not start with a side marker")]
  MarkedPairId { pair_id: String },
  #[error("pair `{pair_id}` has empty {side} content")]
  EmptyContent { pair_id: String, side: &'static str },
}

impl MatchingQuestion {
  /// Authoring rules: enough pairs, unique unmarked ids, no blank content.
  pub fn validate(&self) -> Result<(), QuestionError> {
    if self.id.trim().is_empty() {
      return Err(QuestionError::MissingId);
    }
    if self.pairs.len() < MIN_PAIRS {
      return Err(QuestionError::TooFewPairs { min: MIN_PAIRS, got: self.pairs.len() });
    }
    let mut seen = HashSet::new();
    for (index, p) in self.pairs.iter().enumerate() {
      if p.pair_id.trim().is_empty() {
        return Err(QuestionError::EmptyPairId { index });
      }
      if p.pair_id.starts_with(SOURCE_MARKER) || p.pair_id.starts_with(TARGET_MARKER) {
        return Err(QuestionError::MarkedPairId { pair_id: p.pair_id.clone() });
      }
      if !seen.insert(p.pair_id.as_str()) {
        return Err(QuestionError::DuplicatePairId { pair_id: p.pair_id.clone() });
      }
      if p.left.trim().is_empty() {
        return Err(QuestionError::EmptyContent { pair_id: p.pair_id.clone(), side: "left" });
      }
      if p.right.trim().is_empty() {
        return Err(QuestionError::EmptyContent { pair_id: p.pair_id.clone(), side: "right" });
      }
    }
    Ok(())
  }
}

/// Column a display item belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Side {
  Source,
  Target,
}

impl Side {
  pub fn marker(self) -> &'static str {
    match self {
      Side::Source => SOURCE_MARKER,
      Side::Target => TARGET_MARKER,
    }
  }

  /// Display id for `pair_id` in this column.
  pub fn display_id(self, pair_id: &str) -> String {
    format!("{}{}", self.marker(), pair_id)
  }
}

/// Split a display id into its column and underlying pair id.
/// Ids without a side marker yield `None`.
pub fn split_display_id(display_id: &str) -> Option<(Side, &str)> {
  if let Some(rest) = display_id.strip_prefix(SOURCE_MARKER) {
    Some((Side::Source, rest))
  } else {
    display_id.strip_prefix(TARGET_MARKER).map(|rest| (Side::Target, rest))
  }
}

/// Pair id with the side marker removed; unmarked ids are returned as-is.
pub fn strip_side_marker(display_id: &str) -> &str {
  split_display_id(display_id).map(|(_, id)| id).unwrap_or(display_id)
}

/// One half of a pair definition as shown on screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItem {
  pub display_id: String,
  pub content: String,
  pub kind: ItemKind,
}

impl DisplayItem {
  pub fn from_definition(side: Side, def: &MatchingPairDefinition) -> Self {
    let (content, kind) = match side {
      Side::Source => (def.left.clone(), def.left_type),
      Side::Target => (def.right.clone(), def.right_type),
    };
    Self { display_id: side.display_id(&def.pair_id), content, kind }
  }
}

/// User-created connection. `is_correct` is fixed when the pair is created.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchedPair {
  pub source_display_id: String,
  pub target_display_id: String,
  pub is_correct: bool,
}

impl MatchedPair {
  pub fn new(source_display_id: String, target_display_id: String) -> Self {
    let is_correct = strip_side_marker(&source_display_id) == strip_side_marker(&target_display_id);
    Self { source_display_id, target_display_id, is_correct }
  }

  pub fn involves(&self, display_id: &str) -> bool {
    self.source_display_id == display_id || self.target_display_id == display_id
  }
}

/// Result of a completed drag gesture.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragOutcome {
  /// Same-column drop, unknown item, or read-only session. Nothing changed.
  Ignored,
  Matched {
    #[serde(rename = "isCorrect")]
    is_correct: bool,
  },
}

/// One connection in the external answer shape (markers stripped).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePair {
  pub left_id: String,
  pub right_id: String,
}

/// Answer shape exchanged with hosts and persisted on save.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchingResponse {
  #[serde(default)]
  pub pairs: Vec<ResponsePair>,
}
