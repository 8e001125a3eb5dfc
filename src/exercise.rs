//! Matching exercise session: two shuffled columns, drag-to-connect pairing,
//! per-connection correctness, and the completion / score signals.
//!
//! The session is plain data. It never touches the clock on its own (callers
//! pass `now` where feedback expiry matters) and it never renders; see
//! `connectors` for the geometry side.

use std::time::{Duration, Instant};

use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{
  split_display_id, strip_side_marker, DisplayItem, DragOutcome, ItemKind, MatchedPair,
  MatchingQuestion, MatchingResponse, ResponsePair, Side,
};
use crate::util::rounded_percent;

pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

/// Messages and timing for the transient per-drag feedback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackSettings {
  pub delay: Duration,
  pub correct_message: String,
  pub incorrect_message: String,
  pub complete_message: String,
}

impl Default for FeedbackSettings {
  fn default() -> Self {
    Self {
      delay: DEFAULT_FEEDBACK_DELAY,
      correct_message: "Great match!".into(),
      incorrect_message: "Try again!".into(),
      complete_message: "Great job! All matches are correct!".into(),
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
  /// Review mode: authored order, no shuffling, drags ignored.
  pub read_only: bool,
  pub sounds_muted: bool,
  pub feedback: FeedbackSettings,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
  Drag,
  Correct,
  Incorrect,
  Complete,
}

/// Transient signal raised by a completed drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
  pub is_correct: bool,
  pub message: String,
  pub cue: Option<SoundCue>,
  pub expires_at: Instant,
}

/// Raised once per solve.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Celebration {
  pub message: String,
  pub cue: Option<SoundCue>,
}

#[derive(Clone, Debug)]
pub struct MatchingSession {
  question_id: String,
  pair_count: usize,
  sources: Vec<DisplayItem>,
  targets: Vec<DisplayItem>,
  matched: Vec<MatchedPair>,
  active_drag: Option<String>,
  feedback: Option<Feedback>,
  celebration_shown: bool,
  sounds_muted: bool,
  read_only: bool,
  settings: FeedbackSettings,
}

impl MatchingSession {
  /// Build both columns from `question`, shuffle them independently (unless
  /// read-only) and replay `prior` if given. Prior correctness is always
  /// recomputed against the current pair definitions.
  pub fn initialize<R: Rng + ?Sized>(
    question: &MatchingQuestion,
    prior: Option<&MatchingResponse>,
    options: SessionOptions,
    rng: &mut R,
  ) -> Self {
    let sources = question
      .pairs
      .iter()
      .map(|p| DisplayItem::from_definition(Side::Source, p))
      .collect();
    let targets = question
      .pairs
      .iter()
      .map(|p| DisplayItem::from_definition(Side::Target, p))
      .collect();

    let mut session = Self {
      question_id: question.id.clone(),
      pair_count: question.pairs.len(),
      sources,
      targets,
      matched: Vec::new(),
      active_drag: None,
      feedback: None,
      celebration_shown: false,
      sounds_muted: options.sounds_muted,
      read_only: options.read_only,
      settings: options.feedback,
    };
    session.shuffle_columns(rng);

    if let Some(prior) = prior {
      for rp in &prior.pairs {
        let source = Side::Source.display_id(&rp.left_id);
        let target = Side::Target.display_id(&rp.right_id);
        if session.side_of(&source) == Some(Side::Source) && session.side_of(&target) == Some(Side::Target) {
          session.install(source, target);
        } else {
          warn!(target: "exercise", question_id = %session.question_id, left_id = %rp.left_id, right_id = %rp.right_id, "Dropping prior pair with unknown ids");
        }
      }
      // A solved resume has already been celebrated.
      session.celebration_shown = session.is_fully_correct();
      debug!(target: "exercise", question_id = %session.question_id, restored = session.matched.len(), "Replayed prior answer");
    }

    session
  }

  /// Record the item being dragged. Returns the cue to play, if any.
  pub fn begin_drag(&mut self, display_id: &str) -> Option<SoundCue> {
    if self.read_only || self.side_of(display_id).is_none() {
      return None;
    }
    self.active_drag = Some(display_id.to_string());
    self.cue(SoundCue::Drag)
  }

  /// Connect `a` and `b`, in either column order, at time `now`.
  pub fn complete_drag_at(&mut self, a: &str, b: &str, now: Instant) -> DragOutcome {
    self.active_drag = None;
    if self.read_only {
      return DragOutcome::Ignored;
    }
    let (source, target) = match (self.side_of(a), self.side_of(b)) {
      (Some(Side::Source), Some(Side::Target)) => (a, b),
      (Some(Side::Target), Some(Side::Source)) => (b, a),
      _ => {
        debug!(target: "exercise", question_id = %self.question_id, %a, %b, "Ignored drop");
        return DragOutcome::Ignored;
      }
    };

    let is_correct = self.install(source.to_string(), target.to_string());
    let (message, cue) = if is_correct {
      (self.settings.correct_message.clone(), self.cue(SoundCue::Correct))
    } else {
      (self.settings.incorrect_message.clone(), self.cue(SoundCue::Incorrect))
    };
    self.feedback = Some(Feedback { is_correct, message, cue, expires_at: now + self.settings.delay });

    debug!(target: "exercise", question_id = %self.question_id, %source, %target, is_correct, matched = self.matched.len(), "Pair installed");
    DragOutcome::Matched { is_correct }
  }

  /// Clear all pairs and transient state; reshuffle unless read-only.
  pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    self.matched.clear();
    self.active_drag = None;
    self.feedback = None;
    self.celebration_shown = false;
    self.shuffle_columns(rng);
  }

  pub fn is_complete(&self) -> bool {
    self.matched.len() == self.pair_count
  }

  pub fn is_fully_correct(&self) -> bool {
    self.is_complete() && self.matched.iter().all(|p| p.is_correct)
  }

  pub fn correct_count(&self) -> usize {
    self.matched.iter().filter(|p| p.is_correct).count()
  }

  pub fn incorrect_count(&self) -> usize {
    self.matched.len() - self.correct_count()
  }

  /// Percentage of pairs matched correctly, 0..=100.
  pub fn score(&self) -> u8 {
    rounded_percent(self.correct_count(), self.pair_count)
  }

  /// `Some` exactly once per solve; re-armed by `reset`.
  pub fn celebrate(&mut self) -> Option<Celebration> {
    if self.celebration_shown || !self.is_fully_correct() {
      return None;
    }
    self.celebration_shown = true;
    Some(Celebration { message: self.settings.complete_message.clone(), cue: self.cue(SoundCue::Complete) })
  }

  pub fn set_sounds_muted(&mut self, muted: bool) {
    self.sounds_muted = muted;
  }

  /// Feedback still visible at `now`.
  pub fn feedback_at(&self, now: Instant) -> Option<&Feedback> {
    self.feedback.as_ref().filter(|f| f.expires_at > now)
  }

  /// Pairs with side markers stripped, in pairing order.
  pub fn to_response(&self) -> MatchingResponse {
    MatchingResponse {
      pairs: self
        .matched
        .iter()
        .map(|p| ResponsePair {
          left_id: strip_side_marker(&p.source_display_id).to_string(),
          right_id: strip_side_marker(&p.target_display_id).to_string(),
        })
        .collect(),
    }
  }

  pub fn question_id(&self) -> &str { &self.question_id }
  pub fn pair_count(&self) -> usize { self.pair_count }
  pub fn sources(&self) -> &[DisplayItem] { &self.sources }
  pub fn targets(&self) -> &[DisplayItem] { &self.targets }
  pub fn matched_pairs(&self) -> &[MatchedPair] { &self.matched }
  pub fn active_drag(&self) -> Option<&str> { self.active_drag.as_deref() }
  pub fn is_read_only(&self) -> bool { self.read_only }
  pub fn sounds_muted(&self) -> bool { self.sounds_muted }
  pub fn celebration_shown(&self) -> bool { self.celebration_shown }

  /// Everything a view layer needs to draw the exercise at `now`.
  pub fn view(&self, now: Instant) -> SessionView {
    SessionView {
      question_id: self.question_id.clone(),
      read_only: self.read_only,
      sounds_muted: self.sounds_muted,
      sources: self.sources.iter().map(|i| self.item_view(i, Side::Source)).collect(),
      targets: self.targets.iter().map(|i| self.item_view(i, Side::Target)).collect(),
      connections: self.matched.clone(),
      active_drag: self.active_drag.clone(),
      correct_count: self.correct_count(),
      incorrect_count: self.incorrect_count(),
      score: self.score(),
      complete: self.is_complete(),
      fully_correct: self.is_fully_correct(),
      feedback: self.feedback_at(now).map(|f| FeedbackView {
        is_correct: f.is_correct,
        message: f.message.clone(),
        cue: f.cue,
        remaining_ms: f.expires_at.saturating_duration_since(now).as_millis() as u64,
      }),
    }
  }

  fn item_view(&self, item: &DisplayItem, side: Side) -> ItemView {
    let pair = self.matched.iter().find(|p| p.involves(&item.display_id));
    let matched_with = pair.map(|p| match side {
      Side::Source => p.target_display_id.clone(),
      Side::Target => p.source_display_id.clone(),
    });
    let state = match pair {
      None => ItemState::Unmatched,
      Some(p) if p.is_correct => ItemState::Correct,
      Some(_) => ItemState::Incorrect,
    };
    ItemView {
      display_id: item.display_id.clone(),
      content: item.content.clone(),
      kind: item.kind,
      state,
      matched_with,
      dragging: self.active_drag.as_deref() == Some(item.display_id.as_str()),
    }
  }

  /// Column `display_id` lives in, if it belongs to this session.
  fn side_of(&self, display_id: &str) -> Option<Side> {
    let (side, _) = split_display_id(display_id)?;
    let column = match side {
      Side::Source => &self.sources,
      Side::Target => &self.targets,
    };
    column.iter().any(|i| i.display_id == display_id).then_some(side)
  }

  /// Retire any pair using either end, then add the new one.
  fn install(&mut self, source: String, target: String) -> bool {
    self.matched.retain(|p| p.source_display_id != source && p.target_display_id != target);
    let pair = MatchedPair::new(source, target);
    let is_correct = pair.is_correct;
    self.matched.push(pair);
    is_correct
  }

  fn shuffle_columns<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    if self.read_only {
      return;
    }
    self.sources.shuffle(rng);
    self.targets.shuffle(rng);
  }

  fn cue(&self, cue: SoundCue) -> Option<SoundCue> {
    (!self.sounds_muted).then_some(cue)
  }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
  Unmatched,
  Correct,
  Incorrect,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
  pub display_id: String,
  pub content: String,
  pub kind: ItemKind,
  pub state: ItemState,
  pub matched_with: Option<String>,
  pub dragging: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
  pub is_correct: bool,
  pub message: String,
  pub cue: Option<SoundCue>,
  pub remaining_ms: u64,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
  pub question_id: String,
  pub read_only: bool,
  pub sounds_muted: bool,
  pub sources: Vec<ItemView>,
  pub targets: Vec<ItemView>,
  pub connections: Vec<MatchedPair>,
  pub active_drag: Option<String>,
  pub correct_count: usize,
  pub incorrect_count: usize,
  pub score: u8,
  pub complete: bool,
  pub fully_correct: bool,
  pub feedback: Option<FeedbackView>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::MatchingPairDefinition;
  use rand::{rngs::StdRng, SeedableRng};
  use std::collections::HashSet;

  fn question(n: usize) -> MatchingQuestion {
    MatchingQuestion {
      id: "q1".into(),
      question_text: "Match".into(),
      pairs: (1..=n)
        .map(|i| MatchingPairDefinition {
          pair_id: i.to_string(),
          left: format!("A{i}"),
          right: format!("B{i}"),
          left_type: ItemKind::Text,
          right_type: ItemKind::Text,
        })
        .collect(),
    }
  }

  fn session(n: usize) -> MatchingSession {
    let mut rng = StdRng::seed_from_u64(7);
    MatchingSession::initialize(&question(n), None, SessionOptions::default(), &mut rng)
  }

  fn src(i: usize) -> String { format!("source-{i}") }
  fn tgt(i: usize) -> String { format!("target-{i}") }

  fn drag(s: &mut MatchingSession, a: &str, b: &str) -> DragOutcome {
    s.complete_drag_at(a, b, Instant::now())
  }

  fn assert_single_membership(s: &MatchingSession) {
    let mut seen = HashSet::new();
    for p in s.matched_pairs() {
      assert!(seen.insert(p.source_display_id.clone()), "{} paired twice", p.source_display_id);
      assert!(seen.insert(p.target_display_id.clone()), "{} paired twice", p.target_display_id);
    }
  }

  #[test]
  fn shuffle_preserves_membership() {
    let q = question(12);
    let mut expected: Vec<String> = q.pairs.iter().map(|p| p.pair_id.clone()).collect();
    expected.sort();
    for seed in 0..20 {
      let mut rng = StdRng::seed_from_u64(seed);
      let s = MatchingSession::initialize(&q, None, SessionOptions::default(), &mut rng);
      for column in [s.sources(), s.targets()] {
        let mut ids: Vec<String> = column.iter().map(|i| strip_side_marker(&i.display_id).to_string()).collect();
        ids.sort();
        assert_eq!(ids, expected);
      }
    }
  }

  #[test]
  fn columns_are_shuffled_independently() {
    let q = question(10);
    let differs = (0..20).any(|seed| {
      let mut rng = StdRng::seed_from_u64(seed);
      let s = MatchingSession::initialize(&q, None, SessionOptions::default(), &mut rng);
      let left: Vec<&str> = s.sources().iter().map(|i| strip_side_marker(&i.display_id)).collect();
      let right: Vec<&str> = s.targets().iter().map(|i| strip_side_marker(&i.display_id)).collect();
      left != right
    });
    assert!(differs);
  }

  #[test]
  fn read_only_keeps_authored_order_and_ignores_drags() {
    let q = question(5);
    let mut rng = StdRng::seed_from_u64(1);
    let opts = SessionOptions { read_only: true, ..Default::default() };
    let mut s = MatchingSession::initialize(&q, None, opts, &mut rng);
    let authored: Vec<String> = (1..=5).map(src).collect();
    let shown: Vec<String> = s.sources().iter().map(|i| i.display_id.clone()).collect();
    assert_eq!(shown, authored);

    assert_eq!(s.begin_drag(&src(1)), None);
    assert_eq!(drag(&mut s, &src(1), &tgt(1)), DragOutcome::Ignored);
    s.reset(&mut rng);
    let shown: Vec<String> = s.sources().iter().map(|i| i.display_id.clone()).collect();
    assert_eq!(shown, authored);
  }

  #[test]
  fn three_pair_scenario() {
    let mut s = session(3);
    assert_eq!(drag(&mut s, &src(1), &tgt(2)), DragOutcome::Matched { is_correct: false });
    assert_eq!(s.score(), 0);
    assert!(!s.is_complete());

    assert_eq!(drag(&mut s, &src(1), &tgt(1)), DragOutcome::Matched { is_correct: true });
    assert_eq!(s.matched_pairs().len(), 1);
    assert_eq!(s.score(), 33);

    drag(&mut s, &src(2), &tgt(2));
    drag(&mut s, &src(3), &tgt(3));
    assert!(s.is_complete());
    assert!(s.is_fully_correct());
    assert_eq!(s.score(), 100);
  }

  #[test]
  fn redrag_moves_the_source_and_frees_old_target() {
    let mut s = session(3);
    drag(&mut s, &src(1), &tgt(1));
    assert_eq!(drag(&mut s, &src(1), &tgt(3)), DragOutcome::Matched { is_correct: false });

    let for_a1: Vec<&MatchedPair> = s.matched_pairs().iter().filter(|p| p.source_display_id == src(1)).collect();
    assert_eq!(for_a1.len(), 1);
    assert!(!for_a1[0].is_correct);
    assert!(!s.matched_pairs().iter().any(|p| p.target_display_id == tgt(1)));

    let view = s.view(Instant::now());
    let b1 = view.targets.iter().find(|i| i.display_id == tgt(1)).unwrap();
    assert_eq!(b1.state, ItemState::Unmatched);
  }

  #[test]
  fn redrag_onto_taken_target_retires_both_ends() {
    let mut s = session(3);
    drag(&mut s, &src(1), &tgt(1));
    drag(&mut s, &src(2), &tgt(2));
    drag(&mut s, &src(1), &tgt(2));
    assert_eq!(s.matched_pairs().len(), 1);
    assert_eq!(s.matched_pairs()[0], MatchedPair::new(src(1), tgt(2)));
    assert_single_membership(&s);
  }

  #[test]
  fn same_column_and_unknown_drops_are_ignored() {
    let mut s = session(3);
    drag(&mut s, &src(1), &tgt(1));
    let before = s.matched_pairs().to_vec();

    assert_eq!(drag(&mut s, &src(1), &src(2)), DragOutcome::Ignored);
    assert_eq!(drag(&mut s, &tgt(1), &tgt(2)), DragOutcome::Ignored);
    assert_eq!(drag(&mut s, &src(1), "target-99"), DragOutcome::Ignored);
    assert_eq!(drag(&mut s, &src(1), "1"), DragOutcome::Ignored);
    assert_eq!(s.matched_pairs(), before.as_slice());
  }

  #[test]
  fn argument_order_does_not_change_correctness() {
    for (a, b) in [(1, 1), (1, 2), (3, 2)] {
      let mut forward = session(3);
      let mut backward = session(3);
      let f = drag(&mut forward, &src(a), &tgt(b));
      let r = drag(&mut backward, &tgt(b), &src(a));
      assert_eq!(f, r);
      assert_eq!(forward.matched_pairs(), backward.matched_pairs());
    }
  }

  #[test]
  fn repeated_drag_is_idempotent() {
    let mut s = session(3);
    drag(&mut s, &src(2), &tgt(1));
    let once = s.matched_pairs().to_vec();
    drag(&mut s, &src(2), &tgt(1));
    assert_eq!(s.matched_pairs(), once.as_slice());
  }

  #[test]
  fn random_gestures_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut s = session(6);
    let ids: Vec<String> = (1..=6).flat_map(|i| [src(i), tgt(i)]).collect();
    for _ in 0..500 {
      let a = &ids[rng.gen_range(0..ids.len())];
      let b = &ids[rng.gen_range(0..ids.len())];
      drag(&mut s, a, b);
      assert_single_membership(&s);
      assert!(s.score() <= 100);
      assert!(s.matched_pairs().len() <= s.pair_count());
      assert_eq!(s.is_complete(), s.matched_pairs().len() == 6);
      if s.is_fully_correct() {
        assert_eq!(s.score(), 100);
      }
    }
  }

  #[test]
  fn completion_is_independent_of_correctness() {
    let mut s = session(2);
    drag(&mut s, &src(1), &tgt(2));
    drag(&mut s, &src(2), &tgt(1));
    assert!(s.is_complete());
    assert!(!s.is_fully_correct());
    assert_eq!(s.score(), 0);
  }

  #[test]
  fn prior_answer_is_recomputed_and_filtered() {
    let q = question(3);
    let prior = MatchingResponse {
      pairs: vec![
        ResponsePair { left_id: "1".into(), right_id: "2".into() },
        ResponsePair { left_id: "1".into(), right_id: "1".into() },
        ResponsePair { left_id: "9".into(), right_id: "3".into() },
        ResponsePair { left_id: "2".into(), right_id: "3".into() },
      ],
    };
    let mut rng = StdRng::seed_from_u64(3);
    let s = MatchingSession::initialize(&q, Some(&prior), SessionOptions::default(), &mut rng);
    assert_eq!(
      s.matched_pairs(),
      &[MatchedPair::new(src(1), tgt(1)), MatchedPair::new(src(2), tgt(3))]
    );
    assert_eq!(s.score(), 33);
    assert_eq!(s.to_response().pairs[1], ResponsePair { left_id: "2".into(), right_id: "3".into() });
  }

  #[test]
  fn solved_resume_does_not_celebrate_again() {
    let q = question(2);
    let prior = MatchingResponse {
      pairs: vec![
        ResponsePair { left_id: "1".into(), right_id: "1".into() },
        ResponsePair { left_id: "2".into(), right_id: "2".into() },
      ],
    };
    let mut rng = StdRng::seed_from_u64(3);
    let mut s = MatchingSession::initialize(&q, Some(&prior), SessionOptions::default(), &mut rng);
    assert!(s.is_fully_correct());
    assert_eq!(s.celebrate(), None);
  }

  #[test]
  fn celebration_fires_once_and_rearms_on_reset() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut s = session(2);
    drag(&mut s, &src(1), &tgt(1));
    assert_eq!(s.celebrate(), None);
    drag(&mut s, &src(2), &tgt(2));
    let c = s.celebrate().expect("first solve celebrates");
    assert_eq!(c.cue, Some(SoundCue::Complete));
    assert_eq!(s.celebrate(), None);

    s.reset(&mut rng);
    assert!(s.matched_pairs().is_empty());
    assert_eq!(s.score(), 0);
    drag(&mut s, &src(1), &tgt(1));
    drag(&mut s, &src(2), &tgt(2));
    assert!(s.celebrate().is_some());
  }

  #[test]
  fn feedback_expires_without_reverting_state() {
    let mut s = session(2);
    let t0 = Instant::now();
    s.complete_drag_at(&src(1), &tgt(2), t0);

    let fb = s.feedback_at(t0 + Duration::from_millis(100)).expect("feedback visible");
    assert!(!fb.is_correct);
    assert_eq!(fb.message, "Try again!");
    assert_eq!(fb.cue, Some(SoundCue::Incorrect));

    let later = t0 + DEFAULT_FEEDBACK_DELAY + Duration::from_millis(1);
    assert!(s.feedback_at(later).is_none());
    assert!(s.view(later).feedback.is_none());
    assert_eq!(s.matched_pairs().len(), 1);
    assert!(!s.matched_pairs()[0].is_correct);
  }

  #[test]
  fn muted_sessions_carry_no_cues() {
    let mut s = session(2);
    s.set_sounds_muted(true);
    assert_eq!(s.begin_drag(&src(1)), None);
    assert_eq!(s.active_drag(), Some(src(1).as_str()));
    let t0 = Instant::now();
    s.complete_drag_at(&src(1), &tgt(1), t0);
    assert_eq!(s.feedback_at(t0).unwrap().cue, None);
  }

  #[test]
  fn begin_drag_marks_item_until_drop() {
    let mut s = session(2);
    assert_eq!(s.begin_drag(&tgt(2)), Some(SoundCue::Drag));
    assert!(s.view(Instant::now()).targets.iter().any(|i| i.dragging && i.display_id == tgt(2)));
    assert_eq!(s.begin_drag("nope"), None);
    assert_eq!(s.active_drag(), Some(tgt(2).as_str()));
    drag(&mut s, &tgt(2), &tgt(1));
    assert_eq!(s.active_drag(), None);
  }

  #[test]
  fn view_reports_pairing_state() {
    let mut s = session(2);
    drag(&mut s, &src(1), &tgt(1));
    drag(&mut s, &src(2), &tgt(2));
    let v = s.view(Instant::now());
    let a1 = v.sources.iter().find(|i| i.display_id == src(1)).unwrap();
    assert_eq!(a1.state, ItemState::Correct);
    assert_eq!(a1.matched_with.as_deref(), Some(tgt(1).as_str()));
    assert_eq!(v.connections.len(), 2);
    assert!(v.complete && v.fully_correct);
    assert_eq!(v.score, 100);
    assert_eq!((v.correct_count, v.incorrect_count), (2, 0));
  }

  #[test]
  fn view_counts_correct_and_incorrect_pairs() {
    let mut s = session(3);
    drag(&mut s, &src(1), &tgt(2));
    drag(&mut s, &src(3), &tgt(3));
    let v = s.view(Instant::now());
    assert_eq!(v.correct_count, 1);
    assert_eq!(v.incorrect_count, 1);
    assert_eq!(v.score, 33);
    assert!(!v.complete);
  }
}
