//! Drag-and-drop capability seam. A UI toolkit (or the WebSocket host) only
//! needs to report where a gesture starts and which two items it connected.

use std::time::Instant;

use crate::domain::DragOutcome;
use crate::exercise::{MatchingSession, SoundCue};

pub trait GestureHandler {
  fn on_gesture_start(&mut self, item_id: &str) -> Option<SoundCue>;
  fn on_gesture_end(&mut self, source_item_id: &str, target_item_id: &str) -> DragOutcome;
}

impl GestureHandler for MatchingSession {
  fn on_gesture_start(&mut self, item_id: &str) -> Option<SoundCue> {
    self.begin_drag(item_id)
  }

  fn on_gesture_end(&mut self, source_item_id: &str, target_item_id: &str) -> DragOutcome {
    self.complete_drag_at(source_item_id, target_item_id, Instant::now())
  }
}
