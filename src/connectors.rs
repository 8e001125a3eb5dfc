//! Connector geometry for matched pairs.
//!
//! The view layer measures the container and each item element and reports
//! the rectangles; this module turns the session's active pairs into line
//! segments relative to the container. Nothing is cached: every layout
//! change (scroll, resize, reflow) is a fresh call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::MatchedPair;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rect {
  pub x: f64,
  pub y: f64,
  pub width: f64,
  pub height: f64,
}

impl Rect {
  pub fn right(&self) -> f64 { self.x + self.width }
  pub fn mid_y(&self) -> f64 { self.y + self.height / 2.0 }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

/// Source of element measurements.
pub trait LayoutProbe {
  fn container(&self) -> Rect;
  fn item_rect(&self, display_id: &str) -> Option<Rect>;
}

/// A layout snapshot reported by a remote view.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MeasuredLayout {
  pub container: Rect,
  #[serde(default)]
  pub items: HashMap<String, Rect>,
}

impl LayoutProbe for MeasuredLayout {
  fn container(&self) -> Rect {
    self.container
  }

  fn item_rect(&self, display_id: &str) -> Option<Rect> {
    self.items.get(display_id).copied()
  }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
  pub source_display_id: String,
  pub target_display_id: String,
  pub start: Point,
  pub end: Point,
  /// Anchor for the correctness marker.
  pub midpoint: Point,
  pub is_correct: bool,
  pub dashed: bool,
}

/// One connector per pair whose two elements are both measured. Lines run
/// from the source's right edge to the target's left edge, at vertical
/// centers, in container coordinates.
pub fn connectors<P: LayoutProbe + ?Sized>(pairs: &[MatchedPair], probe: &P) -> Vec<Connector> {
  let origin = probe.container();
  pairs
    .iter()
    .filter_map(|pair| {
      let s = probe.item_rect(&pair.source_display_id)?;
      let t = probe.item_rect(&pair.target_display_id)?;
      let start = Point { x: s.right() - origin.x, y: s.mid_y() - origin.y };
      let end = Point { x: t.x - origin.x, y: t.mid_y() - origin.y };
      Some(Connector {
        source_display_id: pair.source_display_id.clone(),
        target_display_id: pair.target_display_id.clone(),
        start,
        end,
        midpoint: Point { x: (start.x + end.x) / 2.0, y: (start.y + end.y) / 2.0 },
        is_correct: pair.is_correct,
        dashed: !pair.is_correct,
      })
    })
    .collect()
}
