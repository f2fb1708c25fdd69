//! Registry snapshots
//!
//! A serializable description of everything the manager currently tracks,
//! for dumping between reflows and for asserting on internal state (the
//! cumulative summaries in particular) from integration tests.

use serde::Serialize;

use crate::geometry::Au;
use crate::layout::float_manager::FloatManager;
use crate::style::FloatSide;

/// One registered float, flattened for serialization.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FloatSnapshot {
  pub frame: u64,
  pub side: &'static str,
  pub line_left: Au,
  pub b_start: Au,
  pub i_size: Au,
  pub b_size: Au,
  pub left_b_end: Au,
  pub right_b_end: Au,
  pub has_shape: bool,
}

/// The manager's registry and origin at one instant.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FloatManagerSnapshot {
  pub line_left: Au,
  pub block_start: Au,
  pub floats: Vec<FloatSnapshot>,
}

impl FloatManager {
  pub fn snapshot(&self) -> FloatManagerSnapshot {
    let (line_left, block_start) = self.origin();
    FloatManagerSnapshot {
      line_left,
      block_start,
      floats: self
        .float_infos()
        .iter()
        .map(|fi| {
          let rect = fi.rect();
          FloatSnapshot {
            frame: fi.frame().0,
            side: match fi.side() {
              FloatSide::Left => "left",
              FloatSide::Right => "right",
            },
            line_left: rect.x(),
            b_start: rect.y(),
            i_size: rect.width(),
            b_size: rect.height(),
            left_b_end: fi.left_b_end(),
            right_b_end: fi.right_b_end(),
            has_shape: fi.has_shape(),
          }
        })
        .collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::frame::{FloatFrame, FloatStyle, FrameId};
  use crate::geometry::{Rect, Size};
  use crate::layout::logical::LogicalRect;
  use crate::style::{Direction, Float, WritingMode};

  #[test]
  fn snapshot_lists_floats_in_order() {
    let mut manager = FloatManager::new(WritingMode::HorizontalTb, Direction::Ltr);
    let frame = FloatFrame::new(
      FrameId(7),
      FloatStyle::simple(Float::Right),
      Rect::from_xywh(0, 0, 0, 0),
    );
    manager.add_float(
      &frame,
      &LogicalRect::new(800, 10, 200, 40),
      WritingMode::HorizontalTb,
      Direction::Ltr,
      Size::new(1000, 1000),
    );

    let snapshot = manager.snapshot();
    assert_eq!(snapshot.floats.len(), 1);
    let float = &snapshot.floats[0];
    assert_eq!(float.frame, 7);
    assert_eq!(float.side, "right");
    assert_eq!(float.b_start, 10);
    assert_eq!(float.right_b_end, 50);
    assert!(!float.has_shape);
  }
}
