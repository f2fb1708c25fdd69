//! Writing-mode-relative geometry
//!
//! Two related coordinate frames appear in float management:
//!
//! - The *logical* frame (inline-start × block-start) that callers use for
//!   margin rects and content areas. Converting to and from physical space
//!   needs the writing mode, the direction, and the container size, because
//!   reversed axes mirror against the container's extent.
//! - The *flow-relative* frame (line-left × block-start) the manager stores
//!   floats in. Line-left is direction-independent: under RTL the inline-start
//!   mirroring and the line-left mirroring cancel out, so this frame depends
//!   on the writing mode alone.
//!
//! Monotonic-space mirroring follows the `container_extent - (pos + size)`
//! form throughout.

use crate::geometry::{Au, Margin, Point, Rect, Size};
use crate::style::{
  block_axis_is_horizontal, block_axis_positive, inline_axis_positive, line_axis_positive,
  BorderRadii, CornerRadii, Direction, WritingMode,
};

/// A point in inline-start × block-start coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalPoint {
  pub i: Au,
  pub b: Au,
}

impl LogicalPoint {
  pub const fn new(i: Au, b: Au) -> Self {
    Self { i, b }
  }
}

/// A size measured along the inline and block axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalSize {
  pub i_size: Au,
  pub b_size: Au,
}

impl LogicalSize {
  pub const fn new(i_size: Au, b_size: Au) -> Self {
    Self { i_size, b_size }
  }

  pub fn from_physical(wm: WritingMode, size: Size) -> Self {
    if block_axis_is_horizontal(wm) {
      Self::new(size.height, size.width)
    } else {
      Self::new(size.width, size.height)
    }
  }
}

/// Per-edge offsets in logical block-start/inline-end/block-end/inline-start
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogicalMargin {
  pub b_start: Au,
  pub i_end: Au,
  pub b_end: Au,
  pub i_start: Au,
}

impl LogicalMargin {
  pub const fn new(b_start: Au, i_end: Au, b_end: Au, i_start: Au) -> Self {
    Self {
      b_start,
      i_end,
      b_end,
      i_start,
    }
  }

  pub fn from_physical(wm: WritingMode, dir: Direction, margin: Margin) -> Self {
    let (b_start, b_end) = match wm {
      WritingMode::HorizontalTb => (margin.top, margin.bottom),
      WritingMode::VerticalRl | WritingMode::SidewaysRl => (margin.right, margin.left),
      WritingMode::VerticalLr | WritingMode::SidewaysLr => (margin.left, margin.right),
    };
    let inline_low_high = if block_axis_is_horizontal(wm) {
      (margin.top, margin.bottom)
    } else {
      (margin.left, margin.right)
    };
    let (i_start, i_end) = if inline_axis_positive(wm, dir) {
      inline_low_high
    } else {
      (inline_low_high.1, inline_low_high.0)
    };
    Self {
      b_start,
      i_end,
      b_end,
      i_start,
    }
  }

  pub fn i_start_end(self) -> Au {
    self.i_start + self.i_end
  }

  pub fn b_start_end(self) -> Au {
    self.b_start + self.b_end
  }
}

/// A rectangle in inline-start × block-start coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalRect {
  pub i_start: Au,
  pub b_start: Au,
  pub i_size: Au,
  pub b_size: Au,
}

impl LogicalRect {
  pub const ZERO: Self = Self {
    i_start: 0,
    b_start: 0,
    i_size: 0,
    b_size: 0,
  };

  pub const fn new(i_start: Au, b_start: Au, i_size: Au, b_size: Au) -> Self {
    Self {
      i_start,
      b_start,
      i_size,
      b_size,
    }
  }

  pub fn origin(&self) -> LogicalPoint {
    LogicalPoint::new(self.i_start, self.b_start)
  }

  pub fn i_end(&self) -> Au {
    self.i_start + self.i_size
  }

  pub fn b_end(&self) -> Au {
    self.b_start + self.b_size
  }

  pub fn is_empty(&self) -> bool {
    self.i_size <= 0 || self.b_size <= 0
  }

  /// Converts a physical rect into this logical frame.
  pub fn from_physical(wm: WritingMode, dir: Direction, rect: Rect, container: Size) -> Self {
    let (inline_pos, inline_size, block_pos, block_size, ci, cb) = if block_axis_is_horizontal(wm) {
      (
        rect.y(),
        rect.height(),
        rect.x(),
        rect.width(),
        container.height,
        container.width,
      )
    } else {
      (
        rect.x(),
        rect.width(),
        rect.y(),
        rect.height(),
        container.width,
        container.height,
      )
    };

    let i_start = if inline_axis_positive(wm, dir) {
      inline_pos
    } else {
      ci - (inline_pos + inline_size)
    };
    let b_start = if block_axis_positive(wm) {
      block_pos
    } else {
      cb - (block_pos + block_size)
    };

    Self {
      i_start,
      b_start,
      i_size: inline_size,
      b_size: block_size,
    }
  }

  /// Converts back to physical coordinates; the inverse of
  /// [`LogicalRect::from_physical`] for the same writing mode, direction,
  /// and container.
  pub fn to_physical(&self, wm: WritingMode, dir: Direction, container: Size) -> Rect {
    let (ci, cb) = if block_axis_is_horizontal(wm) {
      (container.height, container.width)
    } else {
      (container.width, container.height)
    };

    let inline_pos = if inline_axis_positive(wm, dir) {
      self.i_start
    } else {
      ci - (self.i_start + self.i_size)
    };
    let block_pos = if block_axis_positive(wm) {
      self.b_start
    } else {
      cb - (self.b_start + self.b_size)
    };

    if block_axis_is_horizontal(wm) {
      Rect::from_xywh(block_pos, inline_pos, self.b_size, self.i_size)
    } else {
      Rect::from_xywh(inline_pos, block_pos, self.i_size, self.b_size)
    }
  }

  /// Distance from the container's line-left edge to this rect's line-left
  /// edge.
  pub fn line_left(&self, wm: WritingMode, dir: Direction, container: Size) -> Au {
    if inline_axis_positive(wm, dir) == line_axis_positive(wm) {
      self.i_start
    } else {
      LogicalSize::from_physical(wm, container).i_size - self.i_end()
    }
  }

  /// Distance from the container's line-left edge to this rect's line-right
  /// edge.
  pub fn line_right(&self, wm: WritingMode, dir: Direction, container: Size) -> Au {
    self.line_left(wm, dir, container) + self.i_size
  }

  /// The rect in the flow-relative (line-left × block-start) frame.
  pub fn to_flow_relative(&self, wm: WritingMode, dir: Direction, container: Size) -> Rect {
    Rect::from_xywh(
      self.line_left(wm, dir, container),
      self.b_start,
      self.i_size,
      self.b_size,
    )
  }

  /// Grows the rect outward by a logical margin.
  pub fn inflate(&self, margin: LogicalMargin) -> Self {
    Self {
      i_start: self.i_start - margin.i_start,
      b_start: self.b_start - margin.b_start,
      i_size: self.i_size + margin.i_start_end(),
      b_size: self.b_size + margin.b_start_end(),
    }
  }

  /// Shrinks the rect inward by a logical margin, clamping collapsed
  /// dimensions to zero.
  pub fn deflate(&self, margin: LogicalMargin) -> Self {
    Self {
      i_start: self.i_start + margin.i_start,
      b_start: self.b_start + margin.b_start,
      i_size: (self.i_size - margin.i_start_end()).max(0),
      b_size: (self.b_size - margin.b_start_end()).max(0),
    }
  }
}

/// Converts a physical point into the flow-relative frame.
///
/// Points mirror against the container extent itself (`c - pos`), not
/// `c - (pos + size)`.
pub fn flow_relative_point(wm: WritingMode, point: Point, container: Size) -> Point {
  let (inline_pos, block_pos, ci, cb) = if block_axis_is_horizontal(wm) {
    (point.y, point.x, container.height, container.width)
  } else {
    (point.x, point.y, container.width, container.height)
  };
  let line = if line_axis_positive(wm) {
    inline_pos
  } else {
    ci - inline_pos
  };
  let block = if block_axis_positive(wm) {
    block_pos
  } else {
    cb - block_pos
  };
  Point::new(line, block)
}

/// Maps physical corner radii into the flow-relative frame.
///
/// In the result, "top" is block-start, "left" is line-left, `x` is the
/// line-axis radius and `y` is the block-axis radius.
pub fn flow_relative_radii(radii: &BorderRadii, wm: WritingMode) -> BorderRadii {
  let swap = |c: CornerRadii| CornerRadii::new(c.y, c.x);
  match wm {
    WritingMode::HorizontalTb => *radii,
    WritingMode::VerticalRl | WritingMode::SidewaysRl => BorderRadii {
      top_left: swap(radii.top_right),
      top_right: swap(radii.bottom_right),
      bottom_left: swap(radii.top_left),
      bottom_right: swap(radii.bottom_left),
    },
    WritingMode::VerticalLr => BorderRadii {
      top_left: swap(radii.top_left),
      top_right: swap(radii.bottom_left),
      bottom_left: swap(radii.top_right),
      bottom_right: swap(radii.bottom_right),
    },
    WritingMode::SidewaysLr => BorderRadii {
      top_left: swap(radii.bottom_left),
      top_right: swap(radii.top_left),
      bottom_left: swap(radii.bottom_right),
      bottom_right: swap(radii.top_right),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const CONTAINER: Size = Size::new(1000, 600);

  #[test]
  fn horizontal_ltr_is_identity() {
    let rect = Rect::from_xywh(10, 20, 100, 50);
    let logical = LogicalRect::from_physical(
      WritingMode::HorizontalTb,
      Direction::Ltr,
      rect,
      CONTAINER,
    );
    assert_eq!(logical, LogicalRect::new(10, 20, 100, 50));
    assert_eq!(logical.origin(), LogicalPoint::new(10, 20));
    assert_eq!(
      logical.to_physical(WritingMode::HorizontalTb, Direction::Ltr, CONTAINER),
      rect
    );
  }

  #[test]
  fn horizontal_rtl_mirrors_inline_axis() {
    let rect = Rect::from_xywh(10, 20, 100, 50);
    let logical = LogicalRect::from_physical(
      WritingMode::HorizontalTb,
      Direction::Rtl,
      rect,
      CONTAINER,
    );
    // Inline-start measured from the right edge.
    assert_eq!(logical.i_start, 1000 - 110);
    assert_eq!(logical.b_start, 20);
    // Line-left is still the physical left edge.
    assert_eq!(
      logical.line_left(WritingMode::HorizontalTb, Direction::Rtl, CONTAINER),
      10
    );
  }

  #[test]
  fn vertical_rl_reverses_block_axis() {
    let rect = Rect::from_xywh(700, 40, 100, 50);
    let logical =
      LogicalRect::from_physical(WritingMode::VerticalRl, Direction::Ltr, rect, CONTAINER);
    assert_eq!(logical.b_start, 1000 - 800);
    assert_eq!(logical.i_start, 40);
    assert_eq!(logical.i_size, 50);
    assert_eq!(logical.b_size, 100);
  }

  #[test]
  fn sideways_lr_reverses_inline_axis() {
    let rect = Rect::from_xywh(10, 400, 100, 50);
    let logical =
      LogicalRect::from_physical(WritingMode::SidewaysLr, Direction::Ltr, rect, CONTAINER);
    assert_eq!(logical.b_start, 10);
    assert_eq!(logical.i_start, 600 - 450);
    // Line-left is the bottom edge; both mirrorings agree here.
    assert_eq!(
      logical.line_left(WritingMode::SidewaysLr, Direction::Ltr, CONTAINER),
      600 - 450
    );
  }

  #[test]
  fn round_trip_all_modes() {
    let rect = Rect::from_xywh(120, 80, 64, 32);
    for wm in [
      WritingMode::HorizontalTb,
      WritingMode::VerticalRl,
      WritingMode::VerticalLr,
      WritingMode::SidewaysRl,
      WritingMode::SidewaysLr,
    ] {
      for dir in [Direction::Ltr, Direction::Rtl] {
        let logical = LogicalRect::from_physical(wm, dir, rect, CONTAINER);
        assert_eq!(
          logical.to_physical(wm, dir, CONTAINER),
          rect,
          "round trip failed for {wm:?}/{dir:?}"
        );
      }
    }
  }

  #[test]
  fn rtl_line_left_matches_ltr() {
    // Line-left is direction-independent for every writing mode.
    let rect = Rect::from_xywh(120, 80, 64, 32);
    for wm in [
      WritingMode::HorizontalTb,
      WritingMode::VerticalRl,
      WritingMode::VerticalLr,
      WritingMode::SidewaysRl,
      WritingMode::SidewaysLr,
    ] {
      let ltr = LogicalRect::from_physical(wm, Direction::Ltr, rect, CONTAINER);
      let rtl = LogicalRect::from_physical(wm, Direction::Rtl, rect, CONTAINER);
      assert_eq!(
        ltr.line_left(wm, Direction::Ltr, CONTAINER),
        rtl.line_left(wm, Direction::Rtl, CONTAINER),
        "line-left diverged for {wm:?}"
      );
    }
  }

  #[test]
  fn flow_relative_point_mirrors_block_axis() {
    let point = Point::new(700, 40);
    let flow = flow_relative_point(WritingMode::VerticalRl, point, CONTAINER);
    assert_eq!(flow, Point::new(40, 300));

    let flow = flow_relative_point(WritingMode::HorizontalTb, point, CONTAINER);
    assert_eq!(flow, Point::new(700, 40));
  }

  #[test]
  fn logical_margin_from_physical() {
    let margin = Margin::new(1, 2, 3, 4);
    let m = LogicalMargin::from_physical(WritingMode::HorizontalTb, Direction::Ltr, margin);
    assert_eq!(m, LogicalMargin::new(1, 2, 3, 4));

    let m = LogicalMargin::from_physical(WritingMode::HorizontalTb, Direction::Rtl, margin);
    assert_eq!(m, LogicalMargin::new(1, 4, 3, 2));

    let m = LogicalMargin::from_physical(WritingMode::VerticalRl, Direction::Ltr, margin);
    // block-start = right, inline-start = top.
    assert_eq!(m, LogicalMargin::new(2, 3, 4, 1));

    let m = LogicalMargin::from_physical(WritingMode::SidewaysLr, Direction::Ltr, margin);
    // block-start = left, inline-start = bottom.
    assert_eq!(m, LogicalMargin::new(4, 1, 2, 3));
  }

  #[test]
  fn inflate_then_deflate_round_trips() {
    let rect = LogicalRect::new(10, 20, 100, 50);
    let margin = LogicalMargin::new(1, 2, 3, 4);
    assert_eq!(rect.inflate(margin).deflate(margin), rect);
  }

  #[test]
  fn flow_relative_radii_vertical_rl() {
    let radii = BorderRadii {
      top_left: CornerRadii::new(1, 2),
      top_right: CornerRadii::new(3, 4),
      bottom_right: CornerRadii::new(5, 6),
      bottom_left: CornerRadii::new(7, 8),
    };
    let logical = flow_relative_radii(&radii, WritingMode::VerticalRl);
    // Block-start/line-left corner is the physical top-right one.
    assert_eq!(logical.top_left, CornerRadii::new(4, 3));
    assert_eq!(logical.top_right, CornerRadii::new(6, 5));
    assert_eq!(logical.bottom_left, CornerRadii::new(2, 1));
    assert_eq!(logical.bottom_right, CornerRadii::new(8, 7));
  }
}
