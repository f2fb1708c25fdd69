//! The slice of a floated frame the manager reads
//!
//! The float manager does not own a frame tree. [`FloatFrame`] carries the
//! resolved style and geometry a floated box contributes: identity for
//! trailing removal and damage keying, the `float`/`shape-outside` styles,
//! the used margin/border/padding needed to reach inner reference boxes, and
//! the content rect image shapes rasterize against. The reflow driver builds
//! one per float and keeps it alive across reflows.

use crate::geometry::{Margin, Point, Rect};
use crate::style::{BorderRadii, Float, ShapeOutside};

/// Opaque identity of a floated frame.
///
/// Used only for equality: trailing-region removal and damage keying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// The resolved style values the float manager consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatStyle {
  pub float: Float,
  pub shape_outside: ShapeOutside,
  /// Computed `shape-image-threshold`, clamped to [0,1] at use.
  pub shape_image_threshold: f32,
  /// Used physical margins.
  pub margin: Margin,
  /// Used physical border widths.
  pub border: Margin,
  /// Used physical paddings.
  pub padding: Margin,
  /// Border radii of the shape box, when any corner is rounded.
  pub border_radii: Option<BorderRadii>,
}

impl FloatStyle {
  /// A plain float with no shape and no box insets.
  pub fn simple(float: Float) -> Self {
    Self {
      float,
      shape_outside: ShapeOutside::None,
      shape_image_threshold: 0.0,
      margin: Margin::ZERO,
      border: Margin::ZERO,
      padding: Margin::ZERO,
      border_radii: None,
    }
  }
}

/// A floated frame as the manager sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatFrame {
  pub id: FrameId,
  pub style: FloatStyle,
  /// Current physical border-box rect, including relative-position offsets.
  pub rect: Rect,
  /// Physical position ignoring relative offsets; float regions are computed
  /// at the normal position.
  pub normal_position: Point,
  /// Physical content-box rect; the raster target for image shapes.
  pub content_rect: Rect,
  /// Stored difference between the float's region and its rect, written by
  /// [`crate::layout::float_manager::FloatManager::store_region_for`].
  pub region_margin: Option<Margin>,
}

impl FloatFrame {
  pub fn new(id: FrameId, style: FloatStyle, rect: Rect) -> Self {
    Self {
      id,
      style,
      rect,
      normal_position: rect.origin,
      content_rect: rect,
      region_margin: None,
    }
  }

  pub fn with_content_rect(mut self, content_rect: Rect) -> Self {
    self.content_rect = content_rect;
    self
  }

  pub fn with_normal_position(mut self, position: Point) -> Self {
    self.normal_position = position;
    self
  }
}
