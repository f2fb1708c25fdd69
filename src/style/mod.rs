//! Style types and writing-mode axis orientation
//!
//! The float manager works in a writing-mode-relative coordinate frame; the
//! helpers here answer which physical axis each logical axis maps to and
//! whether it runs in the positive physical direction.

pub mod types;

pub use types::{
  BasicShape, BorderRadii, Clear, CornerRadii, Direction, Float, FloatSide, ReferenceBox,
  ShapeImage, ShapeOutside, ShapePosition, ShapePositionComponent, ShapeRadius, WritingMode,
};

/// Whether the block axis runs along physical X.
pub fn block_axis_is_horizontal(wm: WritingMode) -> bool {
  wm != WritingMode::HorizontalTb
}

/// Whether block-start sits at the low-coordinate end of its physical axis.
///
/// vertical-rl and sideways-rl stack blocks right-to-left, so their block
/// axis is reversed.
pub fn block_axis_positive(wm: WritingMode) -> bool {
  !matches!(wm, WritingMode::VerticalRl | WritingMode::SidewaysRl)
}

/// Whether inline-start sits at the low-coordinate end of its physical axis.
///
/// sideways-lr runs its inline axis bottom-to-top, and RTL reverses the
/// inline axis in every writing mode.
pub fn inline_axis_positive(wm: WritingMode, dir: Direction) -> bool {
  (wm != WritingMode::SidewaysLr) == (dir == Direction::Ltr)
}

/// Whether line-left sits at the low-coordinate end of the inline physical
/// axis.
///
/// Unlike inline-start, line-left is direction-independent: it is the left
/// physical edge in horizontal writing, the top edge in every vertical mode
/// except sideways-lr, and the bottom edge for sideways-lr.
pub fn line_axis_positive(wm: WritingMode) -> bool {
  wm != WritingMode::SidewaysLr
}
