//! floatband: float management for block formatting contexts
//!
//! Tracks the floated boxes of one block formatting context and answers, for
//! any block-axis band, the inline region into which lines and further floats
//! may flow. Covers CSS float placement bookkeeping and the `shape-outside`
//! exclusion shapes (reference boxes, `inset()`, `circle()`/`ellipse()`,
//! `polygon()`, and image alpha shapes).
//!
//! The manager is told where floats go; it never decides placement and never
//! reflows. All geometry is integer app units in a writing-mode-relative
//! frame.
//!
//! ```
//! use floatband::frame::{FloatFrame, FloatStyle, FrameId};
//! use floatband::geometry::{Rect, Size};
//! use floatband::layout::{BandInfoType, FloatManager, LogicalRect, ShapeType};
//! use floatband::style::{Direction, Float, WritingMode};
//!
//! let wm = WritingMode::HorizontalTb;
//! let dir = Direction::Ltr;
//! let container = Size::new(1000, 1000);
//!
//! let mut manager = FloatManager::new(wm, dir);
//! let float = FloatFrame::new(
//!   FrameId(1),
//!   FloatStyle::simple(Float::Left),
//!   Rect::from_xywh(0, 0, 200, 100),
//! );
//! manager.add_float(&float, &LogicalRect::new(0, 0, 200, 100), wm, dir, container);
//!
//! let content = LogicalRect::new(0, 0, 1000, 1000);
//! let area = manager.get_flow_area(
//!   wm,
//!   dir,
//!   20,
//!   30,
//!   BandInfoType::WidthWithinHeight,
//!   ShapeType::Margin,
//!   &content,
//!   None,
//!   container,
//! );
//! assert_eq!(area.i_start, 200);
//! assert_eq!(area.i_size, 800);
//! assert!(area.has_floats);
//! ```

pub mod alpha;
pub mod debug;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod layout;
pub mod style;

pub use alpha::AlphaPixels;
pub use error::{Error, Result};
pub use frame::{FloatFrame, FloatStyle, FrameId};
pub use geometry::{Au, Margin, Point, Rect, Size, AU_MAX, AU_MIN};
pub use layout::{
  BandInfoType, ClearFlags, FloatDamage, FloatManager, FlowArea, LogicalMargin, LogicalRect,
  SavedState, ShapeType,
};
pub use style::{Clear, Direction, Float, FloatSide, ShapeOutside, WritingMode};
