//! Float layout core
//!
//! - `logical.rs` - logical and flow-relative coordinate frames
//! - `float_manager.rs` - float registry, band queries, clearance, state
//! - `float_shape.rs` - `shape-outside` exclusion geometry
//! - `damage.rs` - block-axis damage interval sink

pub mod damage;
pub mod float_manager;
pub mod float_shape;
pub mod logical;

pub use damage::FloatDamage;
pub use float_manager::{
  shutdown_cache, BandInfoType, ClearFlags, FloatInfo, FloatManager, FlowArea, SavedState,
  ShapeType,
};
pub use float_shape::ShapeInfo;
pub use logical::{LogicalMargin, LogicalPoint, LogicalRect, LogicalSize};
