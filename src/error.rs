//! Error types for floatband
//!
//! The geometric core never fails: band queries, clearance, and state
//! checkpointing are total functions over the manager's state. The only
//! fallible surface is the boundary where decoded image data enters the crate
//! to become an image exclusion shape.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for floatband operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for floatband.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// Image shape construction error
  #[error("shape image error: {0}")]
  ShapeImage(#[from] ShapeImageError),
}

/// Errors raised while adopting a decoded alpha buffer for an image shape.
///
/// These indicate a contract violation between the image decoder and the
/// float manager; they never occur during band queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeImageError {
  /// The supplied buffer does not hold one byte per pixel.
  #[error("alpha buffer holds {actual} bytes but {width}×{height} pixels need {expected}")]
  BufferSizeMismatch {
    width: u32,
    height: u32,
    expected: usize,
    actual: usize,
  },
}
