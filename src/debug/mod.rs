//! Debug introspection
//!
//! Serializable dumps of manager state for logging and test assertions.

pub mod snapshot;

pub use snapshot::{FloatManagerSnapshot, FloatSnapshot};
