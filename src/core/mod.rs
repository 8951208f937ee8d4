//! Core types shared across the crate
//!
//! - `ToolkitError` / `ToolkitResult` - Error types

pub mod error;

pub use error::{ToolkitError, ToolkitResult};
