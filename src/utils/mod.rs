//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types, result types and warnings
//! - Text normalization and field-key slugification

pub mod error;
pub mod text;

// Re-export commonly used items
pub use error::{TableError, TableResult, Warning};
pub use text::{normalize_whitespace, slugify};
