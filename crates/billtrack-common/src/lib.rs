//! Shared utilities for billtrack crates.
//!
//! This crate provides common utilities used across the workspace,
//! including Polars DataFrame helpers.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    any_to_string, any_to_string_non_empty, format_numeric, optional_text, parse_i64,
    string_values,
};
