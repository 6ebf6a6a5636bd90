//! Error handling for the weekly dashboard core
//!
//! Defines the failure taxonomy for loading and aggregation and establishes a
//! unified Result type using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for the load/aggregate/export pipeline.
///
/// All three domain variants are surfaced to the caller unrecovered: the core
/// never substitutes a zero for a missing latest-week value or skips a category
/// silently. Presentation decides what to show the user.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("category '{0}' has no usable records")]
    EmptyCategory(String),

    #[error("formula for '{target}' references unknown field '{field}'")]
    UnknownField { target: String, field: String },

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for dashboard operations
pub type Result<T> = anyhow::Result<T>;
