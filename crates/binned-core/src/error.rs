//! Error types for histogram construction
//!
//! Provides a unified error type for all binned-stats crates.

use thiserror::Error;

/// Core error type for binning and histogram operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input arrays have incompatible shapes
    #[error("Shape error: {0}")]
    Shape(String),

    /// A resolved edge sequence cannot form a single bin
    #[error("Degenerate edges in dimension {dimension}: expected at least 2 edges, got {len}")]
    DegenerateEdges { dimension: usize, len: usize },

    /// Nothing was accumulated, so the histogram cannot be normalized
    #[error("Empty histogram: total accumulated weight is zero")]
    EmptyHistogram,

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a length mismatch
    pub fn shape_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::Shape(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for an edge sequence that is too short
    pub fn degenerate_edges(dimension: usize, len: usize) -> Self {
        Self::DegenerateEdges { dimension, len }
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }
}
