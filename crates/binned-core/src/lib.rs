//! Core types shared by the binned-stats crates
//!
//! This crate holds the pieces every binning stage needs:
//!
//! - **Errors**: a single [`Error`] taxonomy covering shape, edge and
//!   normalization failures
//! - **Numeric input**: the [`Numeric`] trait converts any primitive number to
//!   `f64` on entry
//! - **Execution engines**: [`SequentialEngine`] and (with the `parallel`
//!   feature) [`ParallelEngine`] schedule chunked work over sample rows
//!
//! # Example
//!
//! ```rust
//! use binned_core::{execution::sequential, ExecutionEngine, Numeric};
//!
//! let engine = sequential();
//! let data: Vec<f64> = [1i32, 2, 3, 4].iter().map(|&v| v.to_f64()).collect();
//! let sums = engine.map_chunks(&data, 2, |_, chunk| chunk.iter().sum::<f64>());
//! assert_eq!(sums, vec![3.0, 7.0]);
//! ```

pub mod error;
pub mod execution;
pub mod numeric;

// Re-export core types
pub use error::{Error, Result};

pub use execution::{sequential, ExecutionEngine, ExecutionMode, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};

pub use numeric::{to_f64_vec, Numeric};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Error, ExecutionEngine, ExecutionStrategy, Numeric, Result, SequentialEngine};

    #[cfg(feature = "parallel")]
    pub use crate::ParallelEngine;
}
