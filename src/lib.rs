//! Normalized weighted histograms
//!
//! This crate re-exports the workspace crates under one name:
//!
//! - [`binned_core`]: errors, numeric input conversion and execution engines
//! - [`binned_histogram`]: edge resolution, binning, accumulation and normalization
//!
//! # Example
//!
//! ```rust
//! use binned_stats::prelude::*;
//!
//! let samples = SampleMatrix::from_rows(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]).unwrap();
//! let hist = HistogramBuilder::new(vec![1.0, 2.0, 3.0, 4.0]).build(&samples).unwrap();
//!
//! assert_eq!(hist.shape(), &[3, 3]);
//! assert!((hist.get(&[1, 1]).unwrap() - 1.0 / 3.0).abs() < 1e-12);
//! assert_eq!(hist.get(&[0, 1]), Some(0.0));
//! ```

pub use binned_core;
pub use binned_histogram;

pub use binned_core::{Error, Result};
pub use binned_histogram::{histogram, histogram_1d};

/// Prelude module for convenient imports
pub mod prelude {
    pub use binned_core::prelude::*;
    pub use binned_histogram::{
        histogram, histogram_1d, BinEdges, Binner, EdgeSpec, EdgeSpecification, Histogram,
        HistogramBuilder, HistogramConfig, HistogramOps, SampleMatrix, Weights,
    };
}
