//! Normalized weighted histograms over N-dimensional samples
//!
//! Samples are rows of a [`SampleMatrix`]. Each dimension gets its own bin
//! edges, either given explicitly or derived from a bin count and the observed
//! range of that dimension. Every sample lands in at most one cell; its weight
//! (1 by default) is added to that cell, and the result is divided by the total
//! so the cells sum to 1.
//!
//! # Key Features
//!
//! - **Per-dimension edges**: one spec for all dimensions or one per dimension
//! - **Closed last bin**: a value equal to the last edge is counted
//! - **Weighted counts**: arbitrary real weights, with a fast path for unit weights
//! - **Chunked accumulation**: partial histograms merged by addition, optionally
//!   on the Rayon pool (`parallel` feature)
//! - **Comparison**: intersection, chi-squared, Bhattacharyya, KL, total variation
//!
//! # Examples
//!
//! ## Explicit Edges
//!
//! ```rust
//! use binned_histogram::histogram_1d;
//!
//! let hist = histogram_1d(&[1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0, 4.0], None).unwrap();
//! assert_eq!(hist.shape(), &[3]);
//! for &p in hist.values() {
//!     assert!((p - 1.0 / 3.0).abs() < 1e-12);
//! }
//! ```
//!
//! ## Auto Edges in Two Dimensions
//!
//! ```rust
//! use binned_histogram::{histogram, SampleMatrix};
//!
//! let samples = SampleMatrix::from_rows(&[[0.0, 0.0], [1.0, 1.0]]).unwrap();
//! let hist = histogram(&samples, 2usize, None).unwrap();
//!
//! assert_eq!(hist.shape(), &[2, 2]);
//! assert_eq!(hist.get(&[0, 0]), Some(0.5));
//! assert_eq!(hist.get(&[1, 1]), Some(0.5));
//! ```
//!
//! ## Builder with Weights and Configuration
//!
//! ```rust
//! use binned_histogram::{EdgeSpec, HistogramBuilder, HistogramConfig, SampleMatrix};
//!
//! let samples = SampleMatrix::from_rows(&[[0.5, 10.0], [1.5, 20.0], [1.5, 30.0]]).unwrap();
//! let hist = HistogramBuilder::new(vec![EdgeSpec::Explicit(vec![0.0, 1.0, 2.0]), EdgeSpec::Count(3)])
//!     .weights(vec![1.0, 2.0, 1.0])
//!     .config(HistogramConfig::sequential())
//!     .build(&samples)
//!     .unwrap();
//!
//! assert_eq!(hist.shape(), &[2, 3]);
//! assert_eq!(hist.total_weight(), 4.0);
//! ```
//!
//! ## Histogram Comparison
//!
//! ```rust
//! use binned_histogram::{histogram_1d, HistogramOps};
//!
//! let edges = vec![0.0, 2.0, 4.0, 6.0];
//! let h1 = histogram_1d(&[1.0, 3.0], edges.clone(), None).unwrap();
//! let h2 = histogram_1d(&[3.0, 5.0], edges, None).unwrap();
//!
//! let overlap = h1.intersection(&h2).unwrap();
//! assert!((overlap - 0.5).abs() < 1e-12);
//! ```

pub mod accumulator;
pub mod binner;
pub mod builders;
pub mod config;
pub mod edges;
pub mod matrix;
pub mod normalize;
pub mod ops;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use accumulator::{accumulate, RawHistogram};
pub use binner::bin_index;
pub use builders::HistogramBuilder;
pub use config::HistogramConfig;
pub use edges::{resolve_edges, BinEdges, EdgeSpec, EdgeSpecification, RANGE_PADDING};
pub use matrix::{SampleMatrix, Weights};
pub use normalize::normalize;
pub use ops::HistogramOps;
pub use traits::Binner;
pub use types::{BinLayout, Histogram};

pub use binned_core::{Error, Result};

// Convenience functions
/// Build a normalized histogram of `samples`
///
/// `weights`, when given, must hold one entry per sample. The default
/// configuration is used, so large inputs run in parallel when the `parallel`
/// feature is enabled.
pub fn histogram(
    samples: &SampleMatrix,
    edges: impl Into<EdgeSpecification>,
    weights: Option<&[f64]>,
) -> Result<Histogram> {
    HistogramBuilder::new(edges)
        .weights(Weights::from_option(weights))
        .build(samples)
}

/// Build a normalized histogram of a single column of values
pub fn histogram_1d<T: binned_core::Numeric>(
    values: &[T],
    edges: impl Into<EdgeSpecification>,
    weights: Option<&[f64]>,
) -> Result<Histogram> {
    histogram(&SampleMatrix::from_column(values), edges, weights)
}
