//! Edge specifications and their resolution to concrete edges
//!
//! Each dimension is binned either by an explicit edge sequence, passed through
//! as given, or by a bin count, from which equally spaced edges are generated
//! over the observed range of that dimension.

use crate::matrix::SampleMatrix;
use binned_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Padding applied below the minimum and above the maximum of a column when
/// generating edges from a bin count
pub const RANGE_PADDING: f64 = f64::EPSILON;

/// Edge specification for a single dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSpec {
    /// Generate this many equal-width bins over the observed range
    Count(usize),
    /// Use these edges as given
    ///
    /// The sequence must be non-decreasing. This is not checked; with
    /// decreasing edges the bin a value lands in is unspecified.
    Explicit(Vec<f64>),
}

impl From<usize> for EdgeSpec {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<Vec<f64>> for EdgeSpec {
    fn from(edges: Vec<f64>) -> Self {
        Self::Explicit(edges)
    }
}

impl From<&[f64]> for EdgeSpec {
    fn from(edges: &[f64]) -> Self {
        Self::Explicit(edges.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for EdgeSpec {
    fn from(edges: [f64; N]) -> Self {
        Self::Explicit(edges.to_vec())
    }
}

/// Edge specification for all dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSpecification {
    /// One specification broadcast to every dimension
    Scalar(EdgeSpec),
    /// One specification per dimension; the length must equal the dimension count
    PerDimension(Vec<EdgeSpec>),
}

impl EdgeSpecification {
    /// Specification that applies to `dim`
    fn for_dimension(&self, dim: usize) -> &EdgeSpec {
        match self {
            Self::Scalar(spec) => spec,
            Self::PerDimension(specs) => &specs[dim],
        }
    }
}

impl From<EdgeSpec> for EdgeSpecification {
    fn from(spec: EdgeSpec) -> Self {
        Self::Scalar(spec)
    }
}

impl From<usize> for EdgeSpecification {
    fn from(count: usize) -> Self {
        Self::Scalar(EdgeSpec::Count(count))
    }
}

impl From<Vec<f64>> for EdgeSpecification {
    fn from(edges: Vec<f64>) -> Self {
        Self::Scalar(EdgeSpec::Explicit(edges))
    }
}

impl From<&[f64]> for EdgeSpecification {
    fn from(edges: &[f64]) -> Self {
        Self::Scalar(EdgeSpec::from(edges))
    }
}

impl<const N: usize> From<[f64; N]> for EdgeSpecification {
    fn from(edges: [f64; N]) -> Self {
        Self::Scalar(EdgeSpec::from(edges))
    }
}

impl From<Vec<EdgeSpec>> for EdgeSpecification {
    fn from(specs: Vec<EdgeSpec>) -> Self {
        Self::PerDimension(specs)
    }
}

/// A resolved, ordered edge sequence for one dimension
///
/// Always holds at least two edges. Edges generated from a bin count are
/// flagged as uniform, which lets the binner locate values arithmetically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinEdges {
    values: Vec<f64>,
    uniform: bool,
}

impl BinEdges {
    /// Wrap explicit edges without reordering or validating monotonicity
    pub fn new(values: Vec<f64>) -> Result<Self> {
        Self::explicit(0, values)
    }

    pub(crate) fn explicit(dimension: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() < 2 {
            return Err(Error::degenerate_edges(dimension, values.len()));
        }
        Ok(Self {
            values,
            uniform: false,
        })
    }

    /// `num_bins + 1` equally spaced edges from `lo` to `hi`
    pub fn linspace(lo: f64, hi: f64, num_bins: usize) -> Result<Self> {
        Self::linspace_in(0, lo, hi, num_bins)
    }

    fn linspace_in(dimension: usize, lo: f64, hi: f64, num_bins: usize) -> Result<Self> {
        if num_bins == 0 {
            return Err(Error::degenerate_edges(dimension, 1));
        }
        if !(lo.is_finite() && hi.is_finite()) {
            return Err(Error::non_finite("edge range"));
        }
        if lo >= hi {
            return Err(Error::InvalidParameter(format!(
                "edge range must be increasing, got [{lo}, {hi}]"
            )));
        }

        // Interpolate without forming `hi - lo`, which overflows for ranges
        // wider than f64::MAX
        let n = num_bins as f64;
        let mut values: Vec<f64> = (0..=num_bins)
            .map(|i| {
                let t = i as f64 / n;
                (lo * (1.0 - t) + hi * t).clamp(lo, hi)
            })
            .collect();
        values[0] = lo;
        values[num_bins] = hi;

        Ok(Self {
            values,
            uniform: true,
        })
    }

    /// The edge values
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a resolved edge sequence has at least two edges
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of bins (edges - 1)
    pub fn num_bins(&self) -> usize {
        self.values.len() - 1
    }

    /// Whether the edges were generated with equal spacing
    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    /// Lowest edge
    pub fn lower(&self) -> f64 {
        self.values[0]
    }

    /// Highest edge
    pub fn upper(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Midpoint of each bin
    pub fn centers(&self) -> Vec<f64> {
        self.values.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    /// Width of each bin
    pub fn widths(&self) -> Vec<f64> {
        self.values.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Consume into the raw edge values
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

/// Smallest and largest finite value in a column
///
/// Non-finite values are skipped; they are excluded during binning anyway.
fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Smallest bin width, relative to the magnitude of the range, for which
/// interpolated edges stay distinct after rounding
const MIN_RELATIVE_STEP: f64 = 16.0 * f64::EPSILON;

/// Padded range over `[min, max]` that `num_bins` equal bins can split into
/// strictly increasing edges
///
/// The range is padded by [`RANGE_PADDING`] on each side. Constant columns,
/// and columns too narrow to split at their magnitude, are instead widened
/// around their midpoint by at least 0.5 on each side.
fn auto_range(min: f64, max: f64, num_bins: usize) -> (f64, f64) {
    let n = num_bins.max(1) as f64;
    let (lo, hi) = (min - RANGE_PADDING, max + RANGE_PADDING);
    let scale = lo.abs().max(hi.abs());

    // `hi / n - lo / n` is `inf` rather than NaN when the span overflows
    if min < max && hi / n - lo / n > MIN_RELATIVE_STEP * scale {
        return (lo, hi);
    }

    let mid = min * 0.5 + max * 0.5;
    let half = 0.5f64.max(MIN_RELATIVE_STEP * n * scale);
    trace!(min, max, half, "widening narrow range");
    ((mid - half).max(f64::MIN), (mid + half).min(f64::MAX))
}

/// Resolve one dimension's specification against its sample column
pub fn resolve_dimension(
    dimension: usize,
    column: impl Iterator<Item = f64>,
    spec: &EdgeSpec,
) -> Result<BinEdges> {
    match spec {
        EdgeSpec::Explicit(values) => BinEdges::explicit(dimension, values.clone()),
        EdgeSpec::Count(count) => {
            let (min, max) = finite_range(column).unwrap_or_else(|| {
                trace!(dimension, "no finite samples, using unit range");
                (0.0, 1.0)
            });
            let (lo, hi) = auto_range(min, max, *count);
            BinEdges::linspace_in(dimension, lo, hi, *count)
        }
    }
}

/// Resolve the edge specification for every dimension of `samples`
///
/// A `PerDimension` specification must have exactly one entry per dimension,
/// otherwise this fails with [`Error::Shape`] before any edges are computed.
pub fn resolve_edges(samples: &SampleMatrix, spec: &EdgeSpecification) -> Result<Vec<BinEdges>> {
    let n_dims = samples.n_dims();
    if let EdgeSpecification::PerDimension(specs) = spec {
        if specs.len() != n_dims {
            return Err(Error::shape_mismatch(n_dims, specs.len(), "edge specification list"));
        }
    }

    let edges = (0..n_dims)
        .map(|dim| resolve_dimension(dim, samples.column(dim), spec.for_dimension(dim)))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        n_dims,
        bins = ?edges.iter().map(BinEdges::num_bins).collect::<Vec<_>>(),
        "resolved bin edges"
    );
    Ok(edges)
}
