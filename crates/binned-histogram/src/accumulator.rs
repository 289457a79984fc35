//! Weighted accumulation of samples into bins
//!
//! Every sample row is binned independently per dimension. A row that falls
//! outside the edges in any dimension is dropped; otherwise its weight is added
//! to the cell addressed by its bin tuple.
//!
//! Rows are processed in chunks. Each chunk owns a [`RawHistogram`] and the
//! partial results are merged by element-wise addition, which is commutative
//! and associative, so chunks may run on any number of threads.

use crate::edges::BinEdges;
use crate::matrix::{SampleMatrix, Weights};
use crate::traits::Binner;
use crate::types::BinLayout;
use binned_core::{Error, ExecutionEngine, Result};
use tracing::{debug, instrument};

/// Unnormalized weighted counts
#[derive(Debug, Clone, PartialEq)]
pub struct RawHistogram {
    layout: BinLayout,
    cells: Vec<f64>,
    accumulated: usize,
    excluded: usize,
}

impl RawHistogram {
    /// An all-zero histogram with the given layout
    pub fn zeros(layout: BinLayout) -> Self {
        let cells = vec![0.0; layout.len()];
        Self {
            layout,
            cells,
            accumulated: 0,
            excluded: 0,
        }
    }

    /// Index layout of the cells
    pub fn layout(&self) -> &BinLayout {
        &self.layout
    }

    /// Bins per dimension
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Weighted counts in row-major order
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Weighted count at a bin tuple
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.layout.flat_index(index).map(|flat| self.cells[flat])
    }

    /// Number of samples added
    pub fn accumulated(&self) -> usize {
        self.accumulated
    }

    /// Number of samples dropped
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Sum over all cells
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Add `weight` to the cell at flat index `flat`
    #[inline]
    pub fn add(&mut self, flat: usize, weight: f64) {
        self.cells[flat] += weight;
        self.accumulated += 1;
    }

    /// Record a sample that fell outside the edges
    #[inline]
    pub fn exclude(&mut self) {
        self.excluded += 1;
    }

    /// Add another histogram of the same shape into this one
    pub fn merge(&mut self, other: &RawHistogram) -> Result<()> {
        if self.layout != other.layout {
            return Err(Error::Shape(format!(
                "cannot merge histograms of shape {:?} and {:?}",
                self.shape(),
                other.shape()
            )));
        }
        for (a, b) in self.cells.iter_mut().zip(&other.cells) {
            *a += b;
        }
        self.accumulated += other.accumulated;
        self.excluded += other.excluded;
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (BinLayout, Vec<f64>, usize, usize) {
        (self.layout, self.cells, self.accumulated, self.excluded)
    }
}

/// Flat cell index of one sample row, or `None` if any coordinate is excluded
#[inline]
fn locate(row: &[f64], edges: &[BinEdges], strides: &[usize]) -> Option<usize> {
    row.iter()
        .zip(edges)
        .zip(strides)
        .try_fold(0, |flat, ((&v, e), &stride)| e.bin(v).map(|q| flat + q * stride))
}

/// Accumulate one contiguous block of rows starting at `first_row`
fn accumulate_chunk(
    chunk: &[f64],
    first_row: usize,
    n_dims: usize,
    edges: &[BinEdges],
    weights: &Weights,
    layout: &BinLayout,
) -> RawHistogram {
    let mut raw = RawHistogram::zeros(layout.clone());
    let strides = layout.strides();
    let rows = chunk.chunks_exact(n_dims);

    match weights {
        Weights::Unit => {
            for row in rows {
                match locate(row, edges, strides) {
                    Some(flat) => raw.add(flat, 1.0),
                    None => raw.exclude(),
                }
            }
        }
        Weights::Explicit(w) => {
            for (row, &weight) in rows.zip(&w[first_row..]) {
                match locate(row, edges, strides) {
                    Some(flat) => raw.add(flat, weight),
                    None => raw.exclude(),
                }
            }
        }
    }

    raw
}

/// Accumulate all samples into a raw histogram
///
/// `edges` must hold one entry per sample dimension and `weights` one entry
/// per sample; both are checked before any row is touched. `chunk_rows` sets
/// how many rows each unit of work covers (`None` lets the engine decide).
#[instrument(skip_all, fields(n_samples = samples.n_samples(), n_dims = samples.n_dims()))]
pub fn accumulate<E: ExecutionEngine>(
    samples: &SampleMatrix,
    edges: &[BinEdges],
    weights: &Weights,
    engine: &E,
    chunk_rows: Option<usize>,
) -> Result<RawHistogram> {
    let n_dims = samples.n_dims();
    if edges.len() != n_dims {
        return Err(Error::shape_mismatch(n_dims, edges.len(), "resolved edges"));
    }
    weights.validate(samples.n_samples())?;

    let layout = BinLayout::from_edges(edges);
    let chunk_rows = chunk_rows
        .unwrap_or_else(|| engine.default_chunk_size(samples.n_samples()))
        .max(1);

    debug!(
        strategy = ?engine.strategy(),
        chunk_rows,
        unit_weights = weights.is_unit(),
        cells = layout.len(),
        "accumulating samples"
    );

    let partials = engine.map_chunks(samples.as_slice(), chunk_rows * n_dims, |offset, chunk| {
        accumulate_chunk(chunk, offset / n_dims, n_dims, edges, weights, &layout)
    });

    let raw = partials
        .into_iter()
        .try_fold(RawHistogram::zeros(layout.clone()), |mut acc, partial| {
            acc.merge(&partial)?;
            Ok::<_, Error>(acc)
        })?;

    debug!(
        accumulated = raw.accumulated(),
        excluded = raw.excluded(),
        "accumulation finished"
    );
    Ok(raw)
}
