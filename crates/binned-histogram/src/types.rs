//! Core types for histogram representation

use crate::edges::BinEdges;
use binned_core::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Row-major mapping between bin-index tuples and flat cell indices
///
/// The last dimension varies fastest. The mapping is a bijection between
/// tuples `(i_0, .., i_{d-1})` with `i_k < shape[k]` and `0..len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinLayout {
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl BinLayout {
    /// Layout for the given number of bins per dimension
    pub fn new(shape: &[usize]) -> Self {
        let mut strides = vec![1; shape.len()];
        for k in (0..shape.len().saturating_sub(1)).rev() {
            strides[k] = strides[k + 1] * shape[k + 1];
        }
        Self {
            shape: shape.to_vec(),
            strides,
        }
    }

    /// Layout matching a set of resolved edges
    pub fn from_edges(edges: &[BinEdges]) -> Self {
        let shape: Vec<usize> = edges.iter().map(BinEdges::num_bins).collect();
        Self::new(&shape)
    }

    /// Bins per dimension
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Flat-index step per dimension
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Check if the layout has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of a bin tuple, or `None` if it is out of bounds
    pub fn flat_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        index
            .iter()
            .zip(&self.shape)
            .zip(&self.strides)
            .try_fold(0, |flat, ((&i, &n), &stride)| (i < n).then_some(flat + i * stride))
    }

    /// Bin tuple of a flat index, or `None` if it is out of bounds
    pub fn unravel(&self, flat: usize) -> Option<Vec<usize>> {
        if flat >= self.len() {
            return None;
        }
        Some(
            self.strides
                .iter()
                .zip(&self.shape)
                .map(|(&stride, &n)| (flat / stride) % n)
                .collect(),
        )
    }
}

/// A normalized, weighted histogram over one or more dimensions
///
/// Cell values sum to 1. Cells are addressed by bin-index tuples through
/// [`Histogram::get`]; the flat storage order is the row-major order of
/// [`BinLayout`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    values: Vec<f64>,
    layout: BinLayout,
    edges: Vec<BinEdges>,
    total_weight: f64,
    accumulated: usize,
    excluded: usize,
}

impl Histogram {
    pub(crate) fn from_parts(
        values: Vec<f64>,
        layout: BinLayout,
        edges: Vec<BinEdges>,
        total_weight: f64,
        accumulated: usize,
        excluded: usize,
    ) -> Self {
        debug_assert_eq!(values.len(), layout.len());
        debug_assert_eq!(edges.len(), layout.ndim());
        Self {
            values,
            layout,
            edges,
            total_weight,
            accumulated,
            excluded,
        }
    }

    /// Bins per dimension
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the histogram has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell values in row-major order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Index layout of the cells
    pub fn layout(&self) -> &BinLayout {
        &self.layout
    }

    /// Value of the cell at a bin tuple
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.layout.flat_index(index).map(|flat| self.values[flat])
    }

    /// Resolved edges of one dimension
    pub fn edges(&self, dim: usize) -> Option<&BinEdges> {
        self.edges.get(dim)
    }

    /// Resolved edges of every dimension
    pub fn all_edges(&self) -> &[BinEdges] {
        &self.edges
    }

    /// Bin midpoints of one dimension
    pub fn centers(&self, dim: usize) -> Option<Vec<f64>> {
        self.edges.get(dim).map(BinEdges::centers)
    }

    /// Bin widths of one dimension
    pub fn widths(&self, dim: usize) -> Option<Vec<f64>> {
        self.edges.get(dim).map(BinEdges::widths)
    }

    /// Total weight accumulated before normalization
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Number of samples that landed in a bin
    pub fn accumulated(&self) -> usize {
        self.accumulated
    }

    /// Number of samples dropped for falling outside the edges
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Sum of all cells (1 up to rounding)
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Iterate over `(bin tuple, value)` pairs in storage order
    pub fn iter(&self) -> impl Iterator<Item = (Vec<usize>, f64)> + '_ {
        self.values.iter().enumerate().filter_map(move |(flat, &v)| {
            self.layout.unravel(flat).map(|index| (index, v))
        })
    }

    /// Largest cell and its bin tuple
    pub fn mode(&self) -> Option<(Vec<usize>, f64)> {
        self.iter()
            .fold(None, |best: Option<(Vec<usize>, f64)>, (index, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((index, v)),
            })
    }

    /// One-dimensional histogram of `dim`, summing over all other dimensions
    pub fn marginal(&self, dim: usize) -> Result<Histogram> {
        let edges = self.edges.get(dim).ok_or_else(|| {
            Error::Shape(format!(
                "dimension {dim} out of range for {}-dimensional histogram",
                self.ndim()
            ))
        })?;

        let n = self.shape()[dim];
        let stride = self.layout.strides()[dim];
        let mut values = vec![0.0; n];
        for (flat, &v) in self.values.iter().enumerate() {
            values[(flat / stride) % n] += v;
        }

        Ok(Histogram::from_parts(
            values,
            BinLayout::new(&[n]),
            vec![edges.clone()],
            self.total_weight,
            self.accumulated,
            self.excluded,
        ))
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = self
            .shape()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("x");
        write!(
            f,
            "Histogram({} bins, n={}, excluded={}, weight={:.3})",
            shape, self.accumulated, self.excluded, self.total_weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid_2x3() -> Histogram {
        let edges = vec![
            BinEdges::new(vec![0.0, 1.0, 2.0]).unwrap(),
            BinEdges::new(vec![0.0, 1.0, 2.0, 3.0]).unwrap(),
        ];
        let layout = BinLayout::from_edges(&edges);
        let values = vec![0.1, 0.2, 0.0, 0.3, 0.0, 0.4];
        Histogram::from_parts(values, layout, edges, 10.0, 6, 1)
    }

    #[test]
    fn test_layout_row_major() {
        let layout = BinLayout::new(&[2, 3, 4]);
        assert_eq!(layout.strides(), &[12, 4, 1]);
        assert_eq!(layout.len(), 24);
        assert_eq!(layout.flat_index(&[1, 2, 3]), Some(23));
        assert_eq!(layout.flat_index(&[0, 1, 0]), Some(4));
        assert_eq!(layout.flat_index(&[2, 0, 0]), None);
        assert_eq!(layout.flat_index(&[0, 0]), None);
        assert_eq!(layout.unravel(23), Some(vec![1, 2, 3]));
        assert_eq!(layout.unravel(24), None);
    }

    #[test]
    fn test_layout_is_bijection() {
        let layout = BinLayout::new(&[3, 1, 5]);
        let mut seen = vec![false; layout.len()];
        for i in 0..3 {
            for j in 0..1 {
                for k in 0..5 {
                    let flat = layout.flat_index(&[i, j, k]).unwrap();
                    assert!(!seen[flat]);
                    seen[flat] = true;
                    assert_eq!(layout.unravel(flat), Some(vec![i, j, k]));
                }
            }
        }
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn test_histogram_accessors() {
        let hist = grid_2x3();
        assert_eq!(hist.shape(), &[2, 3]);
        assert_eq!(hist.ndim(), 2);
        assert_eq!(hist.len(), 6);
        assert_eq!(hist.get(&[0, 1]), Some(0.2));
        assert_eq!(hist.get(&[1, 2]), Some(0.4));
        assert_eq!(hist.get(&[2, 0]), None);
        assert_eq!(hist.centers(1), Some(vec![0.5, 1.5, 2.5]));
        assert_eq!(hist.widths(0), Some(vec![1.0, 1.0]));
        assert_eq!(hist.centers(2), None);
        assert_relative_eq!(hist.sum(), 1.0, epsilon = 1e-12);
        assert_eq!(hist.mode(), Some((vec![1, 2], 0.4)));
        assert_eq!(hist.to_string(), "Histogram(2x3 bins, n=6, excluded=1, weight=10.000)");
    }

    #[test]
    fn test_iter_visits_every_cell() {
        let hist = grid_2x3();
        let cells: Vec<_> = hist.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[4], (vec![1, 1], 0.0));
        for (index, v) in cells {
            assert_eq!(hist.get(&index), Some(v));
        }
    }

    #[test]
    fn test_marginals() {
        let hist = grid_2x3();

        let rows = hist.marginal(0).unwrap();
        assert_eq!(rows.shape(), &[2]);
        assert_relative_eq!(rows.values()[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(rows.values()[1], 0.7, epsilon = 1e-12);

        let cols = hist.marginal(1).unwrap();
        assert_eq!(cols.shape(), &[3]);
        assert_relative_eq!(cols.values()[0], 0.4, epsilon = 1e-12);
        assert_relative_eq!(cols.values()[1], 0.2, epsilon = 1e-12);
        assert_relative_eq!(cols.values()[2], 0.4, epsilon = 1e-12);
        assert_eq!(cols.edges(0).unwrap().as_slice(), &[0.0, 1.0, 2.0, 3.0]);

        assert!(matches!(hist.marginal(2), Err(Error::Shape(_))));
    }

    #[test]
    fn test_serialize() {
        let hist = grid_2x3().marginal(0).unwrap();
        let json = serde_json::to_value(&hist).unwrap();
        assert_eq!(json["layout"]["shape"], serde_json::json!([2]));
        assert_eq!(json["edges"][0]["values"], serde_json::json!([0.0, 1.0, 2.0]));
        assert_eq!(json["accumulated"], serde_json::json!(6));
    }
}
