//! Bin assignment for a single dimension
//!
//! All bins are half-open `[e[q], e[q + 1])` except the last, which is closed
//! on both ends. A value equal to the top edge therefore belongs to the last
//! bin rather than falling off the end of the histogram.

use crate::edges::BinEdges;
use crate::traits::Binner;

/// Bin index of `value` within `edges`, or `None` if it is excluded
///
/// `edges` must be non-decreasing. For other inputs the returned index is
/// whatever the binary search over the slice produces. Fewer than two edges
/// form no bins and always yield `None`.
pub fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
    let num_bins = edges.len().checked_sub(1).filter(|&n| n > 0)?;
    if !in_range(edges, value) {
        return None;
    }

    // Number of edges <= value; the bin is the last of those
    let below = edges.partition_point(|&e| e <= value);
    Some(below.saturating_sub(1).min(num_bins - 1))
}

/// `e[0] <= value <= e[n]`, false for NaN
#[inline]
fn in_range(edges: &[f64], value: f64) -> bool {
    value >= edges[0] && value <= edges[edges.len() - 1]
}

/// Locate `value` in equally spaced edges without a search
///
/// The arithmetic guess can be off by one where rounding puts a value right
/// on an edge, so it is corrected against the stored edges. The result is
/// identical to [`bin_index`].
fn uniform_bin_index(edges: &[f64], value: f64) -> Option<usize> {
    let num_bins = edges.len().checked_sub(1).filter(|&n| n > 0)?;
    if !in_range(edges, value) {
        return None;
    }

    // Halved so neither difference overflows for ranges wider than f64::MAX
    let lo = edges[0] * 0.5;
    let t = (value * 0.5 - lo) / (edges[num_bins] * 0.5 - lo);
    // Saturating cast: negative and NaN map to 0
    let mut q = ((t * num_bins as f64) as usize).min(num_bins - 1);

    while q > 0 && value < edges[q] {
        q -= 1;
    }
    while q + 1 < num_bins && value >= edges[q + 1] {
        q += 1;
    }
    Some(q)
}

impl Binner for BinEdges {
    fn num_bins(&self) -> usize {
        BinEdges::num_bins(self)
    }

    #[inline]
    fn bin(&self, value: f64) -> Option<usize> {
        if self.is_uniform() {
            uniform_bin_index(self.as_slice(), value)
        } else {
            bin_index(self.as_slice(), value)
        }
    }
}

impl Binner for [f64] {
    fn num_bins(&self) -> usize {
        self.len().saturating_sub(1)
    }

    fn bin(&self, value: f64) -> Option<usize> {
        bin_index(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_open_interior_bins() {
        let edges = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(bin_index(&edges, 1.0), Some(0));
        assert_eq!(bin_index(&edges, 1.5), Some(0));
        assert_eq!(bin_index(&edges, 2.0), Some(1));
        assert_eq!(bin_index(&edges, 2.999), Some(1));
        assert_eq!(bin_index(&edges, 3.0), Some(2));
    }

    #[test]
    fn test_last_bin_is_closed() {
        let edges = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(bin_index(&edges, 4.0), Some(2));
        assert_eq!(bin_index(&edges, 3.5), Some(2));
    }

    #[test]
    fn test_out_of_range_excluded() {
        let edges = [0.0, 1.0, 2.0];
        assert_eq!(bin_index(&edges, -0.0001), None);
        assert_eq!(bin_index(&edges, 2.0001), None);
        assert_eq!(bin_index(&edges, -10.0), None);
        assert_eq!(bin_index(&edges, 10.0), None);
        assert_eq!(bin_index(&edges, f64::NAN), None);
        assert_eq!(bin_index(&edges, f64::INFINITY), None);
    }

    #[test]
    fn test_single_bin() {
        let edges = [0.0, 1.0];
        assert_eq!(bin_index(&edges, 0.0), Some(0));
        assert_eq!(bin_index(&edges, 1.0), Some(0));
        assert_eq!(bin_index(&edges, 1.5), None);
    }

    #[test]
    fn test_too_few_edges() {
        assert_eq!(bin_index(&[], 0.0), None);
        assert_eq!(bin_index(&[1.0], 1.0), None);
        assert_eq!(<[f64] as Binner>::num_bins(&[1.0][..]), 0);
    }

    #[test]
    fn test_repeated_edges() {
        // Zero-width interior bin never matches; a zero-width last bin does
        let edges = [0.0, 1.0, 1.0, 2.0];
        assert_eq!(bin_index(&edges, 1.0), Some(2));

        let edges = [0.0, 1.0, 1.0];
        assert_eq!(bin_index(&edges, 1.0), Some(1));
        assert_eq!(bin_index(&edges, 0.5), Some(0));
    }

    #[test]
    fn test_uniform_matches_search() {
        let edges = BinEdges::linspace(-0.3, 0.7, 7).unwrap();
        let slice = edges.as_slice();

        let mut probes: Vec<f64> = slice.to_vec();
        probes.extend(slice.iter().map(|e| e + 1e-17));
        probes.extend(slice.iter().map(|e| e - 1e-17));
        probes.extend((0..=1000).map(|i| -0.4 + i as f64 * 0.0012));

        for v in probes {
            assert_eq!(edges.bin(v), bin_index(slice, v), "value {v}");
        }
    }

    #[test]
    fn test_uniform_constant_edges() {
        let slice = [5.0, 5.0, 5.0, 5.0];
        assert_eq!(uniform_bin_index(&slice, 5.0), Some(2));
        assert_eq!(bin_index(&slice, 5.0), Some(2));
        assert_eq!(uniform_bin_index(&slice, 4.0), None);
    }

    #[test]
    fn test_binner_trait() {
        let edges = BinEdges::new(vec![0.0, 10.0, 20.0]).unwrap();
        assert_eq!(Binner::num_bins(&edges), 2);
        assert!(edges.contains(20.0));
        assert!(!edges.contains(20.5));
        assert_eq!(edges.bin(10.0), Some(1));

        let raw: &[f64] = &[0.0, 10.0, 20.0];
        assert_eq!(raw.bin(5.0), Some(0));
    }
}
