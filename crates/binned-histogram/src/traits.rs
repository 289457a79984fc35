//! Core traits for bin assignment

/// Maps a scalar value to a bin index
///
/// Bins `0..num_bins - 1` are half-open `[e[q], e[q + 1])`. The last bin is
/// closed, `[e[n - 1], e[n]]`, so a value equal to the upper edge is counted.
/// Values below the first edge, above the last edge, or NaN are excluded.
pub trait Binner {
    /// Number of bins this binner assigns to
    fn num_bins(&self) -> usize;

    /// Bin index for `value`, or `None` if the value is excluded
    fn bin(&self, value: f64) -> Option<usize>;

    /// Check if `value` lands in any bin
    fn contains(&self, value: f64) -> bool {
        self.bin(value).is_some()
    }
}
