//! Normalization of raw weighted counts

use crate::accumulator::RawHistogram;
use crate::edges::BinEdges;
use crate::types::Histogram;
use binned_core::{Error, Result};
use tracing::debug;

/// Divide every cell by the total accumulated weight
///
/// Fails with [`Error::EmptyHistogram`] when the total is exactly zero (no
/// sample landed in a bin, there were no samples, or the weights cancel) and
/// with [`Error::InvalidInput`] when the total is NaN or infinite.
pub fn normalize(raw: RawHistogram, edges: Vec<BinEdges>) -> Result<Histogram> {
    if edges.len() != raw.layout().ndim() {
        return Err(Error::shape_mismatch(raw.layout().ndim(), edges.len(), "histogram edges"));
    }
    let total = raw.total();
    if !total.is_finite() {
        return Err(Error::non_finite("total weight"));
    }
    if total == 0.0 {
        return Err(Error::EmptyHistogram);
    }

    debug!(total_weight = total, "normalizing histogram");

    let (layout, mut cells, accumulated, excluded) = raw.into_parts();
    for cell in &mut cells {
        *cell /= total;
    }

    Ok(Histogram::from_parts(cells, layout, edges, total, accumulated, excluded))
}
