//! Comparisons between histograms
//!
//! All operations compare cell by cell and require both histograms to have
//! the same shape. They are meaningful for histograms with non-negative cells,
//! i.e. built from non-negative weights.

use crate::types::Histogram;
use binned_core::{Error, Result};

/// Operations that can be performed on pairs of normalized histograms
pub trait HistogramOps {
    /// Sum of cell-wise minima (1 for identical histograms, 0 for disjoint ones)
    fn intersection(&self, other: &Self) -> Result<f64>;

    /// Symmetric chi-squared distance, `0.5 * Σ (p - q)² / (p + q)`
    fn chi_squared_distance(&self, other: &Self) -> Result<f64>;

    /// Bhattacharyya distance, `-ln Σ √(p q)`
    fn bhattacharyya_distance(&self, other: &Self) -> Result<f64>;

    /// Kullback-Leibler divergence from this histogram to `other`
    fn kl_divergence(&self, other: &Self) -> Result<f64>;

    /// Total variation distance, `0.5 * Σ |p - q|`
    fn total_variation_distance(&self, other: &Self) -> Result<f64>;
}

fn paired<'a>(a: &'a Histogram, b: &'a Histogram) -> Result<impl Iterator<Item = (f64, f64)> + 'a> {
    if a.shape() != b.shape() {
        return Err(Error::Shape(format!(
            "cannot compare histograms of shape {:?} and {:?}",
            a.shape(),
            b.shape()
        )));
    }
    Ok(a.values().iter().copied().zip(b.values().iter().copied()))
}

impl HistogramOps for Histogram {
    fn intersection(&self, other: &Self) -> Result<f64> {
        Ok(paired(self, other)?.map(|(p, q)| p.min(q)).sum())
    }

    fn chi_squared_distance(&self, other: &Self) -> Result<f64> {
        let sum: f64 = paired(self, other)?
            .map(|(p, q)| {
                let s = p + q;
                if s > 0.0 {
                    (p - q).powi(2) / s
                } else {
                    0.0
                }
            })
            .sum();
        Ok(sum * 0.5)
    }

    fn bhattacharyya_distance(&self, other: &Self) -> Result<f64> {
        let bc: f64 = paired(self, other)?
            .map(|(p, q)| (p * q).max(0.0).sqrt())
            .sum();

        if bc >= 1.0 {
            Ok(0.0)
        } else {
            Ok((-bc.ln()).max(0.0))
        }
    }

    fn kl_divergence(&self, other: &Self) -> Result<f64> {
        let epsilon = 1e-10; // Avoid log(0)

        Ok(paired(self, other)?
            .filter(|&(p, _)| p > epsilon)
            .map(|(p, q)| p * (p / q.max(epsilon)).ln())
            .sum())
    }

    fn total_variation_distance(&self, other: &Self) -> Result<f64> {
        Ok(0.5 * paired(self, other)?.map(|(p, q)| (p - q).abs()).sum::<f64>())
    }
}
