//! Sample and weight containers
//!
//! Samples are stored row-major as `f64`: one row per observation, one
//! column per dimension. Input of any [`Numeric`] type is converted on entry.

use binned_core::{numeric::to_f64_vec, Error, Numeric, Result};

/// An `n × d` matrix of samples, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    data: Vec<f64>,
    n_samples: usize,
    n_dims: usize,
}

impl SampleMatrix {
    /// Build a matrix from rows of equal length
    ///
    /// Fails with [`Error::Shape`] if the rows are ragged, have zero length, or
    /// if there are no rows to infer the dimension count from. Use
    /// [`SampleMatrix::empty`] for a matrix with no samples.
    pub fn from_rows<T, R>(rows: &[R]) -> Result<Self>
    where
        T: Numeric,
        R: AsRef<[T]>,
    {
        let n_dims = match rows.first() {
            Some(first) => first.as_ref().len(),
            None => {
                return Err(Error::Shape(
                    "cannot infer dimension count from zero rows".to_string(),
                ))
            }
        };
        if n_dims == 0 {
            return Err(Error::Shape("samples must have at least one dimension".to_string()));
        }

        let mut data = Vec::with_capacity(rows.len() * n_dims);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_dims {
                return Err(Error::shape_mismatch(n_dims, row.len(), &format!("sample row {i}")));
            }
            data.extend(row.iter().map(|&v| v.to_f64()));
        }

        Ok(Self {
            data,
            n_samples: rows.len(),
            n_dims,
        })
    }

    /// Build a one-dimensional matrix from a single column of values
    pub fn from_column<T: Numeric>(values: &[T]) -> Self {
        Self {
            data: to_f64_vec(values),
            n_samples: values.len(),
            n_dims: 1,
        }
    }

    /// Build a matrix from a flat row-major buffer
    pub fn from_flat<T: Numeric>(data: &[T], n_samples: usize, n_dims: usize) -> Result<Self> {
        if n_dims == 0 {
            return Err(Error::Shape("samples must have at least one dimension".to_string()));
        }
        let expected = n_samples.checked_mul(n_dims).ok_or_else(|| {
            Error::Shape(format!("{n_samples} x {n_dims} samples overflow usize"))
        })?;
        if data.len() != expected {
            return Err(Error::shape_mismatch(expected, data.len(), "flat sample buffer"));
        }

        Ok(Self {
            data: to_f64_vec(data),
            n_samples,
            n_dims,
        })
    }

    /// A matrix with `n_dims` dimensions and no samples
    pub fn empty(n_dims: usize) -> Result<Self> {
        Self::from_flat::<f64>(&[], 0, n_dims)
    }

    /// Number of samples (rows)
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Number of dimensions (columns)
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Check if the matrix has no samples
    pub fn is_empty(&self) -> bool {
        self.n_samples == 0
    }

    /// Get one sample
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.n_samples {
            return None;
        }
        let start = index * self.n_dims;
        Some(&self.data[start..start + self.n_dims])
    }

    /// Iterate over samples
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.n_dims)
    }

    /// Iterate over the values of one dimension
    pub fn column(&self, dim: usize) -> impl Iterator<Item = f64> + '_ {
        // An out-of-range dimension yields nothing
        let skip = if dim < self.n_dims { dim } else { self.data.len() };
        self.data.iter().skip(skip).step_by(self.n_dims).copied()
    }

    /// The underlying row-major buffer
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl<T: Numeric> From<&[T]> for SampleMatrix {
    fn from(values: &[T]) -> Self {
        Self::from_column(values)
    }
}

impl<T: Numeric> From<Vec<T>> for SampleMatrix {
    fn from(values: Vec<T>) -> Self {
        Self::from_column(&values)
    }
}

/// Per-sample weights
///
/// `Unit` stands for "no weights given": every sample counts once. It takes
/// the unweighted fast path during accumulation and produces the same result
/// as `Explicit` with all ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Weights {
    /// Every sample has weight 1
    #[default]
    Unit,
    /// One weight per sample, any real value
    Explicit(Vec<f64>),
}

impl Weights {
    /// Convert weights of any numeric type
    pub fn explicit<T: Numeric>(weights: &[T]) -> Self {
        Self::Explicit(to_f64_vec(weights))
    }

    /// Map an optional weight slice, with absence meaning unit weights
    pub fn from_option(weights: Option<&[f64]>) -> Self {
        match weights {
            Some(w) => Self::Explicit(w.to_vec()),
            None => Self::Unit,
        }
    }

    /// Check the weights against the number of samples
    pub fn validate(&self, n_samples: usize) -> Result<()> {
        match self {
            Self::Unit => Ok(()),
            Self::Explicit(w) if w.len() == n_samples => Ok(()),
            Self::Explicit(w) => Err(Error::shape_mismatch(n_samples, w.len(), "weight vector")),
        }
    }

    /// Check if these are implicit unit weights
    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }
}

impl From<Vec<f64>> for Weights {
    fn from(weights: Vec<f64>) -> Self {
        Self::Explicit(weights)
    }
}

impl From<&[f64]> for Weights {
    fn from(weights: &[f64]) -> Self {
        Self::Explicit(weights.to_vec())
    }
}
