//! Numeric input types accepted by the binning pipeline
//!
//! Every sample is converted to `f64` exactly once, on entry. The conversion is
//! total: integer types widen (with rounding for magnitudes above 2^53) and
//! floats pass through, so callers never have to pre-convert their data.

use num_traits::ToPrimitive;
use std::fmt::Debug;

/// Base trait for numeric types that can be binned
pub trait Numeric: Copy + Debug + Send + Sync {
    /// Convert to `f64` for binning
    fn to_f64(self) -> f64;
}

macro_rules! impl_numeric_lossless {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_numeric_lossless!(f64, f32, i8, i16, i32, u8, u16, u32);

macro_rules! impl_numeric_wide {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_f64(self) -> f64 {
                    // Total for primitive integers (large values round), so
                    // the NaN fallback is unreachable
                    ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
                }
            }
        )*
    };
}

impl_numeric_wide!(i64, u64, isize, usize);

/// Convert a slice of any numeric type into an owned `f64` buffer
pub fn to_f64_vec<T: Numeric>(values: &[T]) -> Vec<f64> {
    values.iter().map(|&v| v.to_f64()).collect()
}
