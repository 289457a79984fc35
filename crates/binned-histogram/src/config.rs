//! Configuration for histogram construction

use binned_core::{Error, ExecutionStrategy, Result};
use serde::{Deserialize, Serialize};

/// Rows below which `Auto` stays sequential
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 16;

/// How accumulation work is scheduled
///
/// None of these settings change the result beyond floating-point summation
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Sequential, parallel, or chosen from the sample count
    pub strategy: ExecutionStrategy,
    /// Minimum number of samples for `Auto` to run in parallel
    pub parallel_threshold: usize,
    /// Rows per unit of work; `None` lets the engine decide
    pub chunk_size: Option<usize>,
    /// Dedicated pool size; `None` uses the global Rayon pool
    pub num_threads: Option<usize>,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            strategy: ExecutionStrategy::Auto,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            chunk_size: None,
            num_threads: None,
        }
    }
}

impl HistogramConfig {
    /// Always accumulate on the calling thread
    pub fn sequential() -> Self {
        Self {
            strategy: ExecutionStrategy::Sequential,
            ..Default::default()
        }
    }

    /// Always accumulate on the Rayon pool
    pub fn parallel() -> Self {
        Self {
            strategy: ExecutionStrategy::Parallel,
            ..Default::default()
        }
    }

    /// Set the rows per unit of work
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Use a dedicated pool of `num_threads` threads
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Check the configuration for values that cannot be honored
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == Some(0) {
            return Err(Error::InvalidParameter("chunk_size must be positive".to_string()));
        }
        if self.num_threads == Some(0) {
            return Err(Error::InvalidParameter("num_threads must be positive".to_string()));
        }
        Ok(())
    }

    /// Strategy to use for `n_samples` rows; never returns `Auto`
    pub fn effective_strategy(&self, n_samples: usize) -> ExecutionStrategy {
        match self.strategy {
            ExecutionStrategy::Auto if n_samples >= self.parallel_threshold => {
                ExecutionStrategy::Parallel
            }
            ExecutionStrategy::Auto => ExecutionStrategy::Sequential,
            other => other,
        }
    }
}
