//! Histogram construction: edge resolution, accumulation, normalization

use crate::accumulator::{accumulate, RawHistogram};
use crate::config::HistogramConfig;
use crate::edges::{resolve_edges, EdgeSpecification};
use crate::matrix::{SampleMatrix, Weights};
use crate::normalize::normalize;
use crate::types::Histogram;
use binned_core::{ExecutionEngine, ExecutionStrategy, Result, SequentialEngine};
use tracing::{debug, instrument};
#[cfg(not(feature = "parallel"))]
use tracing::warn;

/// Builds a normalized weighted histogram from a sample matrix
///
/// ```rust
/// use binned_histogram::{HistogramBuilder, SampleMatrix};
///
/// let samples = SampleMatrix::from_column(&[1.0, 2.0, 3.0]);
/// let hist = HistogramBuilder::new(vec![1.0, 2.0, 3.0, 4.0])
///     .weights(vec![0.0, 0.0, 5.0])
///     .build(&samples)
///     .unwrap();
/// assert_eq!(hist.values(), &[0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct HistogramBuilder {
    edges: EdgeSpecification,
    weights: Weights,
    config: HistogramConfig,
}

impl HistogramBuilder {
    /// Create a builder with unit weights and the default configuration
    pub fn new(edges: impl Into<EdgeSpecification>) -> Self {
        Self {
            edges: edges.into(),
            weights: Weights::Unit,
            config: HistogramConfig::default(),
        }
    }

    /// Set per-sample weights
    pub fn weights(mut self, weights: impl Into<Weights>) -> Self {
        self.weights = weights.into();
        self
    }

    /// Set the execution configuration
    pub fn config(mut self, config: HistogramConfig) -> Self {
        self.config = config;
        self
    }

    /// The edge specification
    pub fn edge_specification(&self) -> &EdgeSpecification {
        &self.edges
    }

    /// The configured weights
    pub fn configured_weights(&self) -> &Weights {
        &self.weights
    }

    /// Build the histogram, choosing the engine from the configuration
    #[instrument(skip_all, fields(n_samples = samples.n_samples(), n_dims = samples.n_dims()))]
    pub fn build(&self, samples: &SampleMatrix) -> Result<Histogram> {
        self.config.validate()?;

        let strategy = self.config.effective_strategy(samples.n_samples());
        debug!(?strategy, "selected execution strategy");

        match strategy {
            ExecutionStrategy::Parallel => self.build_parallel(samples),
            _ => self.build_with_engine(samples, &SequentialEngine::new()),
        }
    }

    #[cfg(feature = "parallel")]
    fn build_parallel(&self, samples: &SampleMatrix) -> Result<Histogram> {
        let engine = match self.config.num_threads {
            Some(n) => binned_core::ParallelEngine::with_num_threads(n)?,
            None => binned_core::ParallelEngine::new(),
        };
        self.build_with_engine(samples, &engine)
    }

    #[cfg(not(feature = "parallel"))]
    fn build_parallel(&self, samples: &SampleMatrix) -> Result<Histogram> {
        warn!("parallel feature disabled, accumulating sequentially");
        self.build_with_engine(samples, &SequentialEngine::new())
    }

    /// Build the histogram on a caller-provided engine
    pub fn build_with_engine<E: ExecutionEngine>(
        &self,
        samples: &SampleMatrix,
        engine: &E,
    ) -> Result<Histogram> {
        let (raw, edges) = self.build_raw_with_engine(samples, engine)?;
        normalize(raw, edges)
    }

    /// Resolve edges and accumulate, without normalizing
    pub fn build_raw_with_engine<E: ExecutionEngine>(
        &self,
        samples: &SampleMatrix,
        engine: &E,
    ) -> Result<(RawHistogram, Vec<crate::BinEdges>)> {
        // All shape checks happen before any accumulation
        self.weights.validate(samples.n_samples())?;
        let edges = resolve_edges(samples, &self.edges)?;
        let raw = accumulate(samples, &edges, &self.weights, engine, self.config.chunk_size)?;
        Ok((raw, edges))
    }
}
