//! Execution engines for controlling how accumulation work is scheduled
//!
//! Accumulation over sample rows is embarrassingly parallel: rows are split
//! into chunks, every chunk fills its own buffer, and buffers are combined at
//! the end. An execution engine decides whether those chunks run on the
//! current thread or on a Rayon pool.

#[cfg(feature = "parallel")]
use crate::Result;
use serde::{Deserialize, Serialize};

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Process items sequentially
    Sequential,
    /// Process items in parallel
    Parallel,
    /// Automatically choose based on workload
    #[default]
    Auto,
}

/// Chunking policy of an execution engine
pub trait ExecutionMode {
    /// Optimal chunk size for this execution mode
    fn chunk_size(n_items: usize, n_threads: usize) -> usize;
}

/// Trait for execution engines that control how computations are performed
pub trait ExecutionEngine: Clone + Send + Sync + ExecutionMode {
    /// Map a function over chunks of data
    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(usize, &'a [U]) -> R + Sync + Send,
        R: Send;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Get the number of threads available
    fn num_threads(&self) -> usize;

    /// Chunk size this engine would pick for `n_items`
    fn default_chunk_size(&self, n_items: usize) -> usize {
        Self::chunk_size(n_items, self.num_threads())
    }
}

/// Sequential execution engine
///
/// Executes all operations sequentially in the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    /// Create a new sequential engine
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionMode for SequentialEngine {
    fn chunk_size(n_items: usize, _n_threads: usize) -> usize {
        // Process all items in one chunk
        n_items.max(1)
    }
}

impl ExecutionEngine for SequentialEngine {
    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(usize, &'a [U]) -> R + Sync + Send,
        R: Send,
    {
        let chunk_size = chunk_size.max(1);
        data.chunks(chunk_size)
            .enumerate()
            .map(|(i, chunk)| f(i * chunk_size, chunk))
            .collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
///
/// Executes operations in parallel using Rayon's thread pool.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug, Default)]
pub struct ParallelEngine {
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a new parallel engine using the global thread pool
    pub fn new() -> Self {
        Self { thread_pool: None }
    }

    /// Create a new parallel engine with a custom thread pool
    pub fn with_thread_pool(pool: std::sync::Arc<rayon::ThreadPool>) -> Self {
        Self {
            thread_pool: Some(pool),
        }
    }

    /// Create with a specific number of threads
    pub fn with_num_threads(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| crate::Error::Execution(format!("Failed to create thread pool: {e}")))?;

        Ok(Self::with_thread_pool(std::sync::Arc::new(pool)))
    }
}

#[cfg(feature = "parallel")]
impl ExecutionMode for ParallelEngine {
    fn chunk_size(n_items: usize, n_threads: usize) -> usize {
        // A few chunks per thread keeps the pool busy without
        // allocating one partial histogram per handful of rows
        let target_chunks = n_threads.max(1) * 4;
        n_items.div_ceil(target_chunks).max(1024).min(n_items.max(1))
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(usize, &'a [U]) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        let chunk_size = chunk_size.max(1);
        let run = || {
            data.par_chunks(chunk_size)
                .enumerate()
                .map(|(i, chunk)| f(i * chunk_size, chunk))
                .collect()
        };

        if let Some(pool) = &self.thread_pool {
            pool.install(run)
        } else {
            run()
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        if let Some(pool) = &self.thread_pool {
            pool.current_num_threads()
        } else {
            rayon::current_num_threads()
        }
    }
}

/// Create a sequential engine
pub fn sequential() -> SequentialEngine {
    SequentialEngine::new()
}

/// Create a parallel engine on the global Rayon pool
#[cfg(feature = "parallel")]
pub fn parallel() -> ParallelEngine {
    ParallelEngine::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_engine() {
        let engine = sequential();

        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let sums = engine.map_chunks(&data, 2, |_, chunk| chunk.iter().sum::<f64>());
        assert_eq!(sums, vec![3.0, 7.0, 11.0]);

        let offsets = engine.map_chunks(&data, 4, |offset, _| offset);
        assert_eq!(offsets, vec![0, 4]);

        assert_eq!(engine.strategy(), ExecutionStrategy::Sequential);
        assert_eq!(engine.num_threads(), 1);
        assert_eq!(engine.default_chunk_size(10), 10);
        assert_eq!(engine.default_chunk_size(0), 1);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_engine() {
        let engine = parallel();

        let data = vec![1.0; 100];
        let sums = engine.map_chunks(&data, 25, |_, chunk| chunk.iter().sum::<f64>());
        assert_eq!(sums, vec![25.0, 25.0, 25.0, 25.0]);

        let offsets = engine.map_chunks(&data, 40, |offset, _| offset);
        assert_eq!(offsets, vec![0, 40, 80]);

        assert_eq!(engine.strategy(), ExecutionStrategy::Parallel);
        assert!(engine.num_threads() > 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_engine_with_threads() {
        let engine = ParallelEngine::with_num_threads(2).unwrap();
        assert_eq!(engine.num_threads(), 2);
        let chunk = engine.default_chunk_size(100_000);
        assert_eq!(chunk, 12_500);
    }

    #[test]
    fn test_strategy_default() {
        assert_eq!(ExecutionStrategy::default(), ExecutionStrategy::Auto);
    }

    #[test]
    fn test_strategy_serde() {
        assert_eq!(serde_json::to_string(&ExecutionStrategy::Parallel).unwrap(), r#""parallel""#);
        let s: ExecutionStrategy = serde_json::from_str(r#""sequential""#).unwrap();
        assert_eq!(s, ExecutionStrategy::Sequential);
        assert!(serde_json::from_str::<ExecutionStrategy>(r#""threads""#).is_err());
    }
}
