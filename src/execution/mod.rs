//! Batch execution of independent transforms over one shared dataset.
//!
//! A dashboard typically renders several charts from the same query answer. Each transform is
//! pure and single-threaded, so a batch fans the configs out over a rayon pool and collects the
//! results in input order. This module adds:
//!
//! - Parallel execution across configs, with a bounded worker count
//! - Real-time metrics + observer hooks for monitoring

mod observer;

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::chart::{transform_with_options, TransformResult};
use crate::config::{EngineOptions, TransformConfig};
use crate::error::{EngineResult, TransformError};
use crate::types::RawDataset;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver,
    LogExecutionObserver,
};

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Options applied to every transform in a batch.
    pub engine: EngineOptions,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self {
            num_threads: Some(n),
            engine: EngineOptions::default(),
        }
    }
}

/// A pool-backed runner for batches of [`TransformConfig`]s.
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// Fails with [`TransformError::Execution`] only if the thread pool cannot be built;
    /// `num_threads == Some(0)` is treated as one thread.
    pub fn new(opts: ExecutionOptions) -> EngineResult<Self> {
        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build()
            .map_err(|e| TransformError::Execution {
                message: format!("failed to build thread pool: {e}"),
            })?;

        Ok(Self {
            pool,
            opts,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run every config against `dataset`; results are in `configs` order.
    pub fn transform_batch(
        &self,
        dataset: &RawDataset,
        configs: &[TransformConfig],
    ) -> Vec<EngineResult<TransformResult>> {
        self.pool.install(|| self.transform_batch_impl(dataset, configs))
    }

    fn transform_batch_impl(
        &self,
        dataset: &RawDataset,
        configs: &[TransformConfig],
    ) -> Vec<EngineResult<TransformResult>> {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::BatchStarted {
            configs: configs.len(),
        });

        let results: Vec<EngineResult<TransformResult>> = configs
            .par_iter()
            .enumerate()
            .map(|(position, config)| {
                self.metrics.on_transform_start(dataset.row_count());
                let out = transform_with_options(dataset, config, &self.opts.engine);
                match &out {
                    Ok(r) => {
                        self.metrics.on_result(r.valid);
                        self.emit(ExecutionEvent::TransformFinished {
                            position,
                            valid: r.valid,
                        });
                    }
                    Err(e) => {
                        self.metrics.on_error();
                        self.emit(ExecutionEvent::TransformFailed {
                            position,
                            message: e.to_string(),
                        });
                    }
                }
                out
            })
            .collect();

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::BatchFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });

        results
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}
