use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Execution events emitted by the engine.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    BatchStarted { configs: usize },
    TransformFinished { position: usize, valid: bool },
    TransformFailed { position: usize, message: String },
    BatchFinished {
        elapsed: Duration,
        metrics: ExecutionMetricsSnapshot,
    },
}

/// Observer hook for execution events.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// Forwards execution events to the `log` facade.
#[derive(Default)]
pub struct LogExecutionObserver;

impl ExecutionObserver for LogExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::TransformFailed { .. } => log::warn!("{event:?}"),
            ExecutionEvent::BatchFinished { metrics, .. } => {
                log::info!("batch finished: {metrics}")
            }
            _ => log::debug!("{event:?}"),
        }
    }
}

/// Real-time metrics for a batch run.
///
/// The engine updates these counters during execution; callers can snapshot them at any time.
pub struct ExecutionMetrics {
    run_id: AtomicU64,
    elapsed_ns: AtomicU64,

    transforms_started: AtomicU64,
    valid_results: AtomicU64,
    invalid_results: AtomicU64,
    errors: AtomicU64,
    rows_scanned: AtomicU64,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self {
            run_id: AtomicU64::new(0),
            elapsed_ns: AtomicU64::new(0),
            transforms_started: AtomicU64::new(0),
            valid_results: AtomicU64::new(0),
            invalid_results: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            rows_scanned: AtomicU64::new(0),
        }
    }

    pub fn begin_run(&self) {
        let _ = self.run_id.fetch_add(1, Ordering::SeqCst);
        self.elapsed_ns.store(0, Ordering::SeqCst);
        self.transforms_started.store(0, Ordering::SeqCst);
        self.valid_results.store(0, Ordering::SeqCst);
        self.invalid_results.store(0, Ordering::SeqCst);
        self.errors.store(0, Ordering::SeqCst);
        self.rows_scanned.store(0, Ordering::SeqCst);
    }

    pub fn end_run(&self, elapsed: Duration) {
        self.elapsed_ns
            .store(elapsed.as_nanos().min(u64::MAX as u128) as u64, Ordering::SeqCst);
    }

    pub fn on_transform_start(&self, rows: usize) {
        let _ = self.transforms_started.fetch_add(1, Ordering::SeqCst);
        let _ = self.rows_scanned.fetch_add(rows as u64, Ordering::SeqCst);
    }

    pub fn on_result(&self, valid: bool) {
        let counter = if valid { &self.valid_results } else { &self.invalid_results };
        let _ = counter.fetch_add(1, Ordering::SeqCst);
    }

    pub fn on_error(&self) {
        let _ = self.errors.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let elapsed_ns = self.elapsed_ns.load(Ordering::SeqCst);
        let elapsed = if elapsed_ns > 0 {
            Some(Duration::from_nanos(elapsed_ns))
        } else {
            None
        };

        ExecutionMetricsSnapshot {
            run_id: self.run_id.load(Ordering::SeqCst),
            elapsed,
            transforms_started: self.transforms_started.load(Ordering::SeqCst),
            valid_results: self.valid_results.load(Ordering::SeqCst),
            invalid_results: self.invalid_results.load(Ordering::SeqCst),
            errors: self.errors.load(Ordering::SeqCst),
            rows_scanned: self.rows_scanned.load(Ordering::SeqCst),
        }
    }
}

impl Default for ExecutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMetricsSnapshot {
    pub run_id: u64,
    pub elapsed: Option<Duration>,
    pub transforms_started: u64,
    pub valid_results: u64,
    pub invalid_results: u64,
    pub errors: u64,
    pub rows_scanned: u64,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_id={}, transforms={}, valid={}, invalid={}, errors={}, rows_scanned={}, \
             elapsed={:?}",
            self.run_id,
            self.transforms_started,
            self.valid_results,
            self.invalid_results,
            self.errors,
            self.rows_scanned,
            self.elapsed
        )
    }
}
