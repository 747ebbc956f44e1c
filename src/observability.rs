//! Structured diagnostics for transform invocations.
//!
//! The engine always writes through the `log` facade. Callers that want the same information as
//! data (to surface a "3 values were not numeric" hint next to a chart, say) attach a
//! [`TransformObserver`] via [`crate::config::EngineOptions::observer`].

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::chart::InvalidReason;
use crate::config::{AggregateOp, ChartShape};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TransformSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, data was coerced or ignored).
    Warning,
    /// The invocation produced nothing renderable.
    Error,
    /// The invocation failed with an error.
    Critical,
}

/// Context about a transform invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformContext {
    pub shape: ChartShape,
    pub op: AggregateOp,
    /// Number of input rows.
    pub rows: usize,
}

/// Which side of the config a column was chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRole {
    Dimension,
    Measure,
}

impl fmt::Display for SelectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SelectionRole::Dimension => "dimension",
            SelectionRole::Measure => "measure",
        })
    }
}

/// Events reported during a transform.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformEvent {
    /// A column was chosen for `role`; `auto` is false when the caller pinned it.
    ColumnSelected {
        role: SelectionRole,
        column: String,
        auto: bool,
    },
    /// Nothing with the expected role was available, so a numeric column excluded by name was
    /// auto-selected instead.
    ExcludedColumnUsed { role: SelectionRole, column: String },
    /// A series key matched the index column's name and was renamed so rows keep both fields.
    SeriesKeyRenamed { from: String, to: String },
    /// A pinned key names a column the dataset does not have; auto-detection ran instead.
    PinnedKeyIgnored { role: SelectionRole, column: String },
    /// Non-numeric measure values were read as 0.
    ValuesCoerced { column: String, count: usize },
    /// Rows dropped because an axis value was missing or non-finite.
    RowsDropped { count: usize },
    /// Transform finished (possibly with `valid == false`).
    Completed {
        rows: usize,
        series: usize,
        valid: bool,
        reason: Option<InvalidReason>,
    },
    /// Transform returned an error.
    Failed { message: String },
}

impl TransformEvent {
    pub fn severity(&self) -> TransformSeverity {
        match self {
            TransformEvent::ColumnSelected { .. } => TransformSeverity::Info,
            TransformEvent::ExcludedColumnUsed { .. }
            | TransformEvent::SeriesKeyRenamed { .. }
            | TransformEvent::PinnedKeyIgnored { .. }
            | TransformEvent::ValuesCoerced { .. }
            | TransformEvent::RowsDropped { .. } => TransformSeverity::Warning,
            TransformEvent::Completed { valid: true, .. } => TransformSeverity::Info,
            TransformEvent::Completed { valid: false, .. } => TransformSeverity::Error,
            TransformEvent::Failed { .. } => TransformSeverity::Critical,
        }
    }
}

impl fmt::Display for TransformEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformEvent::ColumnSelected { role, column, auto } => {
                let how = if *auto { "auto" } else { "pinned" };
                write!(f, "{role} '{column}' ({how})")
            }
            TransformEvent::ExcludedColumnUsed { role, column } => {
                write!(f, "no eligible {role}, falling back to excluded column '{column}'")
            }
            TransformEvent::SeriesKeyRenamed { from, to } => {
                write!(f, "series '{from}' renamed to '{to}' to keep the index field")
            }
            TransformEvent::PinnedKeyIgnored { role, column } => {
                write!(f, "pinned {role} '{column}' not in dataset, auto-detecting")
            }
            TransformEvent::ValuesCoerced { column, count } => {
                write!(f, "{count} non-numeric value(s) in '{column}' read as 0")
            }
            TransformEvent::RowsDropped { count } => {
                write!(f, "{count} row(s) dropped for missing axis values")
            }
            TransformEvent::Completed {
                rows,
                series,
                valid,
                reason,
            } => match reason {
                Some(r) => write!(f, "done rows={rows} series={series} valid={valid} reason={r}"),
                None => write!(f, "done rows={rows} series={series} valid={valid}"),
            },
            TransformEvent::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

/// Observer interface for transform diagnostics.
///
/// Implementors can record metrics, collect hints for the UI, or trigger alerts.
pub trait TransformObserver: Send + Sync {
    /// Called for every event.
    fn on_event(&self, _ctx: &TransformContext, _event: &TransformEvent) {}

    /// Called when an event's severity meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_event`].
    fn on_alert(&self, ctx: &TransformContext, event: &TransformEvent) {
        self.on_event(ctx, event)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn TransformObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn TransformObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl TransformObserver for CompositeObserver {
    fn on_event(&self, ctx: &TransformContext, event: &TransformEvent) {
        for o in &self.observers {
            o.on_event(ctx, event);
        }
    }

    fn on_alert(&self, ctx: &TransformContext, event: &TransformEvent) {
        for o in &self.observers {
            o.on_alert(ctx, event);
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<TransformEvent>>,
    alerts: Mutex<Vec<TransformEvent>>,
}

impl CollectingObserver {
    pub fn events(&self) -> Vec<TransformEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn alerts(&self) -> Vec<TransformEvent> {
        self.alerts.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl TransformObserver for CollectingObserver {
    fn on_event(&self, _ctx: &TransformContext, event: &TransformEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn on_alert(&self, _ctx: &TransformContext, event: &TransformEvent) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(event.clone());
        }
    }
}

/// Routes events to the `log` facade and the configured observer.
pub(crate) struct Diagnostics<'a> {
    ctx: TransformContext,
    observer: Option<&'a dyn TransformObserver>,
    alert_at_or_above: TransformSeverity,
}

impl<'a> Diagnostics<'a> {
    pub(crate) fn new(
        ctx: TransformContext,
        observer: Option<&'a dyn TransformObserver>,
        alert_at_or_above: TransformSeverity,
    ) -> Self {
        Self {
            ctx,
            observer,
            alert_at_or_above,
        }
    }

    pub(crate) fn emit(&self, event: TransformEvent) {
        let sev = event.severity();
        let (shape, op) = (self.ctx.shape, self.ctx.op);
        match sev {
            TransformSeverity::Info => log::debug!("[{shape}/{op}] {event}"),
            TransformSeverity::Warning | TransformSeverity::Error => {
                log::warn!("[{shape}/{op}] {event}")
            }
            TransformSeverity::Critical => log::error!("[{shape}/{op}] {event}"),
        }

        if let Some(obs) = self.observer {
            obs.on_event(&self.ctx, &event);
            if sev >= self.alert_at_or_above {
                obs.on_alert(&self.ctx, &event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{
        CollectingObserver, CompositeObserver, Diagnostics, SelectionRole, TransformContext,
        TransformEvent, TransformObserver, TransformSeverity,
    };
    use crate::chart::InvalidReason;
    use crate::config::{AggregateOp, ChartShape};

    fn ctx() -> TransformContext {
        TransformContext {
            shape: ChartShape::Bar,
            op: AggregateOp::Sum,
            rows: 3,
        }
    }

    #[test]
    fn severities_rank_invalid_results_above_coercions() {
        let coerced = TransformEvent::ValuesCoerced {
            column: "sales".to_string(),
            count: 2,
        };
        let invalid = TransformEvent::Completed {
            rows: 0,
            series: 0,
            valid: false,
            reason: Some(InvalidReason::NoSignal),
        };
        assert_eq!(coerced.severity(), TransformSeverity::Warning);
        assert_eq!(invalid.severity(), TransformSeverity::Error);
        assert!(invalid.severity() > coerced.severity());
    }

    #[test]
    fn diagnostics_alert_only_at_threshold() {
        let obs = Arc::new(CollectingObserver::default());
        let diag = Diagnostics::new(ctx(), Some(&*obs), TransformSeverity::Warning);
        diag.emit(TransformEvent::ColumnSelected {
            role: SelectionRole::Dimension,
            column: "region".to_string(),
            auto: true,
        });
        diag.emit(TransformEvent::RowsDropped { count: 1 });

        assert_eq!(obs.events().len(), 2);
        assert_eq!(obs.alerts(), vec![TransformEvent::RowsDropped { count: 1 }]);
    }

    #[test]
    fn composite_fans_out_to_every_observer() {
        let a = Arc::new(CollectingObserver::default());
        let b = Arc::new(CollectingObserver::default());
        let composite = CompositeObserver::new(vec![a.clone(), b.clone()]);
        let event = TransformEvent::Failed {
            message: "boom".to_string(),
        };
        composite.on_event(&ctx(), &event);
        assert_eq!(a.events(), vec![event.clone()]);
        assert_eq!(b.events(), vec![event]);
    }

    #[test]
    fn events_render_readable_messages() {
        let e = TransformEvent::PinnedKeyIgnored {
            role: SelectionRole::Measure,
            column: "revenue".to_string(),
        };
        assert_eq!(e.to_string(), "pinned measure 'revenue' not in dataset, auto-detecting");
    }
}
