//! Caller-side memoization keyed on dataset identity and config.
//!
//! UI layers re-run the transform whenever anything reactive changes. When neither the dataset
//! (compared by `Arc` identity, not contents) nor the config changed, the previous result is
//! returned as-is.

use std::sync::Arc;

use crate::chart::{transform_with_options, TransformResult};
use crate::config::{EngineOptions, TransformConfig};
use crate::error::EngineResult;
use crate::types::RawDataset;

/// Single-entry cache in front of [`transform_with_options`].
///
/// Errors are never cached.
#[derive(Debug, Default)]
pub struct MemoizedTransform {
    options: EngineOptions,
    last: Option<(Arc<RawDataset>, TransformConfig, Arc<TransformResult>)>,
    hits: u64,
    misses: u64,
}

impl MemoizedTransform {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Result for (`dataset`, `config`), recomputed only when either changed since the last call.
    pub fn get(
        &mut self,
        dataset: &Arc<RawDataset>,
        config: &TransformConfig,
    ) -> EngineResult<Arc<TransformResult>> {
        if let Some((ds, cfg, result)) = &self.last {
            if Arc::ptr_eq(ds, dataset) && cfg == config {
                self.hits += 1;
                return Ok(Arc::clone(result));
            }
        }

        self.misses += 1;
        let result = Arc::new(transform_with_options(dataset, config, &self.options)?);
        self.last = Some((Arc::clone(dataset), config.clone(), Arc::clone(&result)));
        Ok(result)
    }

    /// Drop the cached entry.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::MemoizedTransform;
    use crate::config::{AggregateOp, ChartShape, TransformConfig};
    use crate::types::{RawDataset, Value};

    fn dataset() -> Arc<RawDataset> {
        Arc::new(RawDataset::from_records(vec![
            vec![("region", Value::from("east")), ("sales", Value::from(10_i64))],
            vec![("region", Value::from("west")), ("sales", Value::from(7_i64))],
        ]))
    }

    #[test]
    fn same_dataset_and_config_hit_the_cache() {
        let mut memo = MemoizedTransform::default();
        let ds = dataset();
        let cfg = TransformConfig::for_shape(ChartShape::Bar);

        let a = memo.get(&ds, &cfg).unwrap();
        let b = memo.get(&ds, &cfg).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!((memo.hits(), memo.misses()), (1, 1));
    }

    #[test]
    fn config_change_or_new_dataset_recomputes() {
        let mut memo = MemoizedTransform::default();
        let ds = dataset();
        let cfg = TransformConfig::for_shape(ChartShape::Bar);

        memo.get(&ds, &cfg).unwrap();
        let counted = memo.get(&ds, &cfg.clone().with_op(AggregateOp::Count)).unwrap();
        assert_eq!(counted.data[0].value("value"), Some(1.0));

        // Equal contents, different identity.
        memo.get(&dataset(), &cfg.clone().with_op(AggregateOp::Count)).unwrap();
        assert_eq!((memo.hits(), memo.misses()), (0, 3));

        memo.invalidate();
        memo.get(&ds, &cfg).unwrap();
        assert_eq!(memo.misses(), 4);
    }
}
