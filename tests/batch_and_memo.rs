use std::sync::Arc;

use chart_shaping::config::{
    AggregateOp, ChartShape, EngineOptions, NumericFailureMode, TransformConfig,
};
use chart_shaping::execution::{ExecutionEngine, ExecutionOptions, LogExecutionObserver};
use chart_shaping::ingestion::dataset_from_json_str;
use chart_shaping::memo::MemoizedTransform;
use chart_shaping::types::RawDataset;
use chart_shaping::transform;

fn orders() -> RawDataset {
    dataset_from_json_str(&std::fs::read_to_string("tests/fixtures/orders.json").unwrap()).unwrap()
}

#[test]
fn dashboard_batch_matches_individual_transforms() {
    let ds = orders();
    let configs = vec![
        TransformConfig::for_shape(ChartShape::Bar),
        TransformConfig::for_shape(ChartShape::Pie).with_op(AggregateOp::Count),
        TransformConfig::for_shape(ChartShape::Funnel).with_dimension("region"),
        TransformConfig::for_shape(ChartShape::Radar).with_op(AggregateOp::Avg),
        TransformConfig::for_shape(ChartShape::Line).with_measure("revenue"),
    ];

    let engine = ExecutionEngine::new(ExecutionOptions {
        num_threads: Some(2),
        ..Default::default()
    })
    .unwrap()
    .with_observer(Arc::new(LogExecutionObserver));
    let results = engine.transform_batch(&ds, &configs);

    assert_eq!(results.len(), configs.len());
    for (config, batch) in configs.iter().zip(results) {
        assert_eq!(batch.unwrap(), transform(&ds, config).unwrap(), "{config:?}");
    }
    let snap = engine.metrics().snapshot();
    assert_eq!(snap.valid_results, 5);
    assert_eq!(snap.run_id, 1);
}

#[test]
fn batch_options_apply_to_every_config() {
    let text_only = dataset_from_json_str(r#"[{"region":"east"},{"region":"west"}]"#).unwrap();
    let engine = ExecutionEngine::new(ExecutionOptions {
        num_threads: Some(0),
        engine: EngineOptions {
            numeric_failure: NumericFailureMode::Invalid,
            ..Default::default()
        },
    })
    .unwrap();

    let configs = vec![TransformConfig::for_shape(ChartShape::Bar); 3];
    let results = engine.transform_batch(&text_only, &configs);
    assert!(results.iter().all(|r| r.as_ref().is_ok_and(|r| !r.valid)));
    assert_eq!(engine.metrics().snapshot().invalid_results, 3);
}

#[test]
fn memo_reuses_results_until_inputs_change() {
    let ds = Arc::new(orders());
    let mut memo = MemoizedTransform::new(EngineOptions::default());
    let config = TransformConfig::for_shape(ChartShape::Bar);

    let first = memo.get(&ds, &config).unwrap();
    let again = memo.get(&ds, &config).unwrap();
    assert!(Arc::ptr_eq(&first, &again));

    let funnel = memo.get(&ds, &TransformConfig::for_shape(ChartShape::Funnel)).unwrap();
    assert!(!Arc::ptr_eq(&first, &funnel));
    assert_eq!((memo.hits(), memo.misses()), (1, 2));
}

#[test]
fn memo_does_not_cache_errors() {
    let ds = Arc::new(dataset_from_json_str(r#"[{"region":"east"}]"#).unwrap());
    let mut memo = MemoizedTransform::default();
    let config = TransformConfig::for_shape(ChartShape::Bar);

    assert!(memo.get(&ds, &config).is_err());
    assert!(memo.get(&ds, &config).is_err());
    assert_eq!((memo.hits(), memo.misses()), (0, 2));
}
