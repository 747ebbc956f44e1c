use chart_shaping::chart::InvalidReason;
use chart_shaping::config::{AggregateOp, ChartShape, TransformConfig};
use chart_shaping::ingestion::dataset_from_json_str;
use chart_shaping::transform;
use chart_shaping::types::{RawDataset, Value};

fn region_sales() -> RawDataset {
    dataset_from_json_str(
        r#"[{"region":"east","sales":10},{"region":"east","sales":5},{"region":"west","sales":7}]"#,
    )
    .unwrap()
}

fn pairs(result: &chart_shaping::TransformResult, series: &str) -> Vec<(Value, f64)> {
    result
        .data
        .iter()
        .map(|r| (r.index.clone(), r.value(series).unwrap()))
        .collect()
}

#[test]
fn bar_sum_groups_by_the_auto_selected_dimension() {
    let config = TransformConfig::for_shape(ChartShape::Bar).with_op(AggregateOp::Sum);
    let result = transform(&region_sales(), &config).unwrap();

    assert!(result.valid);
    assert_eq!(result.index_key, "region");
    assert_eq!(result.series_keys, vec!["value".to_string()]);
    assert_eq!(
        pairs(&result, "value"),
        vec![(Value::from("east"), 15.0), (Value::from("west"), 7.0)]
    );
}

#[test]
fn bar_count_counts_rows_per_group() {
    let config = TransformConfig::for_shape(ChartShape::Bar).with_op(AggregateOp::Count);
    let result = transform(&region_sales(), &config).unwrap();

    assert!(result.valid);
    assert_eq!(
        pairs(&result, "value"),
        vec![(Value::from("east"), 2.0), (Value::from("west"), 1.0)]
    );
}

#[test]
fn pie_sums_a_single_dimension() {
    let ds = dataset_from_json_str(r#"[{"cat":"a","v":1},{"cat":"b","v":2},{"cat":"a","v":3}]"#)
        .unwrap();
    // `v` is excluded by name but is the only numeric column, so it is used anyway.
    let config = TransformConfig::for_shape(ChartShape::Pie).with_op(AggregateOp::Sum);
    let result = transform(&ds, &config).unwrap();

    assert!(result.valid);
    assert_eq!(result.index_key, "cat");
    assert_eq!(
        result.to_json().unwrap(),
        serde_json::json!({
            "data": [{"cat": "a", "value": 4.0}, {"cat": "b", "value": 2.0}],
            "indexKey": "cat",
            "seriesKeys": ["value"],
            "valid": true
        })
    );
}

#[test]
fn empty_dataset_is_invalid() {
    let ds = dataset_from_json_str("[]").unwrap();
    let config = TransformConfig::for_shape(ChartShape::Line).with_op(AggregateOp::Sum);
    let result = transform(&ds, &config).unwrap();

    assert!(!result.valid);
    assert!(result.data.is_empty());
    assert_eq!(result.invalid_reason, Some(InvalidReason::EmptyDataset));
}

#[test]
fn scatter_drops_rows_with_a_missing_axis() {
    let ds = dataset_from_json_str(r#"[{"x":1,"y":2},{"x":null,"y":3}]"#).unwrap();
    let result = transform(&ds, &TransformConfig::for_shape(ChartShape::Scatter)).unwrap();

    assert!(result.valid);
    assert_eq!(result.index_key, "x");
    assert_eq!(result.series_keys, vec!["y".to_string()]);
    assert_eq!(pairs(&result, "y"), vec![(Value::Number(1.0), 2.0)]);
}
