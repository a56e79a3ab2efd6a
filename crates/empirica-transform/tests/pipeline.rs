//! Pipeline behavior across stages.

use empirica_model::{
    MissingValueMethod, OutlierMethod, PreprocessConfig, StandardizationMethod, Table, Value,
    VariableInfo, VariableKind, VariableStats,
};
use empirica_profile::stats;
use empirica_transform::{
    AppliedMethod, Stage, TransformError, detect_outliers, preprocess,
};
use insta::assert_snapshot;
use proptest::prelude::*;

fn numeric(name: &str) -> VariableInfo {
    VariableInfo::new(name, VariableKind::Numeric, VariableStats::default())
}

fn table_of(columns: &[&str], rows: Vec<Vec<Value>>) -> Table {
    Table::from_rows(columns.iter().map(ToString::to_string).collect(), rows).expect("table")
}

fn sparse_column() -> Table {
    // 17 of 20 cells missing (85%).
    let rows = (0..20)
        .map(|i| {
            let value = if i < 3 { Value::Number(f64::from(i)) } else { Value::Missing };
            vec![value]
        })
        .collect();
    table_of(&["x"], rows)
}

#[test]
fn sparse_column_is_skipped() {
    let table = sparse_column();
    let config = PreprocessConfig::passthrough().with_missing_value(MissingValueMethod::Mean, 0.5);
    let output = preprocess(&table, &[numeric("x")], config).expect("preprocess");

    let record = output.summary.get("x", Stage::MissingValue).expect("record");
    assert_eq!(record.method, AppliedMethod::Skip);
    assert_eq!(record.affected_count, 17);
    assert_eq!(output.table, table);
}

#[test]
fn mean_imputation_fills_every_gap() {
    let table = table_of(
        &["x"],
        vec![
            vec![Value::Number(1.0)],
            vec![Value::Missing],
            vec![Value::Number(3.0)],
        ],
    );
    let config = PreprocessConfig::passthrough().with_missing_value(MissingValueMethod::Mean, 0.5);
    let output = preprocess(&table, &[numeric("x")], config).expect("preprocess");
    assert_eq!(output.table.cell(1, 0), Some(&Value::Number(2.0)));
    let record = output.summary.get("x", Stage::MissingValue).expect("record");
    assert_eq!(record.affected_count, 1);
    // Input is never modified.
    assert_eq!(table.cell(1, 0), Some(&Value::Missing));
}

#[test]
fn removal_happens_before_standardization() {
    let table = table_of(
        &["x", "y"],
        vec![
            vec![Value::Number(1.0), Value::Number(10.0)],
            vec![Value::Missing, Value::Number(1000.0)],
            vec![Value::Number(3.0), Value::Number(30.0)],
        ],
    );
    let config = PreprocessConfig::passthrough()
        .with_missing_value(MissingValueMethod::Remove, 0.5)
        .with_standardization(StandardizationMethod::Minmax);
    let output = preprocess(&table, &[numeric("x"), numeric("y")], config).expect("preprocess");

    assert_eq!(output.summary.rows_before, 3);
    assert_eq!(output.summary.rows_after, 2);
    assert_eq!(output.table.numeric_values(1), vec![0.0, 1.0]);
    let record = output.summary.get("x", Stage::MissingValue).expect("record");
    assert_eq!(record.method, AppliedMethod::Remove);
}

#[test]
fn zscore_standardization_centers_and_scales() {
    let rows = [3.0, 7.5, 1.0, 12.0, 4.25, 9.0]
        .iter()
        .map(|&x| vec![Value::Number(x)])
        .collect();
    let table = table_of(&["x"], rows);
    let config = PreprocessConfig::passthrough().with_standardization(StandardizationMethod::Zscore);
    let output = preprocess(&table, &[numeric("x")], config).expect("preprocess");

    let values = output.table.numeric_values(0);
    assert!(stats::mean(&values).abs() < 1e-9);
    assert!((stats::std_dev(&values) - 1.0).abs() < 1e-9);
}

#[test]
fn non_numeric_columns_pass_through() {
    let table = table_of(
        &["listed", "region"],
        vec![
            vec![Value::Number(1.0), Value::from("east")],
            vec![Value::Missing, Value::Missing],
        ],
    );
    let variables = vec![
        VariableInfo::new("listed", VariableKind::Dummy, VariableStats::default()),
        VariableInfo::new("region", VariableKind::Categorical, VariableStats::default()),
    ];
    let output = preprocess(&table, &variables, PreprocessConfig::default()).expect("preprocess");
    assert_eq!(output.table, table);
    assert!(output.summary.records.is_empty());
}

#[test]
fn invalid_config_fails_fast() {
    let table = sparse_column();
    let config = PreprocessConfig::passthrough().with_outlier(OutlierMethod::Zscore, -1.0);
    assert!(matches!(
        preprocess(&table, &[numeric("x")], config),
        Err(TransformError::InvalidConfig(_))
    ));
}

#[test]
fn unknown_variable_is_reported() {
    let table = sparse_column();
    assert!(matches!(
        preprocess(&table, &[numeric("y")], PreprocessConfig::default()),
        Err(TransformError::UnknownColumn { column }) if column == "y"
    ));
}

#[test]
fn summary_serializes_in_stage_order() {
    let rows = [1.0, 2.0, 3.0, 4.0, 100.0]
        .iter()
        .map(|&x| vec![Value::Number(x)])
        .chain(std::iter::once(vec![Value::Missing]))
        .collect();
    let table = table_of(&["x"], rows);
    let config = PreprocessConfig::passthrough()
        .with_missing_value(MissingValueMethod::Median, 0.5)
        .with_outlier(OutlierMethod::Iqr, 1.5)
        .with_standardization(StandardizationMethod::Minmax);
    let output = preprocess(&table, &[numeric("x")], config).expect("preprocess");

    let methods: Vec<String> = output
        .summary
        .records
        .iter()
        .map(|r| format!("{}:{}:{}", r.stage, r.method, r.affected_count))
        .collect();
    assert_snapshot!(methods.join("\n"), @r"
    missingValue:median:1
    outlier:iqr:1
    standardization:minmax:6
    ");
}

proptest! {
    #[test]
    fn iqr_never_flags_values_inside_the_quartiles(
        values in prop::collection::vec(-1.0e3f64..1.0e3, 1..50)
    ) {
        let (q1, q3) = stats::quartiles(&values);
        for idx in detect_outliers(&values, OutlierMethod::Iqr, 1.5) {
            prop_assert!(values[idx] < q1 || values[idx] > q3);
        }
    }
}
