//! Profiling over realistic tables.

use empirica_model::{DatasetShape, DatasetShapeInfo, Table, Value, VariableKind};
use empirica_profile::{
    TimeFrequency, analyze_variables, describe_structure, detect_data_type,
};
use insta::assert_snapshot;
use proptest::prelude::*;

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::from_rows(
        columns.iter().map(ToString::to_string).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| Value::from_raw(cell)).collect())
            .collect(),
    )
    .expect("table")
}

fn panel() -> Table {
    table(
        &["firm_id", "year", "roa", "listed", "region"],
        &[
            &["1", "2018", "0.12", "1", "east"],
            &["1", "2019", "0.10", "1", "east"],
            &["1", "2020", "", "1", "east"],
            &["2", "2018", "0.08", "0", "west"],
            &["2", "2019", "0.05", "0", "west"],
            &["2", "2020", "0.07", "0", ""],
        ],
    )
}

#[test]
fn panel_variables() {
    let variables = analyze_variables(&panel());
    let kinds: Vec<VariableKind> = variables.iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            VariableKind::Numeric,
            VariableKind::Numeric,
            VariableKind::Numeric,
            VariableKind::Dummy,
            VariableKind::Categorical,
        ]
    );
    let roa = &variables[2];
    assert_eq!((roa.stats.count, roa.stats.missing), (5, 1));
    let numeric = roa.stats.numeric.expect("numeric stats");
    assert!((numeric.mean - 0.084).abs() < 1e-12);
    assert_eq!(numeric.min, 0.05);
    assert_eq!(numeric.max, 0.12);
    assert_eq!(variables[4].stats.missing, 1);
}

#[test]
fn panel_structure() {
    let table = panel();
    assert_eq!(
        detect_data_type(&table),
        DatasetShapeInfo::new(DatasetShape::Panel, 0.9)
    );
    let details = describe_structure(&table);
    assert_eq!(details.periods, Some(3));
    assert_eq!(details.entities, Some(2));
    assert_eq!(details.frequency, Some(TimeFrequency::Annual));

    let json = serde_json::to_string(&details).expect("serialize");
    assert_snapshot!(json, @r#"{"type":"panel","timeColumns":["year"],"entityColumns":["firm_id"],"observations":6,"periods":3,"entities":2,"frequency":"annual"}"#);
}

#[test]
fn cross_section_structure_has_no_time_details() {
    let table = table(&["revenue", "cost"], &[&["10", "4"], &["12", "5"]]);
    let details = describe_structure(&table);
    assert_eq!(details.shape, Some(DatasetShape::CrossSection));
    assert_eq!(details.periods, None);
    assert_eq!(details.frequency, None);
}

#[test]
fn monthly_time_series() {
    let table = table(
        &["date", "cpi"],
        &[
            &["2023-01-01", "101.2"],
            &["2023-02-01", "101.5"],
            &["2023-03-01", "101.9"],
            &["2023-04-01", "102.0"],
        ],
    );
    let details = describe_structure(&table);
    assert_eq!(details.shape, Some(DatasetShape::TimeSeries));
    assert_eq!(details.periods, Some(4));
    assert_eq!(details.frequency, Some(TimeFrequency::Monthly));
}

proptest! {
    #[test]
    fn count_plus_missing_is_row_count(
        cells in prop::collection::vec(prop::option::of(-1.0e6f64..1.0e6), 0..40)
    ) {
        let rows = cells.iter().map(|c| vec![Value::from(*c)]).collect();
        let table = Table::from_rows(vec!["x".to_string()], rows).expect("table");
        let info = &analyze_variables(&table)[0];
        prop_assert_eq!(info.stats.count + info.stats.missing, table.len());
        if let Some(stats) = info.stats.numeric {
            prop_assert!(stats.std >= 0.0);
            prop_assert!(stats.min <= stats.max);
        }
    }
}
