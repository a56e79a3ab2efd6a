//! Tests for empirica-model types.

use empirica_model::{
    DatasetShape, DatasetShapeInfo, EmpiricalAnalysisRequest, MethodRecommendation,
    MissingValueMethod, ModelError, OutlierMethod, PreprocessConfig, ProcessedData,
    StandardizationMethod, Table, Value, VariableInfo, VariableKind, VariableRole, VariableStats,
};
use proptest::prelude::*;

fn table() -> Table {
    Table::from_rows(
        vec!["firm".to_string(), "roa".to_string(), "listed".to_string()],
        vec![
            vec![Value::from("A"), Value::Number(0.12), Value::from("2019-06-30")],
            vec![Value::from("B"), Value::Missing, Value::from("2020-01-01")],
        ],
    )
    .unwrap()
}

fn method(name: &str) -> MethodRecommendation {
    MethodRecommendation {
        name: name.to_string(),
        description: String::new(),
        advantages: vec![],
        considerations: vec![],
        assumptions: vec![],
        test_methods: vec![],
        formula: String::new(),
        suitable_conditions: vec![],
        suitable_scenarios: vec![],
        confidence: 0.8,
    }
}

fn variable(name: &str, role: Option<VariableRole>) -> VariableInfo {
    VariableInfo {
        name: name.to_string(),
        kind: VariableKind::Numeric,
        role,
        stats: VariableStats::default(),
    }
}

#[test]
fn table_serializes_as_row_objects() {
    let json = serde_json::to_string(&table()).expect("serialize table");
    assert_eq!(
        json,
        r#"[{"firm":"A","roa":0.12,"listed":"2019-06-30"},{"firm":"B","roa":null,"listed":"2020-01-01"}]"#
    );
}

#[test]
fn value_deserializes_from_json_scalars() {
    let values: Vec<Value> =
        serde_json::from_str(r#"[1, 2.5, "x", null, true]"#).expect("deserialize values");
    assert_eq!(
        values,
        vec![
            Value::Number(1.0),
            Value::Number(2.5),
            Value::Text("x".to_string()),
            Value::Missing,
            Value::Text("true".to_string()),
        ]
    );
}

#[test]
fn variable_info_uses_type_key() {
    let info = variable("roa", Some(VariableRole::Dependent));
    let json = serde_json::to_value(&info).expect("serialize variable");
    assert_eq!(json["type"], "numeric");
    assert_eq!(json["role"], "dependent");
    assert_eq!(json["stats"]["count"], 0);
    assert!(json["stats"].get("numeric").is_none());
}

#[test]
fn config_reads_from_toml() {
    let config: PreprocessConfig = toml::from_str(
        r#"
[missingValue]
method = "median"
threshold = 0.3

[outlier]
method = "iqr"
threshold = 1.5

[standardization]
method = "minmax"
"#,
    )
    .expect("parse config");
    assert_eq!(config.missing_value.method, MissingValueMethod::Median);
    assert_eq!(config.outlier.method, OutlierMethod::Iqr);
    assert_eq!(config.standardization.method, StandardizationMethod::Minmax);
    assert!(config.validate().is_ok());
}

#[test]
fn config_without_sections_is_rejected() {
    let parsed: Result<PreprocessConfig, _> = toml::from_str("");
    assert!(parsed.is_err());
}

#[test]
fn shape_override_keeps_confidence() {
    let detected = DatasetShapeInfo::new(DatasetShape::CrossSection, 0.7);
    let chosen = detected.with_override(DatasetShape::Panel);
    assert_eq!(chosen.shape, Some(DatasetShape::Panel));
    assert_eq!(chosen.confidence, 0.7);
    assert_eq!("time-series".parse::<DatasetShape>(), Ok(DatasetShape::TimeSeries));
    assert!("pooled".parse::<DatasetShape>().is_err());
}

#[test]
fn shape_info_serializes_null_type() {
    let json = serde_json::to_string(&DatasetShapeInfo::unknown()).expect("serialize shape");
    assert_eq!(json, r#"{"type":null,"confidence":0.0}"#);
}

#[test]
fn processed_data_uses_camel_case() {
    let bundle = ProcessedData {
        variables: vec![],
        raw_data: table(),
        preprocess_config: PreprocessConfig::default(),
    };
    let json = serde_json::to_value(&bundle).expect("serialize bundle");
    assert!(json.get("rawData").is_some());
    assert_eq!(json["preprocessConfig"]["missingValue"]["method"], "mean");
    assert_eq!(bundle.preview(Some(0)), "firm\troa\tlisted");
}

#[test]
fn request_requires_a_dependent_variable() {
    let variables = vec![variable("roa", Some(VariableRole::Independent))];
    let err = EmpiricalAnalysisRequest::build(
        table(),
        &variables,
        &DatasetShapeInfo::unknown(),
        PreprocessConfig::default(),
        vec![],
        None,
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::InvalidConfig(_)));
}

#[test]
fn request_rejects_unknown_selected_method() {
    let variables = vec![
        variable("roa", Some(VariableRole::Dependent)),
        variable("size", Some(VariableRole::Independent)),
    ];
    let err = EmpiricalAnalysisRequest::build(
        table(),
        &variables,
        &DatasetShapeInfo::new(DatasetShape::CrossSection, 0.7),
        PreprocessConfig::default(),
        vec![method("OLS")],
        Some("GMM".to_string()),
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::InvalidConfig(_)));
}

#[test]
fn request_collects_roles_in_column_order() {
    let variables = vec![
        variable("roa", Some(VariableRole::Dependent)),
        variable("lev", Some(VariableRole::Control)),
        variable("size", Some(VariableRole::Independent)),
        variable("rd", Some(VariableRole::Independent)),
        variable("industry", Some(VariableRole::Grouping)),
    ];
    let request = EmpiricalAnalysisRequest::build(
        table(),
        &variables,
        &DatasetShapeInfo::new(DatasetShape::CrossSection, 0.7),
        PreprocessConfig::default(),
        vec![method("OLS")],
        Some("OLS".to_string()),
    )
    .expect("build request");
    assert_eq!(request.dependent_var, "roa");
    assert_eq!(request.independent_vars, vec!["size", "rd"]);
    assert_eq!(request.control_vars, vec!["lev"]);
    assert_eq!(request.group_vars, vec!["industry"]);

    let json = serde_json::to_value(&request).expect("serialize request");
    assert_eq!(json["dataType"], "cross_section");
    assert_eq!(json["dependentVar"], "roa");
    assert_eq!(json["selectedMethod"], "OLS");
}

proptest! {
    #[test]
    fn normalizing_twice_equals_normalizing_once(raw in "[ -~]{0,12}") {
        let once = Value::from_raw(&raw);
        let twice = once.clone().normalize();
        prop_assert_eq!(once, twice);
    }
}
