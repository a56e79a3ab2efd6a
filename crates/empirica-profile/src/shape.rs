//! Dataset-shape detection and structure details.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::Datelike;
use empirica_model::{DatasetShape, DatasetShapeInfo, Table, Value};
use serde::Serialize;

/// Column-name fragments that mark a time index.
pub const TIME_TOKENS: &[&str] = &["year", "date", "time"];

/// Column-name fragments that mark an entity index.
pub const ENTITY_TOKENS: &[&str] = &["id", "entity", "firm", "company", "province", "city"];

pub const PANEL_CONFIDENCE: f64 = 0.9;
pub const TIME_SERIES_CONFIDENCE: f64 = 0.8;
pub const CROSS_SECTION_CONFIDENCE: f64 = 0.7;

fn matches_any(column: &str, tokens: &[&str]) -> bool {
    let lower = column.to_lowercase();
    tokens.iter().any(|token| lower.contains(token))
}

pub fn is_time_column(column: &str) -> bool {
    matches_any(column, TIME_TOKENS)
}

pub fn is_entity_column(column: &str) -> bool {
    matches_any(column, ENTITY_TOKENS)
}

/// Classify a table as panel, time-series or cross-section from its
/// column names. A table without rows has no shape.
pub fn detect_data_type(table: &Table) -> DatasetShapeInfo {
    if table.is_empty() {
        return DatasetShapeInfo::unknown();
    }
    let info = detect_from_columns(table.columns());
    tracing::info!(
        shape = info.shape.map_or("unknown", DatasetShape::as_str),
        confidence = info.confidence,
        "detected dataset shape"
    );
    info
}

/// Name-only variant of [`detect_data_type`].
pub fn detect_from_columns<S: AsRef<str>>(columns: &[S]) -> DatasetShapeInfo {
    let has_time = columns.iter().any(|c| is_time_column(c.as_ref()));
    let has_entity = columns.iter().any(|c| is_entity_column(c.as_ref()));
    match (has_time, has_entity) {
        (true, true) => DatasetShapeInfo::new(DatasetShape::Panel, PANEL_CONFIDENCE),
        (true, false) => DatasetShapeInfo::new(DatasetShape::TimeSeries, TIME_SERIES_CONFIDENCE),
        _ => DatasetShapeInfo::new(DatasetShape::CrossSection, CROSS_SECTION_CONFIDENCE),
    }
}

/// Sampling frequency of a time index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    Unknown,
}

impl TimeFrequency {
    /// Map a modal gap in days onto a frequency.
    pub fn from_gap_days(days: i64) -> Self {
        match days {
            1 => Self::Daily,
            7 => Self::Weekly,
            28..=31 => Self::Monthly,
            88..=92 => Self::Quarterly,
            180..=186 => Self::SemiAnnual,
            360..=366 => Self::Annual,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi_annual",
            Self::Annual => "annual",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "日度",
            Self::Weekly => "周度",
            Self::Monthly => "月度",
            Self::Quarterly => "季度",
            Self::SemiAnnual => "半年度",
            Self::Annual => "年度",
            Self::Unknown => "未知",
        }
    }
}

impl fmt::Display for TimeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural facts behind the detected shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureDetails {
    #[serde(rename = "type")]
    pub shape: Option<DatasetShape>,
    pub time_columns: Vec<String>,
    pub entity_columns: Vec<String>,
    pub observations: usize,
    /// Distinct values of the first time column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periods: Option<usize>,
    /// Distinct values of the first entity column (panel data only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<TimeFrequency>,
}

pub fn describe_structure(table: &Table) -> StructureDetails {
    let shape = detect_data_type(table).shape;
    let time_columns: Vec<String> = table
        .columns()
        .iter()
        .filter(|c| is_time_column(c))
        .cloned()
        .collect();
    let entity_columns: Vec<String> = table
        .columns()
        .iter()
        .filter(|c| is_entity_column(c))
        .cloned()
        .collect();

    let time_idx = time_columns.first().and_then(|c| table.column_index(c));
    let entity_idx = entity_columns.first().and_then(|c| table.column_index(c));

    let (periods, entities, frequency) = match (shape, time_idx) {
        (Some(DatasetShape::Panel), Some(t)) => (
            Some(distinct_count(table, t)),
            entity_idx.map(|e| distinct_count(table, e)),
            Some(detect_frequency(table.values(t))),
        ),
        (Some(DatasetShape::TimeSeries), Some(t)) => (
            Some(distinct_count(table, t)),
            None,
            Some(detect_frequency(table.values(t))),
        ),
        _ => (None, None, None),
    };

    StructureDetails {
        shape,
        time_columns,
        entity_columns,
        observations: table.len(),
        periods,
        entities,
        frequency,
    }
}

fn distinct_count(table: &Table, column: usize) -> usize {
    table
        .values(column)
        .filter(|v| !v.is_missing())
        .map(ToString::to_string)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Detect the sampling frequency of a time index from the most common gap
/// between consecutive distinct time points.
///
/// Dates are compared in days. Whole numbers between 1000 and 9999 are read
/// as years and give an annual frequency. Mixed or unparseable values give
/// [`TimeFrequency::Unknown`].
pub fn detect_frequency<'a, I>(values: I) -> TimeFrequency
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut days = BTreeSet::new();
    let mut years = BTreeSet::new();
    for value in values {
        match value {
            Value::Missing => {}
            Value::Number(n) if is_year(*n) => {
                years.insert(*n as i64);
            }
            other => match other.coerce_date() {
                Some(date) => {
                    days.insert(i64::from(date.date().num_days_from_ce()));
                }
                None => return TimeFrequency::Unknown,
            },
        }
    }

    match (days.is_empty(), years.is_empty()) {
        (true, false) => modal_gap(&years).map_or(TimeFrequency::Unknown, |_| TimeFrequency::Annual),
        (false, true) => modal_gap(&days).map_or(TimeFrequency::Unknown, TimeFrequency::from_gap_days),
        _ => TimeFrequency::Unknown,
    }
}

fn is_year(n: f64) -> bool {
    n.fract() == 0.0 && (1000.0..=9999.0).contains(&n)
}

/// Most frequent difference between neighbours; ties go to the smaller gap.
fn modal_gap(points: &BTreeSet<i64>) -> Option<i64> {
    let sorted: Vec<i64> = points.iter().copied().collect();
    let mut gaps: BTreeMap<i64, usize> = BTreeMap::new();
    for pair in sorted.windows(2) {
        *gaps.entry(pair[1] - pair[0]).or_default() += 1;
    }
    gaps.into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(gap, _)| gap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(raw: &[&str]) -> Vec<Value> {
        raw.iter().map(|s| Value::from_raw(s)).collect()
    }

    #[test]
    fn shape_from_column_names() {
        let panel = detect_from_columns(&["firm_id", "year", "revenue"]);
        assert_eq!(panel, DatasetShapeInfo::new(DatasetShape::Panel, 0.9));
        let series = detect_from_columns(&["year", "revenue"]);
        assert_eq!(series, DatasetShapeInfo::new(DatasetShape::TimeSeries, 0.8));
        let cross = detect_from_columns(&["revenue", "cost"]);
        assert_eq!(cross, DatasetShapeInfo::new(DatasetShape::CrossSection, 0.7));
    }

    #[test]
    fn token_match_ignores_case() {
        assert!(is_time_column("TradeDate"));
        assert!(is_entity_column("Province_Code"));
        assert!(!is_time_column("revenue"));
    }

    #[test]
    fn empty_table_has_no_shape() {
        let table = Table::new(vec!["firm_id".to_string(), "year".to_string()]).unwrap();
        assert_eq!(detect_data_type(&table), DatasetShapeInfo::unknown());
    }

    #[test]
    fn frequency_from_dates() {
        let monthly = dates(&["2020-01-31", "2020-02-29", "2020-03-31", "2020-04-30"]);
        assert_eq!(detect_frequency(&monthly), TimeFrequency::Monthly);
        let quarterly = dates(&["2020-01-01", "2020-04-01", "2020-07-01", "2020-10-01"]);
        assert_eq!(detect_frequency(&quarterly), TimeFrequency::Quarterly);
        let daily = dates(&["2021-03-01", "2021-03-02", "2021-03-03", "2021-03-05"]);
        assert_eq!(detect_frequency(&daily), TimeFrequency::Daily);
    }

    #[test]
    fn year_numbers_are_annual() {
        let years = dates(&["2018", "2019", "2020", "2019"]);
        assert_eq!(detect_frequency(&years), TimeFrequency::Annual);
    }

    #[test]
    fn single_point_or_text_is_unknown() {
        assert_eq!(detect_frequency(&dates(&["2020-01-01"])), TimeFrequency::Unknown);
        assert_eq!(detect_frequency(&dates(&["spring", "summer"])), TimeFrequency::Unknown);
    }
}
