//! Missing-value stage.

use std::collections::BTreeMap;

use empirica_model::{MissingValueConfig, MissingValueMethod, Table, Value};
use empirica_profile::stats;

use crate::pipeline::NumericColumn;
use crate::summary::{AppliedMethod, Stage, StageRecord};

/// An enabled missing-value treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Imputation {
    Mean,
    Median,
    Mode,
    Remove,
}

impl Imputation {
    fn from_method(method: MissingValueMethod) -> Option<Self> {
        match method {
            MissingValueMethod::None => None,
            MissingValueMethod::Mean => Some(Self::Mean),
            MissingValueMethod::Median => Some(Self::Median),
            MissingValueMethod::Mode => Some(Self::Mode),
            MissingValueMethod::Remove => Some(Self::Remove),
        }
    }

    fn applied(self) -> AppliedMethod {
        match self {
            Self::Mean => AppliedMethod::Mean,
            Self::Median => AppliedMethod::Median,
            Self::Mode => AppliedMethod::Mode,
            Self::Remove => AppliedMethod::Remove,
        }
    }
}

pub(crate) fn handle_missing(
    table: &mut Table,
    columns: &[NumericColumn<'_>],
    config: MissingValueConfig,
    records: &mut Vec<StageRecord>,
) {
    let Some(imputation) = Imputation::from_method(config.method) else {
        return;
    };
    for column in columns {
        records.push(handle_column(table, column, imputation, config.threshold));
    }
}

fn handle_column(
    table: &mut Table,
    column: &NumericColumn<'_>,
    imputation: Imputation,
    threshold: f64,
) -> StageRecord {
    let missing = table.missing_count(column.idx);
    let ratio = if table.is_empty() {
        0.0
    } else {
        missing as f64 / table.len() as f64
    };

    if ratio > threshold {
        tracing::debug!(
            column = column.name,
            ratio,
            threshold,
            "missing ratio above threshold, skipping"
        );
        return StageRecord::new(column.name, Stage::MissingValue, AppliedMethod::Skip, missing);
    }

    let method = imputation.applied();
    let values = table.numeric_values(column.idx);
    let fill = match imputation {
        Imputation::Remove => {
            let idx = column.idx;
            let removed = table.retain_rows(|row| !row.values()[idx].is_missing());
            tracing::debug!(column = column.name, removed, "removed rows with gaps");
            return StageRecord::new(column.name, Stage::MissingValue, method, removed);
        }
        Imputation::Mean => stats::mean(&values),
        Imputation::Median => stats::median(&values),
        Imputation::Mode => mode(&values),
    };
    for cell in table.values_mut(column.idx).filter(|cell| cell.is_missing()) {
        *cell = Value::Number(fill);
    }
    tracing::debug!(column = column.name, method = %method, fill, filled = missing, "imputed gaps");
    StageRecord::new(column.name, Stage::MissingValue, method, missing)
}

/// Most frequent value; ties go to the smaller value. Empty input gives 0.
pub fn mode(values: &[f64]) -> f64 {
    let mut counts: BTreeMap<u64, (f64, usize)> = BTreeMap::new();
    for &x in values {
        // -0.0 and 0.0 share a bucket.
        let key = if x == 0.0 { 0.0f64.to_bits() } else { x.to_bits() };
        counts.entry(key).or_insert((x, 0)).1 += 1;
    }
    counts
        .into_values()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.total_cmp(&a.0)))
        .map_or(0.0, |(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_prefers_smaller_on_ties() {
        assert_eq!(mode(&[3.0, 1.0, 3.0, 1.0, 2.0]), 1.0);
        assert_eq!(mode(&[5.0, 5.0, 1.0]), 5.0);
        assert_eq!(mode(&[]), 0.0);
    }

    #[test]
    fn none_method_records_nothing() {
        let mut table = Table::from_rows(vec!["x".to_string()], vec![vec![Value::Missing]]).unwrap();
        let mut records = Vec::new();
        let config = MissingValueConfig {
            method: MissingValueMethod::None,
            threshold: 0.5,
        };
        handle_missing(&mut table, &[NumericColumn { idx: 0, name: "x" }], config, &mut records);
        assert!(records.is_empty());
        assert_eq!(table.cell(0, 0), Some(&Value::Missing));
    }

    #[test]
    fn mode_fill_uses_most_frequent_value() {
        let mut table = Table::from_rows(
            vec!["x".to_string()],
            [Some(2.0), Some(7.0), Some(7.0), None]
                .into_iter()
                .map(|x| vec![Value::from(x)])
                .collect(),
        )
        .unwrap();
        let column = NumericColumn { idx: 0, name: "x" };
        let record = handle_column(&mut table, &column, Imputation::Mode, 0.5);
        assert_eq!(record.method, AppliedMethod::Mode);
        assert_eq!(record.affected_count, 1);
        assert_eq!(table.cell(3, 0), Some(&Value::Number(7.0)));
    }

    #[test]
    fn only_none_disables_the_stage() {
        assert_eq!(Imputation::from_method(MissingValueMethod::None), None);
        assert_eq!(
            Imputation::from_method(MissingValueMethod::Remove).map(Imputation::applied),
            Some(AppliedMethod::Remove)
        );
    }
}
