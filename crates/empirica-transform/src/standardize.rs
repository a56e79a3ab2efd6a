//! Standardization stage.

use empirica_model::{StandardizationMethod, Table, Value};
use empirica_profile::stats;

use crate::pipeline::NumericColumn;
use crate::summary::{AppliedMethod, ReplayParameters, Stage, StageRecord};

/// An enabled standardization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scaling {
    Zscore,
    Minmax,
}

impl Scaling {
    fn from_method(method: StandardizationMethod) -> Option<Self> {
        match method {
            StandardizationMethod::None => None,
            StandardizationMethod::Zscore => Some(Self::Zscore),
            StandardizationMethod::Minmax => Some(Self::Minmax),
        }
    }
}

pub(crate) fn standardize(
    table: &mut Table,
    columns: &[NumericColumn<'_>],
    method: StandardizationMethod,
    records: &mut Vec<StageRecord>,
) {
    let Some(scaling) = Scaling::from_method(method) else {
        return;
    };
    for column in columns {
        records.push(standardize_column(table, column, scaling));
    }
}

/// Fit the transform on the column's numeric cells and rewrite them.
///
/// A zero-spread column (std of 0, or max equal to min) is recorded as
/// skipped and left unchanged.
fn standardize_column(
    table: &mut Table,
    column: &NumericColumn<'_>,
    scaling: Scaling,
) -> StageRecord {
    let values = table.numeric_values(column.idx);
    let (applied, parameters) = match scaling {
        Scaling::Zscore => (
            AppliedMethod::Zscore,
            ReplayParameters::Zscore {
                mean: stats::mean(&values),
                std: stats::std_dev(&values),
            },
        ),
        Scaling::Minmax => (
            AppliedMethod::Minmax,
            ReplayParameters::Minmax {
                min: stats::min(&values),
                max: stats::max(&values),
            },
        ),
    };

    let degenerate = match parameters {
        ReplayParameters::Zscore { std, .. } => std == 0.0,
        ReplayParameters::Minmax { min, max } => max == min,
    };
    if degenerate {
        tracing::warn!(column = column.name, method = %applied, "zero spread, column left unscaled");
        return StageRecord::new(column.name, Stage::Standardization, AppliedMethod::Skip, 0);
    }

    let mut count = 0;
    for cell in table.values_mut(column.idx) {
        if let Some(x) = cell.coerce_number() {
            *cell = Value::Number(parameters.apply(x));
            count += 1;
        }
    }
    tracing::debug!(column = column.name, method = %applied, count, "standardized column");
    StageRecord::new(column.name, Stage::Standardization, applied, count).with_parameters(parameters)
}
