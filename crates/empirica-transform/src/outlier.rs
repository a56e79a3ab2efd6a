//! Outlier stage: detection and clamping.

use empirica_model::{OutlierConfig, OutlierMethod, Table, Value};
use empirica_profile::stats;

use crate::pipeline::NumericColumn;
use crate::summary::{AppliedMethod, Stage, StageRecord};

/// Indices of `values` flagged as outliers.
///
/// `Zscore` flags `|x − mean| / std > threshold` (nothing when std is 0);
/// `Iqr` flags values outside `[Q1 − k·IQR, Q3 + k·IQR]` with nearest-rank
/// quartiles and `k = threshold`.
pub fn detect_outliers(values: &[f64], method: OutlierMethod, threshold: f64) -> Vec<usize> {
    let flagged: Box<dyn Fn(f64) -> bool> = match method {
        OutlierMethod::None => return Vec::new(),
        OutlierMethod::Zscore => {
            let mean = stats::mean(values);
            let std = stats::std_dev(values);
            if std == 0.0 {
                return Vec::new();
            }
            Box::new(move |x| ((x - mean) / std).abs() > threshold)
        }
        OutlierMethod::Iqr => {
            let (q1, q3) = stats::quartiles(values);
            let iqr = q3 - q1;
            let (lower, upper) = (q1 - threshold * iqr, q3 + threshold * iqr);
            Box::new(move |x| x < lower || x > upper)
        }
    };
    values
        .iter()
        .enumerate()
        .filter(|&(_, &x)| flagged(x))
        .map(|(idx, _)| idx)
        .collect()
}

pub(crate) fn handle_outliers(
    table: &mut Table,
    columns: &[NumericColumn<'_>],
    config: OutlierConfig,
    records: &mut Vec<StageRecord>,
) {
    let method = match config.method {
        OutlierMethod::None => return,
        OutlierMethod::Zscore => AppliedMethod::Zscore,
        OutlierMethod::Iqr => AppliedMethod::Iqr,
    };
    for column in columns {
        let count = clamp_column(table, column.idx, config);
        tracing::debug!(column = column.name, method = %method, count, "clamped outliers");
        records.push(StageRecord::new(column.name, Stage::Outlier, method, count));
    }
}

/// Clamp flagged cells to `mean ± threshold·std`, using the column's
/// statistics before any clamping. Returns the number of cells changed.
fn clamp_column(table: &mut Table, idx: usize, config: OutlierConfig) -> usize {
    let values = table.numeric_values(idx);
    let outliers = detect_outliers(&values, config.method, config.threshold);
    if outliers.is_empty() {
        return 0;
    }
    let mean = stats::mean(&values);
    let reach = config.threshold * stats::std_dev(&values);

    let mut flags = vec![false; values.len()];
    for &i in &outliers {
        flags[i] = true;
    }
    let numeric_cells = table
        .values_mut(idx)
        .filter_map(|cell| cell.coerce_number().map(|x| (cell, x)));
    for ((cell, x), flagged) in numeric_cells.zip(flags) {
        if flagged {
            *cell = Value::Number(if x > mean { mean + reach } else { mean - reach });
        }
    }
    outliers.len()
}
