//! Column classification and per-variable statistics.

use empirica_model::{Table, Value, VariableInfo, VariableKind, VariableStats};

use crate::stats;

/// Share of numeric values above which a column counts as numeric.
pub const NUMERIC_RATIO: f64 = 0.8;

/// Analyze every column of `table`, in column order.
pub fn analyze_variables(table: &Table) -> Vec<VariableInfo> {
    let span = tracing::info_span!("analyze", rows = table.len(), columns = table.width());
    let _guard = span.enter();

    table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| analyze_column(table, idx, name))
        .collect()
}

/// Analyze a single column.
///
/// `count` is the number of non-missing cells and `missing` the rest, so the
/// two always add up to the table length.
pub fn analyze_column(table: &Table, idx: usize, name: &str) -> VariableInfo {
    let present: Vec<&Value> = table.values(idx).filter(|v| !v.is_missing()).collect();
    let numbers: Vec<f64> = present.iter().filter_map(|v| v.coerce_number()).collect();
    let kind = classify(&present, numbers.len());

    let stats = VariableStats {
        count: present.len(),
        missing: table.len() - present.len(),
        numeric: kind.has_numeric_stats().then(|| stats::describe(&numbers)),
    };
    tracing::debug!(
        column = name,
        kind = %kind,
        count = stats.count,
        missing = stats.missing,
        "classified column"
    );
    VariableInfo::new(name, kind, stats)
}

/// Decide the kind of a column from its non-missing values.
///
/// Rules, first match wins: all values 0 or 1 → dummy; more than
/// [`NUMERIC_RATIO`] numeric → numeric; all dates → date; else categorical.
/// A column with no values at all is categorical.
fn classify(present: &[&Value], numeric_count: usize) -> VariableKind {
    if present.is_empty() {
        return VariableKind::Categorical;
    }
    let all_binary = present
        .iter()
        .all(|v| matches!(v.coerce_number(), Some(x) if x == 0.0 || x == 1.0));
    if all_binary {
        return VariableKind::Dummy;
    }
    if numeric_count as f64 / present.len() as f64 > NUMERIC_RATIO {
        return VariableKind::Numeric;
    }
    if present.iter().all(|v| v.coerce_date().is_some()) {
        return VariableKind::Date;
    }
    VariableKind::Categorical
}
