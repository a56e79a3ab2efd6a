//! Category breakdowns for categorical columns.

use std::collections::BTreeMap;

use empirica_model::{CategoryBreakdown, Result, Table};

/// Count each distinct non-missing label of `column`.
///
/// Ordered by count (descending), then label. Percentages are relative to
/// the table length.
pub fn category_frequencies(table: &Table, column: &str) -> Result<CategoryBreakdown> {
    let idx = table.require_column(column)?;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in table.values(idx).filter(|v| !v.is_missing()) {
        *counts.entry(value.to_string()).or_default() += 1;
    }

    let mut ordered: Vec<(String, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let rows = table.len();
    let percentages = ordered
        .iter()
        .map(|(_, count)| *count as f64 / rows as f64 * 100.0)
        .collect();
    let (categories, frequencies) = ordered.into_iter().unzip();
    Ok(CategoryBreakdown {
        categories,
        frequencies,
        percentages,
    })
}
