//! Pearson and Spearman correlation matrices over numeric variables.

use std::fmt;

use empirica_model::{Table, Value, VariableInfo};
use serde::Serialize;

use crate::stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    Pearson,
    /// Pearson over ranks; ties share their average rank.
    Spearman,
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pearson => "pearson",
            Self::Spearman => "spearman",
        })
    }
}

/// Square matrix indexed by `columns` in both directions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub method: CorrelationMethod,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Correlate every pair of numeric and dummy variables.
///
/// Each pair uses the rows where both cells are numeric. A pair where either
/// side has zero variance, or fewer than two shared rows, gets 0.
pub fn correlation_matrix(
    table: &Table,
    variables: &[VariableInfo],
    method: CorrelationMethod,
) -> CorrelationMatrix {
    let selected: Vec<(usize, &str)> = variables
        .iter()
        .filter(|variable| variable.kind.has_numeric_stats())
        .filter_map(|variable| {
            table
                .column_index(&variable.name)
                .map(|idx| (idx, variable.name.as_str()))
        })
        .collect();
    let cells: Vec<Vec<Option<f64>>> = selected
        .iter()
        .map(|(idx, _)| table.values(*idx).map(Value::coerce_number).collect())
        .collect();

    let n = selected.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let (xs, ys): (Vec<f64>, Vec<f64>) = cells[i]
                .iter()
                .zip(&cells[j])
                .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                .unzip();
            let r = match method {
                CorrelationMethod::Pearson => pearson(&xs, &ys),
                CorrelationMethod::Spearman => spearman(&xs, &ys),
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    tracing::debug!(%method, columns = n, "computed correlation matrix");

    CorrelationMatrix {
        method,
        columns: selected.iter().map(|(_, name)| (*name).to_string()).collect(),
        values,
    }
}

/// Pearson's r of two equal-length samples; 0 when undefined.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return 0.0;
    }
    let (mx, my) = (stats::mean(xs), stats::mean(ys));
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mx, y - my);
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return 0.0;
    }
    (cov / (vx * vy).sqrt()).clamp(-1.0, 1.0)
}

/// Spearman's rho: Pearson over average ranks.
pub fn spearman(xs: &[f64], ys: &[f64]) -> f64 {
    pearson(&average_ranks(xs), &average_ranks(ys))
}

/// 1-based ranks; tied values get the mean of the ranks they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}
