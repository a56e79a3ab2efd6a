//! Preprocessing pipeline orchestration.

use empirica_model::{PreprocessConfig, Table, VariableInfo, VariableKind};
use tracing::info_span;

use crate::error::{Result, TransformError};
use crate::missing::handle_missing;
use crate::outlier::handle_outliers;
use crate::standardize::standardize;
use crate::summary::PreprocessSummary;

/// A numeric column selected for preprocessing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumericColumn<'a> {
    pub idx: usize,
    pub name: &'a str,
}

/// Cleaned table plus the record of what was done to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessOutput {
    pub table: Table,
    pub summary: PreprocessSummary,
}

/// Run missing-value handling, outlier handling and standardization, in
/// that order, over the numeric variables of `table`.
///
/// The input table is not modified. Non-numeric columns (including dummies)
/// pass through untouched. The configuration is validated first; an invalid
/// one fails before any work is done.
pub fn preprocess(
    table: &Table,
    variables: &[VariableInfo],
    config: PreprocessConfig,
) -> Result<PreprocessOutput> {
    config.validate().map_err(TransformError::from_model)?;
    let columns = numeric_columns(table, variables)?;

    let span = info_span!("preprocess", rows = table.len(), numeric_columns = columns.len());
    let _guard = span.enter();

    let mut output = table.clone();
    let mut records = Vec::new();

    {
        let _stage = info_span!("missing_values", method = %config.missing_value.method).entered();
        handle_missing(&mut output, &columns, config.missing_value, &mut records);
    }
    {
        let _stage = info_span!("outliers", method = %config.outlier.method).entered();
        handle_outliers(&mut output, &columns, config.outlier, &mut records);
    }
    {
        let _stage =
            info_span!("standardization", method = %config.standardization.method).entered();
        standardize(&mut output, &columns, config.standardization.method, &mut records);
    }

    let summary = PreprocessSummary {
        records,
        rows_before: table.len(),
        rows_after: output.len(),
    };
    tracing::info!(
        records = summary.records.len(),
        rows_before = summary.rows_before,
        rows_after = summary.rows_after,
        "preprocessing complete"
    );
    Ok(PreprocessOutput {
        table: output,
        summary,
    })
}

fn numeric_columns<'a>(
    table: &Table,
    variables: &'a [VariableInfo],
) -> Result<Vec<NumericColumn<'a>>> {
    variables
        .iter()
        .filter(|v| v.kind == VariableKind::Numeric)
        .map(|v| {
            let idx = table
                .column_index(&v.name)
                .ok_or_else(|| TransformError::UnknownColumn {
                    column: v.name.clone(),
                })?;
            Ok(NumericColumn { idx, name: &v.name })
        })
        .collect()
}
