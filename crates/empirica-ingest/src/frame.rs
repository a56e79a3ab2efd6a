//! Conversion to polars frames and CSV export.

use std::fs::File;
use std::path::Path;

use empirica_model::{Table, Value};
use polars::prelude::{
    Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, PolarsResult, SerWriter, Series,
};

/// Build a [`DataFrame`] from a table.
///
/// Columns holding only numbers and gaps become `Float64`; every other
/// column becomes a nullable `String` column of display text.
pub fn table_to_dataframe(table: &Table) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| column_series(table, idx, name).into_column())
        .collect();
    DataFrame::new(columns)
}

fn column_series(table: &Table, idx: usize, name: &str) -> Series {
    let numeric = table
        .values(idx)
        .all(|value| matches!(value, Value::Number(_) | Value::Missing));
    if numeric {
        let values: Vec<Option<f64>> = table.values(idx).map(Value::as_number).collect();
        Series::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = table
            .values(idx)
            .map(|value| (!value.is_missing()).then(|| value.to_string()))
            .collect();
        Series::new(name.into(), values)
    }
}

/// Write a table to `path` as CSV with a header row.
pub fn write_csv(table: &Table, path: &Path) -> PolarsResult<()> {
    let mut df = table_to_dataframe(table)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    tracing::info!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    #[test]
    fn numeric_columns_become_float() {
        let table = Table::from_rows(
            vec!["roa".to_string(), "region".to_string()],
            vec![
                vec![Value::Number(0.1), Value::from("east")],
                vec![Value::Missing, Value::Missing],
            ],
        )
        .unwrap();
        let df = table_to_dataframe(&table).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("roa").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("region").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("roa").unwrap().null_count(), 1);
    }
}
