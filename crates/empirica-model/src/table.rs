//! Row-oriented in-memory table.

use std::collections::BTreeSet;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::{ModelError, Result};
use crate::value::Value;

/// Column separator used by [`Table::preview`].
pub const PREVIEW_SEPARATOR: char = '\t';

/// An ordered sequence of rows sharing one column set.
///
/// Column order is the insertion order of the source header and is kept for
/// previews and CSV reconstruction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(ModelError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Creates a table and appends every row, validating widths.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut table = Self::new(columns)?;
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Like [`Table::column_index`] but reports unknown names as an error.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ModelError::UnknownColumn(name.to_string()))
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|values| values.get(column))
    }

    /// Overwrite a single cell. Out-of-range positions are ignored.
    pub fn set_cell(&mut self, row: usize, column: usize, value: Value) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|values| values.get_mut(column)) {
            *cell = value;
        }
    }

    /// All cells of one column, in row order.
    pub fn values(&self, column: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |values| values.get(column))
    }

    /// Mutable cells of one column, in row order.
    pub fn values_mut(&mut self, column: usize) -> impl Iterator<Item = &mut Value> {
        self.rows
            .iter_mut()
            .filter_map(move |values| values.get_mut(column))
    }

    /// Numeric content of one column, skipping missing and non-numeric cells.
    pub fn numeric_values(&self, column: usize) -> Vec<f64> {
        self.values(column).filter_map(Value::coerce_number).collect()
    }

    /// Count of missing cells in one column.
    pub fn missing_count(&self, column: usize) -> usize {
        self.values(column).filter(|value| value.is_missing()).count()
    }

    /// Keep only rows for which `keep` returns true. Returns the number removed.
    pub fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(Row<'_>) -> bool,
    {
        let before = self.rows.len();
        let columns = &self.columns;
        self.rows.retain(|values| keep(Row { columns, values }));
        before - self.rows.len()
    }

    /// Apply `f` to every cell in place.
    pub fn for_each_cell_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Value),
    {
        for row in &mut self.rows {
            for cell in row {
                f(cell);
            }
        }
    }

    /// Plain-text preview: header line then up to `limit` rows.
    ///
    /// Cells are separated by [`PREVIEW_SEPARATOR`] and lines by `\n`;
    /// missing cells render as empty strings.
    pub fn preview(&self, limit: Option<usize>) -> String {
        let separator = PREVIEW_SEPARATOR.to_string();
        let mut lines = Vec::with_capacity(self.rows.len().min(limit.unwrap_or(usize::MAX)) + 1);
        lines.push(self.columns.join(separator.as_str()));
        let take = limit.unwrap_or(self.rows.len());
        for row in self.rows.iter().take(take) {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            lines.push(cells.join(separator.as_str()));
        }
        lines.join("\n")
    }
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + use<'a> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Serializes as an array of row objects, keys in column order.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["id".to_string(), "score".to_string()],
            vec![
                vec![Value::from("a"), Value::Number(1.0)],
                vec![Value::from("b"), Value::Missing],
                vec![Value::from("c"), Value::Number(3.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = Table::new(vec!["x".to_string(), "x".to_string()]).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateColumn(name) if name == "x"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut table = Table::new(vec!["x".to_string()]).unwrap();
        let err = table.push_row(vec![Value::Missing, Value::Missing]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::RowWidth {
                row: 0,
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn row_lookup_by_name() {
        let table = sample();
        let row = table.row(2).unwrap();
        assert_eq!(row.get("score"), Some(&Value::Number(3.0)));
        assert_eq!(row.get("nope"), None);
    }

    #[test]
    fn numeric_values_skip_missing() {
        let table = sample();
        assert_eq!(table.numeric_values(1), vec![1.0, 3.0]);
        assert_eq!(table.missing_count(1), 1);
    }

    #[test]
    fn retain_rows_reports_removed_count() {
        let mut table = sample();
        let removed = table.retain_rows(|row| !row.values()[1].is_missing());
        assert_eq!(removed, 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn preview_limits_rows() {
        let table = sample();
        assert_eq!(table.preview(Some(2)), "id\tscore\na\t1\nb\t");
    }
}
