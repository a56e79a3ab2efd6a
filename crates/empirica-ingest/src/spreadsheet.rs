//! Spreadsheet parsing (first worksheet only).

use std::fmt::Display;
use std::io::Cursor;

use calamine::{Data, DataType, Range, Reader, Xls, Xlsx};
use empirica_model::{Table, Value};

use crate::error::{IngestError, Result};
use crate::header::header_names;
use crate::source::FileKind;

/// Parse the first worksheet of an XLS/XLSX workbook.
///
/// The first row supplies the column names; later sheets are ignored.
pub(crate) fn parse_spreadsheet(name: &str, kind: FileKind, content: &[u8]) -> Result<Table> {
    let cursor = Cursor::new(content);
    let range = match kind {
        FileKind::Xlsx => first_sheet::<Xlsx<_>>(cursor),
        FileKind::Xls => first_sheet::<Xls<_>>(cursor),
        FileKind::Csv => Err("not a spreadsheet".to_string()),
    }
    .map_err(|message| IngestError::parse(name, message))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::parse(name, "worksheet is empty"));
    };
    let header_text: Vec<String> = header_row.iter().map(ToString::to_string).collect();
    let headers = header_names(header_text.iter().map(String::as_str));
    let mut table = Table::new(headers).map_err(|e| IngestError::parse(name, e))?;

    for cells in rows {
        if cells.iter().all(is_blank) {
            continue;
        }
        let row = (0..table.width())
            .map(|idx| cells.get(idx).map_or(Value::Missing, cell_value))
            .collect();
        table
            .push_row(row)
            .map_err(|e| IngestError::parse(name, e))?;
    }

    tracing::debug!(
        file = name,
        rows = table.len(),
        columns = table.width(),
        "read first worksheet"
    );
    Ok(table)
}

fn first_sheet<'a, R>(cursor: Cursor<&'a [u8]>) -> std::result::Result<Range<Data>, String>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: Display,
{
    let mut workbook = R::new(cursor).map_err(|e| e.to_string())?;
    match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| e.to_string()),
        None => Err("workbook contains no worksheets".to_string()),
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// Map a typed spreadsheet cell onto a [`Value`].
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Missing,
        Data::String(text) => Value::Text(text.trim().to_string()),
        Data::Float(value) => Value::Number(*value),
        Data::Int(value) => Value::Number(*value as f64),
        other => other
            .as_datetime()
            .map_or_else(|| Value::Text(other.to_string()), Value::Date),
    }
}
