//! CSV parsing into raw text tables.

use csv::{ReaderBuilder, StringRecord};
use empirica_model::{Table, Value};

use crate::error::{IngestError, Result};
use crate::header::header_names;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse CSV bytes: first non-blank line is the header, every later
/// non-blank line becomes one row of [`Value::Text`] cells.
///
/// A line holding only delimiters (`,,`) is not blank; it yields a row of
/// empty cells. Quoted fields may contain commas and newlines. Short records
/// are padded with empty strings; fields past the header width are dropped.
pub(crate) fn parse_csv(name: &str, content: &[u8]) -> Result<Table> {
    if content.starts_with(&[0xFF, 0xFE]) || content.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::parse(
            name,
            "UTF-16 encoded files are not supported; save the file as UTF-8",
        ));
    }
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut table: Option<Table> = None;
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::parse(name, e))?;
        if is_blank_line(&record) {
            continue;
        }
        match table.as_mut() {
            None => {
                let headers = header_names(record.iter());
                table = Some(Table::new(headers).map_err(|e| IngestError::parse(name, e))?);
            }
            Some(table) => {
                let row = (0..table.width())
                    .map(|idx| Value::Text(record.get(idx).unwrap_or("").trim().to_string()))
                    .collect();
                table
                    .push_row(row)
                    .map_err(|e| IngestError::parse(name, e))?;
            }
        }
    }

    table.ok_or_else(|| IngestError::parse(name, "file contains no header row"))
}

/// Whitespace-only line: one field, nothing in it.
fn is_blank_line(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|field| field.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Value {
        Value::Text(value.to_string())
    }

    #[test]
    fn pads_short_rows_and_skips_blank_lines() {
        let table = parse_csv("t.csv", b"a,b,c\n1,2\n\n   \n4,5,6,7\n").unwrap();
        assert_eq!(table.columns(), ["a", "b", "c"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(0).unwrap().values(), [text("1"), text("2"), text("")]);
        assert_eq!(table.row(1).unwrap().values(), [text("4"), text("5"), text("6")]);
    }

    #[test]
    fn delimiter_only_lines_become_empty_rows() {
        let table = parse_csv("t.csv", b"a,b\n1,2\n,\n3,4\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.row(1).unwrap().values(), [text(""), text("")]);
        assert_eq!(table.cell(2, 0), Some(&text("3")));
    }

    #[test]
    fn strips_utf8_bom_and_crlf() {
        let table = parse_csv("t.csv", b"\xEF\xBB\xBFyear,gdp\r\n2020,1.5\r\n").unwrap();
        assert_eq!(table.columns(), ["year", "gdp"]);
        assert_eq!(table.cell(0, 1), Some(&text("1.5")));
    }

    #[test]
    fn quoted_commas_stay_in_one_field() {
        let table = parse_csv("t.csv", b"name,city\n\"Smith, J\",Wuhan\n").unwrap();
        assert_eq!(table.cell(0, 0), Some(&text("Smith, J")));
    }

    #[test]
    fn duplicate_headers_fail() {
        let err = parse_csv("t.csv", b"x,x\n1,2\n").unwrap_err();
        assert!(matches!(err, IngestError::FileParse { .. }));
    }

    #[test]
    fn empty_file_fails() {
        assert!(parse_csv("t.csv", b"").is_err());
        assert!(parse_csv("t.csv", b"\xFF\xFEa").is_err());
    }
}
