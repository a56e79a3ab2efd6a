//! Tabular ingestion for empirical analysis.
//!
//! Accepts CSV, XLS and XLSX uploads and turns them into a normalized
//! [`Table`]:
//!
//! 1. [`validate_upload`] checks the declared format, then the size.
//! 2. [`parse`] reads the content into raw cells (text for CSV, typed cells
//!    for spreadsheets). Parsing is all-or-nothing.
//! 3. [`normalize_table`] coerces blank text to missing and numeric or date
//!    text to typed values.
//!
//! [`load`] runs parse and normalize together.

pub mod error;
pub mod frame;
pub mod normalize;
pub mod source;

mod csv_table;
mod header;
mod spreadsheet;

use std::path::Path;

use empirica_model::Table;
use tracing::info_span;

pub use error::{IngestError, Result};
pub use frame::{table_to_dataframe, write_csv};
pub use normalize::{normalize_table, normalized};
pub use source::{
    FileKind, MAX_UPLOAD_SIZE, MIME_CSV, MIME_XLS, MIME_XLSX, RawFile, validate_upload,
    validate_upload_with_limit,
};

/// Parse an uploaded file into a raw table.
///
/// The declared MIME type is checked before any content is touched; a
/// failure anywhere in the content yields [`IngestError::FileParse`] and no
/// partial table.
pub fn parse(file: &RawFile) -> Result<Table> {
    let kind = validate_upload(file)?;
    let span = info_span!("parse", file = %file.name, kind = ?kind, bytes = file.size);
    let _guard = span.enter();

    let table = match kind {
        FileKind::Csv => csv_table::parse_csv(&file.name, &file.content)?,
        FileKind::Xls | FileKind::Xlsx => {
            spreadsheet::parse_spreadsheet(&file.name, kind, &file.content)?
        }
    };
    tracing::info!(rows = table.len(), columns = table.width(), "parsed file");
    Ok(table)
}

/// Parse and normalize an uploaded file.
pub fn load(file: &RawFile) -> Result<Table> {
    let mut table = parse(file)?;
    normalize_table(&mut table);
    Ok(table)
}

/// Load a table from disk. The extension decides the format and is checked
/// before the file is opened.
pub fn read_table(path: &Path) -> Result<Table> {
    if FileKind::from_path(path).is_none() {
        return Err(IngestError::UnsupportedFormat {
            name: path.display().to_string(),
            mime: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or_else(|| "unknown".to_string(), |ext| format!(".{ext}")),
        });
    }
    let file = RawFile::from_path(path)?;
    load(&file)
}
