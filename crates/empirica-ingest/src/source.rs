//! Uploaded file handling and format detection.

use std::path::Path;

use crate::error::{IngestError, Result};

pub const MIME_CSV: &str = "text/csv";
pub const MIME_XLS: &str = "application/vnd.ms-excel";
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const MIME_UNKNOWN: &str = "application/octet-stream";

/// Maximum accepted upload size (50 MB).
pub const MAX_UPLOAD_SIZE: u64 = 50 * 1024 * 1024;

/// Accepted tabular file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xls,
    Xlsx,
}

impl FileKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            MIME_CSV => Some(Self::Csv),
            MIME_XLS => Some(Self::Xls),
            MIME_XLSX => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "xls" => Some(Self::Xls),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Csv => MIME_CSV,
            Self::Xls => MIME_XLS,
            Self::Xlsx => MIME_XLSX,
        }
    }

    pub fn is_spreadsheet(self) -> bool {
        matches!(self, Self::Xls | Self::Xlsx)
    }
}

/// A raw uploaded file: name, declared MIME type, size and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub content: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size: content.len() as u64,
            content,
        }
    }

    /// Read a file from disk, deriving the MIME type from its extension.
    ///
    /// Read failures are reported as [`IngestError::FileParse`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime = FileKind::from_path(path).map_or(MIME_UNKNOWN, FileKind::mime);
        let content = std::fs::read(path).map_err(|e| IngestError::parse(&name, e))?;
        Ok(Self::new(name, mime, content))
    }

    /// The accepted kind of this file, or [`IngestError::UnsupportedFormat`].
    pub fn kind(&self) -> Result<FileKind> {
        FileKind::from_mime(&self.mime).ok_or_else(|| IngestError::UnsupportedFormat {
            name: self.name.clone(),
            mime: self.mime.clone(),
        })
    }
}

/// Validate an upload before parsing: format first, then size.
pub fn validate_upload(file: &RawFile) -> Result<FileKind> {
    validate_upload_with_limit(file, MAX_UPLOAD_SIZE)
}

/// Validate an upload against a custom size limit.
pub fn validate_upload_with_limit(file: &RawFile, max_size: u64) -> Result<FileKind> {
    let kind = file.kind()?;
    if file.size > max_size {
        return Err(IngestError::FileTooLarge {
            name: file.name.clone(),
            size: file.size,
            max_size,
        });
    }
    Ok(kind)
}
