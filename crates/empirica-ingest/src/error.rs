//! Error types for tabular ingestion.

use thiserror::Error;

/// Errors that can occur while accepting and parsing an uploaded file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File type is not CSV, XLS or XLSX. Raised before any content is read.
    #[error("unsupported file format for {name}: {mime}")]
    UnsupportedFormat { name: String, mime: String },

    /// The file could not be read or its content is malformed.
    #[error("failed to parse {name}: {message}")]
    FileParse { name: String, message: String },

    #[error("{name} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        name: String,
        size: u64,
        max_size: u64,
    },
}

impl IngestError {
    pub(crate) fn parse(name: &str, message: impl ToString) -> Self {
        Self::FileParse {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            name: "notes.txt".to_string(),
            mime: "text/plain".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported file format for notes.txt: text/plain");
    }

    #[test]
    fn test_parse_error_keeps_message() {
        let err = IngestError::parse("data.csv", "bad row");
        assert!(matches!(err, IngestError::FileParse { ref message, .. } if message == "bad row"));
    }
}
