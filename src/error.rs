use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a file into a [`LaunchDataset`].
///
/// All variants are fatal for the dataset being loaded: the dashboard cannot
/// render charts without a valid one.
///
/// [`LaunchDataset`]: crate::data::model::LaunchDataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed {format} data: {message}")]
    Malformed {
        format: &'static str,
        message: String,
    },

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': {message}")]
    InvalidValue {
        /// 1-based: the file line for CSV, the record number otherwise.
        row: usize,
        column: String,
        message: String,
    },

    #[error("dataset contains no records")]
    Empty,
}

impl DatasetError {
    pub(crate) fn malformed(format: &'static str, err: impl std::fmt::Display) -> Self {
        DatasetError::Malformed {
            format,
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid(row: usize, column: &str, message: impl Into<String>) -> Self {
        DatasetError::InvalidValue {
            row,
            column: column.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_message_names_row_and_column() {
        let err = DatasetError::invalid(7, "class", "expected 0 or 1, got 3");
        assert_eq!(
            err.to_string(),
            "row 7, column 'class': expected 0 or 1, got 3"
        );
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error as _;

        let err = DatasetError::Io {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("missing.csv"));
        assert!(err.source().is_some());
    }
}
