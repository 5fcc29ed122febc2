use thiserror::Error;

/// A `D` value that could not be turned into a calendar date.
///
/// Carries the value as it appeared in the file and the normalized form that
/// was handed to the date parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date format: {original} {normalized}")]
pub struct DateFormatError {
    pub original: String,
    pub normalized: String,
}

/// Errors that can occur while parsing a QIF export
#[derive(Error, Debug)]
pub enum QifParseError {
    /// Date field could not be parsed under the strict date policy
    #[error(transparent)]
    DateFormat(#[from] DateFormatError),

    /// Content does not look like a supported export format
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// Failed to read the file from disk
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// The builder was called without content or a file path
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// Writing the CSV export failed
    #[error("CSV export failed: {0}")]
    CsvExportFailed(#[from] csv::Error),

    /// Writing the JSON export failed
    #[error("JSON export failed: {0}")]
    JsonExportFailed(#[from] serde_json::Error),
}

/// Convenience alias for results carrying [`QifParseError`]
pub type QifResult<T> = Result<T, QifParseError>;
