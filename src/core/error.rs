//! Error types for operon-features
//!
//! Defines all error types used throughout the library. Row-scoped errors
//! ([`ScanError::FieldCount`], [`ScanError::InvalidUtf8`] and every
//! [`ParseError`]) may be skipped under a continue-on-error policy; I/O and
//! serialization errors always abort a conversion.

use thiserror::Error;

/// Main error type for operon-features operations
#[derive(Debug, Error)]
pub enum OperonError {
    /// Record scanning errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Operon row parsing errors without line context
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Operon row parsing errors at a known input line
    #[error("Invalid operon record at line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: ParseError,
    },

    /// Output encoding errors
    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),

    /// Remote retrieval errors
    #[cfg(feature = "fetch")]
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by the delimited-record scanner
#[derive(Debug, Error)]
pub enum ScanError {
    /// Row field count differs from the configured fields per record
    #[error("Wrong number of fields at line {line}: expected {expected}, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Line is not valid UTF-8
    #[error("Invalid UTF-8 at line {line}")]
    InvalidUtf8 { line: usize },

    /// `current()` called before a successful advance or after the end
    #[error("No current record")]
    NoCurrentRecord,

    /// I/O error while reading the source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Whether the error concerns a single row and scanning may resume
    pub fn is_row_scoped(&self) -> bool {
        matches!(self, ScanError::FieldCount { .. } | ScanError::InvalidUtf8 { .. })
    }
}

/// Errors that can occur while converting a row into an operon record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Row does not have exactly the expected number of fields
    #[error("Wrong number of fields: expected {expected}, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// Numeric field failed to parse
    #[error("Invalid number in field {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// Strand token other than `forward` or `reverse`
    #[error("Invalid DNA strand was given [{0}]")]
    InvalidStrand(String),

    /// Declared gene count disagrees with the gene name list
    #[error("The number of gene names doesn't match [{expected} != {actual}]")]
    GeneCountMismatch { expected: usize, actual: usize },
}

/// Errors raised by the output encoders
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors that can occur while retrieving a remote file
#[cfg(feature = "fetch")]
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request failed or the server answered with an error status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Writing the downloaded body failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for operon-features operations
pub type Result<T> = std::result::Result<T, OperonError>;

/// Result type alias for scanning operations
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Result type alias for record parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;
