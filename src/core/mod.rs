//! Core scanning functionality
//!
//! This module contains the error taxonomy, the delimited-record scanner,
//! location formatting and input/output helpers.

mod error;
pub mod io;
mod location;
mod scanner;

#[cfg(feature = "fetch")]
pub use error::FetchError;
pub use error::{
    OperonError, ParseError, ParseResult, Result, ScanError, ScanResult, SerializeError,
};
pub use io::{create_output, detect_compression, open_input, Compression, DEFAULT_BUFFER_SIZE};
pub use location::{format_location, Location, Strand};
pub use scanner::{RecordScanner, Row, ScannerConfig};
