//! operon-features - RegulonDB operon tables as annotation features
//!
//! Converts the tab-delimited `OperonSet.txt` table published by RegulonDB
//! into generic annotation features and writes them as YAML or JSON.
//!
//! # Features
//!
//! - Streaming scanner with a continue-on-error policy
//! - Strict row validation (field count, strand, gene count)
//! - Byte-stable YAML/JSON output
//! - Transparent gzip/bzip2 input and optional download of the source table
//!
//! # Example
//!
//! ```
//! use operon_features::{convert_operons, ConvertOptions, OutputFormat};
//!
//! let table = "thrLABC\t1\t20\tforward\t3\tthrA,thrB,thrC\tliterature\tConfirmed\n";
//! let options = ConvertOptions { format: OutputFormat::Json, ..ConvertOptions::default() };
//!
//! let mut out = Vec::new();
//! let stats = convert_operons(table.as_bytes(), &mut out, &options)?;
//! assert_eq!(stats.success, 1);
//! assert!(String::from_utf8_lossy(&out).contains("REGULONDB:thrLABC"));
//! # Ok::<(), operon_features::OperonError>(())
//! ```

pub mod core;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    format_location, OperonError, ParseError, RecordScanner, Result, Row, ScanError,
    ScannerConfig, SerializeError, Strand,
};
pub use crate::formats::{
    build_feature, convert_operons, parse_operon, serialize_features, ConversionStats,
    ConvertOptions, Feature, FeatureBuilder, FeatureOptions, OperonRecord, OutputFormat,
};
