//! Format adapters
//!
//! Operon table parsing, feature construction and YAML/JSON output.

pub mod feature;
pub mod operon;
pub mod output;

pub use feature::{build_feature, Feature, FeatureBuilder, FeatureOptions, Qualifier};
pub use operon::{
    convert_operons, parse_operon, ConversionStats, ConvertOptions, OperonRecord,
    OPERON_FIELD_COUNT,
};
pub use output::{serialize_features, write_features, OutputFormat};
