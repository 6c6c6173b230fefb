//! Annotation features
//!
//! Maps operon records onto the generic feature shape of genomic flat files:
//! a key, a location expression and an ordered list of qualifiers.

use crate::core::format_location;
use crate::formats::operon::OperonRecord;
use serde::Serialize;

/// Feature key used for operons
pub const DEFAULT_FEATURE_KEY: &str = "operon";

/// Prefix of the RegulonDB cross-reference qualifier
pub const DB_XREF_PREFIX: &str = "REGULONDB:";

/// Key/value annotation; duplicates are allowed and order is significant
pub type Qualifier = (String, String);

/// A generic annotation feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub key: String,
    pub location: String,
    pub qualifiers: Vec<Qualifier>,
}

impl Feature {
    /// Value of the first qualifier named `key`
    pub fn qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Feature construction options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOptions {
    /// Feature key (default `operon`)
    pub key: String,
    /// Emit an `operon` qualifier with the record name ahead of `db_xref`
    pub include_operon_qualifier: bool,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_FEATURE_KEY.to_string(),
            include_operon_qualifier: false,
        }
    }
}

impl FeatureOptions {
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_operon_qualifier(mut self, include: bool) -> Self {
        self.include_operon_qualifier = include;
        self
    }
}

/// Builds [`Feature`]s from operon records
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder {
    options: FeatureOptions,
}

impl FeatureBuilder {
    pub fn new(options: FeatureOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FeatureOptions {
        &self.options
    }

    pub fn build(&self, record: &OperonRecord) -> Feature {
        let mut qualifiers = Vec::with_capacity(2);
        if self.options.include_operon_qualifier {
            qualifiers.push(("operon".to_string(), record.name.clone()));
        }
        qualifiers.push((
            "db_xref".to_string(),
            format!("{}{}", DB_XREF_PREFIX, record.name),
        ));

        Feature {
            key: self.options.key.clone(),
            location: format_location(record.left, record.right, record.strand.is_forward()),
            qualifiers,
        }
    }
}

/// Build a feature with the default options
pub fn build_feature(record: &OperonRecord) -> Feature {
    FeatureBuilder::default().build(record)
}
