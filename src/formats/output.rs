//! Feature serialization
//!
//! Renders features as a YAML sequence or a pretty-printed JSON array. Both
//! encoders emit struct fields in declaration order (`key`, `location`,
//! `qualifiers`), so identical input always yields identical text.
//! Qualifier pairs become two-element sequences.

use crate::core::{Result, SerializeError};
use crate::formats::feature::Feature;
use std::fmt;
use std::io::Write;

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// Parse from string (for CLI argument)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize features to text ending in a single newline
pub fn serialize_features(
    features: &[Feature],
    format: OutputFormat,
) -> std::result::Result<String, SerializeError> {
    match format {
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(features)?;
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(features)?),
    }
}

/// Serialize features and write them to `writer` in one batch
pub fn write_features<W: Write>(
    writer: &mut W,
    features: &[Feature],
    format: OutputFormat,
) -> Result<()> {
    let text = serialize_features(features, format)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thr() -> Feature {
        Feature {
            key: "operon".to_string(),
            location: "1..20".to_string(),
            qualifiers: vec![("db_xref".to_string(), "REGULONDB:thrLABC".to_string())],
        }
    }

    fn ace() -> Feature {
        Feature {
            key: "operon".to_string(),
            location: "complement(100..200)".to_string(),
            qualifiers: vec![
                ("operon".to_string(), "aceBAK".to_string()),
                ("db_xref".to_string(), "REGULONDB:aceBAK".to_string()),
            ],
        }
    }

    #[test]
    fn test_json_layout() {
        let text = serialize_features(&[thr()], OutputFormat::Json).unwrap();
        let expected = r#"[
  {
    "key": "operon",
    "location": "1..20",
    "qualifiers": [
      [
        "db_xref",
        "REGULONDB:thrLABC"
      ]
    ]
  }
]
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_yaml_layout() {
        let text = serialize_features(&[thr()], OutputFormat::Yaml).unwrap();
        let expected = "\
- key: operon
  location: 1..20
  qualifiers:
  - - db_xref
    - REGULONDB:thrLABC
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_yaml_preserves_qualifier_order() {
        let text = serialize_features(&[ace()], OutputFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();

        let qualifiers = value[0]["qualifiers"].as_sequence().unwrap();
        assert_eq!(qualifiers[0][0].as_str(), Some("operon"));
        assert_eq!(qualifiers[1][0].as_str(), Some("db_xref"));
        assert_eq!(value[0]["location"].as_str(), Some("complement(100..200)"));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let features = vec![thr(), ace()];
        for format in [OutputFormat::Yaml, OutputFormat::Json] {
            let first = serialize_features(&features, format).unwrap();
            let second = serialize_features(&features, format).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(serialize_features(&[], OutputFormat::Json).unwrap(), "[]\n");
        assert_eq!(serialize_features(&[], OutputFormat::Yaml).unwrap(), "[]\n");
    }

    #[test]
    fn test_write_features() {
        let mut out = Vec::new();
        write_features(&mut out, &[thr()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["qualifiers"][0][1], "REGULONDB:thrLABC");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::from_name("YAML"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_name("yml"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_name("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("toml"), None);
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::default(), OutputFormat::Yaml);
    }
}
