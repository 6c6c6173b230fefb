//! RegulonDB operon table adapter
//!
//! Parses rows of `OperonSet.txt` into [`OperonRecord`]s and drives the
//! whole scan → parse → build → serialize conversion.
//!
//! Each data row carries eight tab-separated fields:
//!
//! | # | Field |
//! |---|-------|
//! | 0 | Operon name |
//! | 1 | Left position of the first gene |
//! | 2 | Right position of the last gene |
//! | 3 | DNA strand (`forward` / `reverse`) |
//! | 4 | Number of genes in the operon |
//! | 5 | Comma-separated gene names or Blattner numbers |
//! | 6 | Evidence supporting the operon's transcription units |
//! | 7 | Evidence confidence level (Confirmed, Strong, Weak) |

use crate::core::{
    Location, OperonError, ParseError, ParseResult, RecordScanner, Result, Row, ScannerConfig,
    Strand,
};
use crate::formats::feature::{Feature, FeatureBuilder, FeatureOptions};
use crate::formats::output::{write_features, OutputFormat};
use rayon::prelude::*;
use std::io::{BufRead, Write};

/// Number of fields in an operon row
pub const OPERON_FIELD_COUNT: usize = 8;

/// One operon definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperonRecord {
    pub name: String,
    pub left: u64,
    pub right: u64,
    pub strand: Strand,
    pub gene_count: usize,
    /// Always `gene_count` entries long
    pub gene_names: Vec<String>,
    pub evidence: String,
    pub confidence_level: String,
}

impl OperonRecord {
    /// Build a record from the fields of one row
    ///
    /// Fails without producing a partial record if the row does not have
    /// exactly [`OPERON_FIELD_COUNT`] fields, a coordinate or the gene
    /// count is not a non-negative integer, the strand token is unknown,
    /// or the gene name list disagrees with the gene count.
    pub fn from_fields(fields: &[&str]) -> ParseResult<Self> {
        if fields.len() != OPERON_FIELD_COUNT {
            return Err(ParseError::FieldCount {
                expected: OPERON_FIELD_COUNT,
                found: fields.len(),
            });
        }

        let left = parse_number(fields[1], "left")?;
        let right = parse_number(fields[2], "right")?;

        let strand = Strand::from_token(fields[3])
            .ok_or_else(|| ParseError::InvalidStrand(fields[3].to_string()))?;

        let gene_count = parse_number(fields[4], "gene_count")?;
        let gene_names: Vec<String> = fields[5].split(',').map(str::to_string).collect();
        if gene_names.len() != gene_count {
            return Err(ParseError::GeneCountMismatch {
                expected: gene_count,
                actual: gene_names.len(),
            });
        }

        Ok(Self {
            name: fields[0].to_string(),
            left,
            right,
            strand,
            gene_count,
            gene_names,
            evidence: fields[6].to_string(),
            confidence_level: fields[7].to_string(),
        })
    }

    pub fn location(&self) -> Location {
        Location::new(self.left, self.right, self.strand)
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, field: &'static str) -> ParseResult<T> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Parse a scanned row into an operon record
pub fn parse_operon(row: &Row<'_>) -> ParseResult<OperonRecord> {
    OperonRecord::from_fields(&row.to_vec())
}

/// Options for [`convert_operons`]
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Scanner layout; its `continue_on_error` also decides whether rows
    /// that fail to parse are skipped or abort the conversion
    pub scanner: ScannerConfig,
    pub feature: FeatureOptions,
    pub format: OutputFormat,
    /// Number of threads (1 = sequential)
    pub threads: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            scanner: ScannerConfig::operon_set(),
            feature: FeatureOptions::default(),
            format: OutputFormat::default(),
            threads: 1,
        }
    }
}

/// Conversion statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Data rows seen (comments and blank lines excluded)
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub comments: usize,
}

/// Convert an operon table into serialized features
///
/// All features are collected first and written to `writer` in one batch,
/// in input order. With `continue_on_error` unset, the first bad row (in
/// input order) is returned as an error and nothing is written.
///
/// # Arguments
/// * `reader` - Operon table source
/// * `writer` - Output sink
/// * `options` - Scanner, feature and output settings
///
/// # Returns
/// Conversion statistics
pub fn convert_operons<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    options: &ConvertOptions,
) -> Result<ConversionStats> {
    let mut scanner = RecordScanner::new(reader, options.scanner.clone());
    let builder = FeatureBuilder::new(options.feature.clone());
    let continue_on_error = options.scanner.continue_on_error;
    let mut stats = ConversionStats::default();

    let features = if options.threads <= 1 {
        let mut features = Vec::new();
        while scanner.advance() {
            stats.total += 1;
            if let Some(err) = scanner.error() {
                log::warn!("Skipping row: {}", err);
                stats.skipped += 1;
                continue;
            }

            let row = scanner.current()?;
            let result = parse_operon(&row).map(|record| builder.build(&record));
            accept(result, row.line_number(), continue_on_error, &mut features, &mut stats)?;
        }
        features
    } else {
        // Scanning stays sequential; owned rows are parsed in parallel
        let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
        while scanner.advance() {
            stats.total += 1;
            if let Some(err) = scanner.error() {
                log::warn!("Skipping row: {}", err);
                stats.skipped += 1;
                continue;
            }
            let row = scanner.current()?;
            rows.push((row.line_number(), row.to_owned_fields()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        let results: Vec<(usize, ParseResult<Feature>)> = pool.install(|| {
            rows.par_iter()
                .map(|(line, fields)| {
                    let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
                    let result = OperonRecord::from_fields(&fields).map(|r| builder.build(&r));
                    (*line, result)
                })
                .collect()
        });

        let mut features = Vec::with_capacity(results.len());
        for (line, result) in results {
            accept(result, line, continue_on_error, &mut features, &mut stats)?;
        }
        features
    };

    stats.comments = scanner.comment_lines();
    if let Some(err) = scanner.into_error() {
        return Err(err.into());
    }

    write_features(writer, &features, options.format)?;

    log::debug!(
        "Converted {} of {} operon rows ({} skipped, {} comment lines)",
        stats.success,
        stats.total,
        stats.skipped,
        stats.comments
    );
    Ok(stats)
}

/// Keep a built feature, or skip/abort on a parse failure
fn accept(
    result: ParseResult<Feature>,
    line: usize,
    continue_on_error: bool,
    features: &mut Vec<Feature>,
    stats: &mut ConversionStats,
) -> Result<()> {
    match result {
        Ok(feature) => {
            features.push(feature);
            stats.success += 1;
            Ok(())
        }
        Err(source) if continue_on_error => {
            log::warn!("Skipping line {}: {}", line, source);
            stats.skipped += 1;
            Ok(())
        }
        Err(source) => Err(OperonError::Row { line, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THR: &str = "thrLABC\t1\t20\tforward\t3\tthrA,thrB,thrC\tliterature\tConfirmed";

    fn fields(line: &str) -> Vec<&str> {
        line.split('\t').collect()
    }

    fn convert(data: &str, options: &ConvertOptions) -> Result<(ConversionStats, String)> {
        let mut out = Vec::new();
        let stats = convert_operons(data.as_bytes(), &mut out, options)?;
        Ok((stats, String::from_utf8(out).unwrap()))
    }

    fn lenient() -> ConvertOptions {
        ConvertOptions {
            scanner: ScannerConfig::operon_set().with_continue_on_error(true),
            format: OutputFormat::Json,
            ..ConvertOptions::default()
        }
    }

    #[test]
    fn test_parse_forward_operon() {
        let record = OperonRecord::from_fields(&fields(THR)).unwrap();

        assert_eq!(record.name, "thrLABC");
        assert_eq!(record.left, 1);
        assert_eq!(record.right, 20);
        assert_eq!(record.strand, Strand::Forward);
        assert_eq!(record.gene_count, 3);
        assert_eq!(record.gene_names, vec!["thrA", "thrB", "thrC"]);
        assert_eq!(record.evidence, "literature");
        assert_eq!(record.confidence_level, "Confirmed");
    }

    #[test]
    fn test_parse_reverse_operon() {
        let line = "aceBAK\t100\t200\treverse\t1\taceB\t[BPP]\tStrong";
        let record = OperonRecord::from_fields(&fields(line)).unwrap();

        assert_eq!(record.strand, Strand::Reverse);
        assert_eq!(record.location().to_string(), "complement(100..200)");
    }

    #[test]
    fn test_right_read_from_its_own_field() {
        let line = "op\t5\t9\tforward\t1\tg\te\tWeak";
        let record = OperonRecord::from_fields(&fields(line)).unwrap();
        assert_eq!((record.left, record.right), (5, 9));

        let line = "op\t5\tnine\tforward\t1\tg\te\tWeak";
        let err = OperonRecord::from_fields(&fields(line)).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber { field: "right", value: "nine".to_string() }
        );
    }

    #[test]
    fn test_invalid_left() {
        let line = "op\t-5\t9\tforward\t1\tg\te\tWeak";
        let err = OperonRecord::from_fields(&fields(line)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: "left", .. }));
    }

    #[test]
    fn test_invalid_gene_count() {
        let line = "op\t5\t9\tforward\tthree\tg\te\tWeak";
        let err = OperonRecord::from_fields(&fields(line)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: "gene_count", .. }));
    }

    #[test]
    fn test_invalid_strand() {
        let line = "op\t5\t9\tunknown\t1\tg\te\tWeak";
        let err = OperonRecord::from_fields(&fields(line)).unwrap_err();
        assert_eq!(err, ParseError::InvalidStrand("unknown".to_string()));

        let line = "op\t5\t9\tForward\t1\tg\te\tWeak";
        assert!(OperonRecord::from_fields(&fields(line)).is_err());
    }

    #[test]
    fn test_gene_count_mismatch() {
        let line = "op\t5\t9\tforward\t3\tg1,g2\te\tWeak";
        let err = OperonRecord::from_fields(&fields(line)).unwrap_err();
        assert_eq!(err, ParseError::GeneCountMismatch { expected: 3, actual: 2 });
    }

    #[test]
    fn test_empty_gene_list_counts_as_one_name() {
        let line = "op\t5\t9\tforward\t0\t\te\tWeak";
        let err = OperonRecord::from_fields(&fields(line)).unwrap_err();
        assert_eq!(err, ParseError::GeneCountMismatch { expected: 0, actual: 1 });
    }

    #[test]
    fn test_wrong_field_count() {
        let err = OperonRecord::from_fields(&["op", "1", "2"]).unwrap_err();
        assert_eq!(err, ParseError::FieldCount { expected: 8, found: 3 });
    }

    #[test]
    fn test_parse_scanned_row() {
        let mut scanner = RecordScanner::new(THR.as_bytes(), ScannerConfig::operon_set());
        assert!(scanner.advance());
        let row = scanner.current().unwrap();
        let record = parse_operon(&row).unwrap();
        assert_eq!(record.name, "thrLABC");
    }

    #[test]
    fn test_convert_end_to_end_json() {
        let data = format!("# RegulonDB operons\n{}\n", THR);
        let options = ConvertOptions { format: OutputFormat::Json, ..ConvertOptions::default() };
        let (stats, out) = convert(&data, &options).unwrap();

        let expected: serde_json::Value = serde_json::from_str(
            r#"[{"key":"operon","location":"1..20","qualifiers":[["db_xref","REGULONDB:thrLABC"]]}]"#,
        )
        .unwrap();
        let actual: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(
            stats,
            ConversionStats { total: 1, success: 1, skipped: 0, comments: 1 }
        );
    }

    #[test]
    fn test_convert_skips_bad_rows_when_lenient() {
        let data = format!(
            "{}\nbad\t1\t2\tunknown\t1\tg\te\tWeak\nshort\t1\t2\naceBAK\t100\t200\treverse\t1\taceB\te\tStrong\n",
            THR
        );
        let (stats, out) = convert(&data, &lenient()).unwrap();

        let actual: serde_json::Value = serde_json::from_str(&out).unwrap();
        let features = actual.as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["location"], "1..20");
        assert_eq!(features[1]["location"], "complement(100..200)");
        assert_eq!(stats.total, 4);
        assert_eq!(stats.success, 2);
        assert_eq!(stats.skipped, 2);
    }

    #[test]
    fn test_convert_strict_parse_error_writes_nothing() {
        let data = format!("{}\nbad\t1\t2\tunknown\t1\tg\te\tWeak\n", THR);
        let mut out = Vec::new();
        let err = convert_operons(data.as_bytes(), &mut out, &ConvertOptions::default())
            .unwrap_err();

        assert!(matches!(
            err,
            OperonError::Row { line: 2, source: ParseError::InvalidStrand(_) }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_convert_strict_structural_error() {
        let data = format!("{}\nshort\t1\t2\n", THR);
        let mut out = Vec::new();
        let err = convert_operons(data.as_bytes(), &mut out, &ConvertOptions::default())
            .unwrap_err();

        assert!(matches!(
            err,
            OperonError::Scan(crate::core::ScanError::FieldCount { line: 2, found: 3, .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_convert_parallel_preserves_order() {
        let mut data = String::new();
        for i in 0..200u64 {
            let strand = if i % 2 == 0 { "forward" } else { "reverse" };
            data.push_str(&format!("op{}\t{}\t{}\t{}\t1\tg{}\te\tWeak\n", i, i, i + 10, strand, i));
        }
        let sequential = convert(&data, &lenient()).unwrap();
        let parallel = convert(&data, &ConvertOptions { threads: 4, ..lenient() }).unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(parallel.0.success, 200);
    }

    #[test]
    fn test_convert_parallel_strict_reports_first_bad_row() {
        let data = format!(
            "{}\nbad1\t1\t2\tforward\t2\tg\te\tWeak\nbad2\t1\t2\tsideways\t1\tg\te\tWeak\n",
            THR
        );
        let options = ConvertOptions { threads: 2, ..ConvertOptions::default() };
        let mut out = Vec::new();
        let err = convert_operons(data.as_bytes(), &mut out, &options).unwrap_err();

        assert!(matches!(
            err,
            OperonError::Row { line: 2, source: ParseError::GeneCountMismatch { .. } }
        ));
    }

    #[test]
    fn test_convert_empty_input() {
        let (stats, out) = convert("# only comments\n", &lenient()).unwrap();
        assert_eq!(out, "[]\n");
        assert_eq!(stats.total, 0);
        assert_eq!(stats.comments, 1);
    }
}
