//! Delimited-record scanner
//!
//! Wraps any [`BufRead`] source and yields one [`Row`] per call to
//! [`RecordScanner::advance`]. Comment lines and blank lines are skipped, a
//! trailing `\n` or `\r\n` is stripped, and the remaining line is split on the
//! configured delimiter.
//!
//! The scanner reuses a single line buffer. A [`Row`] borrows that buffer,
//! so it cannot outlive the next `advance()`; call
//! [`Row::to_owned_fields`] to keep the data.
//!
//! # Error policy
//!
//! - End of input is not an error: `advance()` returns `false` and
//!   [`RecordScanner::error`] returns `None`.
//! - Row-scoped errors (wrong field count, invalid UTF-8) stop the scan
//!   unless `continue_on_error` is set, in which case `advance()` still
//!   returns `true` and the caller is expected to check `error()` and skip
//!   the row.
//! - I/O errors always stop the scan.
//!
//! # Example
//!
//! ```
//! use operon_features::core::{RecordScanner, ScannerConfig};
//!
//! let data = "# header\nthrLABC\t1\t20\n";
//! let config = ScannerConfig::default().with_fields_per_record(Some(3));
//! let mut scanner = RecordScanner::new(data.as_bytes(), config);
//!
//! assert!(scanner.advance());
//! let row = scanner.current().unwrap();
//! assert_eq!(row.get(0), Some("thrLABC"));
//! assert_eq!(row.line_number(), 2);
//!
//! assert!(!scanner.advance());
//! assert!(scanner.error().is_none());
//! ```

use crate::core::error::{ScanError, ScanResult};
use memchr::memchr_iter;
use std::io::BufRead;
use std::ops::Index;

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Field separator
    pub delimiter: char,
    /// Lines starting with this character are skipped
    pub comment: Option<char>,
    /// Exact number of fields every row must carry
    pub fields_per_record: Option<usize>,
    /// Keep scanning after row-scoped errors
    pub continue_on_error: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            comment: Some('#'),
            fields_per_record: None,
            continue_on_error: false,
        }
    }
}

impl ScannerConfig {
    /// Layout of the RegulonDB `OperonSet.txt` table: tab-separated,
    /// `#` comments, eight fields per row
    pub fn operon_set() -> Self {
        Self {
            fields_per_record: Some(crate::formats::operon::OPERON_FIELD_COUNT),
            ..Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_fields_per_record(mut self, fields: Option<usize>) -> Self {
        self.fields_per_record = fields;
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Exhausted,
    Halted,
}

/// Streaming scanner over delimited text
pub struct RecordScanner<R: BufRead> {
    reader: R,
    config: ScannerConfig,
    /// Current line, without its terminator
    line: String,
    /// Byte ranges of each field within `line`
    bounds: Vec<(usize, usize)>,
    has_row: bool,
    /// Physical lines consumed so far
    lines_read: usize,
    row_line: usize,
    comment_lines: usize,
    error: Option<ScanError>,
    state: State,
}

impl<R: BufRead> RecordScanner<R> {
    pub fn new(reader: R, config: ScannerConfig) -> Self {
        Self {
            reader,
            config,
            line: String::with_capacity(1024),
            bounds: Vec::with_capacity(16),
            has_row: false,
            lines_read: 0,
            row_line: 0,
            comment_lines: 0,
            error: None,
            state: State::Scanning,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Move to the next row
    ///
    /// Returns `false` once the input is exhausted, or when an error stopped
    /// the scan (see the module docs for the error policy).
    pub fn advance(&mut self) -> bool {
        if self.state != State::Scanning {
            return false;
        }

        self.error = None;
        self.has_row = false;

        match self.read_row() {
            Ok(true) => true,
            Ok(false) => {
                self.state = State::Exhausted;
                false
            }
            Err(err) => {
                let resumable = self.config.continue_on_error && err.is_row_scoped();
                self.error = Some(err);
                if !resumable {
                    self.state = State::Halted;
                }
                resumable
            }
        }
    }

    /// The row produced by the last `advance()`
    ///
    /// A row that failed the field-count check is still returned so that it
    /// can be reported. Returns [`ScanError::NoCurrentRecord`] before the
    /// first advance, at end of input, and after I/O or UTF-8 failures.
    pub fn current(&self) -> ScanResult<Row<'_>> {
        if !self.has_row {
            return Err(ScanError::NoCurrentRecord);
        }
        Ok(Row {
            line: &self.line,
            bounds: &self.bounds,
            line_number: self.row_line,
        })
    }

    /// The error raised by the last `advance()`, if any
    ///
    /// Never reports end of input.
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    /// Consume the scanner, returning its last error
    pub fn into_error(self) -> Option<ScanError> {
        self.error
    }

    /// 1-based line number of the most recently read line
    pub fn line_number(&self) -> usize {
        self.lines_read
    }

    /// Number of comment lines skipped so far
    pub fn comment_lines(&self) -> usize {
        self.comment_lines
    }

    /// Read lines until one yields a row; `Ok(false)` at end of input
    fn read_row(&mut self) -> ScanResult<bool> {
        loop {
            let mut raw = std::mem::take(&mut self.line).into_bytes();
            raw.clear();
            if self.reader.read_until(b'\n', &mut raw)? == 0 {
                return Ok(false);
            }
            self.lines_read += 1;

            if raw.last() == Some(&b'\n') {
                raw.pop();
                if raw.last() == Some(&b'\r') {
                    raw.pop();
                }
            }

            self.line = String::from_utf8(raw).map_err(|_| ScanError::InvalidUtf8 {
                line: self.lines_read,
            })?;

            if self.line.is_empty() {
                continue;
            }
            if let Some(prefix) = self.config.comment {
                if self.line.starts_with(prefix) {
                    self.comment_lines += 1;
                    continue;
                }
            }

            self.split_fields();
            self.has_row = true;
            self.row_line = self.lines_read;

            if let Some(expected) = self.config.fields_per_record {
                if self.bounds.len() != expected {
                    return Err(ScanError::FieldCount {
                        line: self.lines_read,
                        expected,
                        found: self.bounds.len(),
                    });
                }
            }
            return Ok(true);
        }
    }

    fn split_fields(&mut self) {
        self.bounds.clear();
        let delimiter = self.config.delimiter;
        let mut start = 0;

        if delimiter.is_ascii() {
            for pos in memchr_iter(delimiter as u8, self.line.as_bytes()) {
                self.bounds.push((start, pos));
                start = pos + 1;
            }
        } else {
            for (pos, _) in self.line.match_indices(delimiter) {
                self.bounds.push((start, pos));
                start = pos + delimiter.len_utf8();
            }
        }
        self.bounds.push((start, self.line.len()));
    }
}

/// One scanned row, borrowed from the scanner's buffer
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    line: &'a str,
    bounds: &'a [(usize, usize)],
    line_number: usize,
}

impl<'a> Row<'a> {
    /// Number of fields
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&'a str> {
        let line = self.line;
        self.bounds.get(idx).map(|&(start, end)| &line[start..end])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let (line, bounds) = (self.line, self.bounds);
        bounds.iter().map(move |&(start, end)| &line[start..end])
    }

    pub fn to_vec(&self) -> Vec<&'a str> {
        self.iter().collect()
    }

    /// Copy the fields out of the scanner's buffer
    pub fn to_owned_fields(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    /// 1-based source line of this row
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The whole line, delimiters included
    pub fn as_line(&self) -> &'a str {
        self.line
    }
}

impl Index<usize> for Row<'_> {
    type Output = str;

    fn index(&self, idx: usize) -> &str {
        let (start, end) = self.bounds[idx];
        &self.line[start..end]
    }
}
