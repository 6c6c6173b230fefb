//! Feature locations
//!
//! Renders coordinate pairs into the location syntax of genomic flat-file
//! formats: `left..right` on the forward strand and
//! `complement(left..right)` on the reverse strand.
//!
//! Coordinates are written exactly as given. No ordering between `left`
//! and `right` is enforced.

use std::fmt;

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl Strand {
    /// Parse a RegulonDB strand token (case-sensitive)
    ///
    /// # Examples
    /// ```
    /// use operon_features::core::Strand;
    /// assert_eq!(Strand::from_token("forward"), Some(Strand::Forward));
    /// assert_eq!(Strand::from_token("reverse"), Some(Strand::Reverse));
    /// assert_eq!(Strand::from_token("Forward"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "forward" => Some(Strand::Forward),
            "reverse" => Some(Strand::Reverse),
            _ => None,
        }
    }

    /// The token as it appears in the input table
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Forward => "forward",
            Strand::Reverse => "reverse",
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Strand::Forward)
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stranded coordinate range, rendered through [`fmt::Display`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub left: u64,
    pub right: u64,
    pub strand: Strand,
}

impl Location {
    pub fn new(left: u64, right: u64, strand: Strand) -> Self {
        Self { left, right, strand }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strand {
            Strand::Forward => write!(f, "{}..{}", self.left, self.right),
            Strand::Reverse => write!(f, "complement({}..{})", self.left, self.right),
        }
    }
}

/// Format a location expression
///
/// # Examples
/// ```
/// use operon_features::core::format_location;
/// assert_eq!(format_location(1, 20, true), "1..20");
/// assert_eq!(format_location(100, 200, false), "complement(100..200)");
/// ```
pub fn format_location(left: u64, right: u64, forward: bool) -> String {
    let strand = if forward { Strand::Forward } else { Strand::Reverse };
    Location::new(left, right, strand).to_string()
}
