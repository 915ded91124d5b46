//! HSK grade domain.
//!
//! Internally grades are the integers 1..=7, where 7 stands for the merged
//! HSK7-9 band. Bracketed labels such as `[7-9]` and `[10+]` only appear
//! through the `Display` impls used at the presentation boundary.

use std::collections::BTreeSet;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::GradeSelectionError;

/// Number of HSK bands tracked (HSK7-9 counts as one).
pub const HSK_GRADES: usize = 7;

lazy_static! {
    // "3", "[3]", "7-9", "[7-9]", "HSK 5"
    static ref GRADE_CELL: Regex =
        Regex::new(r"^\[?\s*(?:HSK\s*)?([1-9])(?:\s*-\s*([1-9]))?\s*\]?$").unwrap();
}

/// A single HSK band in `1..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HskGrade(u8);

impl HskGrade {
    pub const MIN: HskGrade = HskGrade(1);
    pub const MAX: HskGrade = HskGrade(HSK_GRADES as u8);

    /// Grade from an official HSK level; 8 and 9 fold into the 7-9 band.
    pub fn new(level: u8) -> Option<Self> {
        match level {
            1..=6 => Some(HskGrade(level)),
            7..=9 => Some(HskGrade::MAX),
            _ => None,
        }
    }

    /// Parse a grade cell from the reference dataset.
    pub fn parse(cell: &str) -> Option<Self> {
        let caps = GRADE_CELL.captures(cell.trim())?;
        let start: u8 = caps[1].parse().ok()?;
        match caps.get(2) {
            None => HskGrade::new(start),
            // The only range the dataset uses is the merged upper band
            Some(end) if start == 7 && end.as_str() == "9" => Some(HskGrade::MAX),
            Some(_) => None,
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position, for indexing per-grade arrays.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = HskGrade> {
        (1..=HSK_GRADES as u8).map(HskGrade)
    }
}

impl fmt::Display for HskGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == HskGrade::MAX {
            write!(f, "[7-9]")
        } else {
            write!(f, "[{}]", self.0)
        }
    }
}

/// Row label of the stats table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeLabel {
    Hsk(HskGrade),
    /// Hanzi beyond the HSK7-9 band, including characters of the other variant
    BeyondHsk,
}

impl fmt::Display for GradeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeLabel::Hsk(grade) => grade.fmt(f),
            GradeLabel::BeyondHsk => write!(f, "[10+]"),
        }
    }
}

/// Parse a custom grade selection such as `"25"` or `"52"`.
///
/// Digits may come in any order and repeat; 8 and 9 select the 7-9 band.
pub fn parse_grade_selection(selection: &str) -> Result<BTreeSet<HskGrade>, GradeSelectionError> {
    let selection = selection.trim();
    if selection.is_empty() {
        return Err(GradeSelectionError::Empty);
    }

    selection
        .chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|d| HskGrade::new(d as u8))
                .ok_or(GradeSelectionError::InvalidDigit(c))
        })
        .collect()
}
