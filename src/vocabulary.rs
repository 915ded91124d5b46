//! HSK reference vocabulary.
//!
//! One row per graded character with its Simplified and Traditional forms.
//! The table is loaded once and never mutated; analyses share it through an
//! `Arc`. Neither column is unique on its own: 为 maps to both 為 and 爲, so
//! it appears on two rows.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use csv::StringRecord;

use crate::error::{VocabularyError, VocabularyResult};
use crate::grade::HskGrade;

/// Process-wide table for hosts that cannot thread a value through (Python)
static VOCABULARY: OnceLock<Arc<ReferenceVocabulary>> = OnceLock::new();

const SIMPLIFIED: &str = "Simplified";
const TRADITIONAL: &str = "Traditional";
const HSK_GRADE: &str = "HSK Grade";
const PINYIN: &str = "Pinyin";
const JD_RANK: &str = "JD Rank";
const JD_FREQUENCY: &str = "JD Frequency";
const JD_PERCENTILE: &str = "JD Percentile";

/// A single graded character.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceEntry {
    pub simplified: char,
    pub traditional: char,
    pub grade: HskGrade,
    pub pinyin: Option<String>,
    /// Jun Da modern corpus rank
    pub rank: Option<u32>,
    pub corpus_frequency: Option<u64>,
    pub percentile: Option<f64>,
}

impl ReferenceEntry {
    pub fn new(simplified: char, traditional: char, grade: HskGrade) -> Self {
        Self {
            simplified,
            traditional,
            grade,
            pinyin: None,
            rank: None,
            corpus_frequency: None,
            percentile: None,
        }
    }

    /// Character unchanged by simplification
    pub fn is_invariant(&self) -> bool {
        self.simplified == self.traditional
    }
}

#[derive(Debug)]
pub struct ReferenceVocabulary {
    entries: Vec<ReferenceEntry>,
    simplified: HashSet<char>,
    traditional: HashSet<char>,
}

impl ReferenceVocabulary {
    pub fn from_entries(entries: Vec<ReferenceEntry>) -> VocabularyResult<Self> {
        if entries.is_empty() {
            return Err(VocabularyError::Empty);
        }
        let simplified = entries.iter().map(|e| e.simplified).collect();
        let traditional = entries.iter().map(|e| e.traditional).collect();
        Ok(Self {
            entries,
            simplified,
            traditional,
        })
    }

    /// Load from a CSV file, or tab-separated when the extension is
    /// `.tsv` or `.txt`.
    pub fn from_path(path: &Path) -> VocabularyResult<Self> {
        let delimiter = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("txt") => b'\t',
            _ => b',',
        };
        let file = File::open(path)?;
        let vocabulary = Self::from_reader(BufReader::new(file), delimiter)?;
        log::info!("Loaded {} from {}", vocabulary.stats(), path.display());
        Ok(vocabulary)
    }

    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> VocabularyResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = Columns::locate(rdr.headers()?)?;

        let mut entries = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            entries.push(columns.entry(&record, line)?);
        }

        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_simplified(&self, zi: char) -> bool {
        self.simplified.contains(&zi)
    }

    pub fn contains_traditional(&self, zi: char) -> bool {
        self.traditional.contains(&zi)
    }

    /// Get stats about the loaded table
    pub fn stats(&self) -> String {
        format!(
            "reference vocabulary: rows={}, simplified={}, traditional={}",
            self.entries.len(),
            self.simplified.len(),
            self.traditional.len()
        )
    }
}

/// Header positions resolved once per file.
struct Columns {
    simplified: usize,
    traditional: usize,
    grade: usize,
    pinyin: Option<usize>,
    rank: Option<usize>,
    frequency: Option<usize>,
    percentile: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> VocabularyResult<Self> {
        // pandas writes utf_8_sig, so the first header may carry a BOM
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };
        let require = |name: &'static str| find(name).ok_or(VocabularyError::MissingColumn(name));

        Ok(Self {
            simplified: require(SIMPLIFIED)?,
            traditional: require(TRADITIONAL)?,
            grade: require(HSK_GRADE)?,
            pinyin: find(PINYIN),
            rank: find(JD_RANK),
            frequency: find(JD_FREQUENCY),
            percentile: find(JD_PERCENTILE),
        })
    }

    fn entry(&self, record: &StringRecord, line: u64) -> VocabularyResult<ReferenceEntry> {
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let grade_cell = cell(self.grade);
        let grade = HskGrade::parse(grade_cell).ok_or_else(|| VocabularyError::InvalidGrade {
            line,
            value: grade_cell.to_string(),
        })?;

        Ok(ReferenceEntry {
            simplified: single_char(cell(self.simplified), line, SIMPLIFIED)?,
            traditional: single_char(cell(self.traditional), line, TRADITIONAL)?,
            grade,
            pinyin: self
                .pinyin
                .map(cell)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            rank: optional(record, self.rank, line, JD_RANK)?,
            corpus_frequency: optional(record, self.frequency, line, JD_FREQUENCY)?,
            percentile: optional(record, self.percentile, line, JD_PERCENTILE)?,
        })
    }
}

fn single_char(value: &str, line: u64, column: &'static str) -> VocabularyResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(zi), None) => Ok(zi),
        _ => Err(VocabularyError::InvalidCharacter {
            line,
            column,
            value: value.to_string(),
        }),
    }
}

fn optional<T: FromStr>(
    record: &StringRecord,
    idx: Option<usize>,
    line: u64,
    column: &'static str,
) -> VocabularyResult<Option<T>> {
    let value = match idx.and_then(|i| record.get(i)) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };
    value
        .parse()
        .map(Some)
        .map_err(|_| VocabularyError::InvalidMetadata {
            line,
            column,
            value: value.to_string(),
        })
}

/// Load the process-wide vocabulary. Later calls keep the first table.
pub fn init_vocabulary(path: &Path) -> VocabularyResult<Arc<ReferenceVocabulary>> {
    if let Some(existing) = VOCABULARY.get() {
        log::warn!("Reference vocabulary already initialized");
        return Ok(Arc::clone(existing));
    }

    let loaded = Arc::new(ReferenceVocabulary::from_path(path)?);
    Ok(Arc::clone(VOCABULARY.get_or_init(|| loaded)))
}

/// The process-wide vocabulary, if `init_vocabulary` has succeeded.
pub fn shared_vocabulary() -> Option<Arc<ReferenceVocabulary>> {
    VOCABULARY.get().cloned()
}
