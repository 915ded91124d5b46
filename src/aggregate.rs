//! Grade aggregation.
//!
//! Attaches text counts to every reference row, then folds the rows into
//! per-grade tallies. The reference table is not injective between its
//! columns (为 -> 為, 爲), so a naive join counts one occurrence on several
//! rows. Rows are deduplicated before summing:
//!
//! - Simplified / Traditional: first row per distinct value of that column.
//! - Unknown: first row per distinct (Simplified, count) pair. Rows sharing
//!   a Simplified form but carrying different counts are all kept, which can
//!   over-count. Kept as is for compatibility with published figures.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::counter::count_chars;
use crate::grade::{HSK_GRADES, HskGrade};
use crate::partition::PartitionResult;
use crate::variant::CharacterVariant;
use crate::vocabulary::{ReferenceEntry, ReferenceVocabulary};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeTally {
    /// Distinct hanzi
    pub unique: u64,
    /// Occurrences, duplicates included
    pub count: u64,
}

/// Per-grade tallies plus the whole-text totals used as denominators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeCounts {
    /// Every filtered hanzi in the text, outliers included, undeduplicated
    pub total: GradeTally,
    grades: [GradeTally; HSK_GRADES],
}

impl GradeCounts {
    pub fn new(total: GradeTally, grades: [GradeTally; HSK_GRADES]) -> Self {
        Self { total, grades }
    }

    pub fn grade(&self, grade: HskGrade) -> GradeTally {
        self.grades[grade.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (HskGrade, GradeTally)> + '_ {
        HskGrade::all().map(|grade| (grade, self.grade(grade)))
    }

    /// Nothing to compute percentages against
    pub fn is_empty(&self) -> bool {
        self.total.unique == 0 || self.total.count == 0
    }
}

/// A reference row with its occurrence count in the analysed text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HanziRow<'a> {
    pub entry: &'a ReferenceEntry,
    pub count: u64,
}

/// Every reference row annotated with its count (0 when absent).
#[derive(Debug, Clone)]
pub struct HanziTable {
    vocabulary: Arc<ReferenceVocabulary>,
    counts: Vec<u64>,
}

impl HanziTable {
    pub fn rows(&self) -> impl Iterator<Item = HanziRow<'_>> + '_ {
        self.vocabulary
            .entries()
            .iter()
            .zip(self.counts.iter())
            .map(|(entry, &count)| HanziRow { entry, count })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Rows whose variant-appropriate form occurs in `found`. Traditional
    /// is the broader column, so it also serves Unknown texts.
    pub fn detected(&self, variant: CharacterVariant, found: &HashSet<char>) -> Vec<HanziRow<'_>> {
        self.rows()
            .filter(|row| match variant {
                CharacterVariant::Simplified => found.contains(&row.entry.simplified),
                CharacterVariant::Traditional | CharacterVariant::Unknown => {
                    found.contains(&row.entry.traditional)
                }
            })
            .collect()
    }

    pub fn in_grades(&self, grades: &BTreeSet<HskGrade>) -> Vec<HanziRow<'_>> {
        self.rows()
            .filter(|row| grades.contains(&row.entry.grade))
            .collect()
    }
}

/// Occurrence count for each reference row, keyed on the column the
/// variant selects.
pub fn annotate_counts(
    vocabulary: &ReferenceVocabulary,
    variant: CharacterVariant,
    partition: &PartitionResult,
) -> Vec<u64> {
    let entries = vocabulary.entries();

    match variant {
        CharacterVariant::Simplified => {
            let counts = count_chars(partition.simplified.iter().copied());
            entries
                .iter()
                .map(|e| counts.get(&e.simplified).copied().unwrap_or(0))
                .collect()
        }
        CharacterVariant::Traditional => {
            let counts = count_chars(partition.traditional.iter().copied());
            entries
                .iter()
                .map(|e| counts.get(&e.traditional).copied().unwrap_or(0))
                .collect()
        }
        CharacterVariant::Unknown => {
            // Characters common to both columns were already counted as Simplified
            let simplified: HashSet<char> = partition.simplified.iter().copied().collect();
            let simp_counts = count_chars(partition.simplified.iter().copied());
            let trad_counts = count_chars(
                partition
                    .traditional
                    .iter()
                    .copied()
                    .filter(|zi| !simplified.contains(zi)),
            );

            entries
                .iter()
                .map(|e| {
                    let simp = simp_counts.get(&e.simplified).copied().unwrap_or(0);
                    if e.is_invariant() {
                        simp
                    } else {
                        simp + trad_counts.get(&e.traditional).copied().unwrap_or(0)
                    }
                })
                .collect()
        }
    }
}

/// Which rows survive deduplication.
fn retained_rows(entries: &[ReferenceEntry], counts: &[u64], variant: CharacterVariant) -> Vec<bool> {
    match variant {
        CharacterVariant::Simplified => {
            let mut seen = HashSet::new();
            entries.iter().map(|e| seen.insert(e.simplified)).collect()
        }
        CharacterVariant::Traditional => {
            let mut seen = HashSet::new();
            entries.iter().map(|e| seen.insert(e.traditional)).collect()
        }
        CharacterVariant::Unknown => {
            let mut seen = HashSet::new();
            entries
                .iter()
                .zip(counts)
                .map(|(e, &count)| seen.insert((e.simplified, count)))
                .collect()
        }
    }
}

/// Fold annotated rows into per-grade tallies. `hanzi` is every filtered
/// character of the text and only feeds the whole-text totals.
pub fn grade_counts(
    vocabulary: &ReferenceVocabulary,
    variant: CharacterVariant,
    counts: &[u64],
    hanzi: &[char],
) -> GradeCounts {
    let entries = vocabulary.entries();
    let retained = retained_rows(entries, counts, variant);

    let mut grades = [GradeTally::default(); HSK_GRADES];
    for ((entry, &count), keep) in entries.iter().zip(counts).zip(retained) {
        if !keep || count == 0 {
            continue;
        }
        let tally = &mut grades[entry.grade.index()];
        tally.unique += 1;
        tally.count += count;
    }

    let distinct: HashSet<char> = hanzi.iter().copied().collect();
    let total = GradeTally {
        unique: distinct.len() as u64,
        count: hanzi.len() as u64,
    };

    GradeCounts::new(total, grades)
}

/// Annotate the reference table and roll it up by grade.
pub fn aggregate(
    vocabulary: &Arc<ReferenceVocabulary>,
    variant: CharacterVariant,
    partition: &PartitionResult,
    hanzi: &[char],
) -> (HanziTable, GradeCounts) {
    let counts = annotate_counts(vocabulary, variant, partition);
    let grades = grade_counts(vocabulary, variant, &counts, hanzi);
    let table = HanziTable {
        vocabulary: Arc::clone(vocabulary),
        counts,
    };
    (table, grades)
}
