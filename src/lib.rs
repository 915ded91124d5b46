//! Hanzi script-variant identification and HSK grade statistics.
//!
//! A text is reduced to its hanzi, each hanzi is matched against the HSK 3.0
//! reference table, the text is classified as Simplified, Traditional or
//! Unknown, and per-grade counts are rolled up into a cumulative stats table.

pub mod aggregate;
pub mod config;
pub mod counter;
pub mod engine;
pub mod error;
pub mod filter;
pub mod grade;
pub mod partition;
pub mod stats;
pub mod variant;
pub mod vocabulary;

#[cfg(feature = "python")]
mod python;

pub use aggregate::{GradeCounts, GradeTally, HanziRow, HanziTable};
pub use config::{ClassifierConfig, EngineConfig};
pub use engine::{Analysis, HanziEngine, unique_outliers};
pub use error::{AnalysisError, ConfigError, GradeSelectionError, VocabularyError};
pub use filter::{filter_hanzi, is_hanzi};
pub use grade::{GradeLabel, HskGrade, parse_grade_selection};
pub use partition::{PartitionResult, partition_hanzi};
pub use stats::{StatsRow, StatsTable};
pub use variant::{CharacterVariant, identify_variant};
pub use vocabulary::{ReferenceEntry, ReferenceVocabulary, init_vocabulary, shared_vocabulary};

// =============================================================================
// Test fixtures
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::vocabulary::ReferenceVocabulary;

    pub const SAMPLE: &str = include_str!("../tests/data/hsk_sample.csv");

    pub fn sample_vocabulary() -> Arc<ReferenceVocabulary> {
        Arc::new(ReferenceVocabulary::from_reader(SAMPLE.as_bytes(), b',').unwrap())
    }
}
