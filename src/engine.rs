//! Analysis pipeline: filter -> partition -> classify -> count -> aggregate -> stats.

use std::collections::BTreeSet;
use std::sync::Arc;

use rayon::prelude::*;

use crate::aggregate::{GradeCounts, HanziTable, aggregate};
use crate::config::EngineConfig;
use crate::error::{AnalysisError, ConfigError};
use crate::filter::{filter_hanzi, normalize};
use crate::partition::{PartitionResult, partition_hanzi};
use crate::stats::StatsTable;
use crate::variant::{CharacterVariant, identify_variant};
use crate::vocabulary::ReferenceVocabulary;

/// Everything produced for one text.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub variant: CharacterVariant,
    /// Every filtered hanzi, in order, with duplicates
    pub hanzi: Vec<char>,
    pub partition: PartitionResult,
    pub hanzi_table: HanziTable,
    pub grade_counts: GradeCounts,
    pub stats: StatsTable,
}

impl Analysis {
    /// Hanzi that matched no reference entry, with duplicates.
    pub fn outliers(&self) -> &[char] {
        &self.partition.outliers
    }
}

/// Distinct outliers in code point order.
pub fn unique_outliers(outliers: &[char]) -> Vec<char> {
    outliers
        .iter()
        .copied()
        .collect::<BTreeSet<char>>()
        .into_iter()
        .collect()
}

/// Stateless apart from the shared, read-only reference table.
#[derive(Debug, Clone)]
pub struct HanziEngine {
    vocabulary: Arc<ReferenceVocabulary>,
    config: EngineConfig,
}

impl HanziEngine {
    /// Fails when `config` does not validate.
    pub fn new(vocabulary: Arc<ReferenceVocabulary>, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { vocabulary, config })
    }

    pub fn vocabulary(&self) -> &Arc<ReferenceVocabulary> {
        &self.vocabulary
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn analyse(&self, text: &str) -> Result<Analysis, AnalysisError> {
        let hanzi: Vec<char> = if self.config.normalize_compatibility {
            filter_hanzi(&normalize(text)).collect()
        } else {
            filter_hanzi(text).collect()
        };

        let partition = partition_hanzi(hanzi.iter().copied(), &self.vocabulary);
        let variant = identify_variant(
            &partition.simplified,
            &partition.traditional,
            &self.config.classifier,
        );
        log::debug!(
            "{} hanzi ({} simplified, {} traditional, {} outliers), variant {}",
            hanzi.len(),
            partition.simplified.len(),
            partition.traditional.len(),
            partition.outliers.len(),
            variant
        );

        let (hanzi_table, grade_counts) = aggregate(&self.vocabulary, variant, &partition, &hanzi);
        let stats = StatsTable::compute(&grade_counts)?;

        Ok(Analysis {
            variant,
            hanzi,
            partition,
            hanzi_table,
            grade_counts,
            stats,
        })
    }

    /// Analyse independent texts in parallel. Results keep input order.
    pub fn analyse_batch<S>(&self, texts: &[S]) -> Vec<Result<Analysis, AnalysisError>>
    where
        S: AsRef<str> + Sync,
    {
        texts.par_iter().map(|text| self.analyse(text.as_ref())).collect()
    }
}
