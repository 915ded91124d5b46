//! Python bindings, built with `--features python`.

use std::path::Path;

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::EngineConfig;
use crate::engine::{Analysis, HanziEngine, unique_outliers};
use crate::error::{AnalysisError, VocabularyError};
use crate::vocabulary::{self, shared_vocabulary};

/// One stats table row as seen from Python
#[pyclass]
#[derive(Clone)]
struct StatsRowInfo {
    #[pyo3(get)]
    grade: String,
    #[pyo3(get)]
    unique: u64,
    #[pyo3(get)]
    unique_pct: u32,
    #[pyo3(get)]
    cumulative_unique: u64,
    #[pyo3(get)]
    cumulative_unique_pct: u32,
    #[pyo3(get)]
    count: u64,
    #[pyo3(get)]
    count_pct: u32,
    #[pyo3(get)]
    cumulative_count: u64,
    #[pyo3(get)]
    cumulative_count_pct: u32,
}

/// Analysis result returned from Rust
#[pyclass]
#[derive(Clone)]
struct HanziAnalysis {
    #[pyo3(get)]
    variant: String,
    #[pyo3(get)]
    message: String,
    #[pyo3(get)]
    total_hanzi: u64,
    #[pyo3(get)]
    unique_hanzi: u64,
    #[pyo3(get)]
    stats: Vec<StatsRowInfo>,
    /// Rendered stats table for terminal display
    #[pyo3(get)]
    stats_table: String,
    /// Distinct non-HSK hanzi sorted by code point
    #[pyo3(get)]
    outliers: Vec<String>,
    /// (simplified, traditional, grade, count) for every reference row
    #[pyo3(get)]
    hanzi_counts: Vec<(String, String, String, u64)>,
}

impl From<&Analysis> for HanziAnalysis {
    fn from(analysis: &Analysis) -> Self {
        let stats = analysis
            .stats
            .rows()
            .iter()
            .map(|row| StatsRowInfo {
                grade: row.label.to_string(),
                unique: row.unique,
                unique_pct: row.unique_pct,
                cumulative_unique: row.cumulative_unique,
                cumulative_unique_pct: row.cumulative_unique_pct,
                count: row.count,
                count_pct: row.count_pct,
                cumulative_count: row.cumulative_count,
                cumulative_count_pct: row.cumulative_count_pct,
            })
            .collect();

        let hanzi_counts = analysis
            .hanzi_table
            .rows()
            .map(|row| {
                (
                    row.entry.simplified.to_string(),
                    row.entry.traditional.to_string(),
                    row.entry.grade.to_string(),
                    row.count,
                )
            })
            .collect();

        Self {
            variant: analysis.variant.to_string(),
            message: analysis.variant.describe().to_string(),
            total_hanzi: analysis.grade_counts.total.count,
            unique_hanzi: analysis.grade_counts.total.unique,
            stats,
            stats_table: analysis.stats.to_string(),
            outliers: unique_outliers(analysis.outliers())
                .into_iter()
                .map(String::from)
                .collect(),
            hanzi_counts,
        }
    }
}

fn vocabulary_error(e: VocabularyError) -> PyErr {
    match e {
        VocabularyError::Io(io) => PyIOError::new_err(io.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

fn analysis_error(e: AnalysisError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn engine() -> PyResult<HanziEngine> {
    let vocabulary = shared_vocabulary().ok_or_else(|| {
        PyRuntimeError::new_err("Reference vocabulary not loaded, call init_vocabulary first")
    })?;
    HanziEngine::new(vocabulary, EngineConfig::default())
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))
}

/// Load the HSK reference table once for this process
/// Returns: number of reference rows
#[pyfunction]
fn init_vocabulary(path: String) -> PyResult<usize> {
    let vocabulary = vocabulary::init_vocabulary(Path::new(&path)).map_err(vocabulary_error)?;
    Ok(vocabulary.len())
}

/// Analyse a text already extracted from its source
#[pyfunction]
fn analyse_text(text: String) -> PyResult<HanziAnalysis> {
    let analysis = engine()?.analyse(&text).map_err(analysis_error)?;
    Ok(HanziAnalysis::from(&analysis))
}

/// Analyse a UTF-8 text file, reading it entirely in Rust
#[pyfunction]
fn analyse_file(file_path: String) -> PyResult<HanziAnalysis> {
    let content = std::fs::read_to_string(&file_path)
        .map_err(|e| PyIOError::new_err(format!("Failed to read {}: {}", file_path, e)))?;
    analyse_text(content)
}

/// Analyse several texts in parallel
/// Returns: one result per text, None where no hanzi were found
#[pyfunction]
fn analyse_batch(texts: Vec<String>) -> PyResult<Vec<Option<HanziAnalysis>>> {
    let results = engine()?.analyse_batch(&texts);
    Ok(results
        .iter()
        .map(|result| result.as_ref().ok().map(HanziAnalysis::from))
        .collect())
}

#[pymodule]
fn rust_hanzi_grade(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_vocabulary, m)?)?;
    m.add_function(wrap_pyfunction!(analyse_text, m)?)?;
    m.add_function(wrap_pyfunction!(analyse_file, m)?)?;
    m.add_function(wrap_pyfunction!(analyse_batch, m)?)?;
    m.add_class::<HanziAnalysis>()?;
    m.add_class::<StatsRowInfo>()?;
    Ok(())
}
