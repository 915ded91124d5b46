//! Error types for vocabulary loading, configuration and analysis.

/// Problems with the reference vocabulary file. All of them are fatal:
/// no analysis runs against a partial table.
#[derive(thiserror::Error, Debug)]
pub enum VocabularyError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A required header is absent
    #[error("Reference vocabulary is missing column '{0}'")]
    MissingColumn(&'static str),

    /// A character cell holds zero or several characters
    #[error("Line {line}: column '{column}' must hold exactly one character, got '{value}'")]
    InvalidCharacter {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: unrecognised HSK grade '{value}'")]
    InvalidGrade { line: u64, value: String },

    #[error("Line {line}: invalid value '{value}' in column '{column}'")]
    InvalidMetadata {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Reference vocabulary has no rows")]
    Empty,
}

/// Outcomes of a single text analysis that are not a stats table.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Zero hanzi survived filtering, so percentages are undefined
    #[error("No hanzi found in text")]
    NoHanziFound,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("Classifier threshold must be in (0.5, 1.0], got {0}")]
    InvalidThreshold(f64),

    #[error("Classifier epsilon must be in [0, 1e-9], got {0}")]
    InvalidEpsilon(f64),
}

/// Errors from parsing a user grade selection such as "25".
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GradeSelectionError {
    #[error("No grades selected")]
    Empty,

    #[error("Enter digits from 1 to 9 only, got '{0}'")]
    InvalidDigit(char),
}

pub type VocabularyResult<T> = Result<T, VocabularyError>;
