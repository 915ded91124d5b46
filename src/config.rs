//! Engine configuration.
//!
//! Everything has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! normalize_compatibility = true
//!
//! [classifier]
//! threshold = 0.90
//! epsilon = 1e-10
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Share of exclusively-Simplified evidence needed to call a text Simplified.
pub const DEFAULT_THRESHOLD: f64 = 0.90;
/// Tolerance for float rounding at the exact threshold.
pub const DEFAULT_EPSILON: f64 = 1e-10;

const MAX_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub threshold: f64,
    pub epsilon: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN fails both comparisons
        if !(self.threshold > 0.5 && self.threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if !(self.epsilon >= 0.0 && self.epsilon <= MAX_EPSILON) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }

    /// Lowest ratio still classified as Simplified.
    pub fn simplified_bound(&self) -> f64 {
        self.threshold - self.epsilon
    }

    /// Highest ratio still classified as Traditional.
    pub fn traditional_bound(&self) -> f64 {
        1.0 - self.threshold + self.epsilon
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    /// NFC-normalise input so CJK compatibility ideographs reach the filter
    /// as their unified forms
    pub normalize_compatibility: bool,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classifier.validate()
    }
}
