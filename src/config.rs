//! Engine configuration.
//!
//! ```toml
//! offset_unit = "utf16"
//! verify_text = false
//! case_insensitive = true
//! word_bracketing = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use biasmark_core::{Error, OffsetUnit, Result};

/// Settings for one [`crate::Engine`].
///
/// Defaults: codepoint offsets, claimed ranges trusted whenever they are
/// in bounds, every fallback tier enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Unit of `startIndex`/`endIndex` on input and `start`/`end` on output.
    pub offset_unit: OffsetUnit,
    /// Treat an in-bounds claim as invalid when the covered text does not
    /// match the annotation text (compared trimmed, case-insensitively).
    pub verify_text: bool,
    /// Enable the case-insensitive fallback tier.
    pub case_insensitive: bool,
    /// Enable the first/last-word bracketing fallback tier.
    pub word_bracketing: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            offset_unit: OffsetUnit::Char,
            verify_text: false,
            case_insensitive: true,
            word_bracketing: true,
        }
    }
}

impl EngineConfig {
    /// Start a builder from the defaults.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Parse from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }
}

/// Builder for [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the offset unit.
    #[must_use]
    pub fn with_offset_unit(mut self, unit: OffsetUnit) -> Self {
        self.config.offset_unit = unit;
        self
    }

    /// Require claimed ranges to cover the annotation text.
    #[must_use]
    pub fn with_verify_text(mut self, enable: bool) -> Self {
        self.config.verify_text = enable;
        self
    }

    /// Enable or disable the case-insensitive tier.
    #[must_use]
    pub fn with_case_insensitive(mut self, enable: bool) -> Self {
        self.config.case_insensitive = enable;
        self
    }

    /// Enable or disable the word-bracketing tier.
    #[must_use]
    pub fn with_word_bracketing(mut self, enable: bool) -> Self {
        self.config.word_bracketing = enable;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}
