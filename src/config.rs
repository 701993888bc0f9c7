use crate::defaults;
use crate::error::{Result, SigntypeError};
use crate::gate::GateConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub gate: GateSettings,
    pub pipeline: PipelineSettings,
}

/// Classifier resource configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Path to the scoring model resource (safetensors blob).
    pub model: PathBuf,
    /// Path to the newline-delimited label table.
    pub labels: PathBuf,
}

/// Debounce gate configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateSettings {
    /// Minimum confidence (percent, 0-100) required to commit a symbol.
    pub min_confidence: f32,
    /// Minimum gap between any two commits, in milliseconds.
    pub cooldown_ms: u64,
}

/// Pipeline channel configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    pub frame_buffer: usize,
    pub display_buffer: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from(defaults::MODEL_PATH),
            labels: PathBuf::from(defaults::LABELS_PATH),
        }
    }
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            min_confidence: defaults::MIN_CONFIDENCE,
            cooldown_ms: defaults::COOLDOWN_MS,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            frame_buffer: defaults::FRAME_BUFFER,
            display_buffer: defaults::DISPLAY_BUFFER,
        }
    }
}

impl GateSettings {
    /// Converts the serializable settings into the gate's runtime config.
    pub fn to_gate_config(&self) -> GateConfig {
        GateConfig {
            min_confidence: self.min_confidence,
            cooldown: Duration::from_millis(self.cooldown_ms),
        }
    }
}

impl Config {
    /// Default configuration file location, relative to the working
    /// directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("signtype.toml")
    }

    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SigntypeError::ConfigFileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                SigntypeError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, or return defaults if it doesn't
    /// exist. Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(SigntypeError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SIGNTYPE_MODEL → classifier.model
    /// - SIGNTYPE_LABELS → classifier.labels
    /// - SIGNTYPE_MIN_CONFIDENCE → gate.min_confidence
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("SIGNTYPE_MODEL")
            && !model.is_empty()
        {
            self.classifier.model = PathBuf::from(model);
        }

        if let Ok(labels) = std::env::var("SIGNTYPE_LABELS")
            && !labels.is_empty()
        {
            self.classifier.labels = PathBuf::from(labels);
        }

        if let Ok(raw) = std::env::var("SIGNTYPE_MIN_CONFIDENCE")
            && let Ok(value) = raw.parse::<f32>()
        {
            self.gate.min_confidence = value;
        }

        self
    }

    /// Checks value ranges. Called by `load`; exposed for callers that
    /// mutate the config after loading.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.gate.min_confidence) {
            return Err(SigntypeError::ConfigInvalidValue {
                key: "gate.min_confidence".to_string(),
                message: "must be a percentage between 0 and 100".to_string(),
            });
        }
        if self.pipeline.frame_buffer == 0 {
            return Err(SigntypeError::ConfigInvalidValue {
                key: "pipeline.frame_buffer".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.pipeline.display_buffer == 0 {
            return Err(SigntypeError::ConfigInvalidValue {
                key: "pipeline.display_buffer".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
