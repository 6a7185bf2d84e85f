// Config - Application settings loaded from JSON
// Every field has a default, so partial files and missing files both work

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arranger::variations::GeneratorOptions;
use crate::playback::PlaybackOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub playback: PlaybackOptions,
    pub export: ExportConfig,
}

/// Defaults for variation batches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub variations: usize,
    pub octave: i32,
    /// Used when no artist supplies a tempo range
    pub tempo_range: (u32, u32),
    pub swing_range: (f64, f64),
    pub include_melody: bool,
    /// Fixed variation level for every arrangement in a batch
    pub variation_level: Option<f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            variations: 6,
            octave: 3,
            tempo_range: (70, 100),
            swing_range: (0.08, 0.22),
            include_melody: true,
            variation_level: None,
        }
    }
}

impl GeneratorConfig {
    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            count: self.variations,
            octave: self.octave,
            tempo_range: self.tempo_range,
            swing_range: self.swing_range,
            variation_level: self.variation_level,
            include_melody: self.include_melody,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where MIDI files go; `None` picks the user's audio directory
    pub directory: Option<PathBuf>,

    /// Append generation and export steps to `trace.jsonl` in the export directory
    pub trace: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            directory: None,
            trace: true,
        }
    }
}

impl ExportConfig {
    pub fn export_dir(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.clone(),
            None => dirs::audio_dir()
                .map(|dir| dir.join("quietstorm"))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl AppConfig {
    /// `quietstorm/config.json` under the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quietstorm").join("config.json"))
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Load from a file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::from_json_bytes(&fs::read(path)?)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
