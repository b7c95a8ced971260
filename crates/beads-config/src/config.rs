//! Configuration types and loading for the wave tools.
//!
//! The main entry point is [`WaveToolConfig`], read from
//! `.beads/config.yaml` by [`load_config`]. Values are layered: built-in
//! defaults, then the YAML file, then `BDW_`-prefixed environment variables
//! (nested keys separated by `__`, e.g. `BDW_WAVES__EXPANDED=5`).

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Name of the config file inside `.beads/`.
pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "BDW_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The layered configuration could not be extracted.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] Box<figment::Error>),

    /// The configuration could not be serialised back to YAML.
    #[error("failed to write config file: {0}")]
    WriteError(#[from] serde_yaml::Error),

    /// An edit needs a `.beads/` directory and none was found.
    #[error("no .beads directory found (pass --beads-dir or run from a beads project)")]
    BeadsDirNotFound,

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// The `waves:` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavesConfig {
    /// Number of leading waves listed bead by bead in text output.
    /// Later waves are summarised by count.
    #[serde(default = "default_expanded")]
    pub expanded: usize,

    /// Label the first two waves "Now" and "Next".
    #[serde(default = "default_true")]
    pub labels: bool,

    /// Default input file, relative to `.beads/`.
    #[serde(default = "default_input")]
    pub input: String,
}

impl Default for WavesConfig {
    fn default() -> Self {
        Self {
            expanded: default_expanded(),
            labels: true,
            input: default_input(),
        }
    }
}

fn default_expanded() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_input() -> String {
    "issues.jsonl".to_string()
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WaveToolConfig {
    /// Emit JSON by default.
    #[serde(default)]
    pub json: bool,

    #[serde(default)]
    pub waves: WavesConfig,
}

impl WaveToolConfig {
    /// Dotted keys accepted by [`get`](Self::get) and [`set`](Self::set).
    pub const KEYS: [&'static str; 4] = ["json", "waves.expanded", "waves.labels", "waves.input"];

    /// Returns the value of a dotted key as a string.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "json" => Some(self.json.to_string()),
            "waves.expanded" => Some(self.waves.expanded.to_string()),
            "waves.labels" => Some(self.waves.labels.to_string()),
            "waves.input" => Some(self.waves.input.clone()),
            _ => None,
        }
    }

    /// Sets a dotted key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: key.to_string(),
            reason,
        };
        match key {
            "json" => self.json = parse_bool(value).map_err(invalid)?,
            "waves.labels" => self.waves.labels = parse_bool(value).map_err(invalid)?,
            "waves.expanded" => {
                self.waves.expanded = value
                    .parse()
                    .map_err(|_| invalid(format!("expected a non-negative integer, got '{value}'")))?;
            }
            "waves.input" => self.waves.input = value.to_string(),
            _ => {
                return Err(invalid(format!(
                    "unknown key (expected one of: {})",
                    Self::KEYS.join(", ")
                )));
            }
        }
        self.validate()
    }

    /// Checks values that deserialise fine but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.waves.input.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "waves.input".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Loads configuration for the project rooted at `beads_dir`.
///
/// A missing or empty `config.yaml` yields defaults (plus env overrides).
pub fn load_config(beads_dir: &Path) -> Result<WaveToolConfig> {
    let content = read_config_file(beads_dir)?;

    let config = layered(&content)
        .merge(env())
        .extract::<WaveToolConfig>()
        .map_err(Box::new)?;
    config.validate()?;
    Ok(config)
}

/// Configuration from defaults and environment only (no project found).
pub fn load_env_config() -> Result<WaveToolConfig> {
    let config = layered("")
        .merge(env())
        .extract::<WaveToolConfig>()
        .map_err(Box::new)?;
    config.validate()?;
    Ok(config)
}

/// Loads only what `config.yaml` says on top of the defaults, ignoring the
/// environment. This is the base for edits written back to disk.
pub fn load_file_config(beads_dir: &Path) -> Result<WaveToolConfig> {
    let content = read_config_file(beads_dir)?;
    let config = layered(&content)
        .extract::<WaveToolConfig>()
        .map_err(Box::new)?;
    config.validate()?;
    Ok(config)
}

fn read_config_file(beads_dir: &Path) -> Result<String> {
    let config_path = beads_dir.join(CONFIG_FILE);
    if config_path.is_file() {
        Ok(std::fs::read_to_string(&config_path)?)
    } else {
        Ok(String::new())
    }
}

fn layered(yaml: &str) -> Figment {
    let figment = Figment::from(Serialized::defaults(WaveToolConfig::default()));
    // An empty file is valid and yields default config.
    if yaml.trim().is_empty() {
        figment
    } else {
        figment.merge(Yaml::string(yaml))
    }
}

fn env() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("expected true or false, got '{other}'")),
    }
}

/// Writes `config` to `beads_dir/config.yaml`, creating the directory.
pub fn save_config(beads_dir: &Path, config: &WaveToolConfig) -> Result<()> {
    std::fs::create_dir_all(beads_dir)?;

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(beads_dir.join(CONFIG_FILE), yaml)?;
    Ok(())
}

/// Sets one key in `beads_dir/config.yaml` and returns the file's new
/// contents. Environment overrides are not written back.
pub fn set_config_value(beads_dir: &Path, key: &str, value: &str) -> Result<WaveToolConfig> {
    let mut config = load_file_config(beads_dir)?;
    config.set(key, value)?;
    save_config(beads_dir, &config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
