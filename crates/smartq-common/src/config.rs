//! ---
//! sq_section: "01-core-functionality"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Shared primitives and utilities for the SmartQ runtime."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

fn default_input_path() -> PathBuf {
    PathBuf::from("sensor.csv")
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_results_file() -> String {
    "queue_smart.csv".to_owned()
}

fn default_suggestions_file() -> String {
    "suggestions.txt".to_owned()
}

fn default_screen_file() -> String {
    "screen_messages.txt".to_owned()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Primary configuration object for a SmartQ run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub arrivals: ArrivalConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
///
/// `source` is `None` when no file was found and built-in defaults apply.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &'static str = "SMARTQ_CONFIG";
    pub const DEFAULT_CONFIG_PATH: &'static str = "configs/smartq.toml";

    /// Load configuration, respecting the `SMARTQ_CONFIG` override.
    ///
    /// The environment override and an explicit path must point at a readable file. The
    /// default location is optional; when it is absent the built-in defaults are used.
    pub fn load_with_source(explicit: Option<&Path>) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        if let Some(path) = explicit {
            let config = Self::from_path(path)?;
            return Ok(LoadedAppConfig {
                config,
                source: Some(path.to_path_buf()),
            });
        }

        let default_path = Path::new(Self::DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            let config = Self::from_path(default_path)?;
            return Ok(LoadedAppConfig {
                config,
                source: Some(default_path.to_path_buf()),
            });
        }

        debug!("no configuration file found, using built-in defaults");
        Ok(LoadedAppConfig {
            config: AppConfig::default(),
            source: None,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.input.path.as_os_str().is_empty() {
            return Err(anyhow!("input path must not be empty"));
        }
        self.output.validate()
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

/// Locations of the three flat output files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_results_file")]
    pub results_file: String,
    #[serde(default = "default_suggestions_file")]
    pub suggestions_file: String,
    #[serde(default = "default_screen_file")]
    pub screen_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            results_file: default_results_file(),
            suggestions_file: default_suggestions_file(),
            screen_file: default_screen_file(),
        }
    }
}

impl OutputConfig {
    pub fn results_path(&self) -> PathBuf {
        self.directory.join(&self.results_file)
    }

    pub fn suggestions_path(&self) -> PathBuf {
        self.directory.join(&self.suggestions_file)
    }

    pub fn screen_path(&self) -> PathBuf {
        self.directory.join(&self.screen_file)
    }

    pub fn validate(&self) -> Result<()> {
        let names = [
            ("results_file", &self.results_file),
            ("suggestions_file", &self.suggestions_file),
            ("screen_file", &self.screen_file),
        ];
        let mut seen = HashSet::new();
        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(anyhow!("output {} must not be empty", key));
            }
            if !seen.insert(name.as_str()) {
                return Err(anyhow!(
                    "output {} '{}' collides with another output file",
                    key,
                    name
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArrivalConfig {
    #[serde(default)]
    pub negative_deltas: NegativeDeltaPolicy,
}

/// What to do when a cumulative sensor count goes backwards between two readings.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum NegativeDeltaPolicy {
    /// Abort reconstruction with an error naming the offending sensor.
    #[default]
    Reject,
    /// Emit no customers for the sensor and carry on from the new count.
    Ignore,
}

impl std::str::FromStr for NegativeDeltaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(NegativeDeltaPolicy::Reject),
            "ignore" => Ok(NegativeDeltaPolicy::Ignore),
            other => Err(format!("unknown negative delta policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Directory for the daily rolling log file. File logging is off when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            directory: None,
            file_prefix: None,
        }
    }
}
