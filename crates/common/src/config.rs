//! Application and per-run configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MoshError, MoshResult};

/// Mode used when none is requested.
pub const DEFAULT_MODE: &str = "void";

/// Default oversized-frame rejection threshold.
pub const DEFAULT_KILL_RATIO: f64 = 0.7;

/// Global application configuration (user defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults applied when a flag is not given on the command line.
    pub defaults: MoshDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default glitch parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MoshDefaults {
    /// Effect mode name.
    pub mode: String,

    /// Mode-specific repeat / period / window size.
    pub count: usize,

    /// Mode-specific index / stride / jitter amount.
    pub position: usize,

    /// Index audio chunks alongside video chunks.
    pub preserve_audio: bool,

    /// Pin the first video frame while cleaning.
    pub keep_first_frame: bool,

    /// Fraction of the largest frame above which frames are dropped.
    pub kill_ratio: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "avimosh=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for MoshDefaults {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            count: 1,
            position: 1,
            preserve_audio: false,
            keep_first_frame: true,
            kill_ratio: DEFAULT_KILL_RATIO,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> MoshResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> MoshResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("avimosh").join("config.json")
}

/// Everything one run needs, resolved from flags and defaults.
///
/// Built once by the caller and passed by reference into each stage.
#[derive(Debug, Clone, PartialEq)]
pub struct MoshConfig {
    /// Source container.
    pub input: PathBuf,

    /// Requested mode name, kept verbatim for output naming.
    pub mode: String,

    pub count: usize,

    pub position: usize,

    pub preserve_audio: bool,

    pub keep_first_frame: bool,

    pub kill_ratio: f64,

    /// Fixed seed for `random` and `jiggle`; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl MoshConfig {
    /// Config for `input` with built-in defaults.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self::with_defaults(input, &MoshDefaults::default())
    }

    /// Config for `input` seeded from user defaults.
    pub fn with_defaults(input: impl Into<PathBuf>, defaults: &MoshDefaults) -> Self {
        Self {
            input: input.into(),
            mode: defaults.mode.clone(),
            count: defaults.count,
            position: defaults.position,
            preserve_audio: defaults.preserve_audio,
            keep_first_frame: defaults.keep_first_frame,
            kill_ratio: defaults.kill_ratio,
            seed: None,
        }
    }

    /// Check the input path and numeric ranges before any I/O happens.
    pub fn validate(&self) -> MoshResult<()> {
        if !self.input.exists() {
            return Err(MoshError::FileNotFound {
                path: self.input.clone(),
            });
        }
        if !self.input.is_file() {
            return Err(MoshError::config(format!(
                "input {} is not a regular file",
                self.input.display()
            )));
        }
        if !(self.kill_ratio > 0.0 && self.kill_ratio <= 1.0) {
            return Err(MoshError::config(format!(
                "kill ratio must be in (0, 1], got {}",
                self.kill_ratio
            )));
        }
        self.check_mode_name()
    }

    /// The mode name becomes part of the output file name, so it may only
    /// hold ASCII letters, digits, `-` and `_`.
    fn check_mode_name(&self) -> MoshResult<()> {
        let valid = !self.mode.is_empty()
            && self
                .mode
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(MoshError::config(format!(
                "mode {:?} may only contain letters, digits, '-' and '_'",
                self.mode
            )))
        }
    }

    /// Output file beside the input: `<stem>-<mode>[-c<count>][-n<position>].<ext>`.
    pub fn output_path(&self) -> MoshResult<PathBuf> {
        self.check_mode_name()?;
        let stem = self
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                MoshError::config(format!("cannot name output for {}", self.input.display()))
            })?;
        let ext = self
            .input
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("avi");

        let mut name = format!("{stem}-{}", self.mode);
        if self.count > 1 {
            name.push_str(&format!("-c{}", self.count));
        }
        if self.position > 1 {
            name.push_str(&format!("-n{}", self.position));
        }
        name.push('.');
        name.push_str(ext);

        Ok(self.input.with_file_name(name))
    }
}
