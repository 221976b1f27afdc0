//! TOML-based configuration for the remote.
//!
//! The file is optional.  Every field has a default, so a missing file, an
//! empty file, or a file with only some sections all load fine:
//!
//! ```toml
//! [general]
//! log_level = "debug"
//!
//! [typing]
//! step_delay_ms = 150
//! confirm_margin_ms = 200
//! # max_steps_per_char = 64
//!
//! [commands]
//! directory_file = "commands.json"
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::application::type_text::Pacing;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub typing: TypingConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// On-screen keyboard typing settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TypingConfig {
    /// Delay after each arrow key, in milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    /// Extra delay after each Confirm, in milliseconds.
    #[serde(default = "default_confirm_margin_ms")]
    pub confirm_margin_ms: u64,
    /// Per-character step budget.  Absent means twice the grid perimeter.
    #[serde(default)]
    pub max_steps_per_char: Option<usize>,
}

/// Command directory settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CommandsConfig {
    /// Saved `getRemoteControllerInfo` response to resolve names from.
    #[serde(default)]
    pub directory_file: Option<PathBuf>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_step_delay_ms() -> u64 {
    150
}
fn default_confirm_margin_ms() -> u64 {
    200
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
            confirm_margin_ms: default_confirm_margin_ms(),
            max_steps_per_char: None,
        }
    }
}

impl TypingConfig {
    /// The delays as a [`Pacing`].
    pub fn pacing(&self) -> Pacing {
        Pacing {
            step_delay: Duration::from_millis(self.step_delay_ms),
            confirm_margin: Duration::from_millis(self.confirm_margin_ms),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
