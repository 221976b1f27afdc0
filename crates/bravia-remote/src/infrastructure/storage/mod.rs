//! Persistent storage: the TOML configuration file.

pub mod config;

pub use config::{load_config_from, AppConfig, ConfigError};
