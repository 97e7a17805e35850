//! Application configuration module.
//!
//! Manages the TOML config file holding the TMDB connection settings
//! and UI tuning.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TOKEN_ENV_VAR, UiConfig};
pub use paths::{resolve_config_path, resolve_log_path};
