//! StageKit Settings Crate
//!
//! Handles engine configuration files: loading, validation and persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::Config;
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
