//! SceneKit Settings Crate
//!
//! Handles editor configuration and settings persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, GizmoSettings, GridSettings, PlaybackSettings, ViewportSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
