//! Editor configuration
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Grid (cell size, snapping, visibility)
//! - Gizmo metrics (screen-space paddings and handle size)
//! - Viewport (zoom limits and wheel step)
//! - Playback (reference frame rate)

use scenekit_core::constants::{
    DEFAULT_GRID_SIZE, GIZMO_HANDLE_SIZE, GIZMO_HIT_TOLERANCE, GIZMO_PADDING,
    GIZMO_ROTATION_PADDING, MAX_ZOOM, MIN_ZOOM, REFERENCE_FRAME_RATE, WHEEL_ZOOM_FACTOR,
};
use scenekit_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Horizontal cell size in scene units
    pub size_x: f64,
    /// Vertical cell size in scene units
    pub size_y: f64,
    /// Quantize move-handle drags to the grid
    pub snap_enabled: bool,
    /// Draw the background grid
    pub visible: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size_x: DEFAULT_GRID_SIZE,
            size_y: DEFAULT_GRID_SIZE,
            snap_enabled: false,
            visible: true,
        }
    }
}

/// Gizmo metrics, all in screen pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GizmoSettings {
    /// Gap between the outline and the scale handles
    pub padding: f64,
    /// Distance of the rotate handle above the outline
    pub rotation_padding: f64,
    /// Edge length of a handle marker
    pub handle_size: f64,
    /// Extra hit-test slack around each marker
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: f64,
}

fn default_hit_tolerance() -> f64 {
    GIZMO_HIT_TOLERANCE
}

impl Default for GizmoSettings {
    fn default() -> Self {
        Self {
            padding: GIZMO_PADDING,
            rotation_padding: GIZMO_ROTATION_PADDING,
            handle_size: GIZMO_HANDLE_SIZE,
            hit_tolerance: GIZMO_HIT_TOLERANCE,
        }
    }
}

/// Camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Smallest allowed zoom
    pub min_zoom: f64,
    /// Largest allowed zoom
    pub max_zoom: f64,
    /// Relative zoom change per wheel notch
    pub wheel_zoom_factor: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            wheel_zoom_factor: WHEEL_ZOOM_FACTOR,
        }
    }
}

/// Playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Frame rate that one "frame unit" of entity behavior refers to
    pub reference_frame_rate: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            reference_frame_rate: REFERENCE_FRAME_RATE,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSettings,
    /// Gizmo metrics
    #[serde(default)]
    pub gizmo: GizmoSettings,
    /// Camera settings
    #[serde(default)]
    pub viewport: ViewportSettings,
    /// Playback settings
    #[serde(default)]
    pub playback: PlaybackSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(Error::other("Config file must be .json or .toml"));
        };

        config.validate()?;
        tracing::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::other("Config file must be .json or .toml"));
        };

        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.grid.size_x) || !positive(self.grid.size_y) {
            return Err(Error::other("Grid cell size must be > 0"));
        }

        if !positive(self.gizmo.handle_size) {
            return Err(Error::other("Gizmo handle size must be > 0"));
        }

        if self.gizmo.padding < 0.0
            || self.gizmo.rotation_padding < 0.0
            || self.gizmo.hit_tolerance < 0.0
        {
            return Err(Error::other("Gizmo paddings must be >= 0"));
        }

        if self.gizmo.rotation_padding < self.gizmo.padding {
            return Err(Error::other(
                "Gizmo rotation padding must not be smaller than the scale padding",
            ));
        }

        if !positive(self.viewport.min_zoom) || self.viewport.max_zoom <= self.viewport.min_zoom
        {
            return Err(Error::other("Zoom limits must satisfy 0 < min < max"));
        }

        if !positive(self.viewport.wheel_zoom_factor) || self.viewport.wheel_zoom_factor >= 1.0 {
            return Err(Error::other("Wheel zoom factor must be in (0, 1)"));
        }

        if !positive(self.playback.reference_frame_rate) {
            return Err(Error::other("Reference frame rate must be > 0"));
        }

        Ok(())
    }

    /// Merge another config into this one (keeps existing values for sections
    /// that are still at their defaults in `other`)
    pub fn merge(&mut self, other: &Config) {
        if other.grid != GridSettings::default() {
            self.grid = other.grid.clone();
        }
        if other.gizmo != GizmoSettings::default() {
            self.gizmo = other.gizmo.clone();
        }
        if other.viewport != ViewportSettings::default() {
            self.viewport = other.viewport.clone();
        }
        if other.playback != PlaybackSettings::default() {
            self.playback = other.playback.clone();
        }
    }
}
