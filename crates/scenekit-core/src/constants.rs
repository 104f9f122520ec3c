//! Shared editor constants.
//!
//! Screen-space metrics are in pixels and are divided by the camera zoom
//! before they are applied in scene space.

/// Default grid cell size (both axes), in scene units.
pub const DEFAULT_GRID_SIZE: f64 = 50.0;

/// Gap between the outline and the scale handles, in screen pixels.
pub const GIZMO_PADDING: f64 = 5.0;

/// Distance of the rotate handle above the outline, in screen pixels.
pub const GIZMO_ROTATION_PADDING: f64 = 20.0;

/// Edge length of a handle marker, in screen pixels.
pub const GIZMO_HANDLE_SIZE: f64 = 8.0;

/// Extra slack around a handle marker when hit testing, in screen pixels.
pub const GIZMO_HIT_TOLERANCE: f64 = 2.0;

/// Outline and lever stroke width, in screen pixels.
pub const GIZMO_STROKE_WIDTH: f64 = 1.0;

/// Lower zoom bound of the scene camera.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound of the scene camera.
pub const MAX_ZOOM: f64 = 50.0;

/// Relative zoom step applied per wheel notch.
pub const WHEEL_ZOOM_FACTOR: f64 = 0.1;

/// Reference frame rate used to express frame deltas in frame units.
pub const REFERENCE_FRAME_RATE: f64 = 60.0;

/// Tolerance used when comparing transform values.
pub const EPSILON: f64 = 1e-9;
