//! Viewport and coordinate transformation for the scene view.
//!
//! Handles conversion between screen coordinates (pixels) and world
//! coordinates (scene space). Both spaces share orientation (+Y down), so the
//! mapping is a plain scale followed by a translation:
//!
//! ```text
//! screen = world * zoom + pan
//! world  = (screen - pan) / zoom
//! ```

use std::fmt;

use nalgebra::Matrix3;

use scenekit_core::constants::{MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_FACTOR};
use scenekit_settings::ViewportSettings;

use crate::math::{self, Point, Rect};

/// Camera applied to the scene container (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    min_zoom: f64,
    max_zoom: f64,
    wheel_zoom_factor: f64,
}

impl Viewport {
    /// Creates a viewport at 100% zoom with the world origin at the top-left
    /// corner of the canvas.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            wheel_zoom_factor: WHEEL_ZOOM_FACTOR,
        }
    }

    /// Creates a viewport using configured zoom limits.
    ///
    /// Limits that do not satisfy `0 < min < max` fall back to the defaults
    /// as a pair, and so does a wheel factor outside `(0, 1)`.
    pub fn with_settings(canvas_width: f64, canvas_height: f64, settings: &ViewportSettings) -> Self {
        let (min_zoom, max_zoom) = settings_zoom_limits(settings);
        let factor = settings.wheel_zoom_factor;
        let wheel_zoom_factor = if factor.is_finite() && factor > 0.0 && factor < 1.0 {
            factor
        } else {
            tracing::warn!("Invalid wheel zoom factor {}, using {}", factor, WHEEL_ZOOM_FACTOR);
            WHEEL_ZOOM_FACTOR
        };
        let mut viewport = Self {
            min_zoom,
            max_zoom,
            wheel_zoom_factor,
            ..Self::new(canvas_width, canvas_height)
        };
        viewport.set_zoom(1.0);
        viewport
    }

    /// Gets the zoom limits as `(min, max)`.
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Gets the canvas width.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the host resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the configured limits. Non-finite
    /// values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    /// Applies one wheel notch. Scrolling up (`delta_y < 0`) zooms in.
    ///
    /// `zoom += direction * factor * zoom`, clamped to the zoom limits.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y == 0.0 {
            return;
        }
        let direction = if delta_y < 0.0 { 1.0 } else { -1.0 };
        self.set_zoom(self.zoom + direction * self.wheel_zoom_factor * self.zoom);
    }

    /// Resets zoom to 1.0 (100%).
    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Gets the pan offset (X coordinate).
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Gets the pan offset (Y coordinate).
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts screen coordinates to world coordinates.
    pub fn screen_to_world(&self, screen_x: f64, screen_y: f64) -> Point {
        Point::new(
            (screen_x - self.pan_x) / self.zoom,
            (screen_y - self.pan_y) / self.zoom,
        )
    }

    /// Converts world coordinates to screen coordinates.
    pub fn world_to_screen(&self, world_x: f64, world_y: f64) -> Point {
        Point::new(
            world_x * self.zoom + self.pan_x,
            world_y * self.zoom + self.pan_y,
        )
    }

    /// World matrix of the scene container: `T(pan) * S(zoom)`.
    pub fn world_matrix(&self) -> Matrix3<f64> {
        math::translation(self.pan_x, self.pan_y) * math::scaling(self.zoom, self.zoom)
    }

    /// World-space rectangle currently covered by the canvas.
    pub fn visible_world_rect(&self) -> Rect {
        let top_left = self.screen_to_world(0.0, 0.0);
        let bottom_right = self.screen_to_world(self.canvas_width, self.canvas_height);
        Rect::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }

    /// Centers the viewport on a world coordinate.
    pub fn center_on(&mut self, world_x: f64, world_y: f64) {
        self.pan_x = self.canvas_width / 2.0 - world_x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - world_y * self.zoom;
    }

    /// Fits the given world rectangle into the canvas with padding.
    ///
    /// `padding` is the fraction of the canvas reserved on each side
    /// (0.0 - 0.5). Empty rectangles are ignored.
    pub fn fit_to_bounds(&mut self, bounds: Rect, padding: f64) {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }

        let padding_factor = 1.0 - padding.clamp(0.0, 0.49) * 2.0;
        let zoom_x = (self.canvas_width * padding_factor) / bounds.width;
        let zoom_y = (self.canvas_height * padding_factor) / bounds.height;

        // Use the smaller zoom to fit everything
        self.set_zoom(zoom_x.min(zoom_y));
        let center = bounds.center();
        self.center_on(center.x, center.y);
    }

    /// Resets viewport to default state (1:1 zoom, no pan).
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

fn settings_zoom_limits(settings: &ViewportSettings) -> (f64, f64) {
    let (min, max) = (settings.min_zoom, settings.max_zoom);
    if min.is_finite() && max.is_finite() && min > 0.0 && min < max {
        (min, max)
    } else {
        tracing::warn!("Invalid zoom limits {}..{}, using defaults", min, max);
        (MIN_ZOOM, MAX_ZOOM)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
