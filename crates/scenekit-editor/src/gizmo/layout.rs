//! Gizmo geometry in overlay-local space.
//!
//! The overlay sits at the target's position with the target's rotation, so
//! overlay-local space is the target's space with scale applied and the pivot
//! at the origin. All screen-pixel metrics are multiplied by the inverse
//! camera scale so they keep a constant on-screen size.

use scenekit_settings::GizmoSettings;

use super::handle::HandleKind;
use crate::math::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct GizmoLayout {
    /// Scaled, pivot-corrected outline of the target.
    pub outline: Rect,
    /// Lever from the top scale handle up to the rotate handle.
    pub lever: (Point, Point),
    /// Marker edge length in overlay units.
    pub marker_size: f64,
    /// Outline and lever stroke width in overlay units.
    pub stroke_width: f64,
    /// Extra hit slack around markers in overlay units.
    pub hit_tolerance: f64,
    handles: [Point; 10],
}

impl GizmoLayout {
    /// Lays out the overlay for a target with the given unscaled bounds,
    /// pivot and scale.
    pub fn compute(
        bounds: Rect,
        pivot: Point,
        scale_x: f64,
        scale_y: f64,
        inverse_scale: f64,
        settings: &GizmoSettings,
    ) -> Self {
        let x = (bounds.x - pivot.x) * scale_x;
        let y = (bounds.y - pivot.y) * scale_y;
        let w = bounds.width * scale_x;
        let h = bounds.height * scale_y;

        let p = settings.padding * inverse_scale;
        let rp = settings.rotation_padding * inverse_scale;

        let top = Point::new(x + w / 2.0, y - p);
        let rotate = Point::new(x + w / 2.0, y - rp);

        let handles = [
            Point::new(x + w / 2.0, y + h / 2.0), // Move
            Point::new(x - p, y - p),             // ScaleTopLeft
            top,                                  // ScaleTop
            Point::new(x + w + p, y - p),         // ScaleTopRight
            Point::new(x + w + p, y + h / 2.0),   // ScaleRight
            Point::new(x + w + p, y + h + p),     // ScaleBottomRight
            Point::new(x + w / 2.0, y + h + p),   // ScaleBottom
            Point::new(x - p, y + h + p),         // ScaleBottomLeft
            Point::new(x - p, y + h / 2.0),       // ScaleLeft
            rotate,                               // Rotate
        ];

        Self {
            outline: Rect::new(x, y, w, h),
            lever: (top, rotate),
            marker_size: settings.handle_size * inverse_scale,
            stroke_width: scenekit_core::constants::GIZMO_STROKE_WIDTH * inverse_scale,
            hit_tolerance: settings.hit_tolerance * inverse_scale,
            handles,
        }
    }

    pub fn handle_position(&self, kind: HandleKind) -> Point {
        self.handles[kind.index()]
    }

    /// Handle centers in [`HandleKind::ALL`] order.
    pub fn handles(&self) -> impl Iterator<Item = (HandleKind, Point)> + '_ {
        HandleKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.handle_position(kind)))
    }

    fn hits_marker(&self, kind: HandleKind, local: Point) -> bool {
        let center = self.handle_position(kind);
        let reach = self.marker_size / 2.0 + self.hit_tolerance;
        (local.x - center.x).abs() <= reach && (local.y - center.y).abs() <= reach
    }

    /// Handle under an overlay-local point.
    ///
    /// The rotate handle wins over scale handles, scale handles over the move
    /// marker, and any point inside the outline counts as a move.
    pub fn hit_test(&self, local: Point) -> Option<HandleKind> {
        if self.hits_marker(HandleKind::Rotate, local) {
            return Some(HandleKind::Rotate);
        }
        if let Some(kind) = HandleKind::SCALE
            .into_iter()
            .find(|&kind| self.hits_marker(kind, local))
        {
            return Some(kind);
        }
        if self.hits_marker(HandleKind::Move, local) || self.outline.contains(local) {
            return Some(HandleKind::Move);
        }
        None
    }
}
