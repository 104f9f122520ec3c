//! Drag sessions.
//!
//! A session snapshots the target once at drag start. Every pointer move is
//! resolved against that snapshot, never against the previous move, so a
//! drag is a pure function of (snapshot, start point, current point).

use nalgebra::Vector2;

use super::handle::{HandleKind, HandleTraits};
use crate::entity::{Entity, Transform};
use crate::grid::GridSize;
use crate::math::{self, Point};
use scenekit_core::constants::EPSILON;

/// Target state captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSnapshot {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    /// Unscaled local bounds width.
    pub width: f64,
    /// Unscaled local bounds height.
    pub height: f64,
    /// How far across the local bounds the pivot sits, per axis.
    pub pivot_fraction: Point,
}

impl DragSnapshot {
    pub fn capture(entity: &Entity) -> Self {
        let bounds = entity.local_bounds();
        let pivot = entity.pivot();
        let anchor = entity.anchor();
        // Measured from the bounds origin, which need not be the local origin
        let fraction = |pivot: f64, origin: f64, size: f64, fallback: f64| {
            if size.abs() > EPSILON {
                (pivot - origin) / size
            } else {
                fallback
            }
        };
        Self {
            x: entity.x(),
            y: entity.y(),
            scale_x: entity.scale_x(),
            scale_y: entity.scale_y(),
            rotation: entity.rotation(),
            width: bounds.width,
            height: bounds.height,
            pivot_fraction: Point::new(
                fraction(pivot.x, bounds.x, bounds.width, anchor.x),
                fraction(pivot.y, bounds.y, bounds.height, anchor.y),
            ),
        }
    }

    fn transform(&self) -> Transform {
        Transform {
            position: Point::new(self.x, self.y),
            rotation: self.rotation,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DragSession {
    pub handle: HandleKind,
    /// Pointer at drag start, in parent space.
    pub start: Point,
    pub snapshot: DragSnapshot,
}

impl DragSession {
    pub fn new(handle: HandleKind, start: Point, snapshot: DragSnapshot) -> Self {
        Self {
            handle,
            start,
            snapshot,
        }
    }

    /// Transform the target should have with the pointer at `current`.
    pub fn resolve(&self, current: Point, aspect_lock: bool, snap: Option<GridSize>) -> Transform {
        let delta = Vector2::new(current.x - self.start.x, current.y - self.start.y);
        match self.handle {
            HandleKind::Move => self.resolve_move(delta, snap),
            HandleKind::Rotate => self.resolve_rotate(current),
            handle => {
                self.resolve_scale(handle.traits(), handle.is_corner() && aspect_lock, delta)
            }
        }
    }

    fn resolve_move(&self, delta: Vector2<f64>, snap: Option<GridSize>) -> Transform {
        let mut position = Point::new(self.snapshot.x + delta.x, self.snapshot.y + delta.y);
        if let Some(grid) = snap {
            position = grid.snap(position);
        }
        Transform {
            position,
            ..self.snapshot.transform()
        }
    }

    fn resolve_rotate(&self, current: Point) -> Transform {
        let s = &self.snapshot;
        let start_angle = (self.start.y - s.y).atan2(self.start.x - s.x);
        let current_angle = (current.y - s.y).atan2(current.x - s.x);
        Transform {
            rotation: s.rotation + math::normalize_angle(current_angle - start_angle),
            ..s.transform()
        }
    }

    fn resolve_scale(
        &self,
        traits: HandleTraits,
        aspect_lock: bool,
        delta: Vector2<f64>,
    ) -> Transform {
        let s = &self.snapshot;
        let local = math::rotate_vector(delta, -s.rotation);

        // Size deltas and left/top edge offsets in local, scaled units
        let (mut dw, mut dx) = match traits.affects_width {
            true if traits.x_sign < 0.0 => (-local.x, local.x),
            true => (local.x, 0.0),
            false => (0.0, 0.0),
        };
        let (mut dh, mut dy) = match traits.affects_height {
            true if traits.y_sign < 0.0 => (-local.y, local.y),
            true => (local.y, 0.0),
            false => (0.0, 0.0),
        };

        let initial_w = s.width * s.scale_x;
        let initial_h = s.height * s.scale_y;

        if aspect_lock && initial_w.abs() > EPSILON && initial_h.abs() > EPSILON {
            let aspect = initial_w / initial_h;
            if dw.abs() > dh.abs() {
                dh = (initial_w + dw) / aspect - initial_h;
                if traits.y_sign < 0.0 {
                    dy = -dh;
                }
            } else {
                dw = (initial_h + dh) * aspect - initial_w;
                if traits.x_sign < 0.0 {
                    dx = -dw;
                }
            }
        }

        // A collapsed axis cannot be rescaled
        let scale_x = if s.width.abs() > EPSILON {
            (initial_w + dw) / s.width
        } else {
            dw = 0.0;
            dx = 0.0;
            s.scale_x
        };
        let scale_y = if s.height.abs() > EPSILON {
            (initial_h + dh) / s.height
        } else {
            dh = 0.0;
            dy = 0.0;
            s.scale_y
        };

        // Keep the opposite edge fixed: the pivot travels with the dragged
        // edge by the fraction of the bounds it sits across.
        let shift_local = Vector2::new(
            dx + s.pivot_fraction.x * dw,
            dy + s.pivot_fraction.y * dh,
        );
        let shift = math::rotate_vector(shift_local, s.rotation);

        Transform {
            position: Point::new(s.x + shift.x, s.y + shift.y),
            rotation: s.rotation,
            scale_x,
            scale_y,
        }
    }
}
