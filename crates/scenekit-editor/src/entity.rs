//! Transformable scene entities.
//!
//! An entity owns a [`Visual`] and the transform that places it in its
//! parent. The anchor is a normalized point inside the visual's unscaled
//! local bounds; the pivot derived from it is the origin of rotation and
//! scale, and `position` is where that pivot lands in parent space.
//!
//! Changing the anchor moves the pivot without moving the silhouette: the
//! position is shifted by the rotated, scaled pivot delta.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::{Matrix3, Vector2};
use serde::{Deserialize, Serialize};

use crate::math::{self, Point, Rect};
use crate::model::{SceneVisual, Visual};
use crate::playback::FrameInfo;

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique entity identifier. Ids increase monotonically and are
/// never reused, even after the entity is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position, rotation and scale of an entity in its parent's space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Point,
    /// Radians, clockwise on screen.
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point::default(),
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Everything needed to put an entity back where it was.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub transform: Transform,
    pub anchor: Point,
}

#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    name: String,
    transform: Transform,
    anchor: Point,
    pivot: Point,
    visual: Visual,
}

impl Entity {
    /// Creates an entity at the origin with a top-left anchor.
    pub fn new(visual: Visual) -> Self {
        let id = EntityId::next();
        let name = format!("{}_{}", visual.kind_name(), id);
        Self {
            id,
            name,
            transform: Transform::default(),
            anchor: Point::new(0.0, 0.0),
            pivot: Point::new(0.0, 0.0),
            visual,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Overwrites position, rotation and scale. The anchor is untouched.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn x(&self) -> f64 {
        self.transform.position.x
    }

    pub fn set_x(&mut self, x: f64) {
        self.transform.position.x = x;
    }

    pub fn y(&self) -> f64 {
        self.transform.position.y
    }

    pub fn set_y(&mut self, y: f64) {
        self.transform.position.y = y;
    }

    pub fn position(&self) -> Point {
        self.transform.position
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.transform.position = Point::new(x, y);
    }

    pub fn rotation(&self) -> f64 {
        self.transform.rotation
    }

    pub fn set_rotation(&mut self, radians: f64) {
        self.transform.rotation = radians;
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.transform.rotation.to_degrees()
    }

    pub fn set_rotation_degrees(&mut self, degrees: f64) {
        self.transform.rotation = degrees.to_radians();
    }

    pub fn scale_x(&self) -> f64 {
        self.transform.scale_x
    }

    pub fn set_scale_x(&mut self, scale_x: f64) {
        self.transform.scale_x = scale_x;
    }

    pub fn scale_y(&self) -> f64 {
        self.transform.scale_y
    }

    pub fn set_scale_y(&mut self, scale_y: f64) {
        self.transform.scale_y = scale_y;
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn anchor_x(&self) -> f64 {
        self.anchor.x
    }

    pub fn anchor_y(&self) -> f64 {
        self.anchor.y
    }

    pub fn set_anchor_x(&mut self, x: f64) {
        self.set_anchor(x, self.anchor.y);
    }

    pub fn set_anchor_y(&mut self, y: f64) {
        self.set_anchor(self.anchor.x, y);
    }

    /// Pivot in unscaled local units (`anchor * bounds size`).
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Moves the anchor while keeping the entity visually in place.
    ///
    /// Values outside `[0, 1]` are accepted and put the pivot outside the
    /// bounds. Setting the current anchor again is a no-op.
    pub fn set_anchor(&mut self, x: f64, y: f64) {
        if self.anchor.x == x && self.anchor.y == y {
            return;
        }

        let bounds = self.visual.local_bounds();
        let old_pivot = self.pivot;
        let new_pivot = Point::new(x * bounds.width, y * bounds.height);

        self.anchor = Point::new(x, y);
        self.pivot = new_pivot;

        let delta = Vector2::new(
            (new_pivot.x - old_pivot.x) * self.transform.scale_x,
            (new_pivot.y - old_pivot.y) * self.transform.scale_y,
        );
        let shift = math::rotate_vector(delta, self.transform.rotation);
        self.transform.position.x += shift.x;
        self.transform.position.y += shift.y;
    }

    pub fn state(&self) -> EntityState {
        EntityState {
            transform: self.transform,
            anchor: self.anchor,
        }
    }

    /// Restores a saved state. The anchor goes first so that the position
    /// shift it causes is overwritten by the saved position.
    pub fn restore_state(&mut self, state: &EntityState) {
        self.set_anchor(state.anchor.x, state.anchor.y);
        self.transform = state.transform;
    }

    /// Unscaled local bounding box of the visual.
    pub fn local_bounds(&self) -> Rect {
        self.visual.local_bounds()
    }

    /// Local-to-parent matrix: `T(position) * R(rotation) * S(scale) * T(-pivot)`.
    pub fn local_matrix(&self) -> Matrix3<f64> {
        let t = &self.transform;
        math::translation(t.position.x, t.position.y)
            * math::rotation(t.rotation)
            * math::scaling(t.scale_x, t.scale_y)
            * math::translation(-self.pivot.x, -self.pivot.y)
    }

    /// Whether a parent-space point falls inside the transformed bounds.
    pub fn contains_point(&self, point: Point) -> bool {
        match self.local_matrix().try_inverse() {
            Some(inverse) => self
                .local_bounds()
                .contains(math::transform_point(&inverse, point)),
            // Zero scale collapses the entity to nothing hittable
            None => false,
        }
    }

    /// Per-frame behavior hook, driven by the playback clock.
    pub fn update(&mut self, frame: &FrameInfo) {
        self.visual.update(&mut self.transform, frame);
    }

    /// Consumes the entity and releases its visual.
    pub fn destroy(self) {
        tracing::debug!("Destroying entity {} ({})", self.id, self.name);
    }
}
