//! Geometry primitives and affine helpers.
//!
//! Scene space uses screen orientation: +X right, +Y down, positive angles
//! turn clockwise on screen. Matrices are homogeneous 3x3 (`nalgebra::Matrix3`)
//! acting on column vectors.

use std::f64::consts::{PI, TAU};

use nalgebra::{Matrix3, Rotation2, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use scenekit_core::constants::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.y)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test. Negative sizes are normalized first.
    pub fn contains(&self, p: Point) -> bool {
        let (min_x, max_x) = min_max(self.x, self.right());
        let (min_y, max_y) = min_max(self.y, self.bottom());
        p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Rotates a vector by `angle` radians.
pub fn rotate_vector(v: Vector2<f64>, angle: f64) -> Vector2<f64> {
    Rotation2::new(angle) * v
}

/// Wraps an angle into `(-PI, PI]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

pub fn translation(x: f64, y: f64) -> Matrix3<f64> {
    Matrix3::new_translation(&Vector2::new(x, y))
}

pub fn rotation(angle: f64) -> Matrix3<f64> {
    Rotation2::new(angle).to_homogeneous()
}

pub fn scaling(sx: f64, sy: f64) -> Matrix3<f64> {
    Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy))
}

pub fn transform_point(m: &Matrix3<f64>, p: Point) -> Point {
    let v = m * Vector3::new(p.x, p.y, 1.0);
    Point::new(v.x, v.y)
}

/// Length of the transformed X unit basis vector, `sqrt(a^2 + b^2)`.
pub fn basis_scale_x(m: &Matrix3<f64>) -> f64 {
    m[(0, 0)].hypot(m[(1, 0)])
}

/// Reciprocal of [`basis_scale_x`], falling back to 1.0 for a degenerate
/// or non-finite matrix.
pub fn inverse_scale(m: &Matrix3<f64>) -> f64 {
    let scale = basis_scale_x(m);
    if scale.is_finite() && scale > EPSILON {
        1.0 / scale
    } else {
        1.0
    }
}

/// Quantizes `value` to the nearest multiple of `cell`.
pub fn snap(value: f64, cell: f64) -> f64 {
    (value / cell).round() * cell
}
