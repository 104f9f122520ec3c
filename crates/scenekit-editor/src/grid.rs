//! Background grid.
//!
//! Lines are generated only for the visible world rectangle and are aligned
//! to multiples of the cell size, so panning never shifts the grid.

use serde::{Deserialize, Serialize};

use scenekit_core::constants::DEFAULT_GRID_SIZE;
use scenekit_core::EditorError;

use crate::math::{Point, Rect};

/// Cap on lines per axis; a tiny cell at low zoom would otherwise explode.
const MAX_LINES_PER_AXIS: usize = 2000;

/// Grid cell size in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub x: f64,
    pub y: f64,
}

impl GridSize {
    /// Validated constructor: both sides must be positive and finite.
    pub fn new(x: f64, y: f64) -> Result<Self, EditorError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(x) && valid(y) {
            Ok(Self { x, y })
        } else {
            Err(EditorError::InvalidGridSize { x, y })
        }
    }

    /// Nearest grid point to `p`.
    pub fn snap(&self, p: Point) -> Point {
        Point::new(
            crate::math::snap(p.x, self.x),
            crate::math::snap(p.y, self.y),
        )
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            x: DEFAULT_GRID_SIZE,
            y: DEFAULT_GRID_SIZE,
        }
    }
}

/// A single grid line segment in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub start: Point,
    pub end: Point,
}

/// Grid geometry for one view state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLines {
    pub vertical: Vec<GridLine>,
    pub horizontal: Vec<GridLine>,
    /// Stroke width in world units (one screen pixel).
    pub thickness: f64,
}

impl GridLines {
    /// Builds the lines covering `visible` for the given cell size and zoom.
    pub fn compute(visible: Rect, cell: GridSize, zoom: f64) -> Self {
        let thickness = if zoom > 0.0 { 1.0 / zoom } else { 1.0 };
        let top = visible.y;
        let bottom = visible.bottom();
        let left = visible.x;
        let right = visible.right();

        let vertical = axis_positions(left, right, cell.x)
            .map(|x| GridLine {
                start: Point::new(x, top),
                end: Point::new(x, bottom),
            })
            .collect();

        let horizontal = axis_positions(top, bottom, cell.y)
            .map(|y| GridLine {
                start: Point::new(left, y),
                end: Point::new(right, y),
            })
            .collect();

        Self {
            vertical,
            horizontal,
            thickness,
        }
    }

    pub fn line_count(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }
}

/// Multiples of `cell` from `floor(min / cell) * cell` to `ceil(max / cell) * cell`.
fn axis_positions(min: f64, max: f64, cell: f64) -> impl Iterator<Item = f64> {
    let first = (min / cell).floor();
    let last = (max / cell).ceil();
    let wanted = if last >= first {
        (last - first) as usize + 1
    } else {
        0
    };
    if wanted > MAX_LINES_PER_AXIS {
        tracing::warn!(
            "Grid needs {} lines on one axis, capping at {}",
            wanted,
            MAX_LINES_PER_AXIS
        );
    }
    let count = wanted.min(MAX_LINES_PER_AXIS);
    (0..count).map(move |i| (first + i as f64) * cell)
}
