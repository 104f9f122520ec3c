use serde::{Deserialize, Serialize};

use super::SceneVisual;
use crate::math::Rect;

/// Static circle inscribed in its bounds.
///
/// Bounds start at the local origin like every other kind, so the circle's
/// center sits at `(radius, radius)` and anchor `(0.5, 0.5)` pivots on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCircle {
    pub radius: f64,
}

impl SceneCircle {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl SceneVisual for SceneCircle {
    fn kind_name(&self) -> &'static str {
        "Circle"
    }

    fn local_bounds(&self) -> Rect {
        let d = self.radius * 2.0;
        Rect::from_size(d, d)
    }
}
