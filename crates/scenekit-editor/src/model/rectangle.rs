use serde::{Deserialize, Serialize};

use super::SceneVisual;
use crate::math::Rect;

/// Static rectangle with its top-left corner at the local origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRectangle {
    pub width: f64,
    pub height: f64,
}

impl SceneRectangle {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl SceneVisual for SceneRectangle {
    fn kind_name(&self) -> &'static str {
        "Rectangle"
    }

    fn local_bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}
