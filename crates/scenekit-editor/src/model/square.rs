use serde::{Deserialize, Serialize};

use super::SceneVisual;
use crate::entity::Transform;
use crate::math::Rect;
use crate::playback::FrameInfo;

/// Edge length of the demo square.
pub const SQUARE_SIZE: f64 = 100.0;

/// Radians turned per reference frame while playing.
pub const SQUARE_SPIN_SPEED: f64 = 0.01;

/// Demo square that spins while the scene is playing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSquare {
    pub size: f64,
    pub spin_speed: f64,
}

impl SceneSquare {
    pub fn new() -> Self {
        Self {
            size: SQUARE_SIZE,
            spin_speed: SQUARE_SPIN_SPEED,
        }
    }
}

impl Default for SceneSquare {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneVisual for SceneSquare {
    fn kind_name(&self) -> &'static str {
        "Square"
    }

    fn local_bounds(&self) -> Rect {
        Rect::from_size(self.size, self.size)
    }

    fn update(&mut self, transform: &mut Transform, frame: &FrameInfo) {
        transform.rotation += self.spin_speed * frame.delta_frames;
    }
}
