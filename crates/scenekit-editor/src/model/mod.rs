use serde::{Deserialize, Serialize};

use crate::entity::Transform;
use crate::math::Rect;
use crate::playback::FrameInfo;

mod circle;
mod rectangle;
mod square;

pub use circle::SceneCircle;
pub use rectangle::SceneRectangle;
pub use square::SceneSquare;

const DEFAULT_RECTANGLE_WIDTH: f64 = 160.0;
const DEFAULT_RECTANGLE_HEIGHT: f64 = 90.0;
const DEFAULT_CIRCLE_RADIUS: f64 = 50.0;

/// Visual representation owned by an entity.
///
/// Geometry is expressed in unscaled local space; the owning entity applies
/// pivot, scale, rotation and position on top of it.
pub trait SceneVisual {
    /// Name used for default entity names (`<kind>_<id>`).
    fn kind_name(&self) -> &'static str;

    /// Unscaled local bounding box.
    fn local_bounds(&self) -> Rect;

    /// Per-frame behavior, only called while playing.
    fn update(&mut self, _transform: &mut Transform, _frame: &FrameInfo) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualKind {
    Square,
    Rectangle,
    Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    Square(SceneSquare),
    Rectangle(SceneRectangle),
    Circle(SceneCircle),
}

impl Visual {
    pub fn square() -> Self {
        Visual::Square(SceneSquare::new())
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        Visual::Rectangle(SceneRectangle::new(width, height))
    }

    pub fn circle(radius: f64) -> Self {
        Visual::Circle(SceneCircle::new(radius))
    }

    /// Default-sized visual of the given kind.
    pub fn from_kind(kind: VisualKind) -> Self {
        match kind {
            VisualKind::Square => Self::square(),
            VisualKind::Rectangle => {
                Self::rectangle(DEFAULT_RECTANGLE_WIDTH, DEFAULT_RECTANGLE_HEIGHT)
            }
            VisualKind::Circle => Self::circle(DEFAULT_CIRCLE_RADIUS),
        }
    }

    pub fn kind(&self) -> VisualKind {
        match self {
            Visual::Square(_) => VisualKind::Square,
            Visual::Rectangle(_) => VisualKind::Rectangle,
            Visual::Circle(_) => VisualKind::Circle,
        }
    }
}

impl SceneVisual for Visual {
    fn kind_name(&self) -> &'static str {
        match self {
            Visual::Square(v) => v.kind_name(),
            Visual::Rectangle(v) => v.kind_name(),
            Visual::Circle(v) => v.kind_name(),
        }
    }

    fn local_bounds(&self) -> Rect {
        match self {
            Visual::Square(v) => v.local_bounds(),
            Visual::Rectangle(v) => v.local_bounds(),
            Visual::Circle(v) => v.local_bounds(),
        }
    }

    fn update(&mut self, transform: &mut Transform, frame: &FrameInfo) {
        match self {
            Visual::Square(v) => v.update(transform, frame),
            Visual::Rectangle(v) => v.update(transform, frame),
            Visual::Circle(v) => v.update(transform, frame),
        }
    }
}
