//! Named anchor origins offered by the property panel.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorPreset {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl AnchorPreset {
    /// Row-major order, as laid out in a 3x3 picker.
    pub const ALL: [AnchorPreset; 9] = [
        AnchorPreset::TopLeft,
        AnchorPreset::TopCenter,
        AnchorPreset::TopRight,
        AnchorPreset::CenterLeft,
        AnchorPreset::Center,
        AnchorPreset::CenterRight,
        AnchorPreset::BottomLeft,
        AnchorPreset::BottomCenter,
        AnchorPreset::BottomRight,
    ];

    pub fn anchor(self) -> Point {
        match self {
            AnchorPreset::TopLeft => Point::new(0.0, 0.0),
            AnchorPreset::TopCenter => Point::new(0.5, 0.0),
            AnchorPreset::TopRight => Point::new(1.0, 0.0),
            AnchorPreset::CenterLeft => Point::new(0.0, 0.5),
            AnchorPreset::Center => Point::new(0.5, 0.5),
            AnchorPreset::CenterRight => Point::new(1.0, 0.5),
            AnchorPreset::BottomLeft => Point::new(0.0, 1.0),
            AnchorPreset::BottomCenter => Point::new(0.5, 1.0),
            AnchorPreset::BottomRight => Point::new(1.0, 1.0),
        }
    }

    /// Preset closest to an arbitrary anchor. Ties go to the earlier preset
    /// in [`AnchorPreset::ALL`].
    pub fn nearest(anchor: Point) -> AnchorPreset {
        let mut best = AnchorPreset::Center;
        let mut best_distance = f64::INFINITY;
        for preset in Self::ALL {
            let distance = preset.anchor().distance_to(&anchor);
            if distance < best_distance {
                best_distance = distance;
                best = preset;
            }
        }
        best
    }

    pub fn name(self) -> &'static str {
        match self {
            AnchorPreset::TopLeft => "top-left",
            AnchorPreset::TopCenter => "top-center",
            AnchorPreset::TopRight => "top-right",
            AnchorPreset::CenterLeft => "center-left",
            AnchorPreset::Center => "center",
            AnchorPreset::CenterRight => "center-right",
            AnchorPreset::BottomLeft => "bottom-left",
            AnchorPreset::BottomCenter => "bottom-center",
            AnchorPreset::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for AnchorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
