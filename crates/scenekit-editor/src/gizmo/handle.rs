//! Gizmo handle kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A drag target on the gizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Move,
    ScaleTopLeft,
    ScaleTop,
    ScaleTopRight,
    ScaleRight,
    ScaleBottomRight,
    ScaleBottom,
    ScaleBottomLeft,
    ScaleLeft,
    Rotate,
}

/// How a scale handle changes the target's size.
///
/// A sign of `-1` means the handle sits on the left (or top) edge: moving it
/// in +X (+Y) shrinks the entity and moves that edge. `+1` is the right
/// (bottom) edge, `0` leaves the axis alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleTraits {
    pub affects_width: bool,
    pub affects_height: bool,
    pub x_sign: f64,
    pub y_sign: f64,
}

const fn traits(
    affects_width: bool,
    affects_height: bool,
    x_sign: f64,
    y_sign: f64,
) -> HandleTraits {
    HandleTraits {
        affects_width,
        affects_height,
        x_sign,
        y_sign,
    }
}

const NO_SCALE: HandleTraits = traits(false, false, 0.0, 0.0);

const HANDLE_TRAITS: [HandleTraits; 10] = [
    NO_SCALE,                          // Move
    traits(true, true, -1.0, -1.0),    // ScaleTopLeft
    traits(false, true, 0.0, -1.0),    // ScaleTop
    traits(true, true, 1.0, -1.0),     // ScaleTopRight
    traits(true, false, 1.0, 0.0),     // ScaleRight
    traits(true, true, 1.0, 1.0),      // ScaleBottomRight
    traits(false, true, 0.0, 1.0),     // ScaleBottom
    traits(true, true, -1.0, 1.0),     // ScaleBottomLeft
    traits(true, false, -1.0, 0.0),    // ScaleLeft
    NO_SCALE,                          // Rotate
];

impl HandleKind {
    /// Every handle, in layout order.
    pub const ALL: [HandleKind; 10] = [
        HandleKind::Move,
        HandleKind::ScaleTopLeft,
        HandleKind::ScaleTop,
        HandleKind::ScaleTopRight,
        HandleKind::ScaleRight,
        HandleKind::ScaleBottomRight,
        HandleKind::ScaleBottom,
        HandleKind::ScaleBottomLeft,
        HandleKind::ScaleLeft,
        HandleKind::Rotate,
    ];

    /// The eight compass scale handles.
    pub const SCALE: [HandleKind; 8] = [
        HandleKind::ScaleTopLeft,
        HandleKind::ScaleTop,
        HandleKind::ScaleTopRight,
        HandleKind::ScaleRight,
        HandleKind::ScaleBottomRight,
        HandleKind::ScaleBottom,
        HandleKind::ScaleBottomLeft,
        HandleKind::ScaleLeft,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn traits(self) -> HandleTraits {
        HANDLE_TRAITS[self.index()]
    }

    pub fn is_scale(self) -> bool {
        !matches!(self, HandleKind::Move | HandleKind::Rotate)
    }

    pub fn is_corner(self) -> bool {
        let t = self.traits();
        t.affects_width && t.affects_height
    }

    /// CSS cursor name a host would show while hovering the handle.
    pub fn cursor(self) -> &'static str {
        match self {
            HandleKind::Move => "move",
            HandleKind::ScaleTopLeft | HandleKind::ScaleBottomRight => "nwse-resize",
            HandleKind::ScaleTopRight | HandleKind::ScaleBottomLeft => "nesw-resize",
            HandleKind::ScaleTop | HandleKind::ScaleBottom => "ns-resize",
            HandleKind::ScaleLeft | HandleKind::ScaleRight => "ew-resize",
            HandleKind::Rotate => "grab",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            HandleKind::Move => "move",
            HandleKind::ScaleTopLeft => "tl",
            HandleKind::ScaleTop => "t",
            HandleKind::ScaleTopRight => "tr",
            HandleKind::ScaleRight => "r",
            HandleKind::ScaleBottomRight => "br",
            HandleKind::ScaleBottom => "b",
            HandleKind::ScaleBottomLeft => "bl",
            HandleKind::ScaleLeft => "l",
            HandleKind::Rotate => "rotate",
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
