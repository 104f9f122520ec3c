//! Event type definitions for the event bus.
//!
//! This module defines all editor events organized by category.
//! Events are designed to be cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

/// Root event enum for all editor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Pointer input forwarded by the host window
    Pointer(PointerEvent),
    /// Entity transform changes
    Transform(TransformEvent),
    /// Selection changes
    Selection(SelectionEvent),
    /// Editor/play mode changes
    Playback(PlaybackEvent),
    /// Editor configuration changes
    Settings(SettingsEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Pointer(_) => EventCategory::Pointer,
            AppEvent::Transform(_) => EventCategory::Transform,
            AppEvent::Selection(_) => EventCategory::Selection,
            AppEvent::Playback(_) => EventCategory::Playback,
            AppEvent::Settings(_) => EventCategory::Settings,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Pointer(e) => e.description(),
            AppEvent::Transform(e) => e.description(),
            AppEvent::Selection(e) => e.description(),
            AppEvent::Playback(e) => e.description(),
            AppEvent::Settings(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Pointer input events.
    Pointer,
    /// Entity transform events.
    Transform,
    /// Selection events.
    Selection,
    /// Play mode events.
    Playback,
    /// Settings and configuration events.
    Settings,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Pointer => write!(f, "Pointer"),
            EventCategory::Transform => write!(f, "Transform"),
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Playback => write!(f, "Playback"),
            EventCategory::Settings => write!(f, "Settings"),
        }
    }
}

/// Pointer phase as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    /// Button pressed over the render surface.
    Down,
    /// Pointer moved anywhere over the window.
    Move,
    /// Button released over the render surface.
    Up,
    /// Button released outside the render surface.
    UpOutside,
    /// The host lost pointer capture (focus change, window hidden).
    Cancel,
}

impl PointerPhase {
    /// Whether this phase terminates a drag.
    pub fn ends_drag(self) -> bool {
        matches!(
            self,
            PointerPhase::Up | PointerPhase::UpOutside | PointerPhase::Cancel
        )
    }
}

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    /// Primary (usually left) button.
    #[default]
    Primary,
    /// Middle button, used for panning.
    Middle,
    /// Secondary (usually right) button.
    Secondary,
}

/// Modifier keys held during a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Shift, used as the aspect-ratio lock.
    pub shift: bool,
    /// Control / Command.
    pub ctrl: bool,
    /// Alt / Option.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Only shift held.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };
}

/// A pointer event in global (screen) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Event phase.
    pub phase: PointerPhase,
    /// Screen-space x in pixels.
    pub x: f64,
    /// Screen-space y in pixels (down is positive).
    pub y: f64,
    /// Button that changed state (or the held button for moves).
    pub button: PointerButton,
    /// Modifier keys.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Creates a primary-button event without modifiers.
    pub fn new(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns a copy with the given modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns a copy with the given button.
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    fn description(&self) -> String {
        format!("Pointer {:?} at ({:.1}, {:.1})", self.phase, self.x, self.y)
    }
}

/// Transform-related events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformEvent {
    /// An entity's transform changed (drag step or property edit).
    Changed {
        /// Id of the entity.
        entity_id: u64,
        /// Position x in parent space.
        x: f64,
        /// Position y in parent space.
        y: f64,
        /// Rotation in radians.
        rotation: f64,
        /// Horizontal scale factor.
        scale_x: f64,
        /// Vertical scale factor.
        scale_y: f64,
    },
    /// An entity's anchor changed.
    AnchorChanged {
        /// Id of the entity.
        entity_id: u64,
        /// Normalized anchor x.
        anchor_x: f64,
        /// Normalized anchor y.
        anchor_y: f64,
    },
}

impl TransformEvent {
    /// Id of the entity this event refers to.
    pub fn entity_id(&self) -> u64 {
        match self {
            TransformEvent::Changed { entity_id, .. }
            | TransformEvent::AnchorChanged { entity_id, .. } => *entity_id,
        }
    }

    fn description(&self) -> String {
        match self {
            TransformEvent::Changed {
                entity_id, x, y, ..
            } => format!("Entity {} moved to ({:.2}, {:.2})", entity_id, x, y),
            TransformEvent::AnchorChanged {
                entity_id,
                anchor_x,
                anchor_y,
            } => format!(
                "Entity {} anchor ({:.2}, {:.2})",
                entity_id, anchor_x, anchor_y
            ),
        }
    }
}

/// Selection events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// An entity became the gizmo target.
    Selected {
        /// Id of the selected entity.
        entity_id: u64,
    },
    /// The selection was cleared.
    Cleared,
}

impl SelectionEvent {
    fn description(&self) -> String {
        match self {
            SelectionEvent::Selected { entity_id } => format!("Selected entity {}", entity_id),
            SelectionEvent::Cleared => "Selection cleared".to_string(),
        }
    }
}

/// Play mode events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// The clock took over the scene.
    Started,
    /// The clock stopped and edit-mode transforms were restored.
    Stopped {
        /// Number of entities whose transform was restored.
        restored: usize,
    },
}

impl PlaybackEvent {
    fn description(&self) -> String {
        match self {
            PlaybackEvent::Started => "Play mode started".to_string(),
            PlaybackEvent::Stopped { restored } => {
                format!("Play mode stopped, {} transforms restored", restored)
            }
        }
    }
}

/// Settings and configuration events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingsEvent {
    /// Grid cell size changed.
    GridSizeChanged {
        /// Horizontal cell size.
        x: f64,
        /// Vertical cell size.
        y: f64,
    },
    /// Snap to grid toggled.
    SnapToggled {
        /// New snap state.
        enabled: bool,
    },
    /// Camera zoom changed.
    ZoomChanged {
        /// Zoom level as a multiplier (1.0 = 100%).
        level: f64,
    },
}

impl SettingsEvent {
    fn description(&self) -> String {
        match self {
            SettingsEvent::GridSizeChanged { x, y } => format!("Grid: {}x{}", x, y),
            SettingsEvent::SnapToggled { enabled } => format!("Snap to grid: {}", enabled),
            SettingsEvent::ZoomChanged { level } => format!("Zoom: {:.0}%", level * 100.0),
        }
    }
}
