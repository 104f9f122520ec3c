//! # SceneKit Editor
//!
//! Scene model and interactive transform tools for a 2D scene editor.
//!
//! ## Core Components
//!
//! - **Entities**: Transformable scene objects with a normalized anchor and
//!   a pivot derived from it
//! - **Visuals**: Square, rectangle and circle content with local bounds
//! - **Scene**: Ordered entity container with a background grid layer
//! - **Gizmo**: Move, compass scale and rotate handles for one target
//! - **Viewport**: Camera pan and zoom
//! - **Playback**: Frame clock driving entity updates in play mode
//! - **Session**: Facade routing pointer input and property edits
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── Viewport (Camera/zoom)
//!   ├── Scene
//!   │     ├── BackgroundLayer (Grid)
//!   │     └── Entities (Transform + anchor + Visual)
//!   ├── TransformGizmo (Overlay in scene space)
//!   └── PlaybackClock (Play mode)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scenekit_core::EventBus;
//! use scenekit_editor::{EditorSession, VisualKind};
//! use scenekit_settings::Config;
//!
//! let mut session = EditorSession::new(Arc::new(EventBus::new()), Config::default(), 800.0, 600.0);
//! let id = session.add_entity(VisualKind::Square)?;
//! session.select(id)?;
//! ```

pub mod anchor;
pub mod entity;
pub mod gizmo;
pub mod grid;
pub mod math;
pub mod model;
pub mod playback;
pub mod scene;
pub mod session;
pub mod viewport;

pub use anchor::AnchorPreset;
pub use entity::{Entity, EntityId, EntityState, Transform};
pub use gizmo::{
    DragSession, DragSnapshot, GizmoLayout, GizmoState, HandleKind, HandleTraits, TransformGizmo,
};
pub use grid::{GridLine, GridLines, GridSize};
pub use math::{Point, Rect};
pub use model::{SceneCircle, SceneRectangle, SceneSquare, SceneVisual, Visual, VisualKind};
pub use playback::{FrameInfo, PlaybackClock, PlaybackState};
pub use scene::{BackgroundLayer, Scene};
pub use session::{EditorSession, SessionResult};
pub use viewport::Viewport;
