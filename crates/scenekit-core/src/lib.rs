//! # SceneKit Core
//!
//! Core types shared by every SceneKit crate:
//! error types, the editor event bus and a handful of constants
//! that both the editor and the settings layer need to agree on.

pub mod constants;
pub mod error;
pub mod event_bus;

pub use error::{EditorError, Error, Result};

// Re-export event bus for convenience
pub use event_bus::{
    AppEvent, EventBus, EventBusConfig, EventBusError, EventCategory, EventFilter, Modifiers,
    PlaybackEvent, PointerButton, PointerEvent, PointerPhase, SelectionEvent, SettingsEvent,
    SubscriptionId, TransformEvent,
};
