//! # SceneKit
//!
//! A 2D scene editor core with an interactive transform gizmo:
//! - Entities with a normalized anchor and derived pivot
//! - Move, eight compass scale handles and rotate, with shift aspect lock
//! - Grid snapping, camera pan and wheel zoom
//! - Play mode that hides the editor overlay and restores edit state on stop
//!
//! ## Architecture
//!
//! SceneKit is organized as a workspace with multiple crates:
//!
//! 1. **scenekit-core** - Error types, event bus, shared constants
//! 2. **scenekit-settings** - Editor configuration and persistence
//! 3. **scenekit-editor** - Scene model, gizmo, viewport, playback, session
//! 4. **scenekit** - Headless demo binary that integrates all crates

// Re-export the common types for main.rs and embedders
pub use scenekit_core::{
    AppEvent, EditorError, Error, EventBus, EventFilter, Modifiers, PointerButton, PointerEvent,
    PointerPhase, Result, TransformEvent,
};

pub use scenekit_editor::{
    AnchorPreset, EditorSession, Entity, EntityId, HandleKind, Point, Scene, TransformGizmo,
    Viewport, Visual, VisualKind,
};

pub use scenekit_settings::{Config, SettingsPersistence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(())
}
