//! Error handling for SceneKit
//!
//! The editor core is synchronous local computation, so the error taxonomy
//! is narrow:
//! - Editor errors (rejected configuration, unknown entities, mode conflicts)
//! - I/O errors surfaced by the settings layer
//!
//! Degenerate geometry is guarded inside the math and never reported.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Editor error type
///
/// Represents requests the editor refuses. None of these leave the scene in
/// a modified state: the rejected operation simply does not happen.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Grid cell sizes must be positive and finite
    #[error("Invalid grid size {x}x{y}: cell size must be positive")]
    InvalidGridSize {
        /// The rejected horizontal cell size.
        x: f64,
        /// The rejected vertical cell size.
        y: f64,
    },

    /// No entity with this id lives in the scene
    #[error("Entity {id} not found")]
    EntityNotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// Edits are refused while the playback clock owns the scene
    #[error("Scene is in play mode")]
    PlayModeActive,

    /// A numeric property edit was not a finite number
    #[error("Invalid value for {property}: {value}")]
    InvalidValue {
        /// The property being edited.
        property: String,
        /// The rejected value.
        value: f64,
    },
}

/// Main error type for SceneKit
///
/// Covers editor rejections, I/O failures and free-form messages such as
/// configuration validation. Settings load/save failures have their own
/// `SettingsError` in the settings crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Editor error
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an editor error
    pub fn is_editor_error(&self) -> bool {
        matches!(self, Error::Editor(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
