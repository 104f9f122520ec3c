//! # Event Bus Module
//!
//! Decoupled communication between the editor core and its host.
//!
//! ## Overview
//!
//! - The host publishes pointer events observed anywhere on the window
//! - The gizmo owns a pointer subscription for as long as it is attached
//! - The session publishes transform, selection and playback notifications
//!   that property panels and hierarchy views re-render from
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scenekit_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = Arc::new(EventBus::new());
//! let subscription = bus.subscribe(EventFilter::only(EventCategory::Transform), |event| {
//!     if let AppEvent::Transform(change) = event {
//!         println!("entity {} changed", change.entity_id());
//!     }
//! });
//!
//! // ... later
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
