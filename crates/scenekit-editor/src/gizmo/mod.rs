//! # Transform Gizmo
//!
//! Single-target manipulation overlay with a move handle, eight compass
//! scale handles and a rotate handle.
//!
//! ## States
//!
//! ```text
//! Unbound --update()--> BoundIdle --begin_drag()--> Dragging(handle)
//!    ^                     |  ^                          |
//!    +------hide()---------+  +-------end_drag()---------+
//! ```
//!
//! ## Pointer capture
//!
//! On construction the gizmo subscribes to pointer events on the injected
//! [`EventBus`] and queues them in an inbox. The owner drains the inbox with
//! [`TransformGizmo::take_pointer_events`] on its own thread and routes the
//! events back into the drag methods, which need the target entity. The
//! subscription is removed by [`TransformGizmo::destroy`] or on drop.
//!
//! ## Coordinates
//!
//! The gizmo lives in the scene container's space ("parent space"). It copies
//! the target's position and rotation, and sizes all screen-pixel metrics by
//! the inverse of the container's world scale.

mod drag;
mod handle;
mod layout;

pub use drag::{DragSession, DragSnapshot};
pub use handle::{HandleKind, HandleTraits};
pub use layout::GizmoLayout;

use std::collections::VecDeque;
use std::sync::Arc;

use nalgebra::{Matrix3, Vector2};
use parking_lot::Mutex;

use scenekit_core::event_bus::{
    AppEvent, EventBus, EventCategory, EventFilter, Modifiers, PointerEvent, SubscriptionId,
    TransformEvent,
};
use scenekit_core::EditorError;
use scenekit_settings::GizmoSettings;

use crate::entity::{Entity, EntityId};
use crate::grid::GridSize;
use crate::math::{self, Point};

/// Pointer events kept while nobody drains the inbox.
const POINTER_INBOX_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoState {
    Unbound,
    BoundIdle,
    Dragging(HandleKind),
}

pub struct TransformGizmo {
    bus: Arc<EventBus>,
    subscription: Option<SubscriptionId>,
    inbox: Arc<Mutex<VecDeque<PointerEvent>>>,
    settings: GizmoSettings,
    grid_size: GridSize,
    snap_enabled: bool,
    target: Option<EntityId>,
    position: Point,
    rotation: f64,
    inverse_scale: f64,
    layout: Option<GizmoLayout>,
    drag: Option<DragSession>,
}

impl TransformGizmo {
    /// Creates an unbound gizmo and attaches its pointer subscription.
    pub fn new(bus: Arc<EventBus>, settings: GizmoSettings) -> Self {
        let inbox = Arc::new(Mutex::new(VecDeque::new()));
        let queue = Arc::clone(&inbox);
        let subscription = bus.subscribe(EventFilter::only(EventCategory::Pointer), move |event| {
            if let AppEvent::Pointer(pointer) = event {
                let mut queue = queue.lock();
                if queue.len() >= POINTER_INBOX_CAPACITY {
                    queue.pop_front();
                }
                queue.push_back(pointer);
            }
        });
        tracing::debug!("Gizmo attached with pointer subscription {}", subscription);

        Self {
            bus,
            subscription: Some(subscription),
            inbox,
            settings,
            grid_size: GridSize::default(),
            snap_enabled: false,
            target: None,
            position: Point::default(),
            rotation: 0.0,
            inverse_scale: 1.0,
            layout: None,
            drag: None,
        }
    }

    pub fn state(&self) -> GizmoState {
        match (&self.target, &self.drag) {
            (None, _) => GizmoState::Unbound,
            (Some(_), None) => GizmoState::BoundIdle,
            (Some(_), Some(session)) => GizmoState::Dragging(session.handle),
        }
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Visible and hit-testable. Both follow the binding.
    pub fn is_visible(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn active_handle(&self) -> Option<HandleKind> {
        self.drag.as_ref().map(|d| d.handle)
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn inverse_scale(&self) -> f64 {
        self.inverse_scale
    }

    pub fn layout(&self) -> Option<&GizmoLayout> {
        self.layout.as_ref()
    }

    pub fn settings(&self) -> &GizmoSettings {
        &self.settings
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// Sets the snap cell size. Rejected values leave the current size in place.
    pub fn set_grid_size(&mut self, x: f64, y: f64) -> Result<(), EditorError> {
        match GridSize::new(x, y) {
            Ok(size) => {
                self.grid_size = size;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("{}; keeping {}x{}", e, self.grid_size.x, self.grid_size.y);
                Err(e)
            }
        }
    }

    pub fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
    }

    /// Binds to `target` and recomputes the layout.
    ///
    /// `parent` is the world matrix of the container the target lives in;
    /// its X basis length is the camera scale the metrics compensate for.
    pub fn update(&mut self, target: &Entity, parent: &Matrix3<f64>) {
        if self.target != Some(target.id()) {
            // Rebinding abandons any drag on the previous target
            self.drag = None;
            tracing::debug!("Gizmo bound to {}", target.name());
        }
        self.target = Some(target.id());
        self.position = target.position();
        self.rotation = target.rotation();
        self.inverse_scale = math::inverse_scale(parent);
        self.layout = Some(GizmoLayout::compute(
            target.local_bounds(),
            target.pivot(),
            target.scale_x(),
            target.scale_y(),
            self.inverse_scale,
            &self.settings,
        ));
    }

    /// Unbinds and hides. Safe to call repeatedly.
    pub fn hide(&mut self) {
        if self.target.take().is_some() {
            tracing::debug!("Gizmo hidden");
        }
        self.drag = None;
        self.layout = None;
    }

    /// Converts a parent-space point into overlay-local space.
    pub fn to_local(&self, point: Point) -> Point {
        let offset = Vector2::new(point.x - self.position.x, point.y - self.position.y);
        math::rotate_vector(offset, -self.rotation).into()
    }

    /// Handle under a parent-space point, if the gizmo is visible.
    pub fn hit_test(&self, point: Point) -> Option<HandleKind> {
        self.layout.as_ref()?.hit_test(self.to_local(point))
    }

    /// Starts dragging `handle` with the pointer at `pointer` (parent space).
    ///
    /// Ignored, returning `false`, when unbound, when `target` is not the
    /// bound entity, or while another drag is active.
    pub fn begin_drag(&mut self, handle: HandleKind, target: &Entity, pointer: Point) -> bool {
        if self.target != Some(target.id()) || self.drag.is_some() {
            return false;
        }
        let snapshot = DragSnapshot::capture(target);
        self.drag = Some(DragSession::new(handle, pointer, snapshot));
        tracing::debug!("Drag started on {} handle of {}", handle, target.name());
        true
    }

    /// Applies the active drag for a pointer at `pointer` (parent space).
    ///
    /// Mutates the target, refreshes the layout and publishes
    /// [`TransformEvent::Changed`]. Returns `false` without touching anything
    /// when no drag of this target is active.
    pub fn drag_to(
        &mut self,
        target: &mut Entity,
        parent: &Matrix3<f64>,
        pointer: Point,
        modifiers: Modifiers,
    ) -> bool {
        if self.target != Some(target.id()) {
            return false;
        }
        let Some(session) = self.drag.as_ref() else {
            return false;
        };

        let snap = self.snap_enabled.then_some(self.grid_size);
        let transform = session.resolve(pointer, modifiers.shift, snap);
        target.set_transform(transform);

        self.update(target, parent);
        self.publish_change(target);
        true
    }

    /// Ends the active drag, if any. Nothing else changes.
    pub fn end_drag(&mut self) {
        if let Some(session) = self.drag.take() {
            tracing::debug!("Drag ended on {} handle", session.handle);
        }
    }

    /// Drains pointer events received through the bus subscription.
    pub fn take_pointer_events(&self) -> Vec<PointerEvent> {
        self.inbox.lock().drain(..).collect()
    }

    /// Detaches from the bus and drops the gizmo.
    pub fn destroy(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.bus.unsubscribe(id);
            self.inbox.lock().clear();
            tracing::debug!("Gizmo detached, subscription {} removed", id);
        }
    }

    fn publish_change(&self, target: &Entity) {
        let event = AppEvent::Transform(TransformEvent::Changed {
            entity_id: target.id().value(),
            x: target.x(),
            y: target.y(),
            rotation: target.rotation(),
            scale_x: target.scale_x(),
            scale_y: target.scale_y(),
        });
        // The gizmo's own subscription keeps the bus from reporting NoSubscribers
        let _ = self.bus.publish(event);
    }
}

impl Drop for TransformGizmo {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for TransformGizmo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformGizmo")
            .field("state", &self.state())
            .field("target", &self.target)
            .field("grid_size", &self.grid_size)
            .field("snap_enabled", &self.snap_enabled)
            .field("attached", &self.is_attached())
            .finish()
    }
}
