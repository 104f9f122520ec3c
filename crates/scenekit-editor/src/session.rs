//! Editor session.
//!
//! Facade owning the scene, camera, gizmo and playback clock. Hosts feed it
//! pointer input and property-panel edits; it keeps the gizmo in sync and
//! announces changes on the event bus.
//!
//! Edit mode and play mode are exclusive. Entering play hides the gizmo
//! before the clock starts and snapshots every entity; stopping restores
//! the snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use scenekit_core::event_bus::{
    AppEvent, EventBus, PlaybackEvent, PointerButton, PointerEvent, PointerPhase, SelectionEvent,
    SettingsEvent, TransformEvent,
};
use scenekit_core::EditorError;
use scenekit_settings::Config;

use crate::anchor::AnchorPreset;
use crate::entity::{Entity, EntityId, EntityState};
use crate::gizmo::TransformGizmo;
use crate::grid::GridLines;
use crate::math::{self, Point, Rect};
use crate::model::{Visual, VisualKind};
use crate::playback::{FrameInfo, PlaybackClock};
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Result type for session operations
pub type SessionResult<T> = Result<T, EditorError>;

pub struct EditorSession {
    bus: Arc<EventBus>,
    config: Config,
    scene: Scene,
    viewport: Viewport,
    gizmo: TransformGizmo,
    clock: PlaybackClock,
    selected: Option<EntityId>,
    edit_snapshot: Option<HashMap<EntityId, EntityState>>,
    pan_origin: Option<Point>,
}

impl EditorSession {
    /// Creates a session for a canvas of the given pixel size.
    ///
    /// An invalid config is logged and still accepted: each component falls
    /// back to its defaults for the values it cannot use.
    pub fn new(bus: Arc<EventBus>, config: Config, canvas_width: f64, canvas_height: f64) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!("Session config is invalid: {}", e);
        }
        let mut gizmo = TransformGizmo::new(Arc::clone(&bus), config.gizmo.clone());
        if let Err(e) = gizmo.set_grid_size(config.grid.size_x, config.grid.size_y) {
            tracing::warn!("Ignoring configured grid size: {}", e);
        }
        gizmo.set_snap_enabled(config.grid.snap_enabled);

        let viewport = Viewport::with_settings(canvas_width, canvas_height, &config.viewport);
        let clock = PlaybackClock::with_frame_rate(config.playback.reference_frame_rate);

        let mut session = Self {
            bus,
            config,
            scene: Scene::new(),
            viewport,
            gizmo,
            clock,
            selected: None,
            edit_snapshot: None,
            pan_origin: None,
        };
        session.refresh_grid();
        session
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn gizmo(&self) -> &TransformGizmo {
        &self.gizmo
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.scene.get(id)
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    // --- Scene management ---

    /// Adds a default-sized entity of `kind` at the scene origin.
    pub fn add_entity(&mut self, kind: VisualKind) -> SessionResult<EntityId> {
        self.add_visual(Visual::from_kind(kind))
    }

    /// Adds an entity wrapping an already configured visual.
    pub fn add_visual(&mut self, visual: Visual) -> SessionResult<EntityId> {
        self.ensure_editing()?;
        Ok(self.scene.add(Entity::new(visual)))
    }

    /// Removes and destroys an entity, unbinding the gizmo if it was the target.
    pub fn remove_entity(&mut self, id: EntityId) -> SessionResult<()> {
        self.ensure_editing()?;
        let entity = self
            .scene
            .remove(id)
            .ok_or(EditorError::EntityNotFound { id: id.value() })?;
        if self.selected == Some(id) {
            self.deselect();
        }
        entity.destroy();
        Ok(())
    }

    // --- Selection ---

    pub fn select(&mut self, id: EntityId) -> SessionResult<()> {
        self.ensure_editing()?;
        if !self.scene.contains(id) {
            return Err(EditorError::EntityNotFound { id: id.value() });
        }
        if self.selected != Some(id) {
            self.gizmo.end_drag();
            self.selected = Some(id);
            self.publish(AppEvent::Selection(SelectionEvent::Selected {
                entity_id: id.value(),
            }));
        }
        self.refresh_gizmo();
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.gizmo.hide();
        if self.selected.take().is_some() {
            self.publish(AppEvent::Selection(SelectionEvent::Cleared));
        }
    }

    /// Selects the topmost entity under a screen point, or clears the
    /// selection when the point hits empty space. Ignored while playing.
    pub fn select_at(&mut self, screen_x: f64, screen_y: f64) -> Option<EntityId> {
        if self.is_playing() {
            return None;
        }
        let world = self.viewport.screen_to_world(screen_x, screen_y);
        match self.scene.entity_at(world) {
            Some(id) => {
                // The id came from the scene and we are editing, so this cannot fail
                self.select(id).ok()?;
                Some(id)
            }
            None => {
                self.deselect();
                None
            }
        }
    }

    // --- Property edits ---

    pub fn set_position(&mut self, id: EntityId, x: f64, y: f64) -> SessionResult<()> {
        check_finite("x", x)?;
        check_finite("y", y)?;
        self.edit(id, |e| e.set_position(x, y))
    }

    pub fn set_x(&mut self, id: EntityId, x: f64) -> SessionResult<()> {
        check_finite("x", x)?;
        self.edit(id, |e| e.set_x(x))
    }

    pub fn set_y(&mut self, id: EntityId, y: f64) -> SessionResult<()> {
        check_finite("y", y)?;
        self.edit(id, |e| e.set_y(y))
    }

    pub fn set_rotation_degrees(&mut self, id: EntityId, degrees: f64) -> SessionResult<()> {
        check_finite("rotation", degrees)?;
        self.edit(id, |e| e.set_rotation_degrees(degrees))
    }

    pub fn set_scale_x(&mut self, id: EntityId, scale_x: f64) -> SessionResult<()> {
        check_finite("scale_x", scale_x)?;
        self.edit(id, |e| e.set_scale_x(scale_x))
    }

    pub fn set_scale_y(&mut self, id: EntityId, scale_y: f64) -> SessionResult<()> {
        check_finite("scale_y", scale_y)?;
        self.edit(id, |e| e.set_scale_y(scale_y))
    }

    /// Moves the anchor, keeping the entity visually in place.
    pub fn set_anchor(&mut self, id: EntityId, x: f64, y: f64) -> SessionResult<()> {
        check_finite("anchor_x", x)?;
        check_finite("anchor_y", y)?;
        self.edit(id, |e| e.set_anchor(x, y))?;
        self.publish(AppEvent::Transform(TransformEvent::AnchorChanged {
            entity_id: id.value(),
            anchor_x: x,
            anchor_y: y,
        }));
        Ok(())
    }

    pub fn set_anchor_preset(&mut self, id: EntityId, preset: AnchorPreset) -> SessionResult<()> {
        let anchor = preset.anchor();
        self.set_anchor(id, anchor.x, anchor.y)
    }

    pub fn set_name(&mut self, id: EntityId, name: &str) -> SessionResult<()> {
        self.ensure_editing()?;
        let entity = self
            .scene
            .get_mut(id)
            .ok_or(EditorError::EntityNotFound { id: id.value() })?;
        entity.set_name(name);
        Ok(())
    }

    fn edit(&mut self, id: EntityId, apply: impl FnOnce(&mut Entity)) -> SessionResult<()> {
        self.ensure_editing()?;
        let entity = self
            .scene
            .get_mut(id)
            .ok_or(EditorError::EntityNotFound { id: id.value() })?;
        apply(entity);
        let event = transform_changed(entity);
        if self.selected == Some(id) {
            self.refresh_gizmo();
        }
        self.publish(event);
        Ok(())
    }

    // --- Grid and camera ---

    /// Sets the grid cell size used for snapping and the background grid.
    /// Rejected sizes keep the previous value.
    pub fn set_grid_size(&mut self, x: f64, y: f64) -> SessionResult<()> {
        self.gizmo.set_grid_size(x, y)?;
        self.config.grid.size_x = x;
        self.config.grid.size_y = y;
        self.refresh_grid();
        self.publish(AppEvent::Settings(SettingsEvent::GridSizeChanged { x, y }));
        Ok(())
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.gizmo.set_snap_enabled(enabled);
        self.config.grid.snap_enabled = enabled;
        self.publish(AppEvent::Settings(SettingsEvent::SnapToggled { enabled }));
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.config.grid.visible = visible;
        self.refresh_grid();
    }

    /// Applies one mouse-wheel notch (`delta_y < 0` zooms in).
    pub fn wheel(&mut self, delta_y: f64) {
        let before = self.viewport.zoom();
        self.viewport.wheel(delta_y);
        if self.viewport.zoom() != before {
            self.camera_changed();
            self.publish(AppEvent::Settings(SettingsEvent::ZoomChanged {
                level: self.viewport.zoom(),
            }));
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
        self.camera_changed();
        self.publish(AppEvent::Settings(SettingsEvent::ZoomChanged {
            level: self.viewport.zoom(),
        }));
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
        self.camera_changed();
    }

    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) {
        self.viewport.set_canvas_size(canvas_width, canvas_height);
        self.refresh_grid();
    }

    /// Fits the camera to the combined bounds of all entities.
    pub fn frame_all(&mut self) {
        let mut points = self.scene.iter().flat_map(|e| {
            let m = e.local_matrix();
            let b = e.local_bounds();
            [
                Point::new(b.x, b.y),
                Point::new(b.right(), b.y),
                Point::new(b.right(), b.bottom()),
                Point::new(b.x, b.bottom()),
            ]
            .map(|p| math::transform_point(&m, p))
        });
        let Some(first) = points.next() else {
            return;
        };
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        self.viewport.fit_to_bounds(
            Rect::new(min.x, min.y, max.x - min.x, max.y - min.y),
            0.05,
        );
        self.camera_changed();
    }

    /// Cursor a host should show for a screen point.
    pub fn cursor_at(&self, screen_x: f64, screen_y: f64) -> &'static str {
        if self.pan_origin.is_some() {
            return "grabbing";
        }
        if let Some(handle) = self.gizmo.active_handle() {
            return handle.cursor();
        }
        let world = self.viewport.screen_to_world(screen_x, screen_y);
        match self.gizmo.hit_test(world) {
            Some(handle) => handle.cursor(),
            None if !self.is_playing() && self.scene.entity_at(world).is_some() => "pointer",
            None => "default",
        }
    }

    // --- Pointer routing ---

    /// Routes a pointer event by phase.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::Up | PointerPhase::UpOutside | PointerPhase::Cancel => {
                self.pointer_up(event)
            }
        }
    }

    pub fn pointer_down(&mut self, event: PointerEvent) {
        match event.button {
            PointerButton::Middle => {
                self.pan_origin = Some(Point::new(event.x, event.y));
            }
            PointerButton::Primary if !self.is_playing() => {
                let world = self.viewport.screen_to_world(event.x, event.y);
                if let Some(handle) = self.gizmo.hit_test(world) {
                    let target = self.selected.and_then(|id| self.scene.get(id));
                    if let Some(entity) = target {
                        self.gizmo.begin_drag(handle, entity, world);
                        return;
                    }
                }
                self.select_at(event.x, event.y);
            }
            _ => {}
        }
    }

    pub fn pointer_move(&mut self, event: PointerEvent) {
        if let Some(origin) = self.pan_origin {
            self.pan_origin = Some(Point::new(event.x, event.y));
            self.pan_by(event.x - origin.x, event.y - origin.y);
            return;
        }

        if !self.gizmo.is_dragging() {
            return;
        }
        let Some(id) = self.selected else {
            return;
        };
        let parent = self.viewport.world_matrix();
        let world = self.viewport.screen_to_world(event.x, event.y);
        if let Some(entity) = self.scene.get_mut(id) {
            self.gizmo.drag_to(entity, &parent, world, event.modifiers);
        }
    }

    /// Ends any drag or pan. Honored wherever the pointer is released.
    pub fn pointer_up(&mut self, _event: PointerEvent) {
        self.pan_origin = None;
        self.gizmo.end_drag();
    }

    /// Routes pointer events that arrived through the bus. Returns how many
    /// were processed.
    pub fn pump_events(&mut self) -> usize {
        let events = self.gizmo.take_pointer_events();
        let count = events.len();
        for event in events {
            self.handle_pointer(event);
        }
        count
    }

    // --- Play mode ---

    /// Enters play mode: hides the gizmo, snapshots all entities, starts
    /// the clock. No-op when already playing.
    pub fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        self.gizmo.hide();
        self.pan_origin = None;

        let snapshot: HashMap<EntityId, EntityState> =
            self.scene.iter().map(|e| (e.id(), e.state())).collect();
        tracing::info!("Entering play mode ({} entities saved)", snapshot.len());
        self.edit_snapshot = Some(snapshot);

        self.clock.play();
        self.publish(AppEvent::Playback(PlaybackEvent::Started));
    }

    /// Leaves play mode and restores the edit-mode transforms.
    pub fn stop(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.clock.pause();

        let mut restored = 0;
        if let Some(snapshot) = self.edit_snapshot.take() {
            for entity in self.scene.iter_mut() {
                if let Some(state) = snapshot.get(&entity.id()) {
                    entity.restore_state(state);
                    restored += 1;
                }
            }
        }
        tracing::info!("Leaving play mode ({} entities restored)", restored);

        self.refresh_gizmo();
        self.publish(AppEvent::Playback(PlaybackEvent::Stopped { restored }));
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing() {
            self.stop();
        } else {
            self.play();
        }
    }

    /// Advances one host frame. Entities update only while playing.
    pub fn frame(&mut self, dt_seconds: f64) -> Option<FrameInfo> {
        let frame = self.clock.tick(dt_seconds)?;
        self.scene.update(&frame);
        tracing::trace!("Frame {} ({:.3} frames)", frame.frame_index, frame.delta_frames);
        Some(frame)
    }

    /// Tears down the gizmo subscription and destroys the scene.
    pub fn close(self) {
        let Self { gizmo, scene, .. } = self;
        gizmo.destroy();
        scene.destroy();
    }

    // --- Internals ---

    fn ensure_editing(&self) -> SessionResult<()> {
        if self.is_playing() {
            Err(EditorError::PlayModeActive)
        } else {
            Ok(())
        }
    }

    /// Rebinds the gizmo to the selection, or hides it when there is none
    /// or the scene is playing.
    fn refresh_gizmo(&mut self) {
        let target = match self.selected {
            Some(id) if !self.is_playing() => self.scene.get(id),
            _ => None,
        };
        match target {
            Some(entity) => self.gizmo.update(entity, &self.viewport.world_matrix()),
            None => self.gizmo.hide(),
        }
    }

    fn refresh_grid(&mut self) {
        if self.config.grid.visible {
            let lines = GridLines::compute(
                self.viewport.visible_world_rect(),
                self.gizmo.grid_size(),
                self.viewport.zoom(),
            );
            self.scene.background_mut().set_grid(lines);
        } else {
            self.scene.background_mut().clear_grid();
        }
    }

    fn camera_changed(&mut self) {
        self.refresh_grid();
        self.refresh_gizmo();
    }

    fn publish(&self, event: AppEvent) {
        // Nobody listening is fine for notifications
        let _ = self.bus.publish(event);
    }
}

fn check_finite(property: &str, value: f64) -> SessionResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        tracing::warn!("Rejected {} = {}", property, value);
        Err(EditorError::InvalidValue {
            property: property.to_string(),
            value,
        })
    }
}

fn transform_changed(entity: &Entity) -> AppEvent {
    AppEvent::Transform(TransformEvent::Changed {
        entity_id: entity.id().value(),
        x: entity.x(),
        y: entity.y(),
        rotation: entity.rotation(),
        scale_x: entity.scale_x(),
        scale_y: entity.scale_y(),
    })
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("entities", &self.scene.len())
            .field("selected", &self.selected)
            .field("playing", &self.is_playing())
            .field("viewport", &self.viewport.to_string())
            .field("gizmo", &self.gizmo)
            .finish()
    }
}
