//! Scene container.
//!
//! Owns entities in a stable draw order plus a background layer that is drawn
//! behind them. Later entities draw on top and therefore win hit tests.

use crate::entity::{Entity, EntityId};
use crate::grid::GridLines;
use crate::math::Point;
use crate::playback::FrameInfo;

/// Layer drawn behind all entities.
#[derive(Debug, Clone, Default)]
pub struct BackgroundLayer {
    grid: Option<GridLines>,
}

impl BackgroundLayer {
    pub fn grid(&self) -> Option<&GridLines> {
        self.grid.as_ref()
    }

    pub fn set_grid(&mut self, grid: GridLines) {
        self.grid = Some(grid);
    }

    pub fn clear_grid(&mut self) {
        self.grid = None;
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<Entity>,
    background: BackgroundLayer,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity on top of the draw order and returns its id.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        // Ids are unique per process, so a hit here means the same entity
        // was cloned and re-added.
        if let Some(existing) = self.entities.iter_mut().find(|e| e.id() == id) {
            tracing::warn!("Entity {} already in scene, replacing it", id);
            *existing = entity;
            return id;
        }
        tracing::debug!("Added {} to scene", entity.name());
        self.entities.push(entity);
        id
    }

    /// Removes an entity and hands ownership back to the caller.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id() == id)?;
        Some(self.entities.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Entities in draw order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(Entity::id).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Topmost entity containing the given scene-space point.
    pub fn entity_at(&self, point: Point) -> Option<EntityId> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.contains_point(point))
            .map(Entity::id)
    }

    pub fn background(&self) -> &BackgroundLayer {
        &self.background
    }

    pub fn background_mut(&mut self) -> &mut BackgroundLayer {
        &mut self.background
    }

    /// Runs per-frame behavior on every entity.
    pub fn update(&mut self, frame: &FrameInfo) {
        for entity in &mut self.entities {
            entity.update(frame);
        }
    }

    /// Destroys the scene together with every entity it contains.
    pub fn destroy(self) {
        let count = self.entities.len();
        for entity in self.entities {
            entity.destroy();
        }
        tracing::debug!("Scene destroyed with {} entities", count);
    }
}
