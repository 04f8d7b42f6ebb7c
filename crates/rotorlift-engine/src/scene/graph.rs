use core::ops::{Index, IndexMut};

use crate::math::Mat3;

use super::shapes::Drawable;
use super::{DrawTarget, Entity, EntityId, SceneError};

/// Flat arena owning every entity of a scene.
///
/// Parent/child relations are index cross-references kept in both directions:
/// an entity stores its parent id, and the parent stores its children in
/// attachment order. Entities are never removed, so ids stay valid for the
/// lifetime of the scene.
///
/// Indexing with an id from another scene panics, like out-of-bounds slice
/// indexing. Edits that can fail on bad input return `SceneError` instead.
#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        id.index() < self.entities.len()
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    /// Adds a root entity and returns its id.
    ///
    /// Any parent/child links carried by `entity` are discarded.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        entity.parent = None;
        entity.children.clear();

        let id = EntityId(self.entities.len() as u32);
        self.entities.push(entity);
        id
    }

    /// Adds an entity directly under `parent`.
    pub fn spawn_child(&mut self, parent: EntityId, entity: Entity) -> Result<EntityId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownEntity(parent));
        }
        let id = self.spawn(entity);
        self.attach(id, parent);
        Ok(id)
    }

    /// Re-links `child` under `parent`, or detaches it to a root with `None`.
    ///
    /// The child is removed from its previous parent's child list and appended
    /// to the end of the new parent's. Refuses edits that would form a cycle.
    pub fn set_parent(
        &mut self,
        child: EntityId,
        parent: Option<EntityId>,
    ) -> Result<(), SceneError> {
        if !self.contains(child) {
            return Err(SceneError::UnknownEntity(child));
        }

        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(SceneError::UnknownEntity(parent));
            }
            if parent == child || self.ancestors(parent).any(|a| a == child) {
                return Err(SceneError::Cycle { child, parent });
            }
        }

        self.detach(child);
        if let Some(parent) = parent {
            self.attach(child, parent);
        }
        Ok(())
    }

    #[inline]
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self[id].parent
    }

    #[inline]
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        &self[id].children
    }

    /// Walks from `id`'s parent up to its root.
    pub fn ancestors(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        let mut next = self.get(id).and_then(|e| e.parent);
        core::iter::from_fn(move || {
            let current = next?;
            next = self.entities[current.index()].parent;
            Some(current)
        })
    }

    /// Composes local matrices from the root down to `id`.
    ///
    /// Recomputed from current field values on every call.
    pub fn world_matrix(&self, id: EntityId) -> Mat3 {
        let mut chain: Vec<EntityId> = Vec::with_capacity(8);
        chain.push(id);
        chain.extend(self.ancestors(id));

        chain
            .iter()
            .rev()
            .fold(Mat3::IDENTITY, |world, &node| Mat3::multiply(world, self[node].local_matrix()))
    }

    /// Draws `id` and its descendants, depth-first and pre-order.
    ///
    /// `parent_world` stands in for the transform of whatever `id` hangs under;
    /// for a root this is usually identity, but the same sub-tree may be drawn
    /// several times under different matrices.
    pub fn render(&self, id: EntityId, target: &mut dyn DrawTarget, parent_world: Mat3) {
        let entity = &self[id];
        let world = Mat3::multiply(parent_world, entity.local_matrix());

        if let Some(visual) = &entity.visual {
            target.set_world_matrix(world);
            visual.shape.draw(target, visual.colour);
        }

        for &child in &entity.children {
            self.render(child, target, world);
        }
    }

    fn attach(&mut self, child: EntityId, parent: EntityId) {
        self.entities[child.index()].parent = Some(parent);
        self.entities[parent.index()].children.push(child);
    }

    fn detach(&mut self, child: EntityId) {
        if let Some(old) = self.entities[child.index()].parent.take() {
            self.entities[old.index()].children.retain(|&c| c != child);
        }
    }
}

impl Index<EntityId> for Scene {
    type Output = Entity;

    #[inline]
    fn index(&self, id: EntityId) -> &Entity {
        &self.entities[id.index()]
    }
}

impl IndexMut<EntityId> for Scene {
    #[inline]
    fn index_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.index()]
    }
}
