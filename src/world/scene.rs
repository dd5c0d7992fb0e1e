//! Ordered, duplicate-free collection of entities

use super::entity::{Entity, EntityId};

/// The set of entities the physics processor works on
///
/// Iteration order is insertion order; the processor resolves entities in
/// that order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: Vec<Entity>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        // Default-constructed scenes start at zero
        self.next_id = self.next_id.max(1);
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity unless one with the same ID is already present
    ///
    /// Returns whether the entity was added.
    pub fn add(&mut self, entity: Entity) -> bool {
        if self.contains(entity.id()) {
            return false;
        }
        self.next_id = self.next_id.max(entity.id().0 + 1);
        self.entities.push(entity);
        true
    }

    /// Remove an entity, preserving the order of the rest
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.index_of(id)?;
        Some(self.entities.remove(index))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Look up a replicated entity by its network identity
    pub fn find_by_network_uid(&self, uid: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.network_uid.as_deref() == Some(uid))
    }

    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Mutable access to the entities; the set itself can't grow or shrink here
    #[inline]
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Entities sorted by z index, lowest first, ties in insertion order
    pub fn entities_by_z_index(&self) -> Vec<&Entity> {
        let mut sorted: Vec<&Entity> = self.entities.iter().collect();
        sorted.sort_by_key(|e| e.z_index);
        sorted
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
