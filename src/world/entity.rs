//! Scene entities and their optional components
//!
//! An entity is a fixed struct; what it can do is decided by which components
//! are present. Every entity has a position and rotation. A `Motion` makes it
//! dynamic. A bounding box makes it testable for collisions once the physics
//! processor has sized one from its sprite.

use serde::{Deserialize, Serialize};

use crate::geometry::{OrientedBox, Point, Vector};

/// Local identity of an entity, stable for the lifetime of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Movement component: direction and speed in units per second
///
/// The direction is stored as given and normalized when consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub direction: Vector,
    pub speed: f64,
}

impl Motion {
    pub fn new(direction: Vector, speed: f64) -> Self {
        Self { direction, speed }
    }

    /// Whether the broad phase treats this entity as moving
    ///
    /// Speeds below one unit per second are truncated to zero.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.speed.trunc() != 0.0
    }
}

/// How an entity reacts when it hits something
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionResponse {
    /// Separate along the minimum translation axis
    #[default]
    PushApart,
    /// Reflect direction across the collision axis and lose speed (grenades)
    Rebound,
}

/// An object in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    /// Identity shared with remote peers, if this entity is replicated
    pub network_uid: Option<String>,
    asset_key: String,
    position: Point,
    /// Rotation in degrees
    rotation: f64,
    /// Entities with higher z are drawn on top
    pub z_index: i32,
    /// A collision needs both participants to be collidable
    pub collidable: bool,
    bounding_box: Option<OrientedBox>,
    pub motion: Option<Motion>,
    pub response: CollisionResponse,
}

impl Entity {
    /// Create a static, non-collidable entity at the origin
    pub fn new(id: EntityId, asset_key: impl Into<String>) -> Self {
        Self {
            id,
            network_uid: None,
            asset_key: asset_key.into(),
            position: Point::ORIGIN,
            rotation: 0.0,
            z_index: 0,
            collidable: false,
            bounding_box: None,
            motion: None,
            response: CollisionResponse::PushApart,
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.set_rotation(rotation);
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_collidable(mut self, collidable: bool) -> Self {
        self.collidable = collidable;
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }

    pub fn with_response(mut self, response: CollisionResponse) -> Self {
        self.response = response;
        self
    }

    pub fn with_network_uid(mut self, uid: impl Into<String>) -> Self {
        self.network_uid = Some(uid.into());
        self
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn asset_key(&self) -> &str {
        &self.asset_key
    }

    /// Change the sprite; the bounding box is dropped and rebuilt on the next tick
    pub fn set_asset_key(&mut self, key: impl Into<String>) {
        self.asset_key = key.into();
        self.bounding_box = None;
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Move the entity, carrying its bounding box along
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        if let Some(bbox) = &mut self.bounding_box {
            bbox.set_position(position);
        }
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotate the entity, carrying its bounding box along
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        if let Some(bbox) = &mut self.bounding_box {
            bbox.set_rotation(rotation);
        }
    }

    #[inline]
    pub fn bounding_box(&self) -> Option<&OrientedBox> {
        self.bounding_box.as_ref()
    }

    pub fn set_bounding_box(&mut self, bbox: Option<OrientedBox>) {
        self.bounding_box = bbox;
    }

    /// Whether the entity carries a motion component
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.motion.is_some()
    }

    /// Current speed, zero for static entities
    #[inline]
    pub fn speed(&self) -> f64 {
        self.motion.map(|m| m.speed).unwrap_or(0.0)
    }
}
