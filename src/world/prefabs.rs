//! Entity kinds and their factory defaults
//!
//! Replicated entities arrive as an [`EntitySnapshot`] carrying a type tag.
//! The tag selects an [`EntityKind`], whose prefab gives the sprite, draw
//! order, collision flag and motion. The snapshot's optional fields are then
//! applied on top. Unknown tags become a generic, non-collidable prop.

use serde::{Deserialize, Serialize};

use super::entity::{CollisionResponse, Entity, EntityId, Motion};
use crate::geometry::{Point, Vector};

/// Every kind of entity the game knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    CrateBig,
    CrateGreen,
    CarGreen,
    Tree1,
    Plant1,
    Plant2,
    Plant3,
    Foliage1,
    Foliage2,
    Foliage3,
    BloodStain,
    BodyPart,
    Soldier,
    Grenade,
    Bullet,
    Generic,
}

/// Factory defaults of a kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefab {
    pub asset_key: &'static str,
    pub z_index: i32,
    pub collidable: bool,
    /// Initial speed for dynamic kinds, `None` for static ones
    pub speed: Option<f64>,
    pub response: CollisionResponse,
}

const fn prop(asset_key: &'static str, z_index: i32, collidable: bool) -> Prefab {
    Prefab {
        asset_key,
        z_index,
        collidable,
        speed: None,
        response: CollisionResponse::PushApart,
    }
}

pub const SOLDIER_SPEED: f64 = 200.0;
pub const GRENADE_SPEED: f64 = 250.0;

impl EntityKind {
    /// Look up a network type tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "CrateBig" => Self::CrateBig,
            "CrateGreen" => Self::CrateGreen,
            "CarGreen" => Self::CarGreen,
            "Tree1" => Self::Tree1,
            "Plant1" => Self::Plant1,
            "Plant2" => Self::Plant2,
            "Plant3" => Self::Plant3,
            "Foliage1" => Self::Foliage1,
            "Foliage2" => Self::Foliage2,
            "Foliage3" => Self::Foliage3,
            "BloodStain" => Self::BloodStain,
            "BodyPart" => Self::BodyPart,
            "Soldier" => Self::Soldier,
            "Grenade" => Self::Grenade,
            "Bullet" => Self::Bullet,
            _ => Self::Generic,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::CrateBig => "CrateBig",
            Self::CrateGreen => "CrateGreen",
            Self::CarGreen => "CarGreen",
            Self::Tree1 => "Tree1",
            Self::Plant1 => "Plant1",
            Self::Plant2 => "Plant2",
            Self::Plant3 => "Plant3",
            Self::Foliage1 => "Foliage1",
            Self::Foliage2 => "Foliage2",
            Self::Foliage3 => "Foliage3",
            Self::BloodStain => "BloodStain",
            Self::BodyPart => "BodyPart",
            Self::Soldier => "Soldier",
            Self::Grenade => "Grenade",
            Self::Bullet => "Bullet",
            Self::Generic => "BasicObject",
        }
    }

    pub fn prefab(self) -> Prefab {
        match self {
            Self::CrateBig => prop("crate", 1, true),
            Self::CrateGreen => prop("crate-green", 1, true),
            Self::CarGreen => prop("car-green", 1, true),
            Self::Tree1 => prop("tree-1", 200, false),
            Self::Plant1 => prop("plant-1", 9, false),
            Self::Plant2 => prop("plant-2", 9, false),
            Self::Plant3 => prop("plant-3", 9, false),
            Self::Foliage1 => prop("foliage-1", 101, false),
            Self::Foliage2 => prop("foliage-2", 101, false),
            Self::Foliage3 => prop("foliage-3", 101, false),
            Self::BloodStain => prop("blood-stain", 2, false),
            Self::BodyPart => prop("body-part", 2, false),
            Self::Soldier => Prefab {
                speed: Some(0.0),
                ..prop("soldier", 10, true)
            },
            Self::Grenade => Prefab {
                speed: Some(GRENADE_SPEED),
                response: CollisionResponse::Rebound,
                ..prop("grenade", 10, true)
            },
            Self::Bullet => prop("bullet", 1, false),
            Self::Generic => prop("", 0, false),
        }
    }

    /// Build an entity of this kind with its factory defaults
    pub fn spawn(self, id: EntityId, position: Point, rotation: f64) -> Entity {
        let prefab = self.prefab();
        let mut entity = Entity::new(id, prefab.asset_key)
            .with_position(position)
            .with_rotation(rotation)
            .with_z_index(prefab.z_index)
            .with_collidable(prefab.collidable)
            .with_response(prefab.response);
        if let Some(speed) = prefab.speed {
            entity = entity.with_motion(Motion::new(Vector::new_unchecked(0.0, 1.0), speed));
        }
        entity
    }
}

/// Entity state as received from a remote peer
///
/// Only `type` and `position` are required; everything else overrides the
/// prefab when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySnapshot {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub network_uid: Option<String>,
    pub position: Point,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub collidable: Option<bool>,
    #[serde(default)]
    pub z_index: Option<i32>,
    #[serde(default)]
    pub image_key: Option<String>,
    #[serde(default)]
    pub direction: Option<Vector>,
    #[serde(default)]
    pub speed: Option<f64>,
}

impl EntitySnapshot {
    pub fn kind(&self) -> EntityKind {
        EntityKind::from_tag(&self.kind)
    }

    /// Build a new entity from the snapshot
    pub fn spawn(&self, id: EntityId) -> Entity {
        let kind = self.kind();
        if kind == EntityKind::Generic {
            log::debug!("unknown entity type {:?}, spawning a generic prop", self.kind);
        }
        let mut entity = kind.spawn(id, self.position, self.rotation.unwrap_or(0.0));
        self.apply(&mut entity);
        entity
    }

    /// Overwrite an existing entity with whatever the snapshot carries
    pub fn apply(&self, entity: &mut Entity) {
        entity.set_position(self.position);
        if let Some(rotation) = self.rotation {
            entity.set_rotation(rotation);
        }
        if let Some(collidable) = self.collidable {
            entity.collidable = collidable;
        }
        if let Some(uid) = &self.network_uid {
            entity.network_uid = Some(uid.clone());
        }
        if let Some(z) = self.z_index {
            entity.z_index = z;
        }
        if let Some(key) = &self.image_key {
            if key != entity.asset_key() {
                entity.set_asset_key(key.as_str());
            }
        }
        if self.direction.is_some() || self.speed.is_some() {
            let motion = entity
                .motion
                .get_or_insert(Motion::new(Vector::new_unchecked(0.0, 1.0), 0.0));
            if let Some(direction) = self.direction {
                motion.direction = direction;
            }
            if let Some(speed) = self.speed {
                motion.speed = speed;
            }
        }
    }
}
