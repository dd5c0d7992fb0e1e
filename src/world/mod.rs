//! Scene model the physics core operates on

pub mod delta;
pub mod entity;
pub mod images;
pub mod prefabs;
pub mod projectile;
pub mod scene;
pub mod tile_map;
pub mod viewport;

pub use delta::DeltaTimer;
pub use entity::{CollisionResponse, Entity, EntityId, Motion};
pub use images::{SpriteSizes, SpriteSource, usable_size};
pub use prefabs::{EntityKind, EntitySnapshot, Prefab};
pub use projectile::Projectile;
pub use scene::Scene;
pub use tile_map::{Tile, TileCollider, TileMap};
pub use viewport::ViewPort;
