//! Crate Physics - collision and motion core for a top-down 2D shooter
//!
//! Core modules:
//! - `geometry`: Points, vectors, oriented boxes, segments and rays
//! - `physics`: Broad phase, SAT narrow phase, projectile hit-testing, tick processor
//! - `world`: Entities, scene, tile map, projectiles, viewport
//! - `settings`: Data-driven physics tuning
//!
//! The game loop calls [`PhysicsProcessor::tick`] once per frame with the
//! elapsed time. Rendering, audio, asset loading and networking live outside
//! this crate and talk to it through the [`world`] types.

pub mod error;
pub mod geometry;
pub mod physics;
pub mod settings;
pub mod world;

pub use error::{Error, Result};
pub use geometry::{LineSegment, OrientedBox, Point, Ray, Vector};
pub use physics::{BoundingBoxBuilder, CollisionData, PhysicsProcessor};
pub use settings::PhysicsSettings;
pub use world::{Entity, EntityId, Scene};

/// Physics configuration constants
pub mod consts {
    /// Edge length of a map tile in world units
    pub const TILE_SIZE: f64 = 32.0;
    /// Broad phase cell size; must exceed twice the largest collider radius
    pub const CELL_SIZE: f64 = 128.0;
    /// Length a ray is extended to when tested against a box
    pub const RAY_LENGTH: f64 = 10_000.0;

    /// Projectile lifetime (ms)
    pub const PROJECTILE_TTL_MS: f64 = 8000.0;
    /// Rifle bullet speed (units/s)
    pub const BULLET_SPEED: f64 = 800.0;

    /// Longest single integration step (s)
    pub const DEFAULT_MAX_DELTA: f64 = 1.0;
}
