//! Collision detection and response
//!
//! - `bounds`: bounding boxes from sprite sizes and inset specs
//! - `broad_phase`: grid partitioning into collision groups
//! - `sat`: separating axis test between oriented boxes
//! - `intersection`: segment and ray queries for projectiles
//! - `processor`: the per-tick pipeline tying them together

pub mod bounds;
pub mod broad_phase;
pub mod intersection;
pub mod processor;
pub mod sat;

pub use bounds::{BoundingBoxBuilder, BoxInsets};
pub use broad_phase::{BroadPhase, CollisionGroup, GridCell};
pub use intersection::{
    intersect_projectile_box, intersect_ray_box, intersect_rays, intersect_segment_box,
    intersect_segments,
};
pub use processor::PhysicsProcessor;
pub use sat::{Collider, ColliderId, CollisionData, Projection, collision_data, minimum_translation};
