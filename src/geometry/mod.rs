//! Geometry primitives
//!
//! Value types only: nothing in here knows about entities or ticks.

pub mod oriented_box;
pub mod point;
pub mod segment;

pub use oriented_box::OrientedBox;
pub use point::{Point, Vector, find_angle, rotate_point, rounded_sin_cos, to_degrees, to_radians};
pub use segment::{LineSegment, Ray};
