//! Line segments and rays

use serde::{Deserialize, Serialize};

use super::point::{Point, Vector};
use crate::error::{Error, Result};

/// A straight line between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub a: Point,
    pub b: Point,
}

impl LineSegment {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Vector from `a` to `b`
    #[inline]
    pub fn direction(&self) -> Vector {
        self.b - self.a
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }
}

/// A half-line with an origin and a unit direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    origin: Point,
    direction: Vector,
}

impl Ray {
    /// Create a ray, normalizing the direction
    ///
    /// Fails with `InvalidGeometry` if the direction has no length.
    pub fn new(origin: Point, direction: Vector) -> Result<Self> {
        let direction = direction.try_normalize().ok_or(Error::InvalidGeometry {
            what: "ray direction",
            x: direction.x(),
            y: direction.y(),
        })?;
        Ok(Self { origin, direction })
    }

    /// Create a ray from `origin` passing through `target`
    pub fn towards(origin: Point, target: Point) -> Result<Self> {
        Self::new(origin, target - origin)
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Segment covering the first `length` units of the ray
    pub fn to_segment(&self, length: f64) -> LineSegment {
        LineSegment::new(self.origin, self.point_at(length))
    }
}
