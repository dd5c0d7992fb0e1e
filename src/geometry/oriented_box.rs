//! Rotatable rectangle used as the collider of every entity

use serde::{Deserialize, Serialize};

use super::point::{Point, Vector, rotate_point};
use super::segment::LineSegment;

/// An oriented bounding box
///
/// The box is anchored at `position` (the owning entity's position), which is
/// also the fulcrum for rotation. Vertices are ordered top-left, top-right,
/// bottom-right, bottom-left in the unrotated frame.
///
/// Rotation is stored as an absolute angle in degrees, but changing it only
/// rotates the existing vertices by the difference. The vertices are never
/// re-derived from width and height after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    position: Point,
    rotation: f64,
    vertices: [Point; 4],
    /// Offset of the geometric center from `position` in the unrotated frame
    center_offset: Vector,
}

impl OrientedBox {
    /// Create a box of the given size centered on `position`
    pub fn new(position: Point, width: f64, height: f64, rotation: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::from_extents(position, hh, hh, hw, hw, rotation)
    }

    /// Create a box from the distances between `position` and each edge
    ///
    /// The extents may be asymmetric, in which case the geometric center is
    /// offset from `position` and recorded in `center_offset`.
    pub fn from_extents(
        position: Point,
        top: f64,
        bottom: f64,
        left: f64,
        right: f64,
        rotation: f64,
    ) -> Self {
        let (x, y) = (position.x(), position.y());
        let vertices = [
            Point::new_unchecked(x - left, y - top),
            Point::new_unchecked(x + right, y - top),
            Point::new_unchecked(x + right, y + bottom),
            Point::new_unchecked(x - left, y + bottom),
        ];
        let center_offset = Vector::new_unchecked((right - left) / 2.0, (bottom - top) / 2.0);

        let mut bbox = Self {
            position,
            rotation: 0.0,
            vertices,
            center_offset,
        };
        bbox.set_rotation(rotation);
        bbox
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Absolute rotation in degrees
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[inline]
    pub fn vertices(&self) -> &[Point; 4] {
        &self.vertices
    }

    #[inline]
    pub fn center_offset(&self) -> Vector {
        self.center_offset
    }

    /// Geometric center of the box, including offset and rotation
    pub fn center(&self) -> Point {
        rotate_point(self.position + self.center_offset, self.position, self.rotation)
    }

    /// Move the box so that it is anchored at `position`
    pub fn set_position(&mut self, position: Point) {
        let offset = position - self.position;
        for v in &mut self.vertices {
            *v = *v + offset;
        }
        self.position = position;
    }

    /// Set the absolute rotation in degrees
    pub fn set_rotation(&mut self, rotation: f64) {
        let delta = rotation - self.rotation;
        self.rotation = rotation;
        if delta == 0.0 {
            return;
        }
        for v in &mut self.vertices {
            *v = rotate_point(*v, self.position, delta);
        }
    }

    /// The four edges, each running from vertex `i` to vertex `i + 1`
    pub fn edges(&self) -> [LineSegment; 4] {
        let v = &self.vertices;
        [
            LineSegment::new(v[0], v[1]),
            LineSegment::new(v[1], v[2]),
            LineSegment::new(v[2], v[3]),
            LineSegment::new(v[3], v[0]),
        ]
    }

    /// Distance from the anchor to the furthest vertex
    pub fn radius(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| self.position.distance(*v))
            .fold(0.0, f64::max)
    }

    /// Length of the first edge (the unrotated width)
    pub fn width(&self) -> f64 {
        self.vertices[0].distance(self.vertices[1])
    }

    /// Length of the second edge (the unrotated height)
    pub fn height(&self) -> f64 {
        self.vertices[1].distance(self.vertices[2])
    }
}
