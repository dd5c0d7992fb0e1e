//! Narrow phase: separating axis test between two oriented boxes
//!
//! The candidate axes are the edge normals of both boxes. A rectangle only has
//! two distinct edge directions (opposite edges give the same axis with the
//! sign flipped and the same overlap), so each box contributes the normals of
//! its first two edges.

use crate::geometry::{OrientedBox, Point, Vector};
use crate::world::{Entity, EntityId};

/// What a collider is, for reporting collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderId {
    Entity(EntityId),
    Tile { row: usize, column: usize },
    Viewport,
}

/// Anything that can take part in a narrow phase test
pub trait Collider {
    fn collider_id(&self) -> ColliderId;

    /// Anchor position, used when deciding which way to push
    fn anchor(&self) -> Point;

    /// The collider's box, `None` if it doesn't have one yet
    fn collider_box(&self) -> Option<&OrientedBox>;
}

impl Collider for Entity {
    fn collider_id(&self) -> ColliderId {
        ColliderId::Entity(self.id())
    }

    fn anchor(&self) -> Point {
        self.position()
    }

    fn collider_box(&self) -> Option<&OrientedBox> {
        self.bounding_box()
    }
}

/// Interval covered by a shape projected onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f64,
    pub max: f64,
}

impl Projection {
    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }
}

/// Project points onto an axis
pub fn project(points: &[Point], axis: Vector) -> Projection {
    let axis = axis.as_dvec2();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in points {
        let d = axis.dot(p.as_dvec2());
        min = min.min(d);
        max = max.max(d);
    }
    Projection { min, max }
}

/// Result of a positive narrow phase test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionData {
    pub tested: ColliderId,
    pub target: ColliderId,
    axis: Vector,
    overlap: f64,
}

impl CollisionData {
    /// Unit axis of minimum overlap; its sign is not meaningful
    #[inline]
    pub fn axis(&self) -> Vector {
        self.axis
    }

    /// Penetration depth along `axis`
    #[inline]
    pub fn overlap_amount(&self) -> f64 {
        self.overlap
    }
}

/// Unique separating axis candidates of a box
fn box_axes(bbox: &OrientedBox) -> impl Iterator<Item = Vector> + '_ {
    let v = bbox.vertices();
    [(v[0], v[1]), (v[1], v[2])]
        .into_iter()
        .filter_map(|(a, b)| (b - a).normal())
}

/// Overlap on a single axis, zero when the intervals are separate or touching
fn axis_overlap(axis: Vector, a: &OrientedBox, b: &OrientedBox) -> f64 {
    let p1 = project(a.vertices(), axis);
    let p2 = project(b.vertices(), axis);
    let centers = project(&[a.center(), b.center()], axis);
    let overlap = p1.length() / 2.0 + p2.length() / 2.0 - centers.length();
    overlap.max(0.0)
}

/// Minimum translation axis and depth between two boxes
///
/// Returns `None` as soon as any axis separates them. Ties keep the first
/// axis found, testing `a`'s axes before `b`'s.
pub fn minimum_translation(a: &OrientedBox, b: &OrientedBox) -> Option<(Vector, f64)> {
    let mut best: Option<(Vector, f64)> = None;
    for axis in box_axes(a).chain(box_axes(b)) {
        let overlap = axis_overlap(axis, a, b);
        if overlap == 0.0 {
            return None;
        }
        if best.is_none_or(|(_, min)| overlap < min) {
            best = Some((axis, overlap));
        }
    }
    best
}

/// Test two colliders for collision
///
/// Returns `None` when they don't intersect or either one lacks a box.
pub fn collision_data<A, B>(tested: &A, target: &B) -> Option<CollisionData>
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let a = tested.collider_box()?;
    let b = target.collider_box()?;
    let (axis, overlap) = minimum_translation(a, b)?;
    Some(CollisionData {
        tested: tested.collider_id(),
        target: target.collider_id(),
        axis,
        overlap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    fn boxed(id: u64, x: f64, y: f64, w: f64, h: f64, rot: f64) -> Entity {
        let mut e = Entity::new(EntityId(id), "crate")
            .with_position(pt(x, y))
            .with_rotation(rot)
            .with_collidable(true);
        e.set_bounding_box(Some(OrientedBox::new(pt(x, y), w, h, rot)));
        e
    }

    #[test]
    fn test_missing_box_is_no_collision() {
        let a = boxed(1, 0.0, 0.0, 32.0, 32.0, 0.0);
        let b = Entity::new(EntityId(2), "crate").with_collidable(true);
        assert!(collision_data(&a, &b).is_none());
        assert!(collision_data(&b, &a).is_none());
    }

    #[test]
    fn test_overlap_along_x() {
        let a = boxed(1, 70.0, 0.0, 32.0, 32.0, 0.0);
        let b = boxed(2, 100.0, 0.0, 32.0, 32.0, 0.0);
        let data = collision_data(&a, &b).unwrap();
        assert_eq!(data.tested, ColliderId::Entity(EntityId(1)));
        assert_eq!(data.target, ColliderId::Entity(EntityId(2)));
        assert!((data.overlap_amount() - 2.0).abs() < 1e-9);
        assert!((data.axis().x().abs() - 1.0).abs() < 1e-9);
        assert!(data.axis().y().abs() < 1e-9);
    }

    #[test]
    fn test_touching_boxes_do_not_collide() {
        let a = boxed(1, 68.0, 0.0, 32.0, 32.0, 0.0);
        let b = boxed(2, 100.0, 0.0, 32.0, 32.0, 0.0);
        assert!(collision_data(&a, &b).is_none());
    }

    #[test]
    fn test_rotated_box_corner_gap() {
        // A diamond whose corner stops short of the square's edge
        let square = boxed(1, 0.0, 0.0, 20.0, 20.0, 0.0);
        let diamond = boxed(2, 10.0 + 14.5, 0.0, 20.0, 20.0, 45.0);
        assert!(collision_data(&square, &diamond).is_none());

        let diamond = boxed(2, 10.0 + 13.0, 0.0, 20.0, 20.0, 45.0);
        let data = collision_data(&square, &diamond).unwrap();
        assert!(data.overlap_amount() > 0.0);
    }

    #[test]
    fn test_identical_boxes_collide() {
        let a = boxed(1, 5.0, 5.0, 10.0, 30.0, 17.0);
        let b = boxed(2, 5.0, 5.0, 10.0, 30.0, 17.0);
        let data = collision_data(&a, &b).unwrap();
        // Smallest extent of the box wins
        assert!((data.overlap_amount() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_inset_box_projects_its_geometric_center() {
        // Anchored on its right edge, so the box spans x = -20..0
        let mut a = Entity::new(EntityId(1), "car-green").with_collidable(true);
        a.set_bounding_box(Some(OrientedBox::from_extents(
            Point::ORIGIN,
            10.0,
            10.0,
            20.0,
            0.0,
            0.0,
        )));
        assert_eq!(a.bounding_box().unwrap().center(), pt(-10.0, 0.0));

        // Anchors 6 apart, boxes 1 apart
        let clear = boxed(2, 6.0, 0.0, 10.0, 10.0, 0.0);
        assert!(collision_data(&a, &clear).is_none());

        let near = boxed(2, 4.0, 0.0, 10.0, 10.0, 0.0);
        let data = collision_data(&a, &near).unwrap();
        assert!((data.overlap_amount() - 1.0).abs() < 1e-9);
        assert!((data.axis().x().abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection() {
        let p = project(
            &[pt(1.0, 5.0), pt(-3.0, 2.0), pt(4.0, 0.0)],
            Vector::new(1.0, 0.0).unwrap(),
        );
        assert_eq!(p, Projection { min: -3.0, max: 4.0 });
        assert_eq!(p.length(), 7.0);
    }

    proptest! {
        #[test]
        fn prop_far_apart_never_collide(
            x in -1000.0f64..1000.0, y in -1000.0f64..1000.0,
            w1 in 1.0f64..100.0, h1 in 1.0f64..100.0,
            w2 in 1.0f64..100.0, h2 in 1.0f64..100.0,
            r1 in 0.0f64..360.0, r2 in 0.0f64..360.0,
            angle in 0.0f64..360.0,
        ) {
            let a = boxed(1, x, y, w1, h1, r1);
            let reach = a.bounding_box().unwrap().radius()
                + OrientedBox::new(Point::ORIGIN, w2, h2, 0.0).radius();
            let dir = Vector::new(1.0, 0.0).unwrap().rotate(angle);
            let at = pt(x, y) + dir * (reach + 0.5);
            let b = boxed(2, at.x(), at.y(), w2, h2, r2);
            prop_assert!(collision_data(&a, &b).is_none());
        }

        #[test]
        fn prop_collision_symmetric(
            dx in -60.0f64..60.0, dy in -60.0f64..60.0,
            r1 in 0.0f64..360.0, r2 in 0.0f64..360.0,
        ) {
            let a = boxed(1, 0.0, 0.0, 40.0, 20.0, r1);
            let b = boxed(2, dx, dy, 30.0, 30.0, r2);
            let ab = collision_data(&a, &b);
            let ba = collision_data(&b, &a);
            prop_assert_eq!(ab.is_some(), ba.is_some());
            if let (Some(ab), Some(ba)) = (ab, ba) {
                prop_assert!((ab.overlap_amount() - ba.overlap_amount()).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_same_center_collides(w in 1.0f64..200.0, h in 1.0f64..200.0, r in 0.0f64..360.0) {
            let a = boxed(1, 3.0, -4.0, w, h, r);
            let b = boxed(2, 3.0, -4.0, w, h, r);
            let data = collision_data(&a, &b);
            prop_assert!(data.is_some_and(|d| d.overlap_amount() > 0.0));
        }
    }
}
