//! Line, ray and projectile intersection queries
//!
//! Fast projectiles move further than a thin collider's width in one tick.
//! Instead of sampling their position, the segment they travelled during the
//! tick is intersected with the target's edges.

use crate::consts::RAY_LENGTH;
use crate::geometry::{LineSegment, OrientedBox, Point, Ray};
use crate::world::Projectile;

/// Points closer than this are reported once
const SAME_POINT_EPSILON: f64 = 1e-9;

/// Intersection point of two segments, `None` if they don't cross
///
/// Parallel and collinear segments report no intersection.
pub fn intersect_segments(l1: &LineSegment, l2: &LineSegment) -> Option<Point> {
    let s1 = l1.direction();
    let s2 = l2.direction();

    let denom = -s2.x() * s1.y() + s1.x() * s2.y();
    if denom == 0.0 {
        return None;
    }
    let dx = l1.a.x() - l2.a.x();
    let dy = l1.a.y() - l2.a.y();
    let s = (-s1.y() * dx + s1.x() * dy) / denom;
    let t = (s2.x() * dy - s2.y() * dx) / denom;

    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
        Some(l1.a + s1 * t)
    } else {
        None
    }
}

/// Intersections of a segment with the edges of a box
///
/// A straight segment crosses a convex quad at most twice. Hits through a
/// corner show up on both adjacent edges and are merged.
pub fn intersect_segment_box(segment: &LineSegment, bbox: &OrientedBox) -> Vec<Point> {
    let mut hits: Vec<Point> = Vec::with_capacity(2);
    for edge in bbox.edges() {
        if let Some(p) = intersect_segments(segment, &edge) {
            if !hits.iter().any(|h| h.distance(p) < SAME_POINT_EPSILON) {
                hits.push(p);
            }
        }
    }
    hits
}

/// Where a projectile crossed a box during the current tick
///
/// The tested segment runs from the projectile's position at its last update
/// to its position at `now` (milliseconds).
pub fn intersect_projectile_box(projectile: &Projectile, bbox: &OrientedBox, now: f64) -> Vec<Point> {
    intersect_segment_box(&projectile.travel_segment(now), bbox)
}

/// Where a ray enters and leaves a box
///
/// The ray is treated as a segment `RAY_LENGTH` units long.
pub fn intersect_ray_box(ray: &Ray, bbox: &OrientedBox) -> Vec<Point> {
    intersect_segment_box(&ray.to_segment(RAY_LENGTH), bbox)
}

/// Intersection of two rays
///
/// `None` if they are parallel or the crossing lies behind either origin.
pub fn intersect_rays(ray: &Ray, target: &Ray) -> Option<Point> {
    let d = ray.direction();
    let e = target.direction();
    let offset = target.origin() - ray.origin();

    let det = e.x() * d.y() - e.y() * d.x();
    if det == 0.0 {
        return None;
    }
    let u = (offset.y() * e.x() - offset.x() * e.y()) / det;
    let v = (offset.y() * d.x() - offset.x() * d.y()) / det;

    if u.is_finite() && v.is_finite() && u >= 0.0 && v >= 0.0 {
        Some(ray.point_at(u))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector;
    use proptest::prelude::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> LineSegment {
        LineSegment::new(pt(ax, ay), pt(bx, by))
    }

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn test_crossing_segments() {
        let p = intersect_segments(&seg(0.0, 0.0, 10.0, 10.0), &seg(0.0, 10.0, 10.0, 0.0)).unwrap();
        assert!(close(p, pt(5.0, 5.0)));
    }

    #[test]
    fn test_segments_that_would_cross_if_longer() {
        assert!(intersect_segments(&seg(0.0, 0.0, 4.0, 4.0), &seg(0.0, 10.0, 10.0, 0.0)).is_none());
    }

    #[test]
    fn test_parallel_and_collinear_segments() {
        assert!(intersect_segments(&seg(0.0, 0.0, 10.0, 0.0), &seg(0.0, 1.0, 10.0, 1.0)).is_none());
        assert!(intersect_segments(&seg(0.0, 0.0, 10.0, 0.0), &seg(5.0, 0.0, 15.0, 0.0)).is_none());
    }

    #[test]
    fn test_segment_endpoint_touch() {
        let p = intersect_segments(&seg(0.0, 0.0, 5.0, 0.0), &seg(5.0, -5.0, 5.0, 5.0)).unwrap();
        assert!(close(p, pt(5.0, 0.0)));
    }

    #[test]
    fn test_ray_through_box_enters_and_exits() {
        let ray = Ray::towards(Point::ORIGIN, pt(100.0, 0.0)).unwrap();
        let bbox = OrientedBox::new(pt(50.0, 0.0), 20.0, 20.0, 0.0);
        let mut hits = intersect_ray_box(&ray, &bbox);
        assert_eq!(hits.len(), 2);
        hits.sort_by(|a, b| a.x().total_cmp(&b.x()));
        assert!(close(hits[0], pt(40.0, 0.0)));
        assert!(close(hits[1], pt(60.0, 0.0)));
    }

    #[test]
    fn test_ray_missing_box() {
        let ray = Ray::new(Point::ORIGIN, Vector::new(0.0, 1.0).unwrap()).unwrap();
        let bbox = OrientedBox::new(pt(50.0, 0.0), 20.0, 20.0, 0.0);
        assert!(intersect_ray_box(&ray, &bbox).is_empty());
    }

    #[test]
    fn test_segment_through_corner_counted_once() {
        let bbox = OrientedBox::new(pt(0.0, 0.0), 20.0, 20.0, 0.0);
        // Diagonal through two opposite corners
        let hits = intersect_segment_box(&seg(-20.0, -20.0, 20.0, 20.0), &bbox);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_segment_ending_inside_box() {
        let bbox = OrientedBox::new(pt(0.0, 0.0), 20.0, 20.0, 0.0);
        let hits = intersect_segment_box(&seg(-30.0, 0.0, 0.0, 0.0), &bbox);
        assert_eq!(hits.len(), 1);
        assert!(close(hits[0], pt(-10.0, 0.0)));
    }

    #[test]
    fn test_projectile_cannot_tunnel_thin_wall() {
        // 800 u/s bullet, 50 ms tick: 40 units per tick against a 2 unit wall
        let ray = Ray::towards(Point::ORIGIN, pt(1.0, 0.0)).unwrap();
        let mut bullet = Projectile::new(ray, 800.0, 0.0);
        let wall = OrientedBox::new(pt(30.0, 0.0), 2.0, 100.0, 0.0);

        assert!(intersect_projectile_box(&bullet, &wall, 0.0).is_empty());
        bullet.update(25.0);
        // Both sampled positions (20 and 60) are outside the wall
        let hits = intersect_projectile_box(&bullet, &wall, 75.0);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_ray_ray_intersection() {
        let a = Ray::towards(Point::ORIGIN, pt(1.0, 1.0)).unwrap();
        let b = Ray::towards(pt(10.0, 0.0), pt(9.0, 1.0)).unwrap();
        let p = intersect_rays(&a, &b).unwrap();
        assert!(close(p, pt(5.0, 5.0)));
    }

    #[test]
    fn test_ray_ray_parallel_or_behind() {
        let a = Ray::towards(Point::ORIGIN, pt(1.0, 0.0)).unwrap();
        let b = Ray::towards(pt(0.0, 5.0), pt(1.0, 5.0)).unwrap();
        assert!(intersect_rays(&a, &b).is_none());

        // Crossing would be at (5, 5), behind the second ray's origin
        let a = Ray::towards(Point::ORIGIN, pt(1.0, 1.0)).unwrap();
        let c = Ray::towards(pt(10.0, 0.0), pt(11.0, -1.0)).unwrap();
        assert!(intersect_rays(&a, &c).is_none());

        // And behind the first ray's origin
        let d = Ray::towards(Point::ORIGIN, pt(-1.0, -1.0)).unwrap();
        let e = Ray::towards(pt(10.0, 0.0), pt(9.0, 1.0)).unwrap();
        assert!(intersect_rays(&d, &e).is_none());
    }

    proptest! {
        #[test]
        fn prop_at_most_two_hits(
            ax in -100.0f64..100.0, ay in -100.0f64..100.0,
            bx in -100.0f64..100.0, by in -100.0f64..100.0,
            w in 1.0f64..80.0, h in 1.0f64..80.0, rot in 0.0f64..360.0,
        ) {
            let bbox = OrientedBox::new(Point::ORIGIN, w, h, rot);
            let hits = intersect_segment_box(&seg(ax, ay, bx, by), &bbox);
            prop_assert!(hits.len() <= 2);
        }
    }
}
