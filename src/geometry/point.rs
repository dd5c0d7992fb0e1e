//! Point and vector value types plus the rotation helpers built on them
//!
//! Both types are `Copy` and immutable: every operation returns a new value,
//! so a point handed to a bounding box can never be changed behind its back.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Raw serialized form shared by [`Point`] and [`Vector`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Coords {
    x: f64,
    y: f64,
}

fn check_finite(what: &'static str, x: f64, y: f64) -> Result<()> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidGeometry { what, x, y })
    }
}

/// A position in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Coords", into = "Coords")]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a point, rejecting NaN and infinite components
    pub fn new(x: f64, y: f64) -> Result<Self> {
        check_finite("point", x, y)?;
        Ok(Self { x, y })
    }

    /// Internal constructor for values derived from already-finite geometry
    ///
    /// Arithmetic on finite values can still overflow to infinity, and a
    /// non-finite scalar (a custom sprite size, a NaN rotation) passes
    /// straight through. Callers validate those inputs first; debug builds
    /// assert the result.
    #[inline]
    pub(crate) const fn new_unchecked(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite point");
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Move the point by a displacement
    #[inline]
    pub fn translate(self, offset: Vector) -> Point {
        Point::new_unchecked(self.x + offset.x, self.y + offset.y)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }
}

impl TryFrom<Coords> for Point {
    type Error = Error;

    fn try_from(c: Coords) -> Result<Self> {
        Point::new(c.x, c.y)
    }
}

impl From<Point> for Coords {
    fn from(p: Point) -> Self {
        Coords { x: p.x, y: p.y }
    }
}

impl std::ops::Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        self.translate(rhs)
    }
}

impl std::ops::Sub for Point {
    type Output = Vector;

    /// The vector pointing from `rhs` to `self`
    fn sub(self, rhs: Point) -> Vector {
        Vector::new_unchecked(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A displacement or direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Coords", into = "Coords")]
pub struct Vector {
    x: f64,
    y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    /// Create a vector, rejecting NaN and infinite components
    pub fn new(x: f64, y: f64) -> Result<Self> {
        check_finite("vector", x, y)?;
        Ok(Self { x, y })
    }

    /// See [`Point::new_unchecked`]
    #[inline]
    pub(crate) const fn new_unchecked(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite vector");
        Self { x, y }
    }

    #[inline]
    pub(crate) fn from_dvec2(v: DVec2) -> Self {
        Self::new_unchecked(v.x, v.y)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.as_dvec2().length()
    }

    #[inline]
    pub fn dot(self, other: Vector) -> f64 {
        self.as_dvec2().dot(other.as_dvec2())
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector
    pub fn try_normalize(self) -> Option<Vector> {
        self.as_dvec2().try_normalize().map(Vector::from_dvec2)
    }

    /// Unit vector in the same direction, or zero for a zero-length vector
    #[inline]
    pub fn normalize_or_zero(self) -> Vector {
        Vector::from_dvec2(self.as_dvec2().normalize_or_zero())
    }

    /// Unit normal `(y, -x)` of this vector, `None` if it has no length
    pub fn normal(self) -> Option<Vector> {
        Vector::new_unchecked(self.y, -self.x).try_normalize()
    }

    /// Reflect off a surface with the given unit normal: v' = v - 2(v·n)n
    #[inline]
    pub fn reflect(self, normal: Vector) -> Vector {
        self - normal * (2.0 * self.dot(normal))
    }

    /// Rotate by an angle in degrees
    pub fn rotate(self, degrees: f64) -> Vector {
        let (sin, cos) = rounded_sin_cos(degrees);
        Vector::new_unchecked(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
        )
    }
}

impl TryFrom<Coords> for Vector {
    type Error = Error;

    fn try_from(c: Coords) -> Result<Self> {
        Vector::new(c.x, c.y)
    }
}

impl From<Vector> for Coords {
    fn from(v: Vector) -> Self {
        Coords { x: v.x, y: v.y }
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new_unchecked(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new_unchecked(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new_unchecked(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new_unchecked(-self.x, -self.y)
    }
}

/// Convert degrees to radians
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

/// Convert radians to degrees
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * (180.0 / std::f64::consts::PI)
}

/// Round to 10 decimal places so sin(180°) is exactly 0
#[inline]
fn round10(v: f64) -> f64 {
    (v * 1e10).round() / 1e10
}

/// Sine and cosine of an angle in degrees, with floating noise rounded off
pub fn rounded_sin_cos(degrees: f64) -> (f64, f64) {
    let (sin, cos) = to_radians(degrees).sin_cos();
    (round10(sin), round10(cos))
}

/// Rotate `point` around `fulcrum` by an angle in degrees
pub fn rotate_point(point: Point, fulcrum: Point, degrees: f64) -> Point {
    fulcrum + (point - fulcrum).rotate(degrees)
}

/// Angle between two vectors in degrees, in `[0, 180]`
///
/// Returns `None` if either vector has no length.
pub fn find_angle(v1: Vector, v2: Vector) -> Option<f64> {
    let lengths = v1.length() * v2.length();
    if lengths == 0.0 {
        return None;
    }
    let cos = (v1.dot(v2) / lengths).clamp(-1.0, 1.0);
    Some(to_degrees(cos.acos()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_point_rejects_non_finite() {
        assert!(Point::new(f64::NAN, 0.0).is_err());
        assert!(Point::new(0.0, f64::INFINITY).is_err());
        assert!(Vector::new(f64::NEG_INFINITY, 1.0).is_err());
        assert!(matches!(
            Vector::new(1.0, f64::NAN),
            Err(Error::InvalidGeometry { what: "vector", .. })
        ));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "non-finite vector")]
    fn test_overflowing_arithmetic_is_caught_in_debug() {
        let _ = Vector::new(1e308, 0.0).unwrap() * 10.0;
    }

    #[test]
    fn test_point_deserialize_validates() {
        let p: Point = serde_json::from_str(r#"{"x": 3.5, "y": -2}"#).unwrap();
        assert_eq!(p, Point::new(3.5, -2.0).unwrap());
        // 1e400 overflows to infinity during parsing
        assert!(serde_json::from_str::<Vector>(r#"{"x": 1e400, "y": 0}"#).is_err());
    }

    #[test]
    fn test_point_vector_arithmetic() {
        let a = Point::new(1.0, 2.0).unwrap();
        let b = Point::new(4.0, 6.0).unwrap();
        let v = b - a;
        assert_eq!(v, Vector::new(3.0, 4.0).unwrap());
        assert!(approx(v.length(), 5.0));
        assert!(approx(a.distance(b), 5.0));
        assert_eq!(a + v, b);
    }

    #[test]
    fn test_normalize_zero_length() {
        assert!(Vector::ZERO.try_normalize().is_none());
        assert_eq!(Vector::ZERO.normalize_or_zero(), Vector::ZERO);
        let n = Vector::new(0.0, -5.0).unwrap().try_normalize().unwrap();
        assert!(approx(n.y(), -1.0));
    }

    #[test]
    fn test_normal_is_perpendicular_unit() {
        let edge = Vector::new(32.0, 0.0).unwrap();
        let n = edge.normal().unwrap();
        assert!(approx(n.x(), 0.0));
        assert!(approx(n.y(), -1.0));
        assert!(Vector::ZERO.normal().is_none());
    }

    #[test]
    fn test_rotate_point_quarter_turn() {
        let p = Point::new(2.0, 1.0).unwrap();
        let fulcrum = Point::new(1.0, 1.0).unwrap();
        let r = rotate_point(p, fulcrum, 90.0);
        assert!(approx(r.x(), 1.0));
        assert!(approx(r.y(), 2.0));
    }

    #[test]
    fn test_rounded_sin_cos_exact_at_half_turn() {
        let (sin, cos) = rounded_sin_cos(180.0);
        assert_eq!(sin, 0.0);
        assert_eq!(cos, -1.0);
    }

    #[test]
    fn test_reflect() {
        let v = Vector::new(100.0, 0.0).unwrap();
        let n = Vector::new(-1.0, 0.0).unwrap();
        let r = v.reflect(n);
        assert!(approx(r.x(), -100.0));
        assert!(approx(r.y(), 0.0));
        // Reflection doesn't care about the sign of the normal
        assert_eq!(v.reflect(-n), r);
    }

    #[test]
    fn test_find_angle() {
        let x = Vector::new(1.0, 0.0).unwrap();
        let y = Vector::new(0.0, 3.0).unwrap();
        assert!(approx(find_angle(x, y).unwrap(), 90.0));
        assert!(approx(find_angle(x, -x).unwrap(), 180.0));
        assert!(find_angle(x, Vector::ZERO).is_none());
    }

    proptest! {
        #[test]
        fn prop_finite_components_accepted(x in -1e12f64..1e12, y in -1e12f64..1e12) {
            prop_assert!(Point::new(x, y).is_ok());
            prop_assert!(Vector::new(x, y).is_ok());
        }

        #[test]
        fn prop_rotation_inverse(x in -1e4f64..1e4, y in -1e4f64..1e4, deg in -720.0f64..720.0) {
            let p = Point::new(x, y).unwrap();
            let back = rotate_point(rotate_point(p, Point::ORIGIN, deg), Point::ORIGIN, -deg);
            prop_assert!((back.x() - x).abs() < 1e-5);
            prop_assert!((back.y() - y).abs() < 1e-5);
        }
    }
}
