//! Geometric primitives for scene and screen space.
//!
//! [`Point3d`] doubles as a position and as a direction vector. [`Rect`] is an
//! integer pixel rectangle used for tracer bounds.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A 3D point or vector with `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3d {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate (grows downward on screen).
    pub y: f64,
    /// Z coordinate (grows away from the viewer).
    pub z: f64,
}

/// Rotation axis for [`Point3d::rotated_around`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Rotate in the Y/Z plane.
    X,
    /// Rotate in the X/Z plane.
    Y,
    /// Rotate in the X/Y plane.
    Z,
}

impl Point3d {
    /// Origin / "no direction".
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Scale every component by `f`.
    #[must_use]
    pub fn times(self, f: f64) -> Self {
        Self::new(self.x * f, self.y * f, self.z * f)
    }

    /// Dot product.
    #[must_use]
    pub fn scalar_prod(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.scalar_prod(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            self
        } else {
            self.times(1.0 / len)
        }
    }

    /// Rotate this point around `center` by `angle` radians about `axis`.
    #[must_use]
    pub fn rotated_around(self, center: Self, angle: f64, axis: Axis) -> Self {
        let p = self - center;
        let (s, c) = angle.sin_cos();
        let rotated = match axis {
            Axis::X => Self::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c),
            Axis::Y => Self::new(p.x * c - p.z * s, p.y, p.x * s + p.z * c),
            Axis::Z => Self::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z),
        };
        rotated + center
    }
}

impl Add for Point3d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point3d {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Point3d {
    fn from(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

/// Integer pixel rectangle.
///
/// All edges are inclusive: `Rect::new(3, 0, 3, 9)` is a one-pixel column.
/// A rectangle is empty only when `min > max` on an axis.
/// [`Rect::EMPTY_SENTINEL`] marks tracers that never hit; [`Rect::union`]
/// skips it like an empty rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    /// Left edge.
    pub min_x: i32,
    /// Top edge.
    pub min_y: i32,
    /// Right edge.
    pub max_x: i32,
    /// Bottom edge.
    pub max_y: i32,
}

impl Rect {
    /// Bounds of a tracer that never hits (e.g. a group with no children);
    /// lies off-screen.
    pub const EMPTY_SENTINEL: Self = Self::new(-10, -10, -10, -10);

    /// Create a rectangle; corners are swapped into order if needed.
    #[must_use]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self { min_x, min_y, max_x, max_y }
    }

    /// True if the rectangle covers no pixel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// True if the rectangle is empty or [`Rect::EMPTY_SENTINEL`].
    #[must_use]
    pub fn covers_nothing(&self) -> bool {
        self.is_empty() || *self == Self::EMPTY_SENTINEL
    }

    /// Inclusive containment test.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Smallest rectangle containing both; operands that cover nothing are
    /// ignored.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.covers_nothing() {
            return *other;
        }
        if other.covers_nothing() {
            return *self;
        }
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Overlap of both rectangles, or `None` if they share no pixel.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let r = Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        (!r.is_empty()).then_some(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_point_length() {
        assert_relative_eq!(Point3d::new(2.0, 3.0, 6.0).length(), 7.0);
    }

    #[test]
    fn test_normalized_zero_stays_zero() {
        assert_eq!(Point3d::ZERO.normalized(), Point3d::ZERO);
        assert_relative_eq!(Point3d::new(0.0, 0.0, 5.0).normalized().z, 1.0);
    }

    #[test]
    fn test_rotated_around_z() {
        let p = Point3d::new(2.0, 1.0, 0.0);
        let r = p.rotated_around(Point3d::new(1.0, 1.0, 0.0), FRAC_PI_2, Axis::Z);
        assert_relative_eq!(r.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(r.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_preserves_distance() {
        let c = Point3d::new(1.0, -2.0, 3.0);
        let p = Point3d::new(4.0, 5.0, -6.0);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let r = p.rotated_around(c, 0.7, axis);
            assert_relative_eq!((r - c).length(), (p - c).length(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cross() {
        let x = Point3d::new(1.0, 0.0, 0.0);
        let y = Point3d::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Point3d::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rect_union_ignores_empty() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.union(&Rect::EMPTY_SENTINEL), a);
        assert_eq!(Rect::EMPTY_SENTINEL.union(&a), a);
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -5, 20, 8);
        assert_eq!(a.union(&b), Rect::new(0, -5, 20, 10));
    }

    #[test]
    fn test_rect_intersect_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 30, 30);
        assert_eq!(a.intersect(&b), None);
        assert_eq!(a.intersect(&Rect::new(5, 5, 15, 15)), Some(Rect::new(5, 5, 10, 10)));
        assert_eq!(a.intersect(&Rect::new(10, 10, 30, 30)), Some(Rect::new(10, 10, 10, 10)));
    }

    #[test]
    fn test_degenerate_rect_is_not_empty() {
        let column = Rect::new(0, 0, 0, 10);
        assert!(!column.is_empty());
        assert!(column.contains(0, 5));
        assert_eq!(column.union(&Rect::new(5, 5, 20, 20)), Rect::new(0, 0, 20, 20));
        assert!(Rect::EMPTY_SENTINEL.covers_nothing());
    }

    #[test]
    fn test_rect_contains_inclusive() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(0, 0));
        assert!(r.contains(10, 10));
        assert!(!r.contains(11, 5));
        assert!(!r.contains(5, -1));
    }

    #[test]
    fn test_rect_new_orders_corners() {
        assert_eq!(Rect::new(10, 10, 0, 0), Rect::new(0, 0, 10, 10));
    }
}
