//! Geometry primitives shared by the whole toolkit.
//!
//! Widget geometry is integral ([`Vec2i`]): the measure boundary reports
//! integer pixel sizes and every layout computation stays exact. Fractional
//! intermediates (drag deltas, stretch distribution) use [`Vec2f`], whose
//! comparisons go through a single shared tolerance so iterative layout
//! passes converge instead of oscillating on rounding noise.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Tolerance used by every float comparison that feeds layout decisions.
pub const EPSILON: f32 = 1.0e-4;

/// A two-component vector of positions, sizes, or deltas.
///
/// Arithmetic is componentwise; scalar multiplication/division scale both
/// components. See [`Vec2i`] and [`Vec2f`] for the concrete aliases used
/// throughout the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2<T> {
    /// Horizontal component.
    pub x: T,
    /// Vertical component.
    pub y: T,
}

/// Integer vector: widget positions and sizes.
pub type Vec2i = Vector2<i32>;

/// Float vector: fractional intermediates.
pub type Vec2f = Vector2<f32>;

impl<T> Vector2<T> {
    /// Create a vector from its components.
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Copy> Vector2<T> {
    /// Create a vector with both components set to `v`.
    #[inline]
    pub const fn splat(v: T) -> Self {
        Self { x: v, y: v }
    }
}

impl<T: Copy + PartialOrd> Vector2<T> {
    /// Componentwise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: if other.x < self.x { other.x } else { self.x },
            y: if other.y < self.y { other.y } else { self.y },
        }
    }

    /// Componentwise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: if other.x > self.x { other.x } else { self.x },
            y: if other.y > self.y { other.y } else { self.y },
        }
    }

    /// Componentwise clamp into `[lo, hi]`.
    ///
    /// Each `hi` component must not be less than the matching `lo`
    /// component.
    #[inline]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }
}

impl Vec2i {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Convert to a float vector.
    #[inline]
    pub fn to_f32(self) -> Vec2f {
        Vec2f::new(self.x as f32, self.y as f32)
    }
}

impl Vec2f {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Compare with the shared layout tolerance ([`EPSILON`]).
    #[inline]
    pub fn approx_eq(self, other: Self) -> bool {
        (self.x - other.x).abs() <= EPSILON && (self.y - other.y).abs() <= EPSILON
    }

    /// Round to the nearest integer vector (half away from zero).
    #[inline]
    pub fn to_i32(self) -> Vec2i {
        Vec2i::new(self.x.round() as i32, self.y.round() as i32)
    }

    /// Truncate toward negative infinity.
    #[inline]
    pub fn floor_i32(self) -> Vec2i {
        Vec2i::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl<T: Add<Output = T>> Add for Vector2<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Copy + Add<Output = T>> AddAssign for Vector2<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Sub<Output = T>> Sub for Vector2<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Copy + Sub<Output = T>> SubAssign for Vector2<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Neg<Output = T>> Neg for Vector2<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Mul<Output = T>> Mul for Vector2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl<T: Copy + Mul<Output = T>> Mul<T> for Vector2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Copy + Div<Output = T>> Div<T> for Vector2<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: fmt::Display> fmt::Display for Vector2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle: origin (top-left) plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2i,
    /// Extent; components are never negative by construction in layout code.
    pub size: Vec2i,
}

impl Rect {
    /// An empty rectangle at the origin.
    pub const ZERO: Self = Self {
        origin: Vec2i::ZERO,
        size: Vec2i::ZERO,
    };

    /// Create a rectangle from components.
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            origin: Vec2i::new(x, y),
            size: Vec2i::new(w, h),
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i32 {
        self.origin.x + self.size.x
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.y
    }

    /// Half-open containment test: `[origin, origin + size)`.
    #[inline]
    pub fn contains(&self, p: Vec2i) -> bool {
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < self.right() && p.y < self.bottom()
    }

    /// Shift the rectangle by a delta.
    #[inline]
    pub fn translate(&self, delta: Vec2i) -> Self {
        Self {
            origin: self.origin + delta,
            size: self.size,
        }
    }

    /// Intersection with another rectangle; empty result if disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Rect::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_componentwise_arithmetic() {
        let a = Vec2i::new(3, 7);
        let b = Vec2i::new(1, 2);
        assert_eq!(a + b, Vec2i::new(4, 9));
        assert_eq!(a - b, Vec2i::new(2, 5));
        assert_eq!(a * 2, Vec2i::new(6, 14));
        assert_eq!(a * b, Vec2i::new(3, 14));
        assert_eq!(Vec2i::new(8, 6) / 2, Vec2i::new(4, 3));
    }

    #[test]
    fn test_min_max_clamp() {
        let a = Vec2i::new(5, -3);
        let b = Vec2i::new(2, 4);
        assert_eq!(a.min(b), Vec2i::new(2, -3));
        assert_eq!(a.max(b), Vec2i::new(5, 4));
        assert_eq!(
            a.clamp(Vec2i::ZERO, Vec2i::new(4, 4)),
            Vec2i::new(4, 0)
        );
    }

    #[test]
    fn test_approx_eq_tolerance() {
        let a = Vec2f::new(1.0, 2.0);
        assert!(a.approx_eq(Vec2f::new(1.0 + EPSILON / 2.0, 2.0)));
        assert!(!a.approx_eq(Vec2f::new(1.0 + EPSILON * 10.0, 2.0)));
    }

    #[test]
    fn test_casting_round_trip() {
        let v = Vec2i::new(12, -7);
        assert_eq!(v.to_f32().to_i32(), v);
        assert_eq!(Vec2f::new(1.6, -1.6).to_i32(), Vec2i::new(2, -2));
        assert_eq!(Vec2f::new(1.6, -1.6).floor_i32(), Vec2i::new(1, -2));
    }

    #[test]
    fn test_rect_contains_half_open() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(Vec2i::new(10, 10)));
        assert!(r.contains(Vec2i::new(14, 14)));
        assert!(!r.contains(Vec2i::new(15, 14)));
        assert!(!r.contains(Vec2i::new(14, 15)));
        assert!(!r.contains(Vec2i::new(9, 10)));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 5, 5));

        let disjoint = Rect::new(20, 20, 3, 3);
        assert_eq!(a.intersect(&disjoint).size, Vec2i::ZERO);
    }
}
