//! 2D transformation matrices for positioning badge artwork.

use crate::rect::Point;
use crate::units::*;

/// An affine transformation matrix.
///
/// Uses the standard PDF transformation matrix where (0,0) is at the bottom-left.
/// The matrix is represented as [a, b, c, d, e, f] corresponding to:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// A point `(x, y)` maps to `(a·x + c·y + e, b·x + d·y + f)`. Chaining with
/// [`then`](Transform::then) applies `self` first, then `other`, which is the
/// order PDF `cm` operators compose in when one is nested inside another.
///
/// ```
/// use badge_gen::{Transform, Pt};
///
/// // move 18pt in from the corner, then draw at half size
/// let local = Transform::scale(0.5).then(Transform::translate(Pt(18.0), Pt(18.0)));
/// assert_eq!(local.apply((Pt(10.0), Pt(10.0))), (Pt(23.0), Pt(23.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no transformation)
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a translation transform
    pub fn translate(x: Pt, y: Pt) -> Self {
        Transform {
            e: *x,
            f: *y,
            ..Self::identity()
        }
    }

    /// Create a uniform scaling transform
    pub fn scale(factor: f32) -> Self {
        Transform {
            a: factor,
            d: factor,
            ..Self::identity()
        }
    }

    /// Combine this transform with another (self * other)
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Map a point through this transform
    pub fn apply(&self, point: Point) -> Point {
        let (x, y) = (*point.0, *point.1);
        (
            Pt(self.a * x + self.c * y + self.e),
            Pt(self.b * x + self.d * y + self.f),
        )
    }

    /// The factor lengths are multiplied by. Only meaningful for the uniform
    /// scales and translations badges are built from.
    pub fn length_scale(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }

    pub(crate) fn as_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}
