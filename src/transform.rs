//! 2D affine transformations carried in the layout state.

use crate::geometry::Rect;
use crate::units::*;

/// An affine transformation matrix, stored as `[a, b, c, d, e, f]`:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// Transforms compose with [`then`](Transform::then): `t.then(u)` applies `t`
/// first and `u` second.
///
/// ```
/// use flow_layout::{Transform, Pt};
///
/// let t = Transform::scale(2.0, 2.0).then(Transform::translate(Pt(10.0), Pt(0.0)));
/// assert_eq!(t.apply(Pt(1.0), Pt(1.0)), (Pt(12.0), Pt(2.0)));
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

    pub fn translate(x: Pt, y: Pt) -> Self {
        Transform {
            e: *x,
            f: *y,
            ..Self::identity()
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Transform {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Counter-clockwise rotation, angle in radians
    pub fn rotate(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// `self` followed by `other`
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

    /// Map a point through the transform
    pub fn apply(&self, x: Pt, y: Pt) -> (Pt, Pt) {
        (
            Pt(self.a * *x + self.c * *y + self.e),
            Pt(self.b * *x + self.d * *y + self.f),
        )
    }

    /// Axis-aligned rectangle enclosing the transformed corners of `rect`
    pub fn apply_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.apply(rect.x1, rect.y1),
            self.apply(rect.x2, rect.y1),
            self.apply(rect.x2, rect.y2),
            self.apply(rect.x1, rect.y2),
        ];
        let mut out = Rect::new(corners[0].0, corners[0].1, corners[0].0, corners[0].1);
        for (x, y) in corners.iter().skip(1) {
            out.x1 = out.x1.min(*x);
            out.y1 = out.y1.min(*y);
            out.x2 = out.x2.max(*x);
            out.y2 = out.y2.max(*y);
        }
        out
    }

    pub fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}
