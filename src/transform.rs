//! 2D transformation matrices for content positioning.

use crate::units::Pt;

/// A transformation matrix in the standard PDF form `[a b c d e f]`,
/// with (0, 0) at the bottom-left of the page.
///
/// Transforms compose with [`then`](Transform::then); operations are
/// applied in the order they are chained.
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
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: *x,
            f: *y,
        }
    }

    /// Create a rotation transform (angle in radians, counter-clockwise)
    pub fn rotate(angle: f32) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Rotation about an arbitrary point rather than the origin.
    pub fn rotate_about(angle: f32, x: Pt, y: Pt) -> Self {
        Transform::translate(-x, -y)
            .then(Transform::rotate(angle))
            .then(Transform::translate(x, y))
    }

    /// Combine this transform with another (self, then other)
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

    /// The matrix as the `[a b c d e f]` array PDF content streams take.
    pub fn to_array(self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_about_keeps_the_pivot_fixed() {
        let t = Transform::rotate_about(std::f32::consts::FRAC_PI_2, Pt(10.0), Pt(20.0));
        // applying to the pivot itself must yield the pivot
        let x = t.a * 10.0 + t.c * 20.0 + t.e;
        let y = t.b * 10.0 + t.d * 20.0 + t.f;
        assert!((x - 10.0).abs() < 1e-4);
        assert!((y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn translate_then_translate_adds() {
        let t = Transform::translate(Pt(3.0), Pt(4.0)).then(Transform::translate(Pt(1.0), Pt(1.0)));
        assert_eq!((t.e, t.f), (4.0, 5.0));
    }
}
