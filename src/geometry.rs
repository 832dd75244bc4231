//! Angle and point math shared by every part of the face.
//!
//! Screen space has `y` growing downward while angles follow the usual
//! counter-clockwise convention, so [`point_on_circle`] subtracts the sine
//! term.

/// Screen-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Unrotated extent of a text block or surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Point at `radius` from `center` along `angle_radians`.
///
/// Radius 0 always yields `center`. A negative radius lands on the opposite
/// side, which callers should not treat as meaningful.
pub fn point_on_circle(center: Point2D, radius: f64, angle_radians: f64) -> Point2D {
    Point2D {
        x: center.x + radius * angle_radians.cos(),
        y: center.y - radius * angle_radians.sin(),
    }
}

/// Rotates `point` about the origin with the standard rotation matrix.
pub fn rotate_point(point: Point2D, angle_degrees: f64) -> Point2D {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Point2D {
        x: point.x * cos - point.y * sin,
        y: point.x * sin + point.y * cos,
    }
}

/// 2D affine transform mapping `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub const fn translation(dx: f64, dy: f64) -> Self {
        Affine {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: dx,
            f: dy,
        }
    }

    pub fn rotation(angle_degrees: f64) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Rotation by `angle_degrees` that leaves `pivot` fixed.
    pub fn rotation_about(angle_degrees: f64, pivot: Point2D) -> Self {
        Affine::translation(-pivot.x, -pivot.y)
            .then(Affine::rotation(angle_degrees))
            .then(Affine::translation(pivot.x, pivot.y))
    }

    /// Transform that applies `self` first and `next` second.
    pub fn then(self, next: Affine) -> Affine {
        Affine {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    pub fn apply(&self, p: Point2D) -> Point2D {
        Point2D {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Affine::IDENTITY
    }
}

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[cfg(test)]
pub(crate) fn assert_point_close(actual: Point2D, expected: Point2D) {
    assert!(
        actual.distance(expected) < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}
