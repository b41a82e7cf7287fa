//! 3x2 fixed-point affine matrices.
//!
//! Points are row vectors: `(x', y') = (x, y, 1) * M`. Compositions apply the left operand
//! first, so `translate`, `scale` and `rotate` transform user space before the current matrix.

use crate::foundation::core::{Point, SPoint};
use crate::foundation::fixed::Fixed;
use crate::foundation::trig::{Angle, cos, sin};

/// Affine matrix with 16.16 entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Matrix {
    /// Rows: x basis, y basis, translation.
    pub m: [[Fixed; 2]; 3],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Matrix = Matrix {
        m: [
            [Fixed::ONE, Fixed::ZERO],
            [Fixed::ZERO, Fixed::ONE],
            [Fixed::ZERO, Fixed::ZERO],
        ],
    };

    /// A pure translation.
    pub const fn translation(tx: Fixed, ty: Fixed) -> Matrix {
        Matrix {
            m: [[Fixed::ONE, Fixed::ZERO], [Fixed::ZERO, Fixed::ONE], [tx, ty]],
        }
    }

    /// A pure scale.
    pub const fn scaling(sx: Fixed, sy: Fixed) -> Matrix {
        Matrix {
            m: [[sx, Fixed::ZERO], [Fixed::ZERO, sy], [Fixed::ZERO, Fixed::ZERO]],
        }
    }

    /// A pure rotation by `a`.
    pub fn rotation(a: Angle) -> Matrix {
        let c = cos(a);
        let s = sin(a);
        Matrix {
            m: [[c, s], [-s, c], [Fixed::ZERO, Fixed::ZERO]],
        }
    }

    /// Return `true` for the exact identity; the compositor uses this to pick the fast path.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `a` followed by `b`.
    pub fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
        let mut out = Matrix::IDENTITY;
        for row in 0..3 {
            for col in 0..2 {
                let mut t = if row == 2 { b.m[2][col] } else { Fixed::ZERO };
                for n in 0..2 {
                    t += a.m[row][n] * b.m[n][col];
                }
                out.m[row][col] = t;
            }
        }
        out
    }

    /// Prepend a translation.
    pub fn translate(&mut self, tx: Fixed, ty: Fixed) {
        *self = Matrix::multiply(&Matrix::translation(tx, ty), self);
    }

    /// Prepend a scale.
    pub fn scale(&mut self, sx: Fixed, sy: Fixed) {
        *self = Matrix::multiply(&Matrix::scaling(sx, sy), self);
    }

    /// Prepend a rotation.
    pub fn rotate(&mut self, a: Angle) {
        *self = Matrix::multiply(&Matrix::rotation(a), self);
    }

    /// Transformed x coordinate.
    #[inline]
    pub fn fx(&self, x: Fixed, y: Fixed) -> Fixed {
        x * self.m[0][0] + y * self.m[1][0] + self.m[2][0]
    }

    /// Transformed y coordinate.
    #[inline]
    pub fn fy(&self, x: Fixed, y: Fixed) -> Fixed {
        x * self.m[0][1] + y * self.m[1][1] + self.m[2][1]
    }

    /// Transform a point.
    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(self.fx(p.x, p.y), self.fy(p.x, p.y))
    }

    /// Transform a point into path space.
    pub fn transform_to_path(&self, x: Fixed, y: Fixed) -> SPoint {
        SPoint::new(self.fx(x, y).to_sfixed(), self.fy(x, y).to_sfixed())
    }

    /// Transform a vector (linear part only) into path space.
    pub fn transform_delta(&self, dx: Fixed, dy: Fixed) -> SPoint {
        let x = dx * self.m[0][0] + dy * self.m[1][0];
        let y = dx * self.m[0][1] + dy * self.m[1][1];
        SPoint::new(x.to_sfixed(), y.to_sfixed())
    }

    /// Copy of this matrix with the translation removed.
    pub fn without_translation(&self) -> Matrix {
        let mut m = *self;
        m.m[2] = [Fixed::ZERO, Fixed::ZERO];
        m
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/matrix.rs"]
mod tests;
