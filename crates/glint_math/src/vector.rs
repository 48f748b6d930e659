//! Renderer-facing vector operations on top of glam.

use thiserror::Error;

use crate::Vec3;

/// Errors raised by vector operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize a vector of length {length}")]
    DegenerateVector { length: f64 },
}

/// Extra operations the tracer needs from a 3-vector.
pub trait VectorExt: Sized {
    /// Sum of the squared components.
    fn squared_length(self) -> f64;

    /// The vector scaled to unit length.
    ///
    /// Fails for zero-length and non-finite vectors instead of producing
    /// NaN components.
    fn unit_vector(self) -> Result<Self, MathError>;

    /// Mirror `self` about the plane with normal `n`: `v - 2(v.n)n`.
    fn reflect(self, n: Self) -> Self;
}

impl VectorExt for Vec3 {
    #[inline]
    fn squared_length(self) -> f64 {
        self.length_squared()
    }

    #[inline]
    fn unit_vector(self) -> Result<Self, MathError> {
        let length = self.length();
        if length > 0.0 && length.is_finite() {
            Ok(self / length)
        } else {
            Err(MathError::DegenerateVector { length })
        }
    }

    #[inline]
    fn reflect(self, n: Self) -> Self {
        self - 2.0 * self.dot(n) * n
    }
}
