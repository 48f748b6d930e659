//! Glint math - double precision vector algebra for the path tracer.
//!
//! `Vec3` is glam's `DVec3`; the renderer-specific operations that glam
//! does not name (fallible normalization, reflection, squared length under
//! its traditional name) live on the [`VectorExt`] trait.

// Re-export glam for convenience
pub use glam::{dvec3, DVec3};

/// Three-component `f64` vector used for points, directions and colors.
pub type Vec3 = DVec3;

mod interval;
mod ray;
mod sampling;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{gen_f64, random_in_unit_sphere};
pub use vector::{MathError, VectorExt};
