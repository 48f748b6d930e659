//! Camera for ray generation.

use crate::Ray;
use glint_math::{Vec3, VectorExt};

/// Pinhole camera mapping image-plane coordinates to world-space rays.
///
/// The viewport is the parallelogram `lower_left + u * horizontal + v * vertical`
/// for `u, v` in `[0, 1]`; `v = 0` is the bottom edge of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Create a camera from explicit viewport vectors.
    ///
    /// `lower_left` is a direction relative to `origin`, matching how rays
    /// are built in [`Camera::get_ray`].
    pub fn new(origin: Vec3, lower_left: Vec3, horizontal: Vec3, vertical: Vec3) -> Self {
        Self {
            origin,
            lower_left,
            horizontal,
            vertical,
        }
    }

    /// Create a camera at `look_from` aimed at `look_at`.
    ///
    /// - `vup`: world up, used to level the image
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect`: width / height of the image
    ///
    /// Returns `None` if the view direction is zero or parallel to `vup`.
    pub fn look_at(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f64, aspect: f64) -> Option<Self> {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;

        // Calculate camera basis vectors
        let w = (look_from - look_at).unit_vector().ok()?;
        let u = vup.cross(w).unit_vector().ok()?;
        let v = w.cross(u);

        Some(Self {
            origin: look_from,
            lower_left: -half_width * u - half_height * v - w,
            horizontal: 2.0 * half_width * u,
            vertical: 2.0 * half_height * v,
        })
    }

    /// Generate the ray through image-plane point `(u, v)`.
    ///
    /// `u` and `v` are nominally in `[0, 1]`; jittered samples may land
    /// slightly outside.
    #[inline]
    pub fn get_ray(&self, u: f64, v: f64) -> Ray {
        let direction = self.lower_left + u * self.horizontal + v * self.vertical;
        Ray::new(self.origin, direction)
    }
}

impl Default for Camera {
    /// Camera at the origin looking down -Z through a 4x2 viewport at z = -1.
    fn default() -> Self {
        Self::new(
            Vec3::ZERO,
            Vec3::new(-2.0, -1.0, -1.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        )
    }
}
