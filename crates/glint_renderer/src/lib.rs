//! Glint Renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer for spheres under a sky gradient.
//!
//! Every random draw comes from an explicitly passed source; full renders
//! seed one stream per pixel, so serial and bucketed renders of the same
//! configuration produce identical images.

mod bucket;
mod camera;
mod hittable;
mod material;
mod output;
mod renderer;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Lambertian, Material, Metal, ScatterResult};
pub use output::{save_image, write_ppm, OutputError};
pub use renderer::{
    color_to_rgb, linear_to_gamma, pixel_rng, ray_color, render, render_pixel, sky_gradient,
    ImageBuffer, T_MIN,
};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export math and configuration types used throughout the API
pub use glint_core::{RenderConfig, DEFAULT_BUCKET_SIZE};
pub use glint_math::{Interval, Ray, Vec3};
