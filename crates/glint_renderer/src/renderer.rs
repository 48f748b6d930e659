//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative bounce loop with a hard depth limit
//! - Sky gradient background
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction

use std::time::Instant;

use crate::{Camera, Color, Hittable, Ray, RenderConfig};
use glint_math::{gen_f64, Interval, VectorExt};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Closest parametric distance accepted for a hit.
///
/// Scattered rays start exactly on a surface; floating point error would
/// otherwise let them re-hit it at t ~ 0 ("shadow acne").
pub const T_MIN: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// Bounces are followed in a loop, multiplying the attenuation of every
/// scattering event into a running throughput, so the result equals
/// `attenuation * ray_color(scattered, depth + 1)` without recursion.
/// A path reaching `config.max_depth` bounces contributes black, even when
/// its last ray would miss everything and see the sky.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;
    let mut depth = depth;

    loop {
        if depth >= config.max_depth {
            return Color::ZERO;
        }

        let Some(rec) = world.hit(&ray, Interval::new(T_MIN, f64::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
                depth += 1;
            }
            // Absorbed
            None => return Color::ZERO,
        }
    }
}

/// Compute sky gradient background.
///
/// Blends white at the horizon-down end to light blue straight up.
/// A degenerate direction sees nothing.
pub fn sky_gradient(ray: &Ray) -> Color {
    let Ok(unit_direction) = ray.direction().unit_vector() else {
        return Color::ZERO;
    };
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a gamma-corrected color to 8-bit RGB.
///
/// Channels are clamped to [0, 1] first; NaN maps to 0.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |c: f64| (255.99 * Interval::UNIT.clamp(c)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Random stream for pixel `(i, j)`.
///
/// Every pixel gets its own stream derived from the render seed, so the
/// image does not depend on the order pixels are rendered in.
pub fn pixel_rng(seed: u64, i: u32, j: u32, width: u32) -> StdRng {
    let index = j as u64 * width as u64 + i as u64;
    StdRng::seed_from_u64(seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render a single pixel with multi-sampling.
///
/// `(i, j)` counts from the bottom-left corner of a `resolution.0` by
/// `resolution.1` image. With one sample the ray passes through the pixel
/// corner; otherwise each sample is jittered by a uniform offset in [0, 1)
/// on both axes. The averaged color is returned gamma corrected.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    resolution: (u32, u32),
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let (nx, ny) = resolution;
    let samples = config.samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let (du, dv) = if samples == 1 {
            (0.0, 0.0)
        } else {
            let du = gen_f64(rng);
            (du, gen_f64(rng))
        };
        let u = (i as f64 + du) / nx as f64;
        let v = (j as f64 + dv) / ny as f64;

        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, 0, config, rng);
    }

    // Average the samples
    pixel_color /= samples as f64;

    Color::new(
        linear_to_gamma(pixel_color.x),
        linear_to_gamma(pixel_color.y),
        linear_to_gamma(pixel_color.z),
    )
}

/// Image buffer of gamma-corrected colors.
///
/// Row 0 is the top of the image, matching the order pixels are written.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at column x, row y (row 0 at the top).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at column x, row y (row 0 at the top).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to packed RGB bytes in row-major order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer.
///
/// This is the single-threaded reference path; see
/// [`render_parallel`](crate::render_parallel) for the bucketed version.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let (width, height) = (config.width(), config.height());
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} @ {} spp (serial)",
        width,
        height,
        config.samples_per_pixel
    );
    let start = Instant::now();

    for row in 0..height {
        let j = height - 1 - row;
        for i in 0..width {
            let mut rng = pixel_rng(config.seed, i, j, width);
            let color = render_pixel(camera, world, i, j, (width, height), config, &mut rng);
            image.set(i, row, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}
