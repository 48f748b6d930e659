//! Random sampling helpers driven by an explicit random source.

use rand::{Rng, RngCore};

use crate::Vec3;

/// Uniform sample in `[0, 1)`.
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform point strictly inside the unit ball.
///
/// Rejection sampling over the cube `[-1, 1)^3`; about half of the
/// candidates are accepted, so the loop ends quickly for any uniform source.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = 2.0 * Vec3::new(gen_f64(rng), gen_f64(rng), gen_f64(rng)) - Vec3::ONE;
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
