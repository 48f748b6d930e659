//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use glint_math::{Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at the intersection, pointing out of the surface
    pub normal: Vec3,
    /// Material of the surface that was hit
    pub material: &'a dyn Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with `t` strictly inside `ray_t`.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

/// An ordered list of hittable objects.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl FromIterator<Box<dyn Hittable>> for HittableList {
    fn from_iter<I: IntoIterator<Item = Box<dyn Hittable>>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Metal, Sphere};
    use std::sync::Arc;

    fn grey_sphere(center: Vec3, radius: f64) -> Box<dyn Hittable> {
        Box::new(Sphere::new(
            center,
            radius,
            Arc::new(Lambertian::new(Vec3::splat(0.5))),
        ))
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn test_nearest_hit_regardless_of_order() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let interval = Interval::new(0.001, f64::INFINITY);

        // Overlapping spheres: the near one's front face is at t=0.5,
        // the far one's at t=0.8.
        let near = || grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let far = || grey_sphere(Vec3::new(0.0, 0.0, -1.5), 0.7);

        let forward: HittableList = vec![near(), far()].into_iter().collect();
        let reversed: HittableList = vec![far(), near()].into_iter().collect();

        for world in [forward, reversed] {
            let rec = world.hit(&ray, interval).unwrap();
            assert!((rec.t - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_nearest_hit_matches_minimum_of_members() {
        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::new(0.05, -0.1, -1.0));
        let interval = Interval::new(0.001, f64::INFINITY);
        let centers = [
            (Vec3::new(0.0, 0.0, -3.0), 1.0),
            (Vec3::new(0.2, 0.0, -2.0), 0.6),
            (Vec3::new(0.3, -0.3, -4.0), 2.0),
        ];

        let expected = centers
            .iter()
            .filter_map(|&(c, r)| grey_sphere(c, r).hit(&ray, interval).map(|rec| rec.t))
            .fold(f64::INFINITY, f64::min);

        let world: HittableList = centers.iter().map(|&(c, r)| grey_sphere(c, r)).collect();
        let rec = world.hit(&ray, interval).unwrap();
        assert_eq!(rec.t, expected);
    }

    #[test]
    fn test_hit_reports_material_of_nearest() {
        let mut world = HittableList::new();
        world.add(grey_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0));
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -2.0),
            0.5,
            Arc::new(Metal::new(Vec3::new(0.9, 0.1, 0.1), 0.0)),
        )));
        assert_eq!(world.len(), 2);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-12);
        assert_eq!(rec.material.albedo(), Vec3::new(0.9, 0.1, 0.1));
    }

    #[test]
    fn test_interval_upper_bound_excludes_far_hits() {
        let world: HittableList = vec![grey_sphere(Vec3::new(0.0, 0.0, -10.0), 1.0)]
            .into_iter()
            .collect();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.hit(&ray, Interval::new(0.001, 5.0)).is_none());
    }
}
