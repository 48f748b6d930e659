//! Building renderable scenes from descriptions.

use std::collections::HashMap;
use std::sync::Arc;

use glint_core::{CameraDescription, MaterialDescription, MaterialKind, SceneDescription, SceneError};
use glint_math::Vec3;

use crate::{
    render, render_parallel, Camera, Hittable, HittableList, ImageBuffer, Lambertian, Material,
    Metal, RenderConfig, Sphere,
};

/// Geometry and camera for one render. Immutable once built.
pub struct Scene {
    pub world: HittableList,
    pub camera: Camera,
}

impl Scene {
    /// Build live geometry from a scene description.
    ///
    /// Materials are created once and shared by every sphere that names them.
    pub fn from_description(description: &SceneDescription) -> Result<Self, SceneError> {
        description.validate()?;

        let materials: HashMap<&str, Arc<dyn Material>> = description
            .materials
            .iter()
            .map(|m| (m.name.as_str(), build_material(m)))
            .collect();

        let mut world = HittableList::new();
        for (index, sphere) in description.spheres.iter().enumerate() {
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                SceneError::UnknownMaterial {
                    sphere: index,
                    material: sphere.material.clone(),
                }
            })?;
            world.add(Box::new(Sphere::new(
                Vec3::from_array(sphere.center),
                sphere.radius,
                Arc::clone(material),
            )));
        }

        let camera = build_camera(&description.camera)?;

        log::debug!(
            "Built scene '{}': {} spheres sharing {} materials",
            description.name,
            world.len(),
            materials.len()
        );
        Ok(Self { world, camera })
    }

    /// Render with the strategy `config` selects.
    pub fn render(&self, config: &RenderConfig) -> ImageBuffer {
        if config.parallel {
            render_parallel(&self.camera, &self.world, config)
        } else {
            render(&self.camera, &self.world, config)
        }
    }

    pub fn world(&self) -> &dyn Hittable {
        &self.world
    }
}

fn build_material(description: &MaterialDescription) -> Arc<dyn Material> {
    match description.kind {
        MaterialKind::Lambertian { albedo } => Arc::new(Lambertian::new(Vec3::from_array(albedo))),
        MaterialKind::Metal { albedo, fuzz } => {
            if !(0.0..=1.0).contains(&fuzz) {
                log::warn!(
                    "Material '{}': fuzz {} clamped to [0, 1]",
                    description.name,
                    fuzz
                );
            }
            Arc::new(Metal::new(Vec3::from_array(albedo), fuzz))
        }
    }
}

fn build_camera(description: &CameraDescription) -> Result<Camera, SceneError> {
    match *description {
        CameraDescription::Viewport {
            origin,
            lower_left,
            horizontal,
            vertical,
        } => Ok(Camera::new(
            Vec3::from_array(origin),
            Vec3::from_array(lower_left),
            Vec3::from_array(horizontal),
            Vec3::from_array(vertical),
        )),
        CameraDescription::LookAt {
            look_from,
            look_at,
            vup,
            vfov,
            aspect,
        } => Camera::look_at(
            Vec3::from_array(look_from),
            Vec3::from_array(look_at),
            Vec3::from_array(vup),
            vfov,
            aspect,
        )
        .ok_or_else(|| SceneError::InvalidCamera("degenerate look_at basis".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ray;
    use glint_core::SphereDescription;
    use glint_math::Interval;

    #[test]
    fn test_default_scene_builds() {
        let scene = Scene::from_description(&SceneDescription::default_scene()).unwrap();
        assert_eq!(scene.world.len(), 4);
        assert_eq!(scene.camera, Camera::default());

        // The centre ray hits the front of the centre sphere
        let ray = scene.camera.get_ray(0.5, 0.5);
        let rec = scene.world().hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12);
        assert_eq!(rec.material.albedo(), Vec3::new(0.8, 0.3, 0.3));
    }

    #[test]
    fn test_downward_ray_hits_centre_sphere_first() {
        let scene = Scene::from_description(&SceneDescription::default_scene()).unwrap();
        let ray = Ray::new(Vec3::new(0.0, 5.0, -1.0), Vec3::NEG_Y);
        let rec = scene.world().hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        // Straight down onto the top of the centre sphere
        assert!((rec.p.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_description_is_rejected() {
        let description = SceneDescription::new("bad")
            .with_sphere(SphereDescription::new([0.0, 0.0, -1.0], 0.5, "nowhere"));
        assert!(matches!(
            Scene::from_description(&description),
            Err(SceneError::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn test_out_of_range_fuzz_is_clamped() {
        let description = SceneDescription::new("fuzzy")
            .with_material(MaterialDescription::metal("rough", [0.5; 3], 4.0))
            .with_sphere(SphereDescription::new([0.0, 0.0, -1.0], 0.5, "rough"));
        let scene = Scene::from_description(&description).unwrap();
        assert_eq!(scene.world.len(), 1);
    }

    #[test]
    fn test_look_at_camera_builds() {
        let mut description = SceneDescription::default_scene();
        description.camera = CameraDescription::LookAt {
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            vup: [0.0, 1.0, 0.0],
            vfov: 90.0,
            aspect: 2.0,
        };
        let scene = Scene::from_description(&description).unwrap();
        let ray = scene.camera.get_ray(0.5, 0.5);
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_scene_render_strategies_agree() {
        let scene = Scene::from_description(&SceneDescription::default_scene()).unwrap();
        let config = RenderConfig {
            samples_per_pixel: 2,
            seed: 3,
            ..Default::default()
        };

        let parallel = scene.render(&config);
        let serial = scene.render(&RenderConfig {
            parallel: false,
            ..config
        });
        assert_eq!(parallel, serial);
        assert_eq!(parallel.pixels.len(), 200 * 100);
    }
}
