//! Scene description types for Glint.
//!
//! This module defines the renderer-agnostic description of a scene:
//! named materials, spheres that reference them by name, and a camera.
//! The renderer turns a validated description into live geometry.

use std::collections::HashSet;

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found while loading or validating a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("material '{0}' is defined more than once")]
    DuplicateMaterial(String),

    #[error("sphere {sphere} references unknown material '{material}'")]
    UnknownMaterial { sphere: usize, material: String },

    #[error("sphere {sphere} has invalid radius {radius} (must be positive and finite)")]
    InvalidRadius { sphere: usize, radius: f64 },

    #[error("{field} has a non-finite component")]
    InvalidVector { field: String },

    #[error("invalid camera: {0}")]
    InvalidCamera(String),
}

/// Surface response of a material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialKind {
    /// Ideal diffuse reflector.
    Lambertian { albedo: [f64; 3] },
    /// Specular reflector, blurred by `fuzz` (0 = mirror, 1 = rough).
    Metal {
        albedo: [f64; 3],
        #[serde(default)]
        fuzz: f64,
    },
}

/// A named material that spheres can share.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescription {
    pub name: String,
    #[serde(flatten)]
    pub kind: MaterialKind,
}

impl MaterialDescription {
    pub fn lambertian(name: impl Into<String>, albedo: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Lambertian { albedo },
        }
    }

    pub fn metal(name: impl Into<String>, albedo: [f64; 3], fuzz: f64) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Metal { albedo, fuzz },
        }
    }

    /// Base reflective color.
    pub fn albedo(&self) -> Vec3 {
        match &self.kind {
            MaterialKind::Lambertian { albedo } | MaterialKind::Metal { albedo, .. } => {
                Vec3::from_array(*albedo)
            }
        }
    }
}

/// A sphere referencing a material by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: [f64; 3],
    pub radius: f64,
    pub material: String,
}

impl SphereDescription {
    pub fn new(center: [f64; 3], radius: f64, material: impl Into<String>) -> Self {
        Self {
            center,
            radius,
            material: material.into(),
        }
    }
}

/// How the camera's viewport is specified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraDescription {
    /// Explicit viewport vectors.
    Viewport {
        origin: [f64; 3],
        lower_left: [f64; 3],
        horizontal: [f64; 3],
        vertical: [f64; 3],
    },
    /// Positioned camera with a vertical field of view in degrees.
    LookAt {
        look_from: [f64; 3],
        look_at: [f64; 3],
        #[serde(default = "default_vup")]
        vup: [f64; 3],
        vfov: f64,
        #[serde(default = "default_aspect")]
        aspect: f64,
    },
}

fn default_vup() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

fn default_aspect() -> f64 {
    2.0
}

impl Default for CameraDescription {
    /// The fixed 4x2 viewport one unit in front of the origin.
    fn default() -> Self {
        CameraDescription::Viewport {
            origin: [0.0, 0.0, 0.0],
            lower_left: [-2.0, -1.0, -1.0],
            horizontal: [4.0, 0.0, 0.0],
            vertical: [0.0, 2.0, 0.0],
        }
    }
}

impl CameraDescription {
    fn validate(&self) -> Result<(), SceneError> {
        match self {
            CameraDescription::Viewport {
                origin,
                lower_left,
                horizontal,
                vertical,
            } => {
                check_finite("camera.origin", origin)?;
                check_finite("camera.lower_left", lower_left)?;
                check_finite("camera.horizontal", horizontal)?;
                check_finite("camera.vertical", vertical)?;
                let h = Vec3::from_array(*horizontal);
                let v = Vec3::from_array(*vertical);
                if h.cross(v).length_squared() == 0.0 {
                    return Err(SceneError::InvalidCamera(
                        "horizontal and vertical must span a plane".into(),
                    ));
                }
            }
            CameraDescription::LookAt {
                look_from,
                look_at,
                vup,
                vfov,
                aspect,
            } => {
                check_finite("camera.look_from", look_from)?;
                check_finite("camera.look_at", look_at)?;
                check_finite("camera.vup", vup)?;
                let w = Vec3::from_array(*look_from) - Vec3::from_array(*look_at);
                if w.length_squared() == 0.0 {
                    return Err(SceneError::InvalidCamera(
                        "look_from and look_at must differ".into(),
                    ));
                }
                if Vec3::from_array(*vup).cross(w).length_squared() == 0.0 {
                    return Err(SceneError::InvalidCamera(
                        "vup must not be parallel to the view direction".into(),
                    ));
                }
                if !(*vfov > 0.0 && *vfov < 180.0) {
                    return Err(SceneError::InvalidCamera(format!(
                        "vfov {vfov} must be between 0 and 180 degrees"
                    )));
                }
                if !(*aspect > 0.0 && aspect.is_finite()) {
                    return Err(SceneError::InvalidCamera(format!(
                        "aspect {aspect} must be positive"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A complete scene: camera, shared materials and spheres.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene name (usually from filename)
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub camera: CameraDescription,

    #[serde(default)]
    pub materials: Vec<MaterialDescription>,

    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Create an empty scene with the default camera.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Two diffuse and two metal spheres resting on a large ground sphere.
    pub fn default_scene() -> Self {
        Self {
            name: "default".into(),
            camera: CameraDescription::default(),
            materials: vec![
                MaterialDescription::lambertian("center", [0.8, 0.3, 0.3]),
                MaterialDescription::lambertian("ground", [0.8, 0.8, 0.0]),
                MaterialDescription::metal("gold", [0.8, 0.6, 0.2], 0.3),
                MaterialDescription::metal("silver", [0.8, 0.8, 0.8], 1.0),
            ],
            spheres: vec![
                SphereDescription::new([0.0, 0.0, -1.0], 0.5, "center"),
                SphereDescription::new([0.0, -100.5, -1.0], 100.0, "ground"),
                SphereDescription::new([1.0, 0.0, -1.0], 0.5, "gold"),
                SphereDescription::new([-1.0, 0.0, -1.0], 0.5, "silver"),
            ],
        }
    }

    /// Add a material and return `self` for chaining.
    pub fn with_material(mut self, material: MaterialDescription) -> Self {
        self.materials.push(material);
        self
    }

    /// Add a sphere and return `self` for chaining.
    pub fn with_sphere(mut self, sphere: SphereDescription) -> Self {
        self.spheres.push(sphere);
        self
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<&MaterialDescription> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Get material count.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Get sphere count.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Check names, references and numeric ranges.
    ///
    /// Metal fuzz outside [0, 1] is accepted here; the renderer clamps it.
    pub fn validate(&self) -> Result<(), SceneError> {
        self.camera.validate()?;

        let mut names = HashSet::new();
        for material in &self.materials {
            if !names.insert(material.name.as_str()) {
                return Err(SceneError::DuplicateMaterial(material.name.clone()));
            }
            let albedo = match &material.kind {
                MaterialKind::Lambertian { albedo } => albedo,
                MaterialKind::Metal { albedo, fuzz } => {
                    if !fuzz.is_finite() {
                        return Err(SceneError::InvalidVector {
                            field: format!("material '{}' fuzz", material.name),
                        });
                    }
                    albedo
                }
            };
            check_finite(&format!("material '{}' albedo", material.name), albedo)?;
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            check_finite(&format!("sphere {index} center"), &sphere.center)?;
            if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
                return Err(SceneError::InvalidRadius {
                    sphere: index,
                    radius: sphere.radius,
                });
            }
            if !names.contains(sphere.material.as_str()) {
                return Err(SceneError::UnknownMaterial {
                    sphere: index,
                    material: sphere.material.clone(),
                });
            }
        }

        Ok(())
    }
}

fn check_finite(field: &str, v: &[f64; 3]) -> Result<(), SceneError> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SceneError::InvalidVector {
            field: field.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_is_valid() {
        let scene = SceneDescription::default_scene();
        assert_eq!(scene.material_count(), 4);
        assert_eq!(scene.sphere_count(), 4);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_material_lookup() {
        let scene = SceneDescription::default_scene();
        let gold = scene.material("gold").unwrap();
        assert_eq!(gold.albedo(), Vec3::new(0.8, 0.6, 0.2));
        assert!(matches!(gold.kind, MaterialKind::Metal { fuzz, .. } if fuzz == 0.3));
        assert!(scene.material("glass").is_none());
    }

    #[test]
    fn test_empty_scene_is_valid() {
        assert!(SceneDescription::new("empty").validate().is_ok());
    }

    #[test]
    fn test_duplicate_material() {
        let scene = SceneDescription::new("dup")
            .with_material(MaterialDescription::lambertian("grey", [0.5; 3]))
            .with_material(MaterialDescription::metal("grey", [0.5; 3], 0.0));

        assert!(matches!(
            scene.validate(),
            Err(SceneError::DuplicateMaterial(name)) if name == "grey"
        ));
    }

    #[test]
    fn test_unknown_material() {
        let scene = SceneDescription::new("unknown")
            .with_sphere(SphereDescription::new([0.0, 0.0, -1.0], 0.5, "missing"));

        assert!(matches!(
            scene.validate(),
            Err(SceneError::UnknownMaterial { sphere: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_radius() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let scene = SceneDescription::new("radius")
                .with_material(MaterialDescription::lambertian("grey", [0.5; 3]))
                .with_sphere(SphereDescription::new([0.0, 0.0, -1.0], radius, "grey"));

            assert!(matches!(
                scene.validate(),
                Err(SceneError::InvalidRadius { sphere: 0, .. })
            ));
        }
    }

    #[test]
    fn test_non_finite_center() {
        let scene = SceneDescription::new("nan")
            .with_material(MaterialDescription::lambertian("grey", [0.5; 3]))
            .with_sphere(SphereDescription::new([f64::NAN, 0.0, -1.0], 0.5, "grey"));

        assert!(matches!(scene.validate(), Err(SceneError::InvalidVector { .. })));
    }

    #[test]
    fn test_invalid_look_at_camera() {
        let mut scene = SceneDescription::new("camera");
        scene.camera = CameraDescription::LookAt {
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, 0.0],
            vup: default_vup(),
            vfov: 90.0,
            aspect: 2.0,
        };
        assert!(matches!(scene.validate(), Err(SceneError::InvalidCamera(_))));

        scene.camera = CameraDescription::LookAt {
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            vup: default_vup(),
            vfov: 180.0,
            aspect: 2.0,
        };
        assert!(matches!(scene.validate(), Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_degenerate_viewport() {
        let mut scene = SceneDescription::new("flat");
        scene.camera = CameraDescription::Viewport {
            origin: [0.0; 3],
            lower_left: [-2.0, -1.0, -1.0],
            horizontal: [4.0, 0.0, 0.0],
            vertical: [2.0, 0.0, 0.0],
        };
        assert!(matches!(scene.validate(), Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "materials": [
                { "name": "matte", "type": "lambertian", "albedo": [0.5, 0.5, 0.5] },
                { "name": "mirror", "type": "metal", "albedo": [0.9, 0.9, 0.9] }
            ],
            "spheres": [
                { "center": [0, 0, -1], "radius": 0.5, "material": "matte" }
            ]
        }"#;

        let scene: SceneDescription = serde_json::from_str(json).unwrap();
        assert_eq!(scene.camera, CameraDescription::default());
        assert_eq!(
            scene.material("mirror").unwrap().kind,
            MaterialKind::Metal { albedo: [0.9, 0.9, 0.9], fuzz: 0.0 }
        );
        assert_eq!(scene.spheres[0].center, [0.0, 0.0, -1.0]);
        assert!(scene.validate().is_ok());
    }
}
