//! Glint Core - scene description and render configuration.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `MaterialDescription`,
//!   `SphereDescription`, `CameraDescription`
//! - **Scene files**: JSON loading with validation
//! - **Render configuration**: `RenderConfig` with defaults and JSON loading
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{load_scene, SceneDescription};
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} materials, {} spheres",
//!     scene.material_count(),
//!     scene.sphere_count());
//! ```

pub mod config;
pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use config::{
    load_config, ConfigError, RenderConfig, BASE_HEIGHT, BASE_WIDTH, DEFAULT_BUCKET_SIZE,
    DEFAULT_MAX_DEPTH,
};
pub use loader::{load_scene, load_scene_from_str};
pub use scene::{
    CameraDescription, MaterialDescription, MaterialKind, SceneDescription, SceneError,
    SphereDescription,
};
