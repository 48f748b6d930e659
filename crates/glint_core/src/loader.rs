//! Scene file loading.
//!
//! Scenes are JSON documents matching [`SceneDescription`]. Loading always
//! validates, so a returned description can be built without further checks.

use std::path::Path;

use crate::scene::{SceneDescription, SceneError};

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, SceneError>;

/// Load and validate a scene file.
///
/// The scene name defaults to the file stem when the document has none.
///
/// # Example
///
/// ```ignore
/// use glint_core::load_scene;
///
/// let scene = load_scene("scenes/spheres.json")?;
/// println!("Loaded {} spheres", scene.sphere_count());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let mut scene = load_scene_from_str(&content)?;

    if scene.name.is_empty() {
        scene.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }

    log::debug!(
        "Loaded scene '{}' from {}: {} materials, {} spheres",
        scene.name,
        path.display(),
        scene.material_count(),
        scene.sphere_count()
    );
    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(json)?;
    scene.validate()?;
    Ok(scene)
}
