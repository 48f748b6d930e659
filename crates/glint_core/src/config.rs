//! Render configuration.
//!
//! Every field has a default, so a config file only needs to name the
//! settings it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base image width before `scale` is applied.
pub const BASE_WIDTH: u32 = 200;
/// Base image height before `scale` is applied.
pub const BASE_HEIGHT: u32 = 100;
/// Bounce limit used when a config does not set one.
pub const DEFAULT_MAX_DEPTH: u32 = 50;
/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Errors that can occur while loading or validating a config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Multiplier on the 200x100 base resolution
    pub scale: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed for the per-pixel random streams
    pub seed: u64,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
    /// Worker threads for parallel rendering (0 = one per core)
    pub threads: usize,
    /// Render buckets in parallel instead of one pixel at a time
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            scale: 1,
            max_depth: DEFAULT_MAX_DEPTH,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            threads: 0,
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        BASE_WIDTH * self.scale
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        BASE_HEIGHT * self.scale
    }

    /// Reject settings the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::Invalid(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        if self.scale == 0 {
            return Err(ConfigError::Invalid("scale must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self.bucket_size == 0 {
            return Err(ConfigError::Invalid(
                "bucket_size must be at least 1".into(),
            ));
        }
        let pixels = BASE_WIDTH
            .checked_mul(self.scale)
            .zip(BASE_HEIGHT.checked_mul(self.scale))
            .and_then(|(w, h)| w.checked_mul(h));
        if pixels.is_none() {
            return Err(ConfigError::Invalid(format!(
                "scale {} produces an image too large to address",
                self.scale
            )));
        }
        Ok(())
    }
}

/// Load a render configuration from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: RenderConfig = serde_json::from_str(&content)?;
    config.validate()?;

    log::debug!("Loaded render config from {}", path.display());
    Ok(config)
}
