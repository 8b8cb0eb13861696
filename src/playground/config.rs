//! Playground Configuration
//!
//! All tuning in one serde struct, loadable from a JSON file. Every field has
//! a default matching the playground's built-in constants, so a partial or
//! missing config file still yields a working setup.

use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::audio::AudioTuning;
use crate::physics::WorldSettings;

/// Errors from loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error (file not found, permission denied, etc.)
    Io(std::io::Error),
    /// JSON parsing error
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Fixed scene objects and spawner tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Spawned bodies are constructed here before relocating to their target
    pub staging_height: f32,
    /// Mass of every spawned body
    pub default_mass: f32,
    /// Marble collider radius
    pub marble_radius: f32,
    /// Marble visual radius (the gem mesh is drawn larger than its collider)
    pub marble_visual_radius: f32,
    pub marble_start: Vec3,
    /// Vehicle chassis collider half-extents
    pub chassis_half_extents: Vec3,
    pub chassis_start: Vec3,
    /// Initial chassis angular velocity, for a tumbling entrance
    pub chassis_spin: Vec3,
    /// Side length of the square mirror floor
    pub floor_size: f32,
    /// Floor mesh offset below y = 0 so props never z-fight with it
    pub floor_offset: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            staging_height: 7.0,
            default_mass: 1.0,
            marble_radius: 0.5,
            marble_visual_radius: 0.75,
            marble_start: Vec3::new(0.0, 3.0, 0.0),
            chassis_half_extents: Vec3::new(2.0, 1.0, 0.5),
            chassis_start: Vec3::new(0.0, 10.0, 4.0),
            chassis_spin: Vec3::new(0.0, 0.0, 0.5),
            floor_size: 50.0,
            floor_offset: 0.05,
        }
    }
}

/// Camera start pose.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            eye: Vec3::new(-3.0, 3.0, 3.0),
            target: Vec3::ZERO,
        }
    }
}

/// Top-level playground configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub physics: WorldSettings,
    pub spawn: SpawnTuning,
    pub audio: AudioTuning,
    pub camera: CameraTuning,
}

impl PlaygroundConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load from a JSON file, falling back to defaults if the file is missing.
    /// A file that exists but fails to parse is reported and also falls back,
    /// so a typo in the config never prevents startup.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                println!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                eprintln!("Failed to load {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builtin_constants() {
        let config = PlaygroundConfig::default();
        assert_eq!(config.physics.gravity, Vec3::new(0.0, -9.82, 0.0));
        assert_eq!(config.spawn.marble_start, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(config.spawn.chassis_half_extents, Vec3::new(2.0, 1.0, 0.5));
        assert_eq!(config.audio.glass_threshold, 0.5);
        assert_eq!(config.camera.eye, Vec3::new(-3.0, 3.0, 3.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: PlaygroundConfig =
            serde_json::from_str(r#"{"spawn": {"staging_height": 12.0}}"#).unwrap();
        assert_eq!(config.spawn.staging_height, 12.0);
        // Untouched fields keep their defaults.
        assert_eq!(config.spawn.marble_radius, 0.5);
        assert_eq!(config.physics.max_substeps, 3);
    }

    #[test]
    fn test_roundtrip() {
        let config = PlaygroundConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PlaygroundConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.spawn.floor_size, config.spawn.floor_size);
        assert_eq!(back.physics.fixed_timestep, config.physics.fixed_timestep);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = PlaygroundConfig::load_or_default(Path::new("/nonexistent/tumblebox.json"));
        assert_eq!(config.spawn.staging_height, 7.0);
    }
}
