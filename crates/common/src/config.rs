use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Top-level sandbox configuration.
///
/// Every section falls back to its defaults, so a YAML file only needs to
/// name the values it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub world: WorldConfig,
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub shot: ShotConfig,
    pub clock: ClockConfig,
}

/// Grid dimensions and terrain parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Columns along X.
    pub grid_w: i32,
    /// Columns along Z.
    pub grid_h: i32,
    /// Tallest stack the generator may emit.
    pub max_stack: i32,
    /// Edge length of one block in world units.
    pub block_size: f32,
    /// Terrain seed. 0 reproduces the unseeded island.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_w: 32,
            grid_h: 32,
            max_stack: 4,
            block_size: 1.0,
            seed: 0,
        }
    }
}

/// First-person controller constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    /// Distance from the feet to the player position.
    pub eye_height: f32,
    /// Hard floor for the player position.
    pub floor_height: f32,
    /// Radius of each collision probe sphere.
    pub probe_radius: f32,
    /// Probe sphere centers, measured downward from the player position.
    pub probe_offsets: Vec<f32>,
    pub push_epsilon: f32,
    pub ground_tolerance: f32,
    /// Intent vectors at or below this length are left unnormalized.
    pub intent_epsilon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            gravity: -9.8,
            jump_velocity: 6.0,
            eye_height: 1.8,
            floor_height: 1.0,
            probe_radius: 0.25,
            probe_offsets: vec![0.9, 1.55],
            push_epsilon: 0.001,
            ground_tolerance: 0.01,
            intent_epsilon: 0.01,
        }
    }
}

/// Camera projection and mouse look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Camera eye height above the player position.
    pub eye_offset: f32,
    /// Radians per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 200.0,
            eye_offset: 0.5,
            mouse_sensitivity: 0.0025,
            pitch_limit: 1.4,
        }
    }
}

/// Ray march used by the shoot interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    pub step: f32,
    pub max_distance: f32,
    /// Slack above a column top that still counts as a hit.
    pub vertical_slack: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            max_distance: 30.0,
            vertical_slack: 0.5,
        }
    }
}

/// Host frame-clock handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Deltas above this (seconds) are treated as hitches.
    pub max_dt: f32,
    /// Step substituted for hitches and non-positive deltas.
    pub fallback_dt: f32,
    /// Number of recent deltas kept for diagnostics.
    pub history: usize,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_dt: 0.05,
            fallback_dt: 1.0 / 60.0,
            history: 120,
        }
    }
}

impl SandboxConfig {
    /// Parse a YAML document and validate it.
    pub fn from_yaml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&src)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if w.grid_w <= 0 || w.grid_h <= 0 {
            return Err(ConfigError::invalid(
                "world.grid_w/grid_h",
                format!("grid must be non-empty, got {}x{}", w.grid_w, w.grid_h),
            ));
        }
        if w.max_stack < 1 {
            return Err(ConfigError::invalid("world.max_stack", "must be at least 1"));
        }
        positive("world.block_size", w.block_size)?;

        let p = &self.physics;
        positive("physics.probe_radius", p.probe_radius)?;
        positive("physics.eye_height", p.eye_height)?;
        if p.probe_offsets.is_empty() {
            return Err(ConfigError::invalid(
                "physics.probe_offsets",
                "at least one probe sphere is required",
            ));
        }

        let c = &self.camera;
        if !(c.fov_y_degrees > 0.0 && c.fov_y_degrees < 180.0) {
            return Err(ConfigError::invalid(
                "camera.fov_y_degrees",
                format!("must be in (0, 180), got {}", c.fov_y_degrees),
            ));
        }
        positive("camera.near", c.near)?;
        if c.far <= c.near {
            return Err(ConfigError::invalid(
                "camera.far",
                format!("must exceed near ({}), got {}", c.near, c.far),
            ));
        }
        positive("camera.pitch_limit", c.pitch_limit)?;

        positive("shot.step", self.shot.step)?;
        positive("shot.max_distance", self.shot.max_distance)?;

        positive("clock.max_dt", self.clock.max_dt)?;
        positive("clock.fallback_dt", self.clock.fallback_dt)?;
        if self.clock.history == 0 {
            return Err(ConfigError::invalid("clock.history", "must be at least 1"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be positive, got {value}"),
        ))
    }
}
