//! Shared types for the voxbox sandbox: vector/matrix math, configuration, errors.
//!
//! # Invariants
//! - Math helpers are pure and never produce NaN from degenerate input.
//! - Configuration defaults reproduce the stock sandbox exactly.

pub mod config;
pub mod error;
pub mod math;

pub use config::{CameraConfig, ClockConfig, PhysicsConfig, SandboxConfig, ShotConfig, WorldConfig};
pub use error::ConfigError;
pub use math::Aabb;

pub fn crate_info() -> &'static str {
    "voxbox-common v0.1.0"
}
