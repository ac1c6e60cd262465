//! Sandbox kernel: the voxel world, terrain generation, player physics,
//! block shooting and the per-frame simulation tick.
//!
//! # Invariants
//! - Generation is a pure function of [`voxbox_common::WorldConfig`].
//! - All world mutations flow through [`World::remove_block`] and [`World::reset`].
//! - A tick never advances by more than the clock's `max_dt`.

pub mod clock;
pub mod generation;
pub mod physics;
pub mod player;
pub mod shoot;
pub mod sim;
pub mod world;

pub use clock::FrameClock;
pub use physics::{Contact, MoveIntent};
pub use player::PlayerState;
pub use shoot::ShotHit;
pub use sim::{LookDelta, Simulation};
pub use world::{Block, ColumnCoord, World, WorldEvent};

pub fn crate_info() -> &'static str {
    "voxbox-kernel v0.1.0"
}
