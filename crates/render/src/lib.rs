//! Rendering adapter: turns simulation state into camera matrices and
//! per-cube instances for an external renderer.
//!
//! # Invariants
//! - Renderers read world and player state; they never mutate it.
//! - Render state is rebuilt from scratch every frame.
//!
//! GPU upload and the draw loop belong to the host. [`BlockInstance`] and
//! [`InstanceRaw`] are `bytemuck::Pod` so a host can upload them directly.
//! [`DebugTextRenderer`] implements [`Renderer`] for headless use.

mod camera;
mod instance;
mod renderer;

pub use camera::{FpsCamera, frame_transform};
pub use instance::{BlockInstance, InstanceRaw, block_color, collect_instances, instance_bytes};
pub use renderer::{DebugTextRenderer, RenderView, Renderer, height_map, visible_count};

pub fn crate_info() -> &'static str {
    "voxbox-render v0.1.0"
}
