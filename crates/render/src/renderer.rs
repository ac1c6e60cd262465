use glam::{Mat4, Vec3, Vec4};
use voxbox_common::CameraConfig;
use voxbox_kernel::{ColumnCoord, PlayerState, World};

use crate::camera::FpsCamera;
use crate::instance::{BlockInstance, collect_instances};

/// Player pose and the camera derived from it.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    pub player: PlayerState,
    pub camera: FpsCamera,
}

impl RenderView {
    pub fn new(player: &PlayerState, config: &CameraConfig, aspect: f32) -> Self {
        Self {
            player: *player,
            camera: FpsCamera::from_player(player, config, aspect),
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the world and a view and produces output. It never
/// mutates the world.
pub trait Renderer {
    type Output;

    fn render(&self, world: &World, view: &RenderView) -> Self::Output;
}

/// Text renderer for headless runs: a status header and a top-down height map.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &World, view: &RenderView) -> String {
        let instances = collect_instances(world);
        let visible = visible_count(&instances, view.camera.view_projection());
        let p = &view.player;
        let cam = &view.camera;

        let mut out = String::new();
        out.push_str(&format!(
            "=== Sandbox (blocks={}, cubes={}) ===\n",
            world.block_count(),
            instances.len()
        ));
        out.push_str(&format!(
            "Player: pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2}) yaw={:.2} pitch={:.2} grounded={}\n",
            p.position.x,
            p.position.y,
            p.position.z,
            p.velocity.x,
            p.velocity.y,
            p.velocity.z,
            p.yaw,
            p.pitch,
            p.grounded
        ));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) forward=({:.2}, {:.2}, {:.2}) fov={:.0}\n",
            cam.eye.x,
            cam.eye.y,
            cam.eye.z,
            cam.forward.x,
            cam.forward.y,
            cam.forward.z,
            cam.fov.to_degrees()
        ));
        out.push_str(&format!("Visible cubes: {visible}/{}\n", instances.len()));
        out.push_str(&height_map(world, world.world_to_column(p.position)));
        out
    }
}

/// Top-down map of column heights, one row per `gz`. Empty columns are `.`,
/// heights above 9 are `#`, and `marker` (if any) is drawn as `@`.
pub fn height_map(world: &World, marker: Option<ColumnCoord>) -> String {
    let config = world.config();
    let mut out = String::with_capacity(((config.grid_w + 1) * config.grid_h).max(0) as usize);
    for gz in 0..config.grid_h {
        for gx in 0..config.grid_w {
            let c = if marker == Some(ColumnCoord::new(gx, gz)) {
                '@'
            } else {
                match world.query_column(gx, gz) {
                    None => '.',
                    Some(b) => char::from_digit(b.h as u32, 10).unwrap_or('#'),
                }
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Number of instances whose center lies inside the clip volume.
pub fn visible_count(instances: &[BlockInstance], view_projection: Mat4) -> usize {
    instances
        .iter()
        .filter(|inst| {
            let clip = view_projection * Vec3::from_array(inst.position).extend(1.0);
            in_clip_volume(clip)
        })
        .count()
}

fn in_clip_volume(clip: Vec4) -> bool {
    clip.w > 0.0 && clip.x.abs() <= clip.w && clip.y.abs() <= clip.w && clip.z.abs() <= clip.w
}
