use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use voxbox_common::math::model_matrix;
use voxbox_kernel::World;

/// One unit cube to draw.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BlockInstance {
    /// Cube center in world space.
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 3],
}

/// GPU-ready instance: model matrix columns plus RGBA.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub color: [f32; 4],
}

impl BlockInstance {
    pub fn model_matrix(&self) -> Mat4 {
        model_matrix(Vec3::from_array(self.position), self.scale)
    }

    pub fn to_raw(&self) -> InstanceRaw {
        let cols = self.model_matrix().to_cols_array_2d();
        let [r, g, b] = self.color;
        InstanceRaw {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color: [r, g, b, 1.0],
        }
    }
}

/// Per-level tint: greener at the bottom, browner toward the top.
pub fn block_color(level: i32) -> [f32; 3] {
    let l = level as f32;
    [0.2 + 0.08 * l, 0.6 - 0.05 * l, 0.2]
}

/// One instance per occupied level, in world order then bottom to top.
pub fn collect_instances(world: &World) -> Vec<BlockInstance> {
    let size = world.block_size();
    let mut instances = Vec::with_capacity(world.level_count());
    for block in world.blocks() {
        let (x, z) = world.column_center(block.gx, block.gz);
        for level in 0..block.h {
            instances.push(BlockInstance {
                position: [x, level as f32 * size + size * 0.5, z],
                scale: size,
                color: block_color(level),
            });
        }
    }
    tracing::trace!(count = instances.len(), "collected block instances");
    instances
}

/// Raw bytes of the GPU layout, ready for a vertex buffer upload.
pub fn instance_bytes(instances: &[BlockInstance]) -> Vec<u8> {
    let raw: Vec<InstanceRaw> = instances.iter().map(BlockInstance::to_raw).collect();
    bytemuck::cast_slice(&raw).to_vec()
}
