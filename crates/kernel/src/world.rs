use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use voxbox_common::{Aabb, WorldConfig};

use crate::generation;

/// Grid column address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnCoord {
    pub gx: i32,
    pub gz: i32,
}

impl ColumnCoord {
    pub fn new(gx: i32, gz: i32) -> Self {
        Self { gx, gz }
    }
}

/// A vertical stack of `h` unit blocks standing on the ground at column `(gx, gz)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub gx: i32,
    pub gz: i32,
    pub h: i32,
}

impl Block {
    pub fn column(&self) -> ColumnCoord {
        ColumnCoord::new(self.gx, self.gz)
    }

    /// World-space height of the stack's top face.
    pub fn top(&self, block_size: f32) -> f32 {
        self.h as f32 * block_size
    }
}

/// A record of every mutation applied to the block set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// The whole block set was replaced by a fresh generation.
    Generated { seed: u64, blocks: usize },
    /// A column was removed. Carries the block for inspection.
    BlockRemoved { block: Block },
}

/// The voxel world: a sparse set of block columns on a fixed grid.
///
/// Columns are indexed by [`ColumnCoord`] in a BTreeMap, so there is at most
/// one block per column and iteration order is deterministic. Columns with
/// no blocks are simply absent.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    blocks: BTreeMap<ColumnCoord, Block>,
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Generate a world from its configuration.
    pub fn new(config: WorldConfig) -> Self {
        let mut world = Self {
            config,
            blocks: BTreeMap::new(),
            event_log: Vec::new(),
        };
        world.reset();
        world
    }

    /// Build a world from hand-authored blocks.
    ///
    /// Later entries for the same column replace earlier ones; entries with
    /// `h <= 0` are dropped.
    pub fn from_blocks(config: WorldConfig, blocks: impl IntoIterator<Item = Block>) -> Self {
        let blocks = blocks
            .into_iter()
            .filter(|b| b.h > 0)
            .map(|b| (b.column(), b))
            .collect();
        Self {
            config,
            blocks,
            event_log: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn block_size(&self) -> f32 {
        self.config.block_size
    }

    /// Number of occupied columns.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of unit cubes across all columns.
    pub fn level_count(&self) -> usize {
        self.blocks.values().map(|b| b.h as usize).sum()
    }

    /// All blocks in column order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    pub fn query_column(&self, gx: i32, gz: i32) -> Option<Block> {
        self.blocks.get(&ColumnCoord::new(gx, gz)).copied()
    }

    /// Remove the column at `(gx, gz)`. No-op when the column is empty.
    pub fn remove_block(&mut self, gx: i32, gz: i32) -> Option<Block> {
        let block = self.blocks.remove(&ColumnCoord::new(gx, gz))?;
        tracing::debug!(gx, gz, h = block.h, "block removed");
        self.event_log.push(WorldEvent::BlockRemoved { block });
        Some(block)
    }

    /// Discard every block and regenerate from the configuration.
    pub fn reset(&mut self) {
        self.blocks = generation::generate(&self.config)
            .into_iter()
            .map(|b| (b.column(), b))
            .collect();
        self.event_log.push(WorldEvent::Generated {
            seed: self.config.seed,
            blocks: self.blocks.len(),
        });
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn in_bounds(&self, gx: i32, gz: i32) -> bool {
        (0..self.config.grid_w).contains(&gx) && (0..self.config.grid_h).contains(&gz)
    }

    /// World-space X/Z of a column's center.
    pub fn column_center(&self, gx: i32, gz: i32) -> (f32, f32) {
        let size = self.config.block_size;
        (
            (gx - self.config.grid_w / 2) as f32 * size,
            (gz - self.config.grid_h / 2) as f32 * size,
        )
    }

    /// Column containing world point `p`, or `None` outside the grid.
    pub fn world_to_column(&self, p: Vec3) -> Option<ColumnCoord> {
        let size = self.config.block_size;
        let gx = (p.x / size).round() as i32 + self.config.grid_w / 2;
        let gz = (p.z / size).round() as i32 + self.config.grid_h / 2;
        self.in_bounds(gx, gz).then_some(ColumnCoord::new(gx, gz))
    }

    /// Bounding box of one cube of `block`, `level` counted from the ground.
    pub fn level_box(&self, block: &Block, level: i32) -> Aabb {
        let size = self.config.block_size;
        let min = Vec3::new(
            (block.gx - self.config.grid_w / 2) as f32 - 0.5,
            level as f32,
            (block.gz - self.config.grid_h / 2) as f32 - 0.5,
        ) * size;
        Aabb::from_min_size(min, size)
    }

    /// Bounding boxes of every cube in `block`, bottom to top.
    pub fn block_boxes<'a>(&'a self, block: &'a Block) -> impl Iterator<Item = Aabb> + 'a {
        (0..block.h).map(move |level| self.level_box(block, level))
    }

    /// FNV-1a digest of the block set, for cheap equality checks.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        for block in self.blocks.values() {
            mix(&mut h, &block.gx.to_le_bytes());
            mix(&mut h, &block.gz.to_le_bytes());
            mix(&mut h, &block.h.to_le_bytes());
        }
        h
    }
}

impl PartialEq for World {
    /// Worlds are equal when their configuration and block sets match.
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.blocks == other.blocks
    }
}
