//! Ray-marched block removal.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxbox_common::ShotConfig;
use voxbox_common::math::normalize;

use crate::world::{Block, World};

/// The column a shot hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotHit {
    pub block: Block,
    /// Distance along the ray of the first sample inside the column.
    pub distance: f32,
    pub point: Vec3,
}

/// March from `origin` along `direction` and return the first column hit.
///
/// A sample hits when it falls on an occupied column and its height lies in
/// `[0, top + vertical_slack]`. Samples outside the grid are skipped.
pub fn cast(world: &World, origin: Vec3, direction: Vec3, config: &ShotConfig) -> Option<ShotHit> {
    let dir = normalize(direction);
    let samples = (config.max_distance / config.step).ceil() as usize;
    for i in 0..samples {
        let t = i as f32 * config.step;
        if t >= config.max_distance {
            break;
        }
        let p = origin + dir * t;
        let Some(column) = world.world_to_column(p) else {
            continue;
        };
        let Some(block) = world.query_column(column.gx, column.gz) else {
            continue;
        };
        let top = block.top(world.block_size());
        if p.y >= 0.0 && p.y <= top + config.vertical_slack {
            return Some(ShotHit {
                block,
                distance: t,
                point: p,
            });
        }
    }
    None
}

/// Cast a shot and remove the whole column it hits. At most one column is
/// removed per shot.
pub fn shoot(world: &mut World, origin: Vec3, direction: Vec3, config: &ShotConfig) -> Option<ShotHit> {
    let hit = cast(world, origin, direction, config)?;
    world.remove_block(hit.block.gx, hit.block.gz);
    Some(hit)
}
