//! Deterministic island terrain.

use voxbox_common::WorldConfig;

use crate::world::Block;

/// Share of the smaller grid dimension used as the island radius.
const ISLAND_RADIUS_FRACTION: f32 = 0.45;
const HEIGHT_BIAS: f32 = 0.001;

/// Integer-scramble value noise in (-1, 1].
///
/// All arithmetic wraps at 32 bits so the result is identical on every
/// platform.
pub fn pseudo_noise(x: i32, z: i32) -> f32 {
    let mut n = x.wrapping_add(z.wrapping_mul(57));
    n = n.wrapping_shl(13) ^ n;
    let scrambled = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789_221))
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    1.0 - scrambled as f32 / 1_073_741_824.0
}

/// Lattice offset applied to the noise inputs for a given seed.
///
/// Seed 0 maps to no offset so the default world is the canonical island.
pub fn seed_offset(seed: u64) -> (i32, i32) {
    if seed == 0 {
        return (0, 0);
    }
    let mixed = splitmix64(seed);
    ((mixed & 0x7fff) as i32, ((mixed >> 32) & 0x7fff) as i32)
}

/// Stack height of column `(x, z)`, or 0 when the column is empty.
pub fn column_height(config: &WorldConfig, x: i32, z: i32, offset: (i32, i32)) -> i32 {
    let cx = config.grid_w / 2;
    let cz = config.grid_h / 2;
    let radius = config.grid_w.min(config.grid_h) as f32 * ISLAND_RADIUS_FRACTION;

    let dx = (x - cx) as f32;
    let dz = (z - cz) as f32;
    let d = (dx * dx + dz * dz).sqrt();
    let mask = 1.0 - d / radius;
    if mask <= 0.0 {
        return 0;
    }

    let (ox, oz) = offset;
    let n = pseudo_noise(
        x.wrapping_mul(3).wrapping_add(ox),
        z.wrapping_mul(3).wrapping_add(oz),
    ) * 0.6
        + pseudo_noise(
            x.wrapping_mul(7).wrapping_add(ox),
            z.wrapping_mul(7).wrapping_add(oz),
        ) * 0.4;
    let v = mask * (0.5 + n * 0.5);
    let h = (v * config.max_stack as f32 + HEIGHT_BIAS).floor() as i32;
    h.max(0)
}

/// Generate the island's blocks in row order (z outer, x inner).
pub fn generate(config: &WorldConfig) -> Vec<Block> {
    let offset = seed_offset(config.seed);
    let mut blocks = Vec::new();
    for gz in 0..config.grid_h {
        for gx in 0..config.grid_w {
            let h = column_height(config, gx, gz, offset);
            if h > 0 {
                blocks.push(Block { gx, gz, h });
            }
        }
    }
    tracing::debug!(
        seed = config.seed,
        blocks = blocks.len(),
        grid_w = config.grid_w,
        grid_h = config.grid_h,
        "generated terrain"
    );
    blocks
}

/// Splitmix64 step, used to spread a seed over the noise lattice.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
