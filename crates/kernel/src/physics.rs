//! Gravity integration and capsule-vs-block collision for the player.
//!
//! # Invariants
//! - Horizontal velocity is rebuilt from intent every tick (no inertia).
//! - Collision pushes are horizontal unless the horizontal direction is
//!   degenerate, in which case the push is purely vertical. Position never
//!   becomes NaN.
//! - When several boxes support the player in one tick, the highest top wins.
//! - After resolution no probe sphere overlaps a box, bounded by `MAX_PASSES`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxbox_common::PhysicsConfig;
use voxbox_common::math::normalize;

use crate::player::PlayerState;
use crate::world::World;

/// Movement keys held during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveIntent {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Horizontal movement direction for the given view, unit length when
    /// any key contributes and zero otherwise.
    pub fn direction(&self, player: &PlayerState, epsilon: f32) -> Vec3 {
        let forward = player.forward();
        let right = player.right();
        let mut dir = Vec3::ZERO;
        if self.forward {
            dir += forward;
        }
        if self.back {
            dir -= forward;
        }
        if self.left {
            dir -= right;
        }
        if self.right {
            dir += right;
        }
        dir.y = 0.0;
        if dir.length() > epsilon {
            dir = normalize(dir);
        }
        dir
    }
}

/// What collision resolution did during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contact {
    /// Number of probe/box overlaps that produced a push.
    pub pushes: usize,
    /// Top of the box the player was snapped onto, if any.
    pub support_top: Option<f32>,
}

/// Advance the player by `dt` seconds.
pub fn step(
    player: &mut PlayerState,
    world: &World,
    intent: &MoveIntent,
    dt: f32,
    config: &PhysicsConfig,
) -> Contact {
    let dir = intent.direction(player, config.intent_epsilon);
    player.velocity.x = dir.x * config.move_speed;
    player.velocity.z = dir.z * config.move_speed;

    player.velocity.y += config.gravity * dt;
    if intent.jump && player.grounded {
        player.velocity.y = config.jump_velocity;
        player.grounded = false;
    }

    player.position += player.velocity * dt;

    player.grounded = false;
    let contact = resolve_collisions(player, world, config);

    if player.position.y < config.floor_height {
        player.position.y = config.floor_height;
        player.velocity.y = 0.0;
        player.grounded = true;
    }
    contact
}

/// Upper bound on resolution passes per call.
const MAX_PASSES: usize = 4;

/// Push the player's probe spheres out of every block they overlap.
///
/// Each pass visits boxes in world order and resolves every overlap
/// immediately, so later boxes see the corrected position. Support is
/// collected across the pass and applied once, snapping the feet onto the
/// highest qualifying top. A snap can land a probe inside a taller
/// neighbour, so passes repeat until one leaves the position unchanged.
pub fn resolve_collisions(player: &mut PlayerState, world: &World, config: &PhysicsConfig) -> Contact {
    let mut contact = Contact::default();
    for _ in 0..MAX_PASSES {
        let before = player.position;
        let pass = resolve_pass(player, world, config);
        contact.pushes += pass.pushes;
        if let Some(top) = pass.support_top {
            player.position.y = top + config.eye_height;
            player.velocity.y = 0.0;
            player.grounded = true;
            contact.support_top = Some(top);
        }
        if player.position == before {
            break;
        }
    }
    if contact.pushes > 0 {
        tracing::trace!(pushes = contact.pushes, support = ?contact.support_top, "collisions resolved");
    }
    contact
}

fn resolve_pass(player: &mut PlayerState, world: &World, config: &PhysicsConfig) -> Contact {
    let radius = config.probe_radius;
    let mut contact = Contact::default();

    for block in world.blocks() {
        for bbox in world.block_boxes(block) {
            for &offset in &config.probe_offsets {
                let center = player.position - Vec3::Y * offset;
                let diff = center - bbox.closest_point(center);
                let dist = diff.length();
                if dist >= radius {
                    continue;
                }

                let depth = radius - dist + config.push_epsilon;
                let horizontal = normalize(Vec3::new(diff.x, 0.0, diff.z));
                let push = if horizontal == Vec3::ZERO {
                    Vec3::new(0.0, depth, 0.0)
                } else {
                    horizontal * depth
                };
                player.position += push;
                contact.pushes += 1;

                let top = bbox.max.y;
                if player.position.y - config.eye_height <= top + config.ground_tolerance {
                    contact.support_top = Some(contact.support_top.map_or(top, |t| t.max(top)));
                }
            }
        }
    }
    contact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Block;
    use voxbox_common::WorldConfig;

    const DT: f32 = 1.0 / 60.0;

    fn single_column(h: i32) -> World {
        World::from_blocks(WorldConfig::default(), [Block { gx: 16, gz: 16, h }])
    }

    fn empty_world() -> World {
        World::from_blocks(WorldConfig::default(), [])
    }

    fn player_at(position: Vec3) -> PlayerState {
        PlayerState {
            position,
            ..PlayerState::spawn(&PhysicsConfig::default())
        }
    }

    fn max_penetration(player: &PlayerState, world: &World, config: &PhysicsConfig) -> f32 {
        let mut worst = 0.0_f32;
        for block in world.blocks() {
            for bbox in world.block_boxes(block) {
                for &offset in &config.probe_offsets {
                    let center = player.position - Vec3::Y * offset;
                    worst = worst.max(bbox.sphere_penetration(center, config.probe_radius));
                }
            }
        }
        worst
    }

    #[test]
    fn idle_intent_has_zero_direction() {
        let p = player_at(Vec3::ZERO);
        assert_eq!(MoveIntent::default().direction(&p, 0.01), Vec3::ZERO);
        assert!(MoveIntent::default().is_idle());
    }

    #[test]
    fn opposite_keys_cancel_without_nan() {
        let p = player_at(Vec3::ZERO);
        let intent = MoveIntent {
            forward: true,
            back: true,
            ..MoveIntent::default()
        };
        let dir = intent.direction(&p, 0.01);
        assert_eq!(dir, Vec3::ZERO);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let p = player_at(Vec3::ZERO);
        let diagonal = MoveIntent {
            forward: true,
            right: true,
            ..MoveIntent::default()
        };
        let dir = diagonal.direction(&p, 0.01);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x > 0.0 && dir.z < 0.0);
    }

    #[test]
    fn looking_down_still_moves_horizontally() {
        let mut p = player_at(Vec3::ZERO);
        p.pitch = -1.4;
        let dir = MoveIntent {
            forward: true,
            ..MoveIntent::default()
        }
        .direction(&p, 0.01);
        assert_eq!(dir.y, 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn walking_sets_velocity_from_speed() {
        let config = PhysicsConfig::default();
        let world = empty_world();
        let mut p = player_at(Vec3::new(0.0, 1.0, 0.0));
        let intent = MoveIntent {
            forward: true,
            ..MoveIntent::default()
        };
        step(&mut p, &world, &intent, DT, &config);
        assert!((p.velocity.z - -5.0).abs() < 1e-5);
        assert!((p.position.z - -5.0 * DT).abs() < 1e-5);

        step(&mut p, &world, &MoveIntent::default(), DT, &config);
        assert_eq!(p.velocity.x, 0.0);
        assert_eq!(p.velocity.z, 0.0);
    }

    #[test]
    fn gravity_accelerates_downward() {
        let config = PhysicsConfig::default();
        let world = empty_world();
        let mut p = player_at(Vec3::new(0.0, 20.0, 0.0));
        step(&mut p, &world, &MoveIntent::default(), DT, &config);
        assert!((p.velocity.y - -9.8 * DT).abs() < 1e-6);
        assert!(p.position.y < 20.0);
        assert!(!p.grounded);
    }

    #[test]
    fn hard_floor_clamps_and_grounds() {
        let config = PhysicsConfig::default();
        let world = empty_world();
        let mut p = player_at(Vec3::new(0.0, 1.0, 0.0));
        p.velocity.y = -30.0;
        step(&mut p, &world, &MoveIntent::default(), DT, &config);
        assert_eq!(p.position.y, 1.0);
        assert_eq!(p.velocity.y, 0.0);
        assert!(p.grounded);
    }

    #[test]
    fn jump_only_when_grounded() {
        let config = PhysicsConfig::default();
        let world = empty_world();
        let jump = MoveIntent {
            jump: true,
            ..MoveIntent::default()
        };

        let mut airborne = player_at(Vec3::new(0.0, 10.0, 0.0));
        step(&mut airborne, &world, &jump, DT, &config);
        assert!(airborne.velocity.y < 0.0);

        let mut standing = player_at(Vec3::new(0.0, 1.0, 0.0));
        standing.grounded = true;
        step(&mut standing, &world, &jump, DT, &config);
        assert_eq!(standing.velocity.y, 6.0);
        assert!(standing.position.y > 1.0);
        assert!(!standing.grounded);
    }

    #[test]
    fn falling_onto_column_converges_to_top() {
        let config = PhysicsConfig::default();
        let world = single_column(2);
        let mut p = player_at(Vec3::new(0.0, 8.0, 0.0));
        for _ in 0..240 {
            step(&mut p, &world, &MoveIntent::default(), DT, &config);
        }
        assert!((p.position.y - (2.0 * 1.0 + 1.8)).abs() < 1e-5, "{p:?}");
        assert!(p.grounded);
        assert_eq!(p.velocity.y, 0.0);

        // Standing still keeps the player grounded on the same spot.
        for _ in 0..30 {
            step(&mut p, &world, &MoveIntent::default(), DT, &config);
            assert!(p.grounded);
            assert!((p.position.y - 3.8).abs() < 1e-5);
        }
    }

    #[test]
    fn off_center_landing_also_grounds() {
        let config = PhysicsConfig::default();
        let world = single_column(2);
        let mut p = player_at(Vec3::new(0.2, 6.0, -0.1));
        for _ in 0..240 {
            step(&mut p, &world, &MoveIntent::default(), DT, &config);
        }
        assert!(p.grounded);
        assert!((p.position.y - 3.8).abs() < 1e-5);
        assert_eq!(p.position.x, 0.2);
    }

    #[test]
    fn sunk_probe_is_lifted_onto_top() {
        let config = PhysicsConfig {
            probe_offsets: vec![0.9],
            ..PhysicsConfig::default()
        };
        let world = single_column(1);
        // Probe center exactly above the column center, sunk into the top.
        let mut p = player_at(Vec3::new(0.0, 1.0 + 0.9 - 0.2, 0.0));
        let contact = resolve_collisions(&mut p, &world, &config);
        assert!(contact.pushes >= 1);
        assert_eq!(contact.support_top, Some(1.0));
        assert_eq!(p.position, Vec3::new(0.0, 1.0 + 1.8, 0.0));
        assert!(p.grounded);
    }

    #[test]
    fn degenerate_push_is_vertical() {
        // Feet far below the probe so the box top never counts as support.
        let config = PhysicsConfig {
            probe_offsets: vec![0.9],
            eye_height: 0.5,
            ..PhysicsConfig::default()
        };
        let world = single_column(1);
        // Probe center 0.1 straight above the column top: the separation has
        // no horizontal component.
        let mut p = player_at(Vec3::new(0.0, 1.0 + 0.1 + 0.9, 0.0));
        let start = p.position;
        let contact = resolve_collisions(&mut p, &world, &config);

        assert_eq!(contact.pushes, 1);
        assert_eq!(contact.support_top, None);
        assert!(!p.grounded);
        assert_eq!(p.position.x, start.x);
        assert_eq!(p.position.z, start.z);
        let expected_rise = config.probe_radius - 0.1 + config.push_epsilon;
        assert!(
            (p.position.y - start.y - expected_rise).abs() < 1e-5,
            "rose {} instead of {expected_rise}",
            p.position.y - start.y
        );
    }

    #[test]
    fn side_contact_pushes_horizontally() {
        let config = PhysicsConfig::default();
        let world = single_column(4);
        // Feet well above the floor but below the column top: walking into a wall.
        let mut p = player_at(Vec3::new(0.6, 3.0, 0.0));
        let contact = resolve_collisions(&mut p, &world, &config);
        assert!(contact.pushes > 0);
        assert!(p.position.x > 0.6);
        assert_eq!(p.position.z, 0.0);
    }

    #[test]
    fn highest_support_wins() {
        let config = PhysicsConfig::default();
        let world = World::from_blocks(
            WorldConfig::default(),
            [Block { gx: 16, gz: 16, h: 1 }, Block { gx: 17, gz: 16, h: 2 }],
        );
        // Straddling the boundary between a 1-high and a 2-high column.
        let mut p = player_at(Vec3::new(0.5, 2.5, 0.0));
        let contact = resolve_collisions(&mut p, &world, &config);
        assert_eq!(contact.support_top, Some(2.0));
        assert!((p.position.y - 3.8).abs() < 1e-5);
        assert!(p.grounded);
    }

    #[test]
    fn resolution_leaves_no_penetration() {
        let config = PhysicsConfig::default();
        let world = World::new(WorldConfig::default());
        // Grid offset keeps starts off exact box faces.
        for i in 0..54 {
            for k in 0..54 {
                let x = -8.05 + i as f32 * 0.3;
                let z = -8.05 + k as f32 * 0.3;
                for y in [1.0, 1.6, 2.3, 3.1, 4.2] {
                    let start = Vec3::new(x, y, z);
                    let mut p = player_at(start);
                    resolve_collisions(&mut p, &world, &config);
                    let pen = max_penetration(&p, &world, &config);
                    assert!(pen < 1e-3, "start {start:?} ended at {:?} with penetration {pen}", p.position);
                }
            }
        }
    }

    #[test]
    fn snap_does_not_leave_probe_in_taller_neighbour() {
        let config = PhysicsConfig::default();
        let world = World::new(WorldConfig::default());
        assert_eq!(world.query_column(11, 17).map(|b| b.h), Some(2));

        // The first push lands the feet over (11, 17) while only a 1-high
        // box has been seen as support.
        let mut p = player_at(Vec3::new(-5.48, 1.0, 0.595));
        let contact = resolve_collisions(&mut p, &world, &config);
        assert_eq!(contact.support_top, Some(2.0));
        assert!((p.position.y - 3.8).abs() < 1e-5, "{p:?}");
        assert!(max_penetration(&p, &world, &config) < 1e-3);
    }

    #[test]
    fn walking_into_column_never_penetrates() {
        let config = PhysicsConfig::default();
        let world = single_column(3);
        let mut p = player_at(Vec3::new(-3.0, 1.0, 0.1));
        p.yaw = std::f32::consts::FRAC_PI_2; // facing +X
        let intent = MoveIntent {
            forward: true,
            ..MoveIntent::default()
        };
        for _ in 0..120 {
            step(&mut p, &world, &intent, DT, &config);
            assert!(p.position.is_finite());
            assert!(max_penetration(&p, &world, &config) < 1e-4, "{p:?}");
        }
    }
}
