use voxbox_kernel::{LookDelta, MoveIntent, ShotHit, Simulation};

/// A high-level action produced from one frame of input.
///
/// Hosts apply actions to the [`Simulation`]; they never interpret raw key
/// events themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Held movement keys and mouse look for this frame.
    Steer { intent: MoveIntent, look: LookDelta },
    /// Shoot the block under the crosshair.
    Fire,
    /// Regenerate the world and respawn the player.
    Reset,
}

impl Action {
    /// Apply this action. Returns the hit when a shot removed a block.
    pub fn apply(self, sim: &mut Simulation) -> Option<ShotHit> {
        match self {
            Action::Steer { intent, look } => {
                sim.apply_input(intent, look);
                None
            }
            Action::Fire => sim.fire_shot(),
            Action::Reset => {
                sim.reset_world();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxbox_common::SandboxConfig;

    #[test]
    fn steer_sets_intent() {
        let mut sim = Simulation::new(SandboxConfig::default()).unwrap();
        let intent = MoveIntent {
            left: true,
            ..MoveIntent::default()
        };
        let hit = Action::Steer {
            intent,
            look: LookDelta { dx: 40.0, dy: 0.0 },
        }
        .apply(&mut sim);
        assert!(hit.is_none());
        assert_eq!(sim.intent(), &intent);
        assert!((sim.player().yaw - 0.1).abs() < 1e-6);
    }

    #[test]
    fn fire_and_reset() {
        let mut sim = Simulation::new(SandboxConfig::default()).unwrap();
        let fresh = sim.world().state_hash();
        sim.place_player(glam::Vec3::new(0.0, 5.0, 0.0), 0.0, -1.4);

        assert!(Action::Fire.apply(&mut sim).is_some());
        assert_ne!(sim.world().state_hash(), fresh);

        Action::Reset.apply(&mut sim);
        assert_eq!(sim.world().state_hash(), fresh);
    }
}
