use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxbox_common::{ConfigError, SandboxConfig};

use crate::clock::FrameClock;
use crate::physics::{self, Contact, MoveIntent};
use crate::player::PlayerState;
use crate::shoot::{self, ShotHit};
use crate::world::{World, WorldEvent};

/// Mouse motion since the previous frame, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LookDelta {
    pub dx: f32,
    pub dy: f32,
}

/// The simulation context: world, player, latest input and frame clock.
///
/// Owns all mutable sandbox state. A host drives it once per frame:
/// `apply_input`, then `tick`, then reads `world()`/`player()` to render.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SandboxConfig,
    world: World,
    player: PlayerState,
    intent: MoveIntent,
    clock: FrameClock,
    ticks: u64,
    last_contact: Contact,
}

impl Simulation {
    /// Validate `config`, generate the world and spawn the player.
    pub fn new(config: SandboxConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = World::new(config.world.clone());
        Ok(Self::with_world(config, world))
    }

    /// Start from an existing world. `config.world` is used for resets.
    pub fn with_world(config: SandboxConfig, world: World) -> Self {
        Self {
            player: PlayerState::spawn(&config.physics),
            clock: FrameClock::new(&config.clock),
            config,
            world,
            intent: MoveIntent::default(),
            ticks: 0,
            last_contact: Contact::default(),
        }
    }

    /// Store this frame's movement intent and apply mouse look.
    pub fn apply_input(&mut self, intent: MoveIntent, look: LookDelta) {
        self.intent = intent;
        let sensitivity = self.config.camera.mouse_sensitivity;
        self.player.look(
            look.dx * sensitivity,
            -look.dy * sensitivity,
            self.config.camera.pitch_limit,
        );
    }

    /// Shoot from the player position along the view direction.
    pub fn fire_shot(&mut self) -> Option<ShotHit> {
        let hit = shoot::shoot(
            &mut self.world,
            self.player.position,
            self.player.forward(),
            &self.config.shot,
        );
        match &hit {
            Some(h) => tracing::info!(gx = h.block.gx, gz = h.block.gz, h = h.block.h, "shot hit"),
            None => tracing::debug!("shot missed"),
        }
        hit
    }

    /// Regenerate the world and respawn the player.
    ///
    /// Events from before the reset are discarded, so the world log holds at
    /// most one `Generated` entry plus one removal per block. Hosts that
    /// want the history call [`Simulation::drain_events`] first.
    pub fn reset_world(&mut self) {
        self.world.drain_events();
        if self.world.config() != &self.config.world {
            self.world = World::new(self.config.world.clone());
        } else {
            self.world.reset();
        }
        self.player = PlayerState::spawn(&self.config.physics);
        self.intent = MoveIntent::default();
        tracing::info!(blocks = self.world.block_count(), "world reset");
    }

    /// Advance one frame. `dt` is the raw host delta in seconds.
    pub fn tick(&mut self, dt: f32) -> PlayerState {
        let _span = tracing::info_span!("sim_tick", tick = self.ticks).entered();
        let dt = self.clock.advance(dt);
        self.last_contact = physics::step(
            &mut self.player,
            &self.world,
            &self.intent,
            dt,
            &self.config.physics,
        );
        self.ticks += 1;
        tracing::trace!(
            dt,
            x = self.player.position.x,
            y = self.player.position.y,
            z = self.player.position.z,
            grounded = self.player.grounded,
            "tick complete"
        );
        self.player
    }

    /// Take the world events recorded since the last drain or reset.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        self.world.drain_events()
    }

    /// Place the player at a pose, at rest. Used by hosts and tools.
    pub fn place_player(&mut self, position: Vec3, yaw: f32, pitch: f32) {
        let limit = self.config.camera.pitch_limit;
        self.player = PlayerState {
            position,
            velocity: Vec3::ZERO,
            yaw,
            pitch: pitch.clamp(-limit, limit),
            grounded: false,
        };
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn intent(&self) -> &MoveIntent {
        &self.intent
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Number of ticks since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Collision summary from the most recent tick.
    pub fn last_contact(&self) -> Contact {
        self.last_contact
    }
}
