use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use voxbox_kernel::{LookDelta, MoveIntent};

use crate::action::Action;
use crate::key::{InputEvent, Key};

/// Everything the simulation needs from one frame of input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub intent: MoveIntent,
    pub look: LookDelta,
    pub fire: bool,
    pub reset: bool,
}

impl FrameInput {
    /// Actions in the order a host should apply them: steer, then reset,
    /// then fire.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = vec![Action::Steer {
            intent: self.intent,
            look: self.look,
        }];
        if self.reset {
            actions.push(Action::Reset);
        }
        if self.fire {
            actions.push(Action::Fire);
        }
        actions
    }
}

/// Accumulates host input events between frames.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeSet<Key>,
    look: LookDelta,
    fire_pending: bool,
    reset_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(key) => self.press(key),
            InputEvent::Released(key) => self.release(key),
            InputEvent::MouseMotion { dx, dy } => self.mouse_motion(dx, dy),
        }
    }

    pub fn press(&mut self, key: Key) {
        // Auto-repeat presses of a held key are ignored.
        if !self.held.insert(key) {
            return;
        }
        tracing::trace!(%key, "key pressed");
        match key {
            Key::Fire => self.fire_pending = true,
            Key::R => self.reset_pending = true,
            _ => {}
        }
    }

    pub fn release(&mut self, key: Key) {
        if self.held.remove(&key) {
            tracing::trace!(%key, "key released");
        }
    }

    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        self.look.dx += dx;
        self.look.dy += dy;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Movement intent from the currently held keys.
    pub fn intent(&self) -> MoveIntent {
        MoveIntent {
            forward: self.is_held(Key::W),
            back: self.is_held(Key::S),
            left: self.is_held(Key::A),
            right: self.is_held(Key::D),
            jump: self.is_held(Key::Space),
        }
    }

    /// Snapshot this frame's input and clear the per-frame accumulators.
    /// Held keys carry over to the next frame.
    pub fn take_frame(&mut self) -> FrameInput {
        FrameInput {
            intent: self.intent(),
            look: std::mem::take(&mut self.look),
            fire: std::mem::take(&mut self.fire_pending),
            reset: std::mem::take(&mut self.reset_pending),
        }
    }
}
