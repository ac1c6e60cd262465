//! Input mapping: named keys and mouse motion turned into per-frame movement
//! intent, look deltas and one-shot actions.
//!
//! # Invariants
//! - Fire and reset trigger once per press, never while held.
//! - Mouse motion accumulates until the frame snapshot is taken.

pub mod action;
pub mod error;
pub mod key;
pub mod state;

pub use action::Action;
pub use error::InputError;
pub use key::{InputEvent, Key};
pub use state::{FrameInput, InputState};
