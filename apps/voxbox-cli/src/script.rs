//! Frame-stamped input scripts for headless runs.
//!
//! One event per line, prefixed by the frame it fires on:
//!
//! ```text
//! # walk forward, turn, shoot
//! 0   press w
//! 30  look 120 0
//! 45  press fire
//! 46  release fire
//! ```

use anyhow::{Context, bail};
use voxbox_input::InputEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEvent {
    pub frame: u64,
    pub event: InputEvent,
}

/// Parse a script. Blank lines and `#` comments are ignored; events are
/// returned sorted by frame, keeping file order within a frame.
pub fn parse(text: &str) -> anyhow::Result<Vec<ScriptEvent>> {
    let mut events = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let lineno = index + 1;
        let Some((frame, rest)) = line.split_once(char::is_whitespace) else {
            bail!("line {lineno}: expected `<frame> <event>`");
        };
        let frame: u64 = frame
            .parse()
            .with_context(|| format!("line {lineno}: bad frame number {frame:?}"))?;
        let event: InputEvent = rest
            .trim()
            .parse()
            .with_context(|| format!("line {lineno}"))?;
        events.push(ScriptEvent { frame, event });
    }
    events.sort_by_key(|e| e.frame);
    Ok(events)
}
