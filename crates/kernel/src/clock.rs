use voxbox_common::ClockConfig;

/// Turns host-measured frame deltas into simulation steps.
///
/// Non-positive deltas and hitches longer than `max_dt` are replaced by a
/// fixed `fallback_dt`. The last `history` effective steps are kept in a ring
/// buffer for diagnostics.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_dt: f32,
    fallback_dt: f32,
    history: Vec<f32>,
    index: usize,
    filled: bool,
    substitutions: u64,
}

/// Clamp a raw frame delta (seconds) to a usable simulation step.
pub fn clamp_dt(raw: f32, max_dt: f32, fallback_dt: f32) -> f32 {
    // Written so NaN also takes the fallback path.
    if raw > 0.0 && raw <= max_dt { raw } else { fallback_dt }
}

impl FrameClock {
    pub fn new(config: &ClockConfig) -> Self {
        let capacity = config.history.max(1);
        Self {
            max_dt: config.max_dt,
            fallback_dt: config.fallback_dt,
            history: vec![0.0; capacity],
            index: 0,
            filled: false,
            substitutions: 0,
        }
    }

    /// Clamp `raw` and record the step actually used.
    pub fn advance(&mut self, raw: f32) -> f32 {
        let dt = clamp_dt(raw, self.max_dt, self.fallback_dt);
        if dt != raw {
            self.substitutions += 1;
            tracing::debug!(raw, dt, "frame delta replaced by fallback step");
        }
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.history.len();
        if self.index == 0 {
            self.filled = true;
        }
        dt
    }

    fn recorded(&self) -> &[f32] {
        if self.filled {
            &self.history
        } else {
            &self.history[..self.index]
        }
    }

    pub fn count(&self) -> usize {
        self.recorded().len()
    }

    pub fn average(&self) -> f32 {
        let steps = self.recorded();
        if steps.is_empty() {
            return 0.0;
        }
        steps.iter().sum::<f32>() / steps.len() as f32
    }

    pub fn max(&self) -> f32 {
        self.recorded().iter().copied().fold(0.0, f32::max)
    }

    pub fn min(&self) -> f32 {
        self.recorded()
            .iter()
            .copied()
            .reduce(f32::min)
            .unwrap_or(0.0)
    }

    /// How many deltas were replaced by the fallback step.
    pub fn substitutions(&self) -> u64 {
        self.substitutions
    }
}
