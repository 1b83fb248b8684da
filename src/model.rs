//! The persisted run record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::ports::TileRng;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunState {
    /// Taps required to complete the current run.
    pub current_target: u32,
    /// Correct taps landed in the current run.
    pub taps_count: u32,
    /// UTC day on which the run was last reset.
    pub last_reset_day: Option<NaiveDate>,
    pub in_image_phase: bool,
    /// Epoch milliseconds at which the reward phase began.
    pub image_phase_started_at: Option<f64>,
    /// The reward phase was cut short and its completion is still pending.
    pub image_interrupted: bool,
    pub highlighted_index: usize,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

/// Which of the mutually exclusive modes a record is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Running,
    ImagePhase,
    ImageInterrupted,
}

impl RunState {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            current_target: cfg.initial_target.max(1),
            taps_count: 0,
            last_reset_day: None,
            in_image_phase: false,
            image_phase_started_at: None,
            image_interrupted: false,
            highlighted_index: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.image_interrupted {
            Mode::ImageInterrupted
        } else if self.in_image_phase {
            Mode::ImagePhase
        } else {
            Mode::Running
        }
    }

    /// Start-of-day reset. Returns true if anything changed; a second call on
    /// the same day is a no-op.
    pub fn apply_daily_reset(&mut self, today: NaiveDate, cfg: &GameConfig) -> bool {
        if self.last_reset_day == Some(today) {
            return false;
        }
        self.current_target = cfg.initial_target.max(1);
        self.taps_count = 0;
        self.last_reset_day = Some(today);
        self.in_image_phase = false;
        self.image_interrupted = false;
        self.image_phase_started_at = None;
        true
    }

    /// Repairs whatever a stale or hand-edited record may hold.
    pub fn sanitize(&mut self, tile_count: usize, cfg: &GameConfig, rng: &mut dyn TileRng) {
        if self.current_target == 0 {
            self.current_target = cfg.initial_target.max(1);
        }
        self.taps_count = self.taps_count.min(self.current_target);
        if self.in_image_phase && self.image_interrupted {
            self.in_image_phase = false;
        }
        // A run saved on its completing tap, before the reward phase began.
        if self.mode() == Mode::Running && self.taps_count >= self.current_target {
            self.image_interrupted = true;
        }
        if self.highlighted_index >= tile_count {
            self.highlighted_index = rng.pick(tile_count.max(1));
        }
    }
}

/// Uniform pick in `0..tile_count` that differs from `previous` whenever more
/// than one tile exists.
pub fn pick_different(rng: &mut dyn TileRng, tile_count: usize, previous: usize) -> usize {
    let n = tile_count.max(1);
    if n == 1 {
        return 0;
    }
    if previous >= n {
        return rng.pick(n);
    }
    // Draw from the n-1 other tiles and skip over `previous`.
    let idx = rng.pick(n - 1);
    if idx >= previous { idx + 1 } else { idx }
}
