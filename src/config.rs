//! Tuning constants for the run, the timers and the grid.

use serde::{Deserialize, Serialize};

pub const INITIAL_TARGET: u32 = 300;
/// Added to the target after each completed run.
pub const TARGET_INCREMENT: u32 = 100;
pub const IMAGE_DISPLAY_MS: f64 = 60_000.0;
pub const SPEED_SEGMENTS: u32 = 5;
pub const BASE_TAP_TIMEOUT_MS: u32 = 900;
pub const MIN_TAP_TIMEOUT_MS: u32 = 500;
pub const TIMEOUT_STEP_MS: u32 = 100;
pub const STORAGE_KEY: &str = "tap_state_daily_v1";
/// Diagnostic only, never read back.
pub const LAST_HIDDEN_KEY: &str = "tap_last_hidden_at";

/// Shell files, relative to the served root (see `index.html`).
pub const REWARD_IMAGE: &str = "assets/final-reward.svg";
pub const SERVICE_WORKER: &str = "service-worker.js";
pub const MANIFEST: &str = "manifest.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub initial_target: u32,
    pub target_increment: u32,
    pub image_display_ms: f64,
    pub speed_segments: u32,
    pub base_tap_timeout_ms: u32,
    pub min_tap_timeout_ms: u32,
    pub timeout_step_ms: u32,
    pub storage_key: String,
    pub last_hidden_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_target: INITIAL_TARGET,
            target_increment: TARGET_INCREMENT,
            image_display_ms: IMAGE_DISPLAY_MS,
            speed_segments: SPEED_SEGMENTS,
            base_tap_timeout_ms: BASE_TAP_TIMEOUT_MS,
            min_tap_timeout_ms: MIN_TAP_TIMEOUT_MS,
            timeout_step_ms: TIMEOUT_STEP_MS,
            storage_key: STORAGE_KEY.to_string(),
            last_hidden_key: LAST_HIDDEN_KEY.to_string(),
        }
    }
}

/// Grid sizing constants (pixels / tile counts).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub tile_px: f64,
    pub gap_px: f64,
    pub min_columns: u32,
    pub max_columns: u32,
    pub min_rows: u32,
    pub max_rows: u32,
    /// Used when the timer bar has not been laid out yet.
    pub fallback_bar_px: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tile_px: 100.0,
            gap_px: 6.0,
            min_columns: 5,
            max_columns: 15,
            min_rows: 3,
            max_rows: 12,
            fallback_bar_px: 48.0,
        }
    }
}
