//! Speed segments: five equal bands over the run target, each with a shorter
//! tap deadline than the one before.

use crate::config::GameConfig;

/// Width of one band. Never zero.
pub fn segment_size(target: u32, segments: u32) -> u32 {
    target.div_ceil(segments.max(1)).max(1)
}

/// Band index for `taps` progress; the last band absorbs any remainder.
pub fn segment_index(taps: u32, target: u32, segments: u32) -> u32 {
    let idx = taps / segment_size(target, segments);
    idx.min(segments.max(1) - 1)
}

pub fn deadline_ms(segment: u32, base_ms: u32, min_ms: u32, step_ms: u32) -> u32 {
    base_ms
        .saturating_sub(segment.saturating_mul(step_ms))
        .max(min_ms)
}

impl GameConfig {
    pub fn segment_index(&self, taps: u32, target: u32) -> u32 {
        segment_index(taps, target, self.speed_segments)
    }

    pub fn deadline_for_segment(&self, segment: u32) -> u32 {
        deadline_ms(
            segment,
            self.base_tap_timeout_ms,
            self.min_tap_timeout_ms,
            self.timeout_step_ms,
        )
    }
}
