//! Bookkeeping for the two timers the game runs: the per-tap deadline and the
//! reward image display. The engine never sleeps; the host arms real timers
//! and reports expiries back with the token it was given.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Tap,
    Image,
}

/// Identifies one arming of a timer. Expiries carrying an older token are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmedTimer {
    pub token: TimerToken,
    pub started_at_ms: f64,
    pub duration_ms: f64,
}

impl ArmedTimer {
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.duration_ms - (now_ms - self.started_at_ms)).max(0.0)
    }
}

/// Remaining-time readout for the tap timer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TapProgress {
    /// 1.0 right after arming, 0.0 at expiry or when idle.
    pub fraction: f64,
    pub remaining_ms: u32,
}

#[derive(Debug, Default)]
pub struct TimerEngine {
    tap: Option<ArmedTimer>,
    image: Option<ArmedTimer>,
    next_token: u64,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: TimerKind) -> &mut Option<ArmedTimer> {
        match kind {
            TimerKind::Tap => &mut self.tap,
            TimerKind::Image => &mut self.image,
        }
    }

    /// Arms `kind`, replacing any timer of the same kind.
    pub fn start(&mut self, kind: TimerKind, now_ms: f64, duration_ms: f64) -> ArmedTimer {
        self.next_token += 1;
        let armed = ArmedTimer {
            token: TimerToken(self.next_token),
            started_at_ms: now_ms,
            duration_ms: duration_ms.max(0.0),
        };
        *self.slot(kind) = Some(armed);
        armed
    }

    /// Returns whether a timer was active.
    pub fn clear(&mut self, kind: TimerKind) -> bool {
        self.slot(kind).take().is_some()
    }

    pub fn start_tap_timer(&mut self, now_ms: f64, duration_ms: f64) -> ArmedTimer {
        self.start(TimerKind::Tap, now_ms, duration_ms)
    }

    pub fn clear_tap_timer(&mut self) -> bool {
        self.clear(TimerKind::Tap)
    }

    pub fn start_image_timer(&mut self, now_ms: f64, duration_ms: f64) -> ArmedTimer {
        self.start(TimerKind::Image, now_ms, duration_ms)
    }

    pub fn clear_image_timer(&mut self) -> bool {
        self.clear(TimerKind::Image)
    }

    pub fn armed(&self, kind: TimerKind) -> Option<ArmedTimer> {
        match kind {
            TimerKind::Tap => self.tap,
            TimerKind::Image => self.image,
        }
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.armed(kind).is_some()
    }

    /// Consumes an expiry. Only the currently armed token is accepted; the
    /// slot is emptied so the same expiry cannot apply twice.
    pub fn expire(&mut self, kind: TimerKind, token: TimerToken) -> bool {
        let slot = self.slot(kind);
        if slot.is_some_and(|armed| armed.token == token) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub fn tap_progress(&self, now_ms: f64) -> TapProgress {
        match self.tap {
            Some(t) if t.duration_ms > 0.0 => {
                let remaining = t.remaining_ms(now_ms);
                TapProgress {
                    fraction: (remaining / t.duration_ms).clamp(0.0, 1.0),
                    remaining_ms: remaining.ceil() as u32,
                }
            }
            _ => TapProgress::default(),
        }
    }
}
