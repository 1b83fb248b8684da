//! Hidden / shown / unload handling for [`Game`].
//!
//! Going to the background forfeits a running tap deadline and suspends the
//! reward phase. On return, the reward phase either resumes for whatever is
//! left of its wall-clock duration or, if that has run out, completes without
//! replaying the overlay.

use crate::game::Game;
use crate::model::Mode;
use crate::persist::KeyValueStore;
use crate::timer::TimerKind;
use crate::util::{clog, cwarn};
use crate::view::RenderCommand;

impl Game {
    pub fn on_hidden(&mut self) {
        self.hidden = true;
        let now = self.now();
        if self.state.mode() == Mode::ImagePhase {
            self.state.in_image_phase = false;
            self.state.image_interrupted = true;
            self.save();
            self.clear_image_timer();
            self.render(RenderCommand::HideRewardOverlay);
        }
        if self.timer_active(TimerKind::Tap) {
            self.reset_run_due_to_timeout();
        }
        let key = self.cfg.last_hidden_key.clone();
        if let Err(e) = self.store.set_item(&key, &format!("{}", now as i64)) {
            cwarn(&format!("on_hidden: {e}"));
        }
    }

    pub fn on_shown(&mut self) {
        self.hidden = false;
        let now = self.now();
        match self.state.mode() {
            Mode::ImageInterrupted | Mode::ImagePhase => {
                let remaining = self.image_remaining_ms(now);
                if remaining <= 0.0 {
                    clog("on_shown: reward phase ran out while hidden");
                    self.finalize_image_phase();
                } else {
                    self.state.in_image_phase = true;
                    self.state.image_interrupted = false;
                    self.save();
                    clog(&format!("reward phase resumed, {remaining:.0} ms left"));
                    self.arm_image_timer(now, remaining);
                }
            }
            Mode::Running => {
                if self.state.taps_count > 0 {
                    self.start_tap_timer();
                }
            }
        }
    }

    /// Page teardown. A showing reward becomes a pending interruption that
    /// the next boot resolves; a live deadline drops the run's taps but keeps
    /// its target.
    pub fn on_unload(&mut self) {
        if self.state.mode() == Mode::ImagePhase {
            self.state.image_interrupted = true;
            self.state.in_image_phase = false;
            self.save();
        }
        if self.timer_active(TimerKind::Tap) {
            self.clear_tap_timer();
            self.state.taps_count = 0;
            self.save();
        }
    }
}
