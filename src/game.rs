//! Run state machine.
//!
//! `Game` is the single owned context: the persisted [`RunState`], the timer
//! bookkeeping, the tile count and the ports. Every entry point mutates,
//! persists, then queues [`Effect`]s for the host to drain.

use crate::config::GameConfig;
use crate::model::{Mode, RunState, pick_different};
use crate::persist::{self, KeyValueStore};
use crate::ports::{Clock, TileRng};
use crate::timer::{TimerEngine, TimerKind, TimerToken};
use crate::util::{clog, utc_day};
use crate::view::{Effect, RenderCommand};

pub struct Game {
    pub(crate) cfg: GameConfig,
    pub(crate) state: RunState,
    pub(crate) timers: TimerEngine,
    pub(crate) tile_count: usize,
    pub(crate) hidden: bool,
    /// Segment the last tap timer ran in; used for the speed-up cue.
    pub(crate) active_segment: u32,
    pub(crate) store: Box<dyn KeyValueStore>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) rng: Box<dyn TileRng>,
    effects: Vec<Effect>,
}

impl Game {
    /// Builds a game with default state. Call [`Game::boot`] before use.
    pub fn new(
        cfg: GameConfig,
        tile_count: usize,
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        rng: Box<dyn TileRng>,
    ) -> Self {
        let state = RunState::new(&cfg);
        Self {
            cfg,
            state,
            timers: TimerEngine::new(),
            tile_count: tile_count.max(1),
            hidden: false,
            active_segment: 0,
            store,
            clock,
            rng,
            effects: Vec::new(),
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn segment_index(&self) -> u32 {
        self.cfg
            .segment_index(self.state.taps_count, self.state.current_target)
    }

    /// Deadline a tap timer started now would get.
    pub fn current_deadline_ms(&self) -> u32 {
        self.cfg.deadline_for_segment(self.segment_index())
    }

    pub fn timer_active(&self, kind: TimerKind) -> bool {
        self.timers.is_active(kind)
    }

    pub fn armed_timer(&self, kind: TimerKind) -> Option<crate::timer::ArmedTimer> {
        self.timers.armed(kind)
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub(crate) fn now(&self) -> f64 {
        self.clock.now_ms()
    }

    pub(crate) fn render(&mut self, cmd: RenderCommand) {
        self.effects.push(Effect::Render(cmd));
    }

    pub(crate) fn save(&mut self) {
        persist::save_state(self.store.as_mut(), &self.cfg, &self.state);
    }

    pub(crate) fn render_highlight(&mut self) {
        self.render(RenderCommand::SetHighlight(self.state.highlighted_index));
        self.render(RenderCommand::SetCounterText {
            taps: self.state.taps_count,
            target: self.state.current_target,
        });
    }

    fn render_idle_deadline(&mut self) {
        let ms = self.current_deadline_ms();
        self.render(RenderCommand::SetRemainingMsText(ms));
    }

    pub(crate) fn refresh_speed_segment(&mut self) {
        self.active_segment = self.segment_index();
        self.render_idle_deadline();
    }

    pub(crate) fn rehighlight(&mut self) {
        let prev = self.state.highlighted_index;
        self.state.highlighted_index = pick_different(self.rng.as_mut(), self.tile_count, prev);
    }

    // ---- boot -------------------------------------------------------------

    /// Loads the persisted record, applies the daily reset, repairs it against
    /// the current grid and resumes whatever phase it was in.
    pub fn boot(&mut self, hidden: bool) {
        self.hidden = hidden;
        let now = self.now();
        self.state = persist::load_state(self.store.as_mut(), &self.cfg, utc_day(now));
        self.state
            .sanitize(self.tile_count, &self.cfg, self.rng.as_mut());
        self.render(RenderCommand::RenderGrid {
            tile_count: self.tile_count,
        });
        self.refresh_speed_segment();

        match self.state.mode() {
            Mode::ImageInterrupted => {
                clog("boot: resolving interrupted reward phase");
                self.finalize_image_phase();
            }
            Mode::ImagePhase => {
                let remaining = self.image_remaining_ms(now);
                if remaining <= 0.0 {
                    clog("boot: reward phase elapsed while away");
                    self.finalize_image_phase();
                } else if self.hidden {
                    self.state.in_image_phase = false;
                    self.state.image_interrupted = true;
                    self.save();
                    self.render_highlight();
                } else {
                    clog(&format!("boot: resuming reward phase, {remaining:.0} ms left"));
                    self.render_highlight();
                    self.arm_image_timer(now, remaining);
                }
            }
            Mode::Running => {
                self.save();
                self.render_highlight();
                if self.state.taps_count > 0 && !self.hidden {
                    self.start_tap_timer();
                }
            }
        }
    }

    // ---- taps -------------------------------------------------------------

    pub fn tap(&mut self, index: usize) {
        if index >= self.tile_count || self.state.mode() != Mode::Running {
            return;
        }
        let correct = index == self.state.highlighted_index;
        if !correct {
            self.rehighlight();
            self.save();
            self.render_highlight();
            return;
        }

        let prev_segment = self.segment_index();
        self.state.taps_count += 1;
        let segment = self.segment_index();
        if segment > prev_segment {
            self.active_segment = segment;
            self.render(RenderCommand::TriggerSpeedupCue);
        }
        self.rehighlight();
        self.save();
        self.render_highlight();

        if self.state.taps_count >= self.state.current_target {
            self.clear_tap_timer();
            self.start_image_phase();
        } else {
            self.start_tap_timer();
        }
    }

    // ---- timers -----------------------------------------------------------

    /// Arms the tap deadline for the current segment, replacing any running one.
    pub fn start_tap_timer(&mut self) {
        let segment = self.segment_index();
        if segment > self.active_segment {
            self.render(RenderCommand::TriggerSpeedupCue);
        }
        self.active_segment = segment;
        let duration = f64::from(self.cfg.deadline_for_segment(segment));
        let now = self.now();
        let armed = self.timers.start_tap_timer(now, duration);
        self.effects.push(Effect::ArmTimer {
            kind: TimerKind::Tap,
            token: armed.token,
            delay_ms: duration,
        });
        self.refresh_progress();
    }

    pub fn clear_tap_timer(&mut self) {
        if self.timers.clear_tap_timer() {
            self.effects.push(Effect::CancelTimer(TimerKind::Tap));
        }
        self.render(RenderCommand::SetProgressBarFraction(0.0));
        self.render_idle_deadline();
    }

    pub fn start_image_timer(&mut self, duration_ms: f64) {
        let now = self.now();
        self.arm_image_timer(now, duration_ms);
    }

    pub fn clear_image_timer(&mut self) {
        if self.timers.clear_image_timer() {
            self.effects.push(Effect::CancelTimer(TimerKind::Image));
        }
    }

    pub(crate) fn arm_image_timer(&mut self, now: f64, duration_ms: f64) {
        let armed = self.timers.start_image_timer(now, duration_ms);
        self.render(RenderCommand::ShowRewardOverlay);
        self.effects.push(Effect::ArmTimer {
            kind: TimerKind::Image,
            token: armed.token,
            delay_ms: armed.duration_ms,
        });
    }

    /// Host callback for a fired timer. Stale tokens are ignored.
    pub fn on_timer_expired(&mut self, kind: TimerKind, token: TimerToken) {
        if !self.timers.expire(kind, token) {
            clog(&format!("ignoring stale {kind:?} timer {}", token.0));
            return;
        }
        match kind {
            TimerKind::Tap => self.reset_run_due_to_timeout(),
            TimerKind::Image => self.complete_image_phase(),
        }
    }

    /// Per-frame progress readout while a tap timer runs.
    pub fn refresh_progress(&mut self) {
        if !self.timers.is_active(TimerKind::Tap) {
            return;
        }
        let progress = self.timers.tap_progress(self.now());
        self.render(RenderCommand::SetProgressBarFraction(progress.fraction));
        self.render(RenderCommand::SetRemainingMsText(progress.remaining_ms));
    }

    // ---- transitions -------------------------------------------------------

    /// Missed deadline: the run is lost and the target falls back to its
    /// initial value, not to the target the failed run started with.
    pub(crate) fn reset_run_due_to_timeout(&mut self) {
        clog(&format!(
            "run timed out at {}/{}",
            self.state.taps_count, self.state.current_target
        ));
        self.clear_tap_timer();
        self.state.current_target = self.cfg.initial_target.max(1);
        self.state.taps_count = 0;
        self.rehighlight();
        self.save();
        self.render_highlight();
        self.refresh_speed_segment();
    }

    fn start_image_phase(&mut self) {
        if self.hidden {
            self.state.image_interrupted = true;
            self.finalize_image_phase();
            return;
        }
        let now = self.now();
        self.state.in_image_phase = true;
        self.state.image_phase_started_at = Some(now);
        self.state.image_interrupted = false;
        self.save();
        let duration = self.cfg.image_display_ms;
        self.arm_image_timer(now, duration);
    }

    /// Natural end of the reward display.
    pub(crate) fn complete_image_phase(&mut self) {
        clog("reward phase complete");
        self.finalize_image_phase();
    }

    /// Completion effects shared by the natural end and every deferred
    /// resolution: next run with a higher target, overlay hidden.
    pub(crate) fn finalize_image_phase(&mut self) {
        self.clear_image_timer();
        self.render(RenderCommand::HideRewardOverlay);
        self.state.in_image_phase = false;
        self.state.image_phase_started_at = None;
        self.state.image_interrupted = false;
        self.state.taps_count = 0;
        self.state.current_target = self
            .state
            .current_target
            .saturating_add(self.cfg.target_increment);
        self.rehighlight();
        self.save();
        self.refresh_speed_segment();
        self.render_highlight();
    }

    pub(crate) fn image_remaining_ms(&self, now: f64) -> f64 {
        match self.state.image_phase_started_at {
            Some(started) => (self.cfg.image_display_ms - (now - started)).max(0.0),
            None => 0.0,
        }
    }

    // ---- grid -------------------------------------------------------------

    /// New tile count from the host's grid sizing.
    pub fn resize(&mut self, tile_count: usize) {
        let tile_count = tile_count.max(1);
        if tile_count == self.tile_count {
            return;
        }
        self.tile_count = tile_count;
        if self.state.highlighted_index >= tile_count {
            self.state.highlighted_index = self.rng.pick(tile_count);
            self.save();
        }
        self.render(RenderCommand::RenderGrid { tile_count });
        self.render_highlight();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;
    use std::cell::Cell;
    use std::rc::Rc;

    struct TestClock(Rc<Cell<f64>>);
    impl Clock for TestClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    struct Cycle(usize);
    impl TileRng for Cycle {
        fn pick(&mut self, n: usize) -> usize {
            self.0 += 1;
            self.0 % n
        }
    }

    fn game(tiles: usize) -> (Game, Rc<Cell<f64>>) {
        let now = Rc::new(Cell::new(1_760_000_000_000.0));
        let mut g = Game::new(
            GameConfig::default(),
            tiles,
            Box::new(MemoryStore::new()),
            Box::new(TestClock(now.clone())),
            Box::new(Cycle(0)),
        );
        g.boot(false);
        g.drain_effects();
        (g, now)
    }

    #[test]
    fn incorrect_tap_only_moves_the_highlight() {
        let (mut g, _) = game(10);
        let hl = g.state().highlighted_index;
        g.tap((hl + 1) % 10);
        assert_eq!(g.state().taps_count, 0);
        assert_ne!(g.state().highlighted_index, hl);
        assert!(!g.timer_active(TimerKind::Tap));
    }

    #[test]
    fn first_correct_tap_arms_the_deadline() {
        let (mut g, _) = game(10);
        let hl = g.state().highlighted_index;
        g.tap(hl);
        assert_eq!(g.state().taps_count, 1);
        assert_ne!(g.state().highlighted_index, hl);
        let fx = g.drain_effects();
        assert!(fx.iter().any(|e| matches!(
            e,
            Effect::ArmTimer { kind: TimerKind::Tap, delay_ms, .. } if *delay_ms == 900.0
        )));
    }

    #[test]
    fn single_tile_repeats() {
        let (mut g, _) = game(1);
        g.tap(0);
        g.tap(0);
        assert_eq!(g.state().highlighted_index, 0);
        assert_eq!(g.state().taps_count, 2);
    }

    #[test]
    fn out_of_grid_tap_is_ignored() {
        let (mut g, _) = game(10);
        let before = g.state().clone();
        g.tap(10);
        assert_eq!(g.state(), &before);
        assert!(g.drain_effects().is_empty());
    }

    #[test]
    fn taps_during_reward_are_ignored() {
        let (mut g, _) = game(10);
        g.state.taps_count = g.state.current_target - 1;
        let hl = g.state().highlighted_index;
        g.tap(hl);
        assert_eq!(g.mode(), Mode::ImagePhase);
        let hl = g.state().highlighted_index;
        g.tap(hl);
        assert_eq!(g.state().taps_count, g.state().current_target);
    }

    #[test]
    fn resize_rerandomizes_only_when_out_of_bounds() {
        let (mut g, _) = game(50);
        g.state.highlighted_index = 40;
        g.resize(45);
        assert_eq!(g.state().highlighted_index, 40);
        g.resize(15);
        assert!(g.state().highlighted_index < 15);
        assert_eq!(g.tile_count(), 15);
    }

    #[test]
    fn rearming_the_image_timer_supersedes_the_old_one() {
        let (mut g, _) = game(10);
        g.start_image_timer(1_000.0);
        let first = g.armed_timer(TimerKind::Image).unwrap().token;
        g.start_image_timer(2_000.0);
        g.on_timer_expired(TimerKind::Image, first);
        assert!(g.timer_active(TimerKind::Image));
        g.clear_image_timer();
        assert!(g.drain_effects().contains(&Effect::CancelTimer(TimerKind::Image)));
    }

    #[test]
    fn progress_refresh_reports_remaining_time() {
        let (mut g, now) = game(10);
        let hl = g.state().highlighted_index;
        g.tap(hl);
        g.drain_effects();
        now.set(now.get() + 450.0);
        g.refresh_progress();
        let fx = g.drain_effects();
        assert!(fx.contains(&Effect::Render(RenderCommand::SetProgressBarFraction(0.5))));
        assert!(fx.contains(&Effect::Render(RenderCommand::SetRemainingMsText(450))));
    }

    #[test]
    fn idle_frame_needs_no_view_update() {
        let (mut g, _) = game(10);
        g.refresh_progress();
        let routed = crate::view::Routed::new(g.drain_effects());
        assert!(!routed.needs_dispatch());
        assert!(routed.timers.is_empty());
    }
}
