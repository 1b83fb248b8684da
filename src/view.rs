//! Presentation contract. The core only ever pushes commands outward; a
//! presenter never reaches back into the game.

use std::rc::Rc;
use yew::Reducible;

use crate::timer::{TimerKind, TimerToken};
use crate::util::format_ms;

pub trait Presenter {
    fn render_grid(&mut self, tile_count: usize);
    fn set_highlight(&mut self, index: usize);
    fn set_counter_text(&mut self, taps: u32, target: u32);
    /// `fraction` in `0.0..=1.0`.
    fn set_progress_bar_fraction(&mut self, fraction: f64);
    fn set_remaining_ms_text(&mut self, ms: u32);
    fn show_reward_overlay(&mut self);
    fn hide_reward_overlay(&mut self);
    fn trigger_speedup_cue(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    RenderGrid { tile_count: usize },
    SetHighlight(usize),
    SetCounterText { taps: u32, target: u32 },
    SetProgressBarFraction(f64),
    SetRemainingMsText(u32),
    ShowRewardOverlay,
    HideRewardOverlay,
    TriggerSpeedupCue,
}

impl RenderCommand {
    pub fn apply(&self, p: &mut dyn Presenter) {
        use RenderCommand::*;
        match *self {
            RenderGrid { tile_count } => p.render_grid(tile_count),
            SetHighlight(i) => p.set_highlight(i),
            SetCounterText { taps, target } => p.set_counter_text(taps, target),
            SetProgressBarFraction(f) => p.set_progress_bar_fraction(f),
            SetRemainingMsText(ms) => p.set_remaining_ms_text(ms),
            ShowRewardOverlay => p.show_reward_overlay(),
            HideRewardOverlay => p.hide_reward_overlay(),
            TriggerSpeedupCue => p.trigger_speedup_cue(),
        }
    }
}

/// Everything the host has to do after a game call.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Render(RenderCommand),
    /// Arm a real timer; report back via `Game::on_timer_expired(kind, token)`.
    ArmTimer {
        kind: TimerKind,
        token: TimerToken,
        delay_ms: f64,
    },
    CancelTimer(TimerKind),
}

/// One drained batch, split for the host: render commands go to the view in a
/// single dispatch, timer requests go to the browser in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Routed {
    pub renders: Vec<RenderCommand>,
    pub timers: Vec<Effect>,
}

impl Routed {
    pub fn new(effects: Vec<Effect>) -> Self {
        let mut routed = Self::default();
        for fx in effects {
            match fx {
                Effect::Render(cmd) => routed.renders.push(cmd),
                timer => routed.timers.push(timer),
            }
        }
        routed
    }

    /// The view only needs a dispatch when something was rendered.
    pub fn needs_dispatch(&self) -> bool {
        !self.renders.is_empty()
    }
}

/// Render state for the yew shell, built up from render commands.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub tile_count: usize,
    pub highlighted: Option<usize>,
    pub counter_text: String,
    pub progress_fraction: f64,
    pub remaining_ms_text: String,
    pub overlay_visible: bool,
    /// Bumped on each speed-up cue so the flash element restarts its animation.
    pub speedup_epoch: u32,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            tile_count: 0,
            highlighted: None,
            counter_text: String::new(),
            progress_fraction: 0.0,
            remaining_ms_text: String::new(),
            overlay_visible: false,
            speedup_epoch: 0,
        }
    }
}

impl Presenter for ViewModel {
    fn render_grid(&mut self, tile_count: usize) {
        self.tile_count = tile_count;
    }
    fn set_highlight(&mut self, index: usize) {
        self.highlighted = Some(index);
    }
    fn set_counter_text(&mut self, taps: u32, target: u32) {
        self.counter_text = format!("{} / {}", taps, target);
    }
    fn set_progress_bar_fraction(&mut self, fraction: f64) {
        self.progress_fraction = fraction.clamp(0.0, 1.0);
    }
    fn set_remaining_ms_text(&mut self, ms: u32) {
        self.remaining_ms_text = format_ms(ms);
    }
    fn show_reward_overlay(&mut self) {
        self.overlay_visible = true;
    }
    fn hide_reward_overlay(&mut self) {
        self.overlay_visible = false;
    }
    fn trigger_speedup_cue(&mut self) {
        self.speedup_epoch = self.speedup_epoch.wrapping_add(1);
    }
}

#[derive(Clone, Debug)]
pub enum ViewAction {
    Apply(Vec<RenderCommand>),
}

impl Reducible for ViewModel {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ViewAction::Apply(cmds) => {
                if cmds.is_empty() {
                    return self;
                }
                let mut new = (*self).clone();
                for cmd in &cmds {
                    cmd.apply(&mut new);
                }
                Rc::new(new)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_model_tracks_commands() {
        let vm = Rc::new(ViewModel::default());
        let vm = vm.reduce(ViewAction::Apply(vec![
            RenderCommand::RenderGrid { tile_count: 50 },
            RenderCommand::SetHighlight(7),
            RenderCommand::SetCounterText { taps: 3, target: 300 },
            RenderCommand::SetRemainingMsText(900),
            RenderCommand::SetProgressBarFraction(1.5),
            RenderCommand::ShowRewardOverlay,
            RenderCommand::TriggerSpeedupCue,
        ]));
        assert_eq!(vm.tile_count, 50);
        assert_eq!(vm.highlighted, Some(7));
        assert_eq!(vm.counter_text, "3 / 300");
        assert_eq!(vm.remaining_ms_text, "900 ms");
        assert_eq!(vm.progress_fraction, 1.0);
        assert!(vm.overlay_visible);
        assert_eq!(vm.speedup_epoch, 1);
    }

    #[test]
    fn routing_keeps_order_within_each_lane() {
        let arm = Effect::ArmTimer {
            kind: TimerKind::Tap,
            token: TimerToken(4),
            delay_ms: 900.0,
        };
        let routed = Routed::new(vec![
            Effect::CancelTimer(TimerKind::Image),
            Effect::Render(RenderCommand::SetHighlight(2)),
            arm.clone(),
            Effect::Render(RenderCommand::SetRemainingMsText(900)),
        ]);
        assert_eq!(
            routed.renders,
            vec![
                RenderCommand::SetHighlight(2),
                RenderCommand::SetRemainingMsText(900)
            ]
        );
        assert_eq!(routed.timers, vec![Effect::CancelTimer(TimerKind::Image), arm]);
        assert!(routed.needs_dispatch());
    }

    #[test]
    fn timer_only_batch_skips_the_view() {
        let routed = Routed::new(vec![Effect::CancelTimer(TimerKind::Tap)]);
        assert!(!routed.needs_dispatch());
        assert!(!Routed::new(Vec::new()).needs_dispatch());
    }

    #[test]
    fn empty_batch_keeps_the_same_rc() {
        let vm = Rc::new(ViewModel::default());
        let same = vm.clone().reduce(ViewAction::Apply(Vec::new()));
        assert!(Rc::ptr_eq(&vm, &same));
    }
}
