// Glue between the yew tree and the game: run an entry point, then hand the
// queued effects to the renderer and the browser timers.

use std::cell::RefCell;
use std::rc::Rc;
use yew::UseReducerDispatcher;

use tap_grid::{Effect, Game, Routed, TimerKind, TimerToken, ViewAction, ViewModel};

use super::WebTimers;

#[derive(Clone)]
pub struct Host {
    pub game: Rc<RefCell<Game>>,
    pub timers: Rc<RefCell<WebTimers>>,
    pub view: UseReducerDispatcher<ViewModel>,
}

impl Host {
    pub fn run(&self, f: impl FnOnce(&mut Game)) {
        let effects = {
            let mut game = self.game.borrow_mut();
            f(&mut game);
            game.drain_effects()
        };
        self.apply(effects);
    }

    /// Timer callbacks come back through here rather than through `run`, so
    /// the callback type never depends on the caller's closure.
    fn expire(&self, kind: TimerKind, token: TimerToken) {
        self.timers.borrow_mut().fired(kind);
        let effects = {
            let mut game = self.game.borrow_mut();
            game.on_timer_expired(kind, token);
            game.drain_effects()
        };
        self.apply(effects);
    }

    fn apply(&self, effects: Vec<Effect>) {
        let routed = Routed::new(effects);
        for fx in &routed.timers {
            match *fx {
                Effect::CancelTimer(kind) => self.timers.borrow_mut().cancel(kind),
                Effect::ArmTimer {
                    kind,
                    token,
                    delay_ms,
                } => {
                    let host = self.clone();
                    self.timers
                        .borrow_mut()
                        .arm(kind, delay_ms, move || host.expire(kind, token));
                }
                Effect::Render(_) => {}
            }
        }
        if routed.needs_dispatch() {
            self.view.dispatch(ViewAction::Apply(routed.renders));
        }
    }
}
