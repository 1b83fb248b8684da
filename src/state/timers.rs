// Real browser timeouts backing the game's timer engine. One handle per kind;
// arming a kind cancels whatever was pending for it.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use tap_grid::TimerKind;
use tap_grid::util::cwarn;

struct Pending {
    id: i32,
    // Owned here so a cancelled timeout frees its callback.
    callback: Closure<dyn FnMut()>,
}

#[derive(Default)]
pub struct WebTimers {
    tap: Option<Pending>,
    image: Option<Pending>,
    // The callback that fired last. It may still be on the stack, so it is
    // dropped on the next fire rather than from inside itself.
    spent: Option<Closure<dyn FnMut()>>,
}

impl WebTimers {
    fn slot(&mut self, kind: TimerKind) -> &mut Option<Pending> {
        match kind {
            TimerKind::Tap => &mut self.tap,
            TimerKind::Image => &mut self.image,
        }
    }

    pub fn arm(&mut self, kind: TimerKind, delay_ms: f64, on_fire: impl FnOnce() + 'static) {
        self.cancel(kind);
        let Some(win) = web_sys::window() else {
            return;
        };
        let mut on_fire = Some(on_fire);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(f) = on_fire.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        match win.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms.ceil().min(i32::MAX as f64) as i32,
        ) {
            Ok(id) => *self.slot(kind) = Some(Pending { id, callback }),
            Err(_) => cwarn(&format!("setTimeout failed for {kind:?} timer")),
        }
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        if let Some(pending) = self.slot(kind).take() {
            if let Some(win) = web_sys::window() {
                win.clear_timeout_with_handle(pending.id);
            }
        }
    }

    /// Called from inside a firing callback: its timeout is gone, so move the
    /// closure out of the slot without clearing anything.
    pub fn fired(&mut self, kind: TimerKind) {
        if let Some(pending) = self.slot(kind).take() {
            self.spent = Some(pending.callback);
        }
    }

    /// Callbacks currently owned, spent one included.
    #[cfg(test)]
    fn held(&self) -> usize {
        [self.tap.is_some(), self.image.is_some(), self.spent.is_some()]
            .into_iter()
            .filter(|held| *held)
            .count()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn rearming_holds_one_callback_per_kind() {
        let mut timers = WebTimers::default();
        for _ in 0..400 {
            timers.arm(TimerKind::Tap, 60_000.0, || {});
        }
        timers.arm(TimerKind::Image, 60_000.0, || {});
        assert_eq!(timers.held(), 2);

        timers.cancel(TimerKind::Tap);
        timers.cancel(TimerKind::Image);
        assert_eq!(timers.held(), 0);
    }

    #[wasm_bindgen_test]
    fn fired_callback_is_parked_until_the_next_fire() {
        let mut timers = WebTimers::default();
        timers.arm(TimerKind::Tap, 60_000.0, || {});
        timers.fired(TimerKind::Tap);
        assert_eq!(timers.held(), 1);

        timers.arm(TimerKind::Tap, 60_000.0, || {});
        timers.fired(TimerKind::Tap);
        assert_eq!(timers.held(), 1);
        timers.cancel(TimerKind::Tap);
        assert_eq!(timers.held(), 1);
    }
}
