// Shared harness: a game driven by a hand-cranked clock, a seeded tile picker
// and an in-memory store the test can inspect.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tap_grid::persist::{MemoryStore, read_record, write_record};
use tap_grid::ports::{Clock, TileRng};
use tap_grid::util::utc_day;
use tap_grid::{Effect, Game, GameConfig, RenderCommand, RunState, TimerKind};

/// 2025-10-09T08:53:20Z
pub const T0: f64 = 1_760_000_000_000.0;

struct ManualClock(Rc<Cell<f64>>);

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

struct Seeded(StdRng);

impl TileRng for Seeded {
    fn pick(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }
}

pub struct Harness {
    pub game: Game,
    pub clock: Rc<Cell<f64>>,
    pub store: MemoryStore,
    pub tiles: usize,
    seed: u64,
}

fn build(store: &MemoryStore, clock: &Rc<Cell<f64>>, tiles: usize, seed: u64) -> Game {
    Game::new(
        GameConfig::default(),
        tiles,
        Box::new(store.clone()),
        Box::new(ManualClock(clock.clone())),
        Box::new(Seeded(StdRng::seed_from_u64(seed))),
    )
}

impl Harness {
    pub fn new(tiles: usize) -> Self {
        let store = MemoryStore::new();
        let clock = Rc::new(Cell::new(T0));
        let game = build(&store, &clock, tiles, 7);
        Self {
            game,
            clock,
            store,
            tiles,
            seed: 7,
        }
    }

    /// Boots visible on an empty store; start-up effects are discarded.
    pub fn booted(tiles: usize) -> Self {
        let mut h = Self::new(tiles);
        h.game.boot(false);
        h.drain();
        h
    }

    /// Boots on top of an already persisted record.
    pub fn with_record(state: &RunState, tiles: usize, hidden: bool) -> Self {
        let mut h = Self::new(tiles);
        h.seed_record(state);
        h.game.boot(hidden);
        h.drain();
        h
    }

    pub fn seed_record(&mut self, state: &RunState) {
        let mut store = self.store.clone();
        write_record(&mut store, &GameConfig::default().storage_key, state).unwrap();
    }

    /// Page reload: a fresh game on the same store and clock.
    pub fn reboot(&mut self, hidden: bool) -> Vec<Effect> {
        self.seed += 1;
        self.game = build(&self.store, &self.clock, self.tiles, self.seed);
        self.game.boot(hidden);
        self.drain()
    }

    pub fn advance(&mut self, ms: f64) {
        self.clock.set(self.clock.get() + ms);
    }

    pub fn drain(&mut self) -> Vec<Effect> {
        self.game.drain_effects()
    }

    pub fn tap_highlighted(&mut self) {
        let idx = self.game.state().highlighted_index;
        self.game.tap(idx);
    }

    /// Lets the armed timer of `kind` run out and reports the expiry.
    pub fn fire(&mut self, kind: TimerKind) {
        let armed = self
            .game
            .armed_timer(kind)
            .unwrap_or_else(|| panic!("no {kind:?} timer armed"));
        let due = armed.started_at_ms + armed.duration_ms;
        if self.clock.get() < due {
            self.clock.set(due);
        }
        self.game.on_timer_expired(kind, armed.token);
    }

    pub fn persisted(&self) -> RunState {
        read_record(&self.store, &GameConfig::default().storage_key)
            .unwrap()
            .expect("record persisted")
    }
}

/// A record for today with the given progress.
pub fn record(taps: u32, target: u32) -> RunState {
    RunState {
        current_target: target,
        taps_count: taps,
        last_reset_day: Some(utc_day(T0)),
        ..RunState::default()
    }
}

pub fn renders(fx: &[Effect], cmd: &RenderCommand) -> bool {
    fx.contains(&Effect::Render(cmd.clone()))
}

pub fn armed_delay(fx: &[Effect], kind: TimerKind) -> Option<f64> {
    fx.iter().rev().find_map(|e| match e {
        Effect::ArmTimer { kind: k, delay_ms, .. } if *k == kind => Some(*delay_ms),
        _ => None,
    })
}
