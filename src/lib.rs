//! Tap Grid core.
//!
//! A grid of tiles, one highlighted at a time; tap it before the deadline.
//! Correct taps count toward a daily target, the deadline shortens in five
//! steps along the way, and hitting the target shows a timed reward screen
//! before the next, larger run. This crate holds the run state machine and
//! timer bookkeeping; the yew shell in `main.rs` renders it.

pub mod config;
pub mod game;
pub mod grid;
pub mod model;
pub mod persist;
pub mod ports;
pub mod segment;
pub mod timer;
pub mod util;
pub mod view;
mod visibility;

pub use config::{GameConfig, GridConfig};
pub use game::Game;
pub use model::{Mode, RunState};
pub use timer::{TimerKind, TimerToken};
pub use view::{Effect, Presenter, RenderCommand, Routed, ViewAction, ViewModel};
