pub mod host;
pub mod timers;

pub use host::Host;
pub use timers::WebTimers;
