//! Time and randomness seams. The browser implementations go through `js_sys`
//! and must only be called on wasm32.

/// Wall-clock source in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Picks a tile index in `0..n` (`n >= 1`).
pub trait TileRng {
    fn pick(&mut self, n: usize) -> usize;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserRng;

impl TileRng for BrowserRng {
    fn pick(&mut self, n: usize) -> usize {
        let n = n.max(1);
        let r = (js_sys::Math::random() * n as f64).floor() as usize;
        r.min(n - 1)
    }
}
