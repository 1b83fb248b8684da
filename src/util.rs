// Small helpers shared by the core and the yew shell.

use chrono::{DateTime, NaiveDate};

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    let _ = msg; // no console off the browser
}

#[cfg(target_arch = "wasm32")]
pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn cwarn(msg: &str) {
    let _ = msg;
}

/// UTC calendar day of an epoch-millisecond instant.
pub fn utc_day(epoch_ms: f64) -> NaiveDate {
    DateTime::from_timestamp_millis(epoch_ms as i64)
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

pub fn format_ms(ms: u32) -> String {
    format!("{} ms", ms)
}
