//! Persistence adapter: one JSON record under one key.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::GameConfig;
use crate::model::RunState;
use crate::util::{clog, cwarn};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage write failed for key={0}")]
    Write(String),

    #[error("storage read failed for key={0}")]
    Read(String),

    #[error("corrupt record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String key-value storage (`localStorage` shaped).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// Browser `localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    /// `None` when the window has no usable storage (private mode, disabled).
    pub fn open() -> Option<Self> {
        let win = web_sys::window()?;
        let storage = win.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        self.storage
            .get_item(key)
            .map_err(|_| PersistError::Read(key.to_string()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| PersistError::Write(key.to_string()))
    }
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// while the game owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.raw(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.insert(key, value);
        Ok(())
    }
}

pub fn read_record(store: &dyn KeyValueStore, key: &str) -> Result<Option<RunState>, PersistError> {
    match store.get_item(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn write_record(
    store: &mut dyn KeyValueStore,
    key: &str,
    state: &RunState,
) -> Result<(), PersistError> {
    let raw = serde_json::to_string(state)?;
    store.set_item(key, &raw)
}

/// Loads the record (defaults when absent or unreadable) and applies the
/// daily reset, saving if the reset changed anything.
pub fn load_state(store: &mut dyn KeyValueStore, cfg: &GameConfig, today: NaiveDate) -> RunState {
    let mut state = match read_record(store, &cfg.storage_key) {
        Ok(Some(s)) => s,
        Ok(None) => RunState::new(cfg),
        Err(e) => {
            cwarn(&format!("load_state: {e}; starting from defaults"));
            RunState::new(cfg)
        }
    };
    if state.apply_daily_reset(today, cfg) {
        clog(&format!("daily reset for {today}"));
        save_state(store, cfg, &state);
    }
    state
}

/// Failures are logged and swallowed; the session keeps its in-memory state.
pub fn save_state(store: &mut dyn KeyValueStore, cfg: &GameConfig, state: &RunState) {
    if let Err(e) = write_record(store, &cfg.storage_key, state) {
        cwarn(&format!("save_state: {e}"));
    }
}
