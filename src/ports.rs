//! Boundaries the tracker talks through: where state is kept, what time it
//! is, and where session ids come from.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use log::warn;
use std::cell::{Cell, RefCell};

use crate::error::StoreError;
use crate::models::AppState;

pub trait StateStore {
    /// `Ok(None)` when nothing usable is stored. Implementations drop
    /// malformed data rather than fail.
    fn load(&self) -> Result<Option<AppState>, StoreError>;

    /// Overwrites the whole stored document.
    fn save(&self, state: &AppState) -> Result<(), StoreError>;
}

pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

pub trait IdSource {
    fn next_id(&self) -> String;
}

// ─── Real implementations ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

// ─── Deterministic implementations ───────────────────────────────────────────

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance_days(&self, days: i64) {
        self.now.set(self.now.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[derive(Debug, Default)]
pub struct SequentialIds {
    next: Cell<u64>,
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.get() + 1;
        self.next.set(n);
        format!("session-{}", n)
    }
}

/// Keeps the serialized document in memory, the same shape a real store
/// writes, so malformed-data handling can be exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
    saves: Cell<usize>,
    read_only: Cell<bool>,
}

impl MemoryStore {
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: RefCell::new(Some(raw.to_string())),
            ..Self::default()
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// While set, every save fails the way a read-only database file does.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<AppState>, StoreError> {
        let raw = self.raw.borrow().clone();
        let Some(raw) = raw else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!("discarding malformed stored state: {}", e);
                *self.raw.borrow_mut() = None;
                Ok(None)
            }
        }
    }

    fn save(&self, state: &AppState) -> Result<(), StoreError> {
        if self.read_only.get() {
            return Err(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_READONLY),
                None,
            )
            .into());
        }
        *self.raw.borrow_mut() = Some(serde_json::to_string(state)?);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<S: StateStore> StateStore for &S {
    fn load(&self) -> Result<Option<AppState>, StoreError> {
        (**self).load()
    }

    fn save(&self, state: &AppState) -> Result<(), StoreError> {
        (**self).save(state)
    }
}
