use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::db::migrations::run_migrations;
use crate::error::StoreError;
use crate::models::AppState;
use crate::ports::StateStore;

/// Key under which the whole progress document lives in `app_meta`.
pub const STATE_KEY: &str = "badminton-progress";

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>, StoreError> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(StoreError::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<(), StoreError> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, key: &str) -> Result<(), StoreError> {
        conn.execute("DELETE FROM app_meta WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ─── State store ─────────────────────────────────────────────────────────────

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens the database file in WAL mode and brings the schema up to date.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        run_migrations(&conn)?;
        debug!("opened store at {:?}", path);
        Ok(Self::new(conn))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl StateStore for SqliteStore {
    fn load(&self) -> Result<Option<AppState>, StoreError> {
        let Some(raw) = MetaRepo::get(&self.conn, STATE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<AppState>(&raw) {
            Ok(state) => {
                debug!("loaded state: {} sessions", state.sessions.len());
                Ok(Some(state))
            }
            Err(e) => {
                warn!("discarding malformed stored state: {}", e);
                MetaRepo::delete(&self.conn, STATE_KEY)?;
                Ok(None)
            }
        }
    }

    fn save(&self, state: &AppState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(state)?;
        MetaRepo::set(&self.conn, STATE_KEY, &raw)
    }
}
