//! SQLite-backed implementation of the named storage slot.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension, params};

use super::{PersistResult, StorageSlot};

/// Slot name under which the RSVP collection is stored.
pub const DEFAULT_SLOT: &str = "wedding_rsvps";

/// SQLite implementation of [`StorageSlot`].
pub struct SqliteSlot {
    conn: Connection,
    slot: String,
}

impl SqliteSlot {
    /// Opens or creates a slot database at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory slot database.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self {
            conn,
            slot: DEFAULT_SLOT.to_string(),
        })
    }
}

impl StorageSlot for SqliteSlot {
    fn load(&self) -> PersistResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE name = ?1",
                params![self.slot],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn save(&mut self, payload: &str) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO slots(name, payload, updated_ms) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET payload = excluded.payload, updated_ms = excluded.updated_ms",
            params![self.slot, payload, now_ms() as i64],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> PersistResult<()> {
        self.conn
            .execute("DELETE FROM slots WHERE name = ?1", params![self.slot])?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
