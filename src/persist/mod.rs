//! Storage-port abstraction over the single named slot.

pub mod sqlite;

/// Errors raised by slot implementations.
#[derive(Debug)]
pub enum PersistError {
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// Payload encode failure.
    Serde(serde_json::Error),
    /// Anything else.
    Message(String),
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Result alias for slot operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Port over a single named storage slot holding one opaque payload.
///
/// The store rewrites the whole payload on every mutation; implementations
/// only need load/replace/remove.
pub trait StorageSlot: Send {
    /// Reads the current payload; `None` when the slot has never been written.
    fn load(&self) -> PersistResult<Option<String>>;
    /// Replaces the payload.
    fn save(&mut self, payload: &str) -> PersistResult<()>;
    /// Removes the slot entirely.
    fn clear(&mut self) -> PersistResult<()>;
}

/// In-memory slot, used as a test double and for throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySlot {
    payload: Option<String>,
}

impl MemorySlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-seeded with `payload`.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }
}

impl StorageSlot for MemorySlot {
    fn load(&self) -> PersistResult<Option<String>> {
        Ok(self.payload.clone())
    }

    fn save(&mut self, payload: &str) -> PersistResult<()> {
        self.payload = Some(payload.to_string());
        Ok(())
    }

    fn clear(&mut self) -> PersistResult<()> {
        self.payload = None;
        Ok(())
    }
}
