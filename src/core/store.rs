//! Authoritative RSVP collection behind an injected storage slot.

use hashbrown::{HashMap, HashSet};
use tracing::warn;

use crate::{
    persist::{PersistError, StorageSlot},
    rsvp::RsvpRecord,
    types::RsvpId,
};

/// Errors surfaced by store mutations.
#[derive(Debug)]
pub enum StoreError {
    /// The backing slot rejected a write. The in-memory mutation is already
    /// applied and remains usable for the rest of the session.
    PersistUnavailable(PersistError),
}

impl From<PersistError> for StoreError {
    fn from(value: PersistError) -> Self {
        Self::PersistUnavailable(value)
    }
}

/// Result of an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Id of the record now in the collection.
    pub id: RsvpId,
    /// True when an existing record with the same email was replaced.
    pub replaced: bool,
}

/// Authoritative collection of RSVP records.
///
/// Holds every record in memory plus an email index, and rewrites the whole
/// backing slot as a JSON array on every mutation. Record counts are small
/// (tens to low thousands), so full rewrites stay cheap.
pub struct RsvpStore {
    slot: Box<dyn StorageSlot>,
    records: Vec<RsvpRecord>,
    by_email: HashMap<String, usize>,
}

impl RsvpStore {
    /// Opens the store over `slot`.
    ///
    /// An absent slot, an unreadable slot, or a payload that does not parse as
    /// a record array all yield an empty collection; none of them are fatal.
    pub fn open(slot: Box<dyn StorageSlot>) -> Self {
        let records = match slot.load() {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<RsvpRecord>>(&payload) {
                Ok(records) => records,
                Err(err) => {
                    warn!(%err, "stored payload is not a valid record array, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(?err, "backing slot unreadable, starting empty");
                Vec::new()
            }
        };

        let mut store = Self {
            slot,
            records,
            by_email: HashMap::new(),
        };
        store.rebuild_index();
        store
    }

    /// Number of records in the collection.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowed view of every record, in insertion order.
    pub fn records(&self) -> &[RsvpRecord] {
        &self.records
    }

    /// Cloned snapshot of every record. Order is unspecified for consumers;
    /// they sort where order matters.
    pub fn load_all(&self) -> Vec<RsvpRecord> {
        self.records.clone()
    }

    /// Looks up the record stored for `email`, case-sensitive.
    pub fn by_email(&self, email: &str) -> Option<&RsvpRecord> {
        self.by_email
            .get(email)
            .and_then(|idx| self.records.get(*idx))
    }

    /// Inserts `record`, replacing in place any record with the same email.
    ///
    /// Persists synchronously before returning; callers proceed assuming
    /// durability. On a slot failure the in-memory state keeps the mutation
    /// and the error reports persistence as unavailable.
    pub fn upsert(&mut self, record: RsvpRecord) -> Result<UpsertOutcome, StoreError> {
        let id = record.id.clone();
        let existing = self.by_email.get(&record.email).copied();
        let replaced = match existing {
            Some(idx) => {
                self.records[idx] = record;
                true
            }
            None => {
                self.by_email
                    .insert(record.email.clone(), self.records.len());
                self.records.push(record);
                false
            }
        };
        self.persist()?;
        Ok(UpsertOutcome { id, replaced })
    }

    /// Removes every record whose id is in `ids`; unknown ids are ignored.
    /// Returns how many records were removed.
    pub fn delete_by_ids(&mut self, ids: &HashSet<RsvpId>) -> Result<usize, StoreError> {
        let before = self.records.len();
        self.records.retain(|rec| !ids.contains(&rec.id));
        let removed = before - self.records.len();
        if removed > 0 {
            self.rebuild_index();
            self.persist()?;
        }
        Ok(removed)
    }

    /// Clears the collection and removes the backing slot.
    pub fn delete_all(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        self.by_email.clear();
        self.slot.clear()?;
        Ok(())
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&self.records).map_err(PersistError::from)?;
        self.slot.save(&payload)?;
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.by_email.clear();
        for (idx, rec) in self.records.iter().enumerate() {
            self.by_email.insert(rec.email.clone(), idx);
        }
    }
}
