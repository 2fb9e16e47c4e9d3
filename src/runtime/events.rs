//! Runtime event stream payloads.

use crate::types::RsvpId;

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RsvpEvent {
    /// A submission was committed locally.
    Submitted {
        /// Id of the committed record.
        id: RsvpId,
        /// True when an earlier response with the same email was replaced.
        replaced: bool,
    },
    /// Selected records were removed.
    Deleted {
        /// How many records were removed.
        removed: usize,
    },
    /// The whole collection was cleared.
    Cleared,
    /// The advisory mirror delivered this record.
    Mirrored {
        /// Id of the mirrored record.
        id: RsvpId,
    },
}
