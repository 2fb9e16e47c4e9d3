//! Advisory mirror of committed records to a third-party table-storage API.
//!
//! Mirroring is best-effort: rows are shaped and delivered after the local
//! commit, failures are logged and never surfaced to the submitting caller,
//! and nothing here may alter what the store already persisted.

pub mod http;

use async_trait::async_trait;
use serde::Serialize;

use crate::rsvp::RsvpRecord;

/// Errors raised by mirror sinks.
#[derive(Debug)]
pub enum MirrorError {
    /// Transport-level failure.
    Http(reqwest::Error),
    /// The endpoint answered with a non-success status.
    Rejected(u16),
}

impl From<reqwest::Error> for MirrorError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Result alias for mirror deliveries.
pub type MirrorResult<T> = Result<T, MirrorError>;

/// One record shaped into the human-labeled columns of the remote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorRow {
    /// Guest name column.
    #[serde(rename = "Guest Name")]
    pub guest_name: String,
    /// Email column.
    #[serde(rename = "Email")]
    pub email: String,
    /// Phone column, empty when absent.
    #[serde(rename = "Phone")]
    pub phone: String,
    /// Attendance token column.
    #[serde(rename = "Attendance")]
    pub attendance: String,
    /// Party size column, sent as an integer.
    #[serde(rename = "Guest Count")]
    pub guest_count: u32,
    /// Dietary restrictions column, empty when absent.
    #[serde(rename = "Dietary Restrictions")]
    pub dietary: String,
    /// Message column, empty when absent.
    #[serde(rename = "Message")]
    pub message: String,
    /// Submission timestamp column.
    #[serde(rename = "Submitted At")]
    pub submitted_at: String,
}

impl MirrorRow {
    /// Shapes a committed record into its remote row.
    pub fn from_record(rec: &RsvpRecord) -> Self {
        Self {
            guest_name: rec.guest_name.clone(),
            email: rec.email.clone(),
            phone: rec.phone.clone(),
            attendance: rec.attendance.as_str().to_string(),
            guest_count: rec.guest_count,
            dietary: rec.dietary.clone(),
            message: rec.message.clone(),
            submitted_at: rec.submitted_at.clone(),
        }
    }
}

/// Delivery port for the advisory mirror.
///
/// Implementations must never touch the local store.
#[async_trait]
pub trait MirrorSink: Send {
    /// Delivers one row to the remote table.
    async fn deliver(&mut self, row: &MirrorRow) -> MirrorResult<()>;
}
