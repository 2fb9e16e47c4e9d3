//! RSVP domain record, form draft, and submission validation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Attendance, RsvpId};

/// Fully materialized guest response, fields named as in the persisted slot
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRecord {
    /// Stable identifier, assigned at creation and never reassigned.
    pub id: RsvpId,
    /// Guest name, non-empty after trimming.
    pub guest_name: String,
    /// Contact email; natural upsert key, case-sensitive as authored.
    pub email: String,
    /// Optional phone number, empty when absent.
    #[serde(default)]
    pub phone: String,
    /// Attendance answer.
    pub attendance: Attendance,
    /// Party size; meaningful only for attending responses.
    #[serde(default, deserialize_with = "lenient_guest_count")]
    pub guest_count: u32,
    /// Optional dietary restrictions, empty when absent.
    #[serde(default)]
    pub dietary: String,
    /// Optional free-text message, empty when absent.
    #[serde(default)]
    pub message: String,
    /// RFC 3339 submission timestamp, replaced wholesale on upsert-replace.
    pub submitted_at: String,
}

/// Form payload used to create a [`RsvpRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpDraft {
    /// Guest name as entered.
    pub guest_name: String,
    /// Contact email as entered.
    pub email: String,
    /// Optional phone number.
    pub phone: String,
    /// Attendance answer.
    pub attendance: Attendance,
    /// Party size as entered.
    pub guest_count: u32,
    /// Optional dietary restrictions.
    pub dietary: String,
    /// Optional free-text message.
    pub message: String,
}

/// Rejection reasons for a submission that must not reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    /// Guest name was empty after trimming.
    MissingGuestName,
    /// Email was empty after trimming.
    MissingEmail,
}

impl RsvpDraft {
    /// Validates the draft and materializes it into a record: text fields are
    /// trimmed, `guest_count` is zeroed unless attending, and the id and
    /// submission timestamp are stamped.
    pub fn into_record(self) -> Result<RsvpRecord, DraftError> {
        let guest_name = self.guest_name.trim().to_string();
        if guest_name.is_empty() {
            return Err(DraftError::MissingGuestName);
        }
        let email = self.email.trim().to_string();
        if email.is_empty() {
            return Err(DraftError::MissingEmail);
        }

        let guest_count = if self.attendance == Attendance::Yes {
            self.guest_count
        } else {
            0
        };

        Ok(RsvpRecord {
            id: mint_id(),
            guest_name,
            email,
            phone: self.phone.trim().to_string(),
            attendance: self.attendance,
            guest_count,
            dietary: self.dietary.trim().to_string(),
            message: self.message.trim().to_string(),
            submitted_at: Utc::now().to_rfc3339(),
        })
    }
}

// Stored payloads may carry the count as a number, a numeric string, or
// garbage from older data; anything unusable reads as 0.
fn lenient_guest_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                v.min(u64::from(u32::MAX)) as u32
            } else if let Some(v) = n.as_f64() {
                if v > 0.0 { v as u32 } else { 0 }
            } else {
                0
            }
        }
        serde_json::Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    })
}

static LAST_MINTED: AtomicU64 = AtomicU64::new(0);

// Millisecond-timestamp token, bumped past the previous mint so ids stay
// unique within the process even for same-millisecond submissions.
fn mint_id() -> RsvpId {
    let now = now_ms();
    let prev = LAST_MINTED
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(if now > last { now } else { last + 1 })
        })
        .unwrap_or(now);
    let minted = if now > prev { now } else { prev + 1 };
    minted.to_string()
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
