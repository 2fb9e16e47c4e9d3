//! Pure projections for the admin view: aggregate stats, filtering, and sort
//! order. Deterministic, no side effects.

use chrono::DateTime;

use crate::{
    rsvp::RsvpRecord,
    types::{Attendance, AttendanceFilter},
};

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RsvpStats {
    /// Responses on file.
    pub total: usize,
    /// Responses with attendance `yes`.
    pub attending: usize,
    /// Responses with attendance `no`.
    pub not_attending: usize,
    /// Guests brought by attending responses.
    pub total_guests: u64,
}

/// Counts records by attendance; `total_guests` sums party sizes over
/// attending responses only.
pub fn compute_stats(records: &[RsvpRecord]) -> RsvpStats {
    let mut stats = RsvpStats {
        total: records.len(),
        ..RsvpStats::default()
    };
    for rec in records {
        match rec.attendance {
            Attendance::Yes => {
                stats.attending += 1;
                stats.total_guests += u64::from(rec.guest_count);
            }
            Attendance::No => stats.not_attending += 1,
            Attendance::Maybe => {}
        }
    }
    stats
}

/// Applies the attendance filter, then a case-insensitive substring match of
/// the trimmed `search` term against guest name or email. Both conditions
/// AND-combine; a blank term matches everything.
pub fn filter_records(
    records: &[RsvpRecord],
    filter: AttendanceFilter,
    search: &str,
) -> Vec<RsvpRecord> {
    let term = search.trim().to_lowercase();
    records
        .iter()
        .filter(|rec| filter.admits(rec.attendance))
        .filter(|rec| {
            term.is_empty()
                || rec.guest_name.to_lowercase().contains(&term)
                || rec.email.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Stable sort, most recent submission first. Records whose timestamp does
/// not parse sort as if oldest.
pub fn sort_by_submitted_desc(records: &mut [RsvpRecord]) {
    records.sort_by(|a, b| submitted_ms(b).cmp(&submitted_ms(a)));
}

fn submitted_ms(rec: &RsvpRecord) -> i64 {
    DateTime::parse_from_rfc3339(&rec.submitted_at)
        .map(|ts| ts.timestamp_millis())
        .unwrap_or(i64::MIN)
}
