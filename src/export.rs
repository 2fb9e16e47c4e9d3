//! CSV serialization of record sets and the file hand-off.

use std::io;
use std::path::Path;

use crate::rsvp::RsvpRecord;

/// Download filename used by the admin export action.
pub const EXPORT_FILE_NAME: &str = "wedding-rsvps.csv";

const HEADER: [&str; 8] = [
    "Name",
    "Email",
    "Phone",
    "Attendance",
    "Guest Count",
    "Dietary Restrictions",
    "Message",
    "Submitted At",
];

/// Serializes `records` as comma-separated text in the order given.
///
/// The header row is unquoted; every data field is double-quoted with
/// embedded quotes doubled, so commas, quotes, and newlines survive a
/// standard CSV parse. Absent optional fields render as empty strings, and
/// the submission timestamp is rendered verbatim.
pub fn to_delimited_text(records: &[RsvpRecord]) -> String {
    let mut out = HEADER.join(",");
    for rec in records {
        let count = rec.guest_count.to_string();
        let row = [
            rec.guest_name.as_str(),
            rec.email.as_str(),
            rec.phone.as_str(),
            rec.attendance.as_str(),
            count.as_str(),
            rec.dietary.as_str(),
            rec.message.as_str(),
            rec.submitted_at.as_str(),
        ];
        out.push('\n');
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_quoted(&mut out, field);
        }
    }
    out
}

fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

/// Writes previously serialized export text under `path`.
///
/// Pure hand-off to the host filesystem; the store is neither read nor
/// mutated here.
pub fn write_export(path: &Path, text: &str) -> io::Result<()> {
    std::fs::write(path, text)
}
