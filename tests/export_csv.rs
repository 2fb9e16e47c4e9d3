use rsvplog::{
    export::{EXPORT_FILE_NAME, to_delimited_text, write_export},
    rsvp::RsvpRecord,
    types::Attendance,
};

fn record(
    name: &str,
    email: &str,
    phone: &str,
    attendance: Attendance,
    guest_count: u32,
    dietary: &str,
    message: &str,
    submitted_at: &str,
) -> RsvpRecord {
    RsvpRecord {
        id: email.to_string(),
        guest_name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        attendance,
        guest_count,
        dietary: dietary.to_string(),
        message: message.to_string(),
        submitted_at: submitted_at.to_string(),
    }
}

// Minimal RFC 4180 reader: quoted fields, doubled quotes, newlines inside
// quotes.
fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                _ => field.push(ch),
            }
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

#[test]
fn header_row_is_fixed() {
    let text = to_delimited_text(&[]);
    assert_eq!(
        text,
        "Name,Email,Phone,Attendance,Guest Count,Dietary Restrictions,Message,Submitted At"
    );
}

#[test]
fn optional_fields_render_as_empty_strings() {
    let rec = record(
        "Ann",
        "ann@example.com",
        "",
        Attendance::Maybe,
        0,
        "",
        "",
        "2024-01-01T00:00:00Z",
    );
    let text = to_delimited_text(&[rec]);
    let row = text.lines().nth(1).expect("data row");
    assert_eq!(
        row,
        "\"Ann\",\"ann@example.com\",\"\",\"maybe\",\"0\",\"\",\"\",\"2024-01-01T00:00:00Z\""
    );
}

#[test]
fn round_trips_through_a_standard_csv_parse() {
    let tricky = record(
        "O\"Brien, Pat",
        "pat@example.com",
        "555-0100",
        Attendance::Yes,
        3,
        "gluten-free, no nuts",
        "line one\nline two, with \"quotes\"",
        "2024-05-05T12:30:00Z",
    );
    let plain = record(
        "Ben",
        "ben@example.com",
        "",
        Attendance::No,
        0,
        "",
        "",
        "2024-05-06T08:00:00Z",
    );

    let text = to_delimited_text(&[tricky.clone(), plain.clone()]);
    let rows = parse_csv(&text);

    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[1],
        vec![
            "O\"Brien, Pat".to_string(),
            "pat@example.com".to_string(),
            "555-0100".to_string(),
            "yes".to_string(),
            "3".to_string(),
            "gluten-free, no nuts".to_string(),
            "line one\nline two, with \"quotes\"".to_string(),
            "2024-05-05T12:30:00Z".to_string(),
        ]
    );
    assert_eq!(rows[2][0], "Ben");
    assert_eq!(rows[2][3], "no");
    assert_eq!(rows[2][4], "0");
}

#[test]
fn rows_follow_the_order_given() {
    let a = record("A", "a@example.com", "", Attendance::Yes, 1, "", "", "2024-01-01T00:00:00Z");
    let b = record("B", "b@example.com", "", Attendance::Yes, 1, "", "", "2024-06-01T00:00:00Z");

    let text = to_delimited_text(&[b.clone(), a.clone()]);
    let rows = parse_csv(&text);
    assert_eq!(rows[1][0], "B");
    assert_eq!(rows[2][0], "A");
}

#[test]
fn write_export_hands_text_to_the_filesystem() {
    let tmp = tempfile::TempDir::new().expect("tmp");
    let path = tmp.path().join(EXPORT_FILE_NAME);

    write_export(&path, "Name\n\"Ann\"").expect("write");
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "Name\n\"Ann\"");
}
