use rsvplog::{
    config::{MirrorSettings, load_config},
    mirror::{MirrorRow, http::HttpTableSink},
    rsvp::RsvpRecord,
    types::Attendance,
};

#[test]
fn defaults_leave_the_mirror_unconfigured() {
    let settings = load_config().expect("load settings");
    assert_eq!(settings.storage.path, "rsvplog.db");
    assert_eq!(settings.mirror.table_name, "RSVPs");
    assert!(!settings.mirror.is_configured());
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn placeholder_credentials_do_not_configure_the_mirror() {
    let placeholders = MirrorSettings {
        base_id: "YOUR_TABLE_BASE_ID".to_string(),
        api_key: "YOUR_TABLE_API_KEY".to_string(),
        table_name: "RSVPs".to_string(),
    };
    assert!(!placeholders.is_configured());
    assert!(HttpTableSink::from_settings(&placeholders).is_none());

    let real = MirrorSettings {
        base_id: "appBase123".to_string(),
        api_key: "key456".to_string(),
        table_name: "RSVPs".to_string(),
    };
    assert!(real.is_configured());
    assert!(HttpTableSink::from_settings(&real).is_some());
}

#[test]
fn mirror_row_uses_human_labels_and_integer_count() {
    let rec = RsvpRecord {
        id: "1717171717171".to_string(),
        guest_name: "Ann".to_string(),
        email: "ann@example.com".to_string(),
        phone: String::new(),
        attendance: Attendance::Yes,
        guest_count: 2,
        dietary: "vegetarian".to_string(),
        message: String::new(),
        submitted_at: "2024-06-01T00:00:00Z".to_string(),
    };

    let row = MirrorRow::from_record(&rec);
    let json = serde_json::to_value(&row).expect("serialize row");

    assert_eq!(json["Guest Name"], "Ann");
    assert_eq!(json["Email"], "ann@example.com");
    assert_eq!(json["Attendance"], "yes");
    assert_eq!(json["Guest Count"], 2);
    assert_eq!(json["Dietary Restrictions"], "vegetarian");
    assert_eq!(json["Phone"], "");
    assert_eq!(json["Submitted At"], "2024-06-01T00:00:00Z");
}
