use tempfile::TempDir;

use rsvplog::{
    core::store::RsvpStore,
    persist::{StorageSlot, sqlite::SqliteSlot},
    rsvp::RsvpDraft,
    types::Attendance,
};

fn draft(name: &str, email: &str, attendance: Attendance, guest_count: u32) -> RsvpDraft {
    RsvpDraft {
        guest_name: name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        attendance,
        guest_count,
        dietary: String::new(),
        message: String::new(),
    }
}

#[test]
fn reopen_round_trips_records() {
    let tmp = TempDir::new().expect("tmp");
    let db = tmp.path().join("rsvps.db");

    let mut store = RsvpStore::open(Box::new(SqliteSlot::open(&db).expect("open slot")));
    store
        .upsert(draft("Ann", "ann@example.com", Attendance::Yes, 2).into_record().expect("record"))
        .expect("upsert");
    store
        .upsert(draft("Ben", "ben@example.com", Attendance::Maybe, 0).into_record().expect("record"))
        .expect("upsert");
    let before = store.load_all();
    drop(store);

    let reopened = RsvpStore::open(Box::new(SqliteSlot::open(&db).expect("reopen slot")));
    assert_eq!(reopened.load_all(), before);
}

#[test]
fn delete_all_removes_the_slot() {
    let tmp = TempDir::new().expect("tmp");
    let db = tmp.path().join("rsvps.db");

    let mut store = RsvpStore::open(Box::new(SqliteSlot::open(&db).expect("open slot")));
    store
        .upsert(draft("Ann", "ann@example.com", Attendance::Yes, 2).into_record().expect("record"))
        .expect("upsert");
    store.delete_all().expect("delete all");
    drop(store);

    let slot = SqliteSlot::open(&db).expect("reopen slot");
    assert!(slot.load().expect("load").is_none());
}

#[test]
fn corrupt_slot_payload_opens_empty() {
    let tmp = TempDir::new().expect("tmp");
    let db = tmp.path().join("rsvps.db");

    let mut slot = SqliteSlot::open(&db).expect("open slot");
    slot.save("{definitely-not-an-array").expect("save");
    drop(slot);

    let store = RsvpStore::open(Box::new(SqliteSlot::open(&db).expect("reopen slot")));
    assert!(store.is_empty());
}

#[test]
fn in_memory_slot_database_works() {
    let mut store = RsvpStore::open(Box::new(SqliteSlot::open_in_memory().expect("open slot")));
    store
        .upsert(draft("Ann", "ann@example.com", Attendance::Yes, 2).into_record().expect("record"))
        .expect("upsert");
    assert_eq!(store.len(), 1);
}
