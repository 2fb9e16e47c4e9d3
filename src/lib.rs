//! Local-first RSVP capture and review core with an advisory remote mirror.
//!
//! # Examples
//!
//! Synchronous store usage with [`core::store::RsvpStore`]:
//! ```
//! use rsvplog::{
//!     core::store::RsvpStore,
//!     persist::MemorySlot,
//!     rsvp::RsvpDraft,
//!     types::Attendance,
//! };
//!
//! let mut store = RsvpStore::open(Box::new(MemorySlot::new()));
//! let record = RsvpDraft {
//!     guest_name: "Ann Perkins".to_string(),
//!     email: "ann@example.com".to_string(),
//!     phone: String::new(),
//!     attendance: Attendance::Yes,
//!     guest_count: 2,
//!     dietary: String::new(),
//!     message: String::new(),
//! }
//! .into_record()
//! .expect("valid draft");
//! let outcome = store.upsert(record).expect("upsert");
//! assert!(!outcome.replaced);
//! assert_eq!(store.len(), 1);
//! ```
//!
//! Runtime usage with a SQLite-backed slot:
//! ```no_run
//! use rsvplog::{
//!     core::store::RsvpStore,
//!     persist::sqlite::SqliteSlot,
//!     rsvp::RsvpDraft,
//!     runtime::handle::{spawn_rsvplog, RuntimeConfig},
//!     types::Attendance,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let slot = SqliteSlot::open("rsvplog.db").expect("open slot");
//! let handle = spawn_rsvplog(
//!     RsvpStore::open(Box::new(slot)),
//!     None,
//!     RuntimeConfig::default(),
//! );
//! let receipt = handle.submit(RsvpDraft {
//!     guest_name: "Ann Perkins".to_string(),
//!     email: "ann@example.com".to_string(),
//!     phone: String::new(),
//!     attendance: Attendance::Yes,
//!     guest_count: 2,
//!     dietary: String::new(),
//!     message: String::new(),
//! }).await.expect("submit");
//! assert!(!receipt.replaced);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Layered runtime settings.
pub mod config;
/// Slot-backed authoritative store.
pub mod core;
/// CSV export codec and file hand-off.
pub mod export;
/// Advisory table-storage mirror.
pub mod mirror;
/// Storage-slot port and implementations.
pub mod persist;
/// RSVP domain records and submission validation.
pub mod rsvp;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared identifier alias and attendance enums.
pub mod types;
/// Derived read-side views.
pub mod view;
