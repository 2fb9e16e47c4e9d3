use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use rsvplog::{
    core::store::RsvpStore,
    export,
    persist::MemorySlot,
    rsvp::{RsvpDraft, RsvpRecord},
    types::{Attendance, AttendanceFilter},
    view::projector,
};

fn draft(i: u64) -> RsvpDraft {
    RsvpDraft {
        guest_name: format!("Guest {i}"),
        email: format!("guest{i}@example.com"),
        phone: String::new(),
        attendance: if i % 3 == 0 {
            Attendance::No
        } else {
            Attendance::Yes
        },
        guest_count: (i % 4) as u32,
        dietary: String::new(),
        message: String::new(),
    }
}

fn records(n: u64) -> Vec<RsvpRecord> {
    (0..n)
        .map(|i| draft(i).into_record().expect("record"))
        .collect()
}

fn bench_upserts(c: &mut Criterion) {
    c.bench_function("store_upsert_1k", |b| {
        b.iter(|| {
            let mut store = RsvpStore::open(Box::new(MemorySlot::new()));
            for i in 0..1_000u64 {
                let record = draft(i).into_record().expect("record");
                store.upsert(record).expect("upsert");
            }
        });
    });
}

fn bench_filtered_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_view");
    let records = records(10_000);

    for term in ["blank", "guest123"] {
        let search = if term == "blank" { "" } else { term };
        group.bench_with_input(BenchmarkId::from_parameter(term), &search, |b, search| {
            b.iter(|| {
                let _ = projector::filter_records(&records, AttendanceFilter::Yes, search);
            });
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let records = records(10_000);
    c.bench_function("export_csv_10k", |b| {
        b.iter(|| {
            let _ = export::to_delimited_text(&records);
        });
    });
}

criterion_group!(benches, bench_upserts, bench_filtered_view, bench_export);
criterion_main!(benches);
