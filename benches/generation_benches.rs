use baseline_tune::artifact::Encoding;
use baseline_tune::catalog::ProfileCatalog;
use baseline_tune::engine::{ProfileSelection, TuneRequest};
use baseline_tune::pages::PageEncoder;
use baseline_tune::{generate_tables, TuneGenerator};
use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_generation(c: &mut Criterion) {
    let catalog = ProfileCatalog::shared();
    let request = TuneRequest::from_combo("Ford_302_X303_34lb", catalog).expect("known combo");
    let profiles = request.profiles();
    let now = Utc.with_ymd_and_hms(2024, 6, 9, 12, 0, 0).unwrap();

    let mut group = c.benchmark_group("tune_generation");
    group.bench_function("generate_tables", |b| {
        b.iter(|| black_box(generate_tables(black_box(&request.engine), &profiles)));
    });

    let tables = generate_tables(&request.engine, &ProfileSelection::new("street", "moderate"));
    group.bench_function("encode_pages", |b| {
        b.iter(|| black_box(PageEncoder::new().encode_tables(black_box(&tables))));
    });

    let generator = TuneGenerator::default();
    group.bench_function("build_text_artifact", |b| {
        b.iter(|| {
            black_box(
                generator
                    .build_artifact_at(black_box(&request), Encoding::Text, now)
                    .expect("text artifact"),
            )
        });
    });
    group.bench_function("build_xml_artifact", |b| {
        b.iter(|| {
            black_box(
                generator
                    .build_artifact_at(black_box(&request), Encoding::XmlPages, now)
                    .expect("xml artifact"),
            )
        });
    });
    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
