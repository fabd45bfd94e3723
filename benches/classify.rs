use chrono::NaiveDate;
use county_climate::{analyze, County, Metric, MonthSequence, Observation, PlaceRecord, SeriesKey};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_places(count: u32, years: i32) -> Vec<PlaceRecord> {
    (0..count)
        .map(|place| {
            let key = SeriesKey::new(Metric::tavg(), 1001 + place, 7, 1900, 1900 + years - 1);
            let observations = (0..years)
                .map(|i| Observation {
                    date: NaiveDate::from_ymd_opt(1900 + i, 7, 1).unwrap(),
                    value: 20.0 + (place as f64 * 0.01) * i as f64 + ((i * 7919) % 13) as f64 * 0.1,
                })
                .collect();
            let county = County {
                geoid: 1001 + place,
                name: format!("County {}", place),
                usps: "XX".to_string(),
                latitude: 40.0,
                longitude: -100.0,
            };
            PlaceRecord::new(county, MonthSequence::new(key, observations))
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let places = synthetic_places(3000, 118);
    c.bench_function("analyze_3000_counties", |b| {
        b.iter(|| {
            let mut places = places.clone();
            analyze(black_box(&mut places), 30)
        })
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
