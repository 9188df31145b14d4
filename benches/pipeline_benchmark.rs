use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array1;

use sounding_processor::models::{
    DateRange, FieldValue, ProductDataset, ProductKind, ScreenRule, StatusScreen,
    TimestampedRecord,
};
use sounding_processor::processors::{fill_missing_dates, SatelliteScreener};

// Create test data for benchmarking: one real record every other day
// over the campaign, with realistic per-record profile lengths
fn create_test_dataset(days: usize) -> (ProductDataset, DateRange) {
    let start = NaiveDate::from_ymd_opt(2019, 10, 1).unwrap();
    let end = start + chrono::Duration::days(days as i64 - 1);
    let range = DateRange::from_bounds(start, end).unwrap();

    let mut dataset = ProductDataset::new();
    for (i, date) in range.dates().iter().enumerate().step_by(2) {
        let timestamp = date.and_hms_opt(9, 30, 0).unwrap();

        let mut record = TimestampedRecord::new();
        record.insert(
            "Temperature",
            FieldValue::Vector(Array1::linspace(200.0, 280.0, 55)),
        );
        record.insert("status", FieldValue::Scalar((i % 3) as f64));
        record.insert("quality", FieldValue::Scalar(0.4 + (i % 6) as f64 * 0.1));
        record.insert("convergence", FieldValue::Scalar(1.0));
        record.insert(
            "pressure",
            FieldValue::Vector(Array1::logspace(10.0, 3.0, -1.0, 55)),
        );
        record.insert(
            "precision",
            FieldValue::Vector(Array1::from_elem(55, 2.0)),
        );
        dataset.insert(timestamp, record);
    }

    (dataset, range)
}

fn screen_rule() -> ScreenRule {
    ScreenRule {
        dataset: ProductKind::Temperature,
        status: StatusScreen::NotOdd,
        quality: 0.5,
        convergence: 1.1,
        pmin: 1.0,
        pmax: 500.0,
        precision: 0.0,
        winter: true,
    }
}

fn benchmark_gap_filling(c: &mut Criterion) {
    let (dataset, range) = create_test_dataset(180);

    c.bench_function("gap_filling_180_days", |b| {
        b.iter(|| {
            let filled = fill_missing_dates(dataset.clone(), &range).unwrap();
            black_box(filled.len())
        })
    });
}

fn benchmark_screening_masks(c: &mut Criterion) {
    let (dataset, range) = create_test_dataset(180);
    let dataset = fill_missing_dates(dataset, &range).unwrap();
    let rule = screen_rule();

    c.bench_function("screening_masks_180_days", |b| {
        b.iter(|| {
            let screener = SatelliteScreener::new(&dataset, &rule);
            let mask = screener.combined_mask(true).unwrap();
            black_box(mask.iter().filter(|&&keep| keep).count())
        })
    });
}

fn benchmark_varying_campaign_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("screening_by_campaign_length");

    for &days in &[30, 90, 180, 365] {
        group.bench_with_input(BenchmarkId::new("days", days), &days, |b, &days| {
            let (dataset, range) = create_test_dataset(days);
            let dataset = fill_missing_dates(dataset, &range).unwrap();
            let rule = screen_rule();

            b.iter(|| {
                let screener = SatelliteScreener::new(&dataset, &rule);
                let screened = screener.screen(false).unwrap();
                black_box(screened.len())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_gap_filling,
    benchmark_screening_masks,
    benchmark_varying_campaign_lengths
);
criterion_main!(benches);
