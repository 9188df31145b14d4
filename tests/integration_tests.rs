use chrono::NaiveDate;
use ndarray::array;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use sounding_processor::models::{
    DateRange, FieldValue, ProductDataset, ProductKind, ProductMetadata, ScreenRule,
    TimestampedRecord,
};
use sounding_processor::processors::{fill_missing_dates, SatelliteScreener};
use sounding_processor::writers::artifact::{load_dataset, load_daterange, load_metadata};
use sounding_processor::writers::ArtifactWriter;

fn satellite_record(status: f64, quality: f64) -> TimestampedRecord {
    let mut record = TimestampedRecord::new();
    record.insert("Temperature", FieldValue::Vector(array![210.0, 220.0, 230.0, 240.0]));
    record.insert("status", FieldValue::Scalar(status));
    record.insert("quality", FieldValue::Scalar(quality));
    record.insert("convergence", FieldValue::Scalar(1.0));
    record.insert("pressure", FieldValue::Vector(array![1000.0, 500.0, 100.0, 10.0]));
    record.insert("precision", FieldValue::Vector(array![5.0, 5.0, 5.0, 5.0]));
    record.insert("lat", FieldValue::Scalar(67.9));
    record.insert("lon", FieldValue::Scalar(20.5));
    record
}

fn timestamp(day: u32, hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn campaign_range() -> DateRange {
    DateRange::from_bounds(
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2020, 1, 7).unwrap(),
    )
    .unwrap()
}

const RULE_YAML: &str = "\
dataset: temperature
status: not_odd
quality: 0.5
convergence: 1.1
pmin: 50.0
pmax: 600.0
precision: 1.0
";

#[test]
fn test_artifact_round_trip_through_export_directory() {
    let export = TempDir::new().expect("Failed to create temp directory");
    let writer = ArtifactWriter::new(export.path());

    let mut dataset = ProductDataset::new();
    dataset.insert(timestamp(1, 9), satellite_record(0.0, 0.9));
    dataset.insert(timestamp(3, 14), satellite_record(2.0, 0.8));

    let metadata = ProductMetadata::new(ProductKind::Temperature, vec!["swath-001.he5".into()]);
    writer
        .write_dataset("temperature_300km", &dataset, &metadata)
        .unwrap();

    let (dataset_path, metadata_path) = writer.find_product_artifacts("temperature_300km").unwrap();
    let reloaded = load_dataset(&dataset_path).unwrap();
    let reloaded_meta = load_metadata(&metadata_path).unwrap();

    assert_eq!(reloaded, dataset);
    assert_eq!(reloaded_meta.product, ProductKind::Temperature);
    assert_eq!(reloaded_meta.sources, metadata.sources);
}

#[test]
fn test_screening_pipeline_end_to_end() {
    let export = TempDir::new().unwrap();
    let data_dir = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    // Intermediate artifact: two good records, one odd status, aligned
    // over the campaign range
    let mut dataset = ProductDataset::new();
    dataset.insert(timestamp(1, 9), satellite_record(0.0, 0.9));
    dataset.insert(timestamp(2, 10), satellite_record(1.0, 0.9));
    dataset.insert(timestamp(4, 11), satellite_record(0.0, 0.8));

    let range = campaign_range();
    let export_writer = ArtifactWriter::new(export.path());
    export_writer.write_daterange(&range).unwrap();

    let aligned = fill_missing_dates(dataset, &range).unwrap();
    assert_eq!(aligned.len(), 7);

    let metadata = ProductMetadata::new(ProductKind::Temperature, vec![]);
    export_writer
        .write_dataset("temperature_300km", &aligned, &metadata)
        .unwrap();

    // Screening invocation: reload artifacts, apply rule, re-align,
    // persist the final artifact
    let rule_path = data_dir.path().join("temperature.yaml");
    std::fs::write(&rule_path, RULE_YAML).unwrap();
    let rule = ScreenRule::load(&rule_path).unwrap();

    let (dataset_path, metadata_path) = export_writer
        .find_product_artifacts("temperature_300km")
        .unwrap();
    let data = load_dataset(&dataset_path).unwrap();
    let meta = load_metadata(&metadata_path).unwrap();
    rule.verify_product(&meta).unwrap();

    let screener = SatelliteScreener::new(&data, &rule);
    let retained = screener.screen(false).unwrap();
    // Odd status and all NaN placeholders screened out
    assert_eq!(retained.len(), 2);

    let reference = load_daterange(export.path()).unwrap();
    let filled = fill_missing_dates(retained, &reference).unwrap();
    assert_eq!(filled.len(), 7);

    let output_writer = ArtifactWriter::new(output.path());
    let final_path = output_writer.write_screened("polar_winter", &filled).unwrap();

    let final_dataset = load_dataset(&final_path).unwrap();
    assert_eq!(final_dataset.len(), 7);
    assert_eq!(
        final_dataset
            .get(&timestamp(1, 9))
            .unwrap()
            .scalar("status"),
        Some(0.0)
    );
    // The screened-out day is back as a NaN placeholder
    assert!(final_dataset
        .get(&timestamp(2, 12))
        .unwrap()
        .scalar("status")
        .unwrap()
        .is_nan());
}

#[test]
fn test_rule_product_mismatch_is_fatal() {
    let data_dir = TempDir::new().unwrap();
    let rule_path = data_dir.path().join("temperature.yaml");
    std::fs::write(&rule_path, RULE_YAML).unwrap();
    let rule = ScreenRule::load(&rule_path).unwrap();

    let metadata = ProductMetadata::new(ProductKind::Ozone, vec![]);
    assert!(rule.verify_product(&metadata).is_err());
}
