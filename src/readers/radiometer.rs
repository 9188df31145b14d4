use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use hdf5::types::VarLenAscii;
use hdf5::Group;
use ndarray::{s, Array1, Axis};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{ProcessingError, Result};
use crate::models::{FieldValue, ProductDataset, TimestampedRecord};
use crate::utils::constants::{
    MEASUREMENT_GROUP_KEY, RADIOMETER_EXTENSION, RETRIEVAL_GROUP_KEY, RETRIEVAL_LEVELS,
};
use crate::utils::progress::ProgressReporter;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const TIME_PARTS: [&str; 6] = ["year", "month", "day", "hour", "min", "sec"];

/// Locates ground-based radiometer source files and extracts one
/// measurement/retrieval record per convergent retrieval.
pub struct RadiometerReader {
    root: PathBuf,
}

impl RadiometerReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Recursively enumerate source files under the root and keep those
    /// carrying the retrieval group. A file without the group is not an
    /// error: the retrieval simply never converged.
    pub fn find_retrievals(&self, progress: Option<&ProgressReporter>) -> Result<Vec<PathBuf>> {
        let candidates = source_files(&self.root, RADIOMETER_EXTENSION)?;
        let mut retained = Vec::new();
        let mut skipped = 0usize;

        for path in candidates {
            let file = hdf5::File::open(&path).map_err(|e| ProcessingError::FileRead {
                path: path.clone(),
                source: e,
            })?;

            if file.link_exists(RETRIEVAL_GROUP_KEY) {
                retained.push(path);
            } else {
                skipped += 1;
            }

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        info!(
            retained = retained.len(),
            skipped, "Radiometer source scan complete"
        );
        Ok(retained)
    }

    /// Extract one record per retrieval file, keyed by the midpoint of
    /// the measurement interval.
    pub fn extract_products(
        &self,
        files: &[PathBuf],
        progress: Option<&ProgressReporter>,
    ) -> Result<ProductDataset> {
        let mut dataset = ProductDataset::new();

        for path in files {
            let (timestamp, record) = read_retrieval_file(path)?;
            debug!(path = %path.display(), %timestamp, "Extracted retrieval");
            dataset.insert(timestamp, record);

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        Ok(dataset)
    }
}

/// Recursively enumerate files with the given extension, sorted
/// lexicographically
pub(crate) fn source_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().map(|e| e == extension).unwrap_or(false)
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn read_retrieval_file(path: &Path) -> Result<(NaiveDateTime, TimestampedRecord)> {
    let ctx = |e: hdf5::Error| ProcessingError::FileRead {
        path: path.to_path_buf(),
        source: e,
    };

    let file = hdf5::File::open(path).map_err(ctx)?;
    let measure = file.group(MEASUREMENT_GROUP_KEY).map_err(ctx)?;
    let retrieval = file.group(RETRIEVAL_GROUP_KEY).map_err(ctx)?;

    let timestamp = measurement_midpoint(&measure, path)?;
    let mut record = TimestampedRecord::new();

    for (key, name) in [
        ("opacity", "opacity"),
        ("transmission", "transmission"),
        ("pmeas", "p_grid"),
        ("zmeas", "z_field"),
        ("tmeas", "t_field"),
        ("meastime", "meas_duration"),
    ] {
        record.insert(key, read_field(&measure, name).map_err(ctx)?);
    }

    let y = retrieval.dataset("y").map_err(ctx)?.read_1d::<f64>().map_err(ctx)?;
    let yf = retrieval.dataset("yf").map_err(ctx)?.read_1d::<f64>().map_err(ctx)?;
    let residual = &y - &yf;
    record.insert("y", FieldValue::Vector(y));
    record.insert("yf", FieldValue::Vector(yf));
    record.insert("residual", FieldValue::Vector(residual));
    record.insert("f", read_field(&retrieval, "f_backend").map_err(ctx)?);

    // Averaging kernel truncated to the retrieval grid, and the
    // measurement response as its row sums
    let avk_full = retrieval
        .dataset("avk")
        .map_err(ctx)?
        .read_2d::<f64>()
        .map_err(ctx)?;
    let rows = RETRIEVAL_LEVELS.min(avk_full.nrows());
    let cols = RETRIEVAL_LEVELS.min(avk_full.ncols());
    let avk = avk_full.slice(s![..rows, ..cols]).to_owned();
    record.insert("mr", FieldValue::Vector(avk.sum_axis(Axis(1))));
    record.insert("avk", FieldValue::Matrix(avk));

    record.insert("pgrid", read_field(&retrieval, "p_grid").map_err(ctx)?);

    let z_field = retrieval
        .dataset("z_field")
        .map_err(ctx)?
        .read_dyn::<f64>()
        .map_err(ctx)?
        .into_dimensionality::<ndarray::Ix3>()?;
    record.insert(
        "zgrid",
        FieldValue::Vector(z_field.slice(s![.., 0, 0]).to_owned()),
    );

    for (key, name) in [("eo", "retrieval_eo"), ("ss", "retrieval_ss"), ("x", "x")] {
        let values = retrieval
            .dataset(name)
            .map_err(ctx)?
            .read_1d::<f64>()
            .map_err(ctx)?;
        record.insert(key, FieldValue::Vector(truncate(values, RETRIEVAL_LEVELS)));
    }

    let vmr = retrieval
        .dataset("vmr_field")
        .map_err(ctx)?
        .read_dyn::<f64>()
        .map_err(ctx)?
        .into_dimensionality::<ndarray::Ix4>()?;
    record.insert(
        "apriori",
        FieldValue::Vector(vmr.slice(s![0, .., 0, 0]).to_owned()),
    );

    Ok((timestamp, record))
}

/// Read a named field as scalar, vector or matrix depending on its rank
fn read_field(group: &Group, name: &str) -> hdf5::Result<FieldValue> {
    let dataset = group.dataset(name)?;
    match dataset.ndim() {
        0 => Ok(FieldValue::Scalar(dataset.read_scalar::<f64>()?)),
        1 => Ok(FieldValue::Vector(dataset.read_1d::<f64>()?)),
        2 => Ok(FieldValue::Matrix(dataset.read_2d::<f64>()?)),
        rank => Err(hdf5::Error::from(format!(
            "Unsupported rank {} for dataset '{}'",
            rank, name
        ))),
    }
}

fn truncate(values: Array1<f64>, levels: usize) -> Array1<f64> {
    if values.len() > levels {
        values.slice(s![..levels]).to_owned()
    } else {
        values
    }
}

/// Timestamp in the middle of the measurement interval, parsed from the
/// six decomposed start and end time fields
fn measurement_midpoint(measure: &Group, path: &Path) -> Result<NaiveDateTime> {
    let ctx = |e: hdf5::Error| ProcessingError::FileRead {
        path: path.to_path_buf(),
        source: e,
    };

    let mut stamps = [String::new(), String::new()];
    for (stamp, prefix) in stamps.iter_mut().zip(["start", "end"]) {
        for part in TIME_PARTS {
            let name = format!("{}_{}", prefix, part);
            let value = measure
                .dataset(&name)
                .map_err(ctx)?
                .read_scalar::<VarLenAscii>()
                .map_err(ctx)?;
            stamp.push_str(value.as_str());
        }
    }

    parse_midpoint(&stamps[0], &stamps[1]).map_err(|e| ProcessingError::Timestamp {
        path: path.to_path_buf(),
        message: format!("'{}'..'{}': {}", stamps[0], stamps[1], e),
    })
}

fn parse_midpoint(start: &str, end: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    let start = NaiveDateTime::parse_from_str(start, TIMESTAMP_FORMAT)?;
    let end = NaiveDateTime::parse_from_str(end, TIMESTAMP_FORMAT)?;
    let delta = end - start;
    Ok(start + delta / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_parse_midpoint() {
        let mid = parse_midpoint("20200115060000", "20200115080000").unwrap();
        assert_eq!(
            mid,
            chrono::NaiveDate::from_ymd_opt(2020, 1, 15)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_midpoint_across_midnight() {
        let mid = parse_midpoint("20191231230000", "20200101010000").unwrap();
        assert_eq!(
            mid,
            chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_midpoint_rejects_garbage() {
        assert!(parse_midpoint("not-a-date", "20200101010000").is_err());
    }

    #[test]
    fn test_truncate() {
        let long = Array1::linspace(0.0, 99.0, 100);
        assert_eq!(truncate(long, RETRIEVAL_LEVELS).len(), RETRIEVAL_LEVELS);

        let short = array![1.0, 2.0];
        assert_eq!(truncate(short.clone(), RETRIEVAL_LEVELS), short);
    }
}
