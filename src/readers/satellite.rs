use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::models::{FieldValue, ProductDataset, ProductKind, TimestampedRecord};
use crate::readers::radiometer::source_files;
use crate::utils::constants::{
    SATELLITE_DATA_GROUP, SATELLITE_EPOCH, SATELLITE_EXTENSION, SATELLITE_GEOLOCATION_GROUP,
    SATELLITE_ROOT_GROUP, SATELLITE_SWATHS_GROUP,
};
use crate::utils::coordinates::{haversine_distance, is_valid_geolocation};
use crate::utils::progress::ProgressReporter;

/// Locates satellite limb-sounder swath files and extracts one record
/// per sample that passes the geolocation screen.
pub struct SatelliteReader {
    root: PathBuf,
    swath: &'static str,
    reference: (f64, f64),
    radius_km: f64,
}

impl SatelliteReader {
    pub fn new(root: impl Into<PathBuf>, product: ProductKind, radius_km: f64) -> Result<Self> {
        let swath = product.swath_name().ok_or_else(|| {
            ProcessingError::Config(format!(
                "Product '{}' is not a satellite product",
                product.tag()
            ))
        })?;
        let reference = product
            .reference_coordinate()
            .ok_or_else(|| ProcessingError::Config("Missing reference coordinate".to_string()))?;

        Ok(Self {
            root: root.into(),
            swath,
            reference,
            radius_km,
        })
    }

    /// Recursively enumerate swath files under the root, sorted
    /// lexicographically
    pub fn find_sources(&self) -> Result<Vec<PathBuf>> {
        let files = source_files(&self.root, SATELLITE_EXTENSION)?;
        info!(count = files.len(), root = %self.root.display(), "Satellite source scan complete");
        Ok(files)
    }

    /// Extract accepted samples from every file into one dataset
    pub fn extract_products(
        &self,
        files: &[PathBuf],
        progress: Option<&ProgressReporter>,
    ) -> Result<ProductDataset> {
        let mut dataset = ProductDataset::new();
        let mut rejected = 0usize;

        for path in files {
            self.read_swath_file(path, &mut dataset, &mut rejected)?;

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        info!(
            accepted = dataset.len(),
            rejected, "Satellite extraction complete"
        );
        Ok(dataset)
    }

    fn read_swath_file(
        &self,
        path: &Path,
        dataset: &mut ProductDataset,
        rejected: &mut usize,
    ) -> Result<()> {
        let ctx = |e: hdf5::Error| ProcessingError::FileRead {
            path: path.to_path_buf(),
            source: e,
        };

        let file = hdf5::File::open(path).map_err(ctx)?;
        let swath = file
            .group(SATELLITE_ROOT_GROUP)
            .map_err(ctx)?
            .group(SATELLITE_SWATHS_GROUP)
            .map_err(ctx)?
            .group(self.swath)
            .map_err(ctx)?;
        let data = swath.group(SATELLITE_DATA_GROUP).map_err(ctx)?;
        let geoloc = swath.group(SATELLITE_GEOLOCATION_GROUP).map_err(ctx)?;

        let product = data.dataset(self.swath).map_err(ctx)?.read_2d::<f64>().map_err(ctx)?;
        let convergence = data
            .dataset("Convergence")
            .map_err(ctx)?
            .read_1d::<f64>()
            .map_err(ctx)?;
        let l2_precision = data
            .dataset("L2gpPrecision")
            .map_err(ctx)?
            .read_2d::<f64>()
            .map_err(ctx)?;
        let l2_value = data
            .dataset("L2gpValue")
            .map_err(ctx)?
            .read_2d::<f64>()
            .map_err(ctx)?;
        // The product-specific precision array must be present, but the
        // record's screening precision comes from the L2 rows below.
        data.dataset(&format!("{}Precision", self.swath)).map_err(ctx)?;
        let quality = data
            .dataset("Quality")
            .map_err(ctx)?
            .read_1d::<f64>()
            .map_err(ctx)?;
        let status = data
            .dataset("Status")
            .map_err(ctx)?
            .read_1d::<i32>()
            .map_err(ctx)?;

        let latitude = geoloc
            .dataset("Latitude")
            .map_err(ctx)?
            .read_1d::<f64>()
            .map_err(ctx)?;
        let longitude = geoloc
            .dataset("Longitude")
            .map_err(ctx)?
            .read_1d::<f64>()
            .map_err(ctx)?;
        let pressure = geoloc
            .dataset("Pressure")
            .map_err(ctx)?
            .read_1d::<f64>()
            .map_err(ctx)?;
        let time = geoloc
            .dataset("Time")
            .map_err(ctx)?
            .read_1d::<f64>()
            .map_err(ctx)?;

        let samples = time.len();
        let counts = [
            product.nrows(),
            l2_precision.nrows(),
            l2_value.nrows(),
            convergence.len(),
            quality.len(),
            status.len(),
            latitude.len(),
            longitude.len(),
        ];
        if counts.iter().any(|&n| n != samples) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Inconsistent sample counts in {}",
                path.display()
            )));
        }

        for i in 0..samples {
            if !self.accept_sample(latitude[i], longitude[i]) {
                *rejected += 1;
                continue;
            }

            let timestamp = timestamp_from_epoch_seconds(time[i]);
            let mut record = TimestampedRecord::new();
            record.insert(self.swath, FieldValue::Vector(product.row(i).to_owned()));
            record.insert("convergence", FieldValue::Scalar(convergence[i]));
            record.insert(
                "l2precision",
                FieldValue::Vector(l2_precision.row(i).to_owned()),
            );
            record.insert("l2value", FieldValue::Vector(l2_value.row(i).to_owned()));
            record.insert(
                "precision",
                FieldValue::Vector(l2_precision.row(i).to_owned()),
            );
            record.insert("quality", FieldValue::Scalar(quality[i]));
            record.insert("status", FieldValue::Scalar(status[i] as f64));
            record.insert("lat", FieldValue::Scalar(latitude[i]));
            record.insert("lon", FieldValue::Scalar(longitude[i]));
            record.insert("pressure", FieldValue::Vector(pressure.clone()));
            record.insert("time", FieldValue::Scalar(time[i]));

            dataset.insert(timestamp, record);
        }

        debug!(path = %path.display(), samples, "Swath file read");
        Ok(())
    }

    /// Geolocation screen: physically valid coordinates within the
    /// configured radius of the reference point
    fn accept_sample(&self, latitude: f64, longitude: f64) -> bool {
        if !is_valid_geolocation(latitude, longitude) {
            return false;
        }

        let (ref_lat, ref_lon) = self.reference;
        haversine_distance(ref_lat, ref_lon, latitude, longitude) <= self.radius_km
    }
}

/// Convert a raw time value (seconds since the satellite epoch) to a
/// timestamp, truncated to whole seconds
pub(crate) fn timestamp_from_epoch_seconds(seconds: f64) -> NaiveDateTime {
    let (year, month, day) = SATELLITE_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    epoch + Duration::seconds(seconds as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::{REFERENCE_LATITUDE, REFERENCE_LONGITUDE};

    fn reader(radius_km: f64) -> SatelliteReader {
        SatelliteReader::new("/tmp/mls", ProductKind::Temperature, radius_km).unwrap()
    }

    #[test]
    fn test_rejects_ground_product() {
        assert!(SatelliteReader::new("/tmp/mls", ProductKind::Radiometer, 300.0).is_err());
    }

    #[test]
    fn test_invalid_latitude_always_rejected() {
        // Even an infinite radius never admits malformed geolocation
        let reader = reader(f64::INFINITY);
        assert!(!reader.accept_sample(91.0, 0.0));
        assert!(!reader.accept_sample(-90.01, 20.41));
        assert!(!reader.accept_sample(67.84, 180.5));
    }

    #[test]
    fn test_reference_point_accepted_at_zero_radius() {
        let reader = reader(0.0);
        assert!(reader.accept_sample(REFERENCE_LATITUDE, REFERENCE_LONGITUDE));
    }

    #[test]
    fn test_distant_sample_rejected() {
        let reader = reader(300.0);
        // Stockholm is well over 300 km from the reference point
        assert!(!reader.accept_sample(59.33, 18.07));
        // A nearby sample passes
        assert!(reader.accept_sample(67.9, 20.5));
    }

    #[test]
    fn test_epoch_conversion() {
        let ts = timestamp_from_epoch_seconds(0.0);
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(1993, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );

        // Sub-second parts are truncated, not rounded
        let ts = timestamp_from_epoch_seconds(86400.9);
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(1993, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }
}
