use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{ProcessingError, Result};
use crate::models::{DateRange, ProductDataset, ProductMetadata};
use crate::utils::constants::{ARTIFACT_EXTENSION, DATERANGE_ARTIFACT, METADATA_MARKER};
use crate::utils::filename::{dataset_filename, metadata_filename};

/// Persists product artifacts under a single export or output
/// directory. Every artifact is serialized to a temporary file in the
/// target directory and renamed into place, so readers never observe a
/// partially-written file. The dataset of a pair is renamed before its
/// metadata; pair-level atomicity across runs is a documented
/// limitation.
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serialize one value atomically under the given filename
    pub fn write_artifact<T: Serialize>(&self, filename: &str, value: &T) -> Result<PathBuf> {
        let path = self.dir.join(filename);
        let temp = NamedTempFile::new_in(&self.dir)?;

        let mut writer = BufWriter::new(temp.as_file());
        bincode::serialize_into(&mut writer, value)?;
        writer.flush()?;
        drop(writer);

        temp.persist(&path)
            .map_err(|e| ProcessingError::Io(e.error))?;
        Ok(path)
    }

    /// Persist a finalized dataset together with its metadata
    pub fn write_dataset(
        &self,
        name: &str,
        dataset: &ProductDataset,
        metadata: &ProductMetadata,
    ) -> Result<(PathBuf, PathBuf)> {
        let dataset_path = self.write_artifact(&dataset_filename(name), dataset)?;
        let metadata_path = self.write_artifact(&metadata_filename(name), metadata)?;

        info!(
            records = dataset.len(),
            path = %dataset_path.display(),
            "Product dataset persisted"
        );
        Ok((dataset_path, metadata_path))
    }

    /// Persist a screened dataset as a single named artifact
    pub fn write_screened(&self, name: &str, dataset: &ProductDataset) -> Result<PathBuf> {
        let path = self.write_artifact(&dataset_filename(name), dataset)?;
        info!(records = dataset.len(), path = %path.display(), "Screened dataset persisted");
        Ok(path)
    }

    pub fn write_daterange(&self, range: &DateRange) -> Result<PathBuf> {
        self.write_artifact(&dataset_filename(DATERANGE_ARTIFACT), range)
    }

    /// Locate the dataset/metadata artifact pair for a product name,
    /// telling the two apart by the metadata marker in the filename
    pub fn find_product_artifacts(&self, name: &str) -> Result<(PathBuf, PathBuf)> {
        let mut dataset_path = None;
        let mut metadata_path = None;
        let marker = format!(".{}.", METADATA_MARKER);

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let filename = entry.file_name().to_string_lossy().into_owned();
            if !filename.starts_with(name) || !filename.ends_with(ARTIFACT_EXTENSION) {
                continue;
            }

            if filename.contains(&marker) {
                metadata_path = Some(entry.path());
            } else {
                dataset_path = Some(entry.path());
            }
        }

        match (dataset_path, metadata_path) {
            (Some(dataset), Some(metadata)) => Ok((dataset, metadata)),
            _ => Err(ProcessingError::MissingData(format!(
                "No artifact pair named '{}' in {}",
                name,
                self.dir.display()
            ))),
        }
    }
}

/// Deserialize one artifact
pub fn load_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(bincode::deserialize_from(BufReader::new(file))?)
}

pub fn load_dataset(path: &Path) -> Result<ProductDataset> {
    load_artifact(path)
}

pub fn load_metadata(path: &Path) -> Result<ProductMetadata> {
    load_artifact(path)
}

/// Load the reference date range artifact from the export directory
pub fn load_daterange(export_dir: &Path) -> Result<DateRange> {
    let path = export_dir.join(dataset_filename(DATERANGE_ARTIFACT));
    if !path.exists() {
        return Err(ProcessingError::MissingData(format!(
            "Reference date range not found at {}; create it first",
            path.display()
        )));
    }
    load_artifact(&path)
}
