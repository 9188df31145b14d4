use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Hierarchical file error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("Failed to read {}: {}", .path.display(), .source)]
    FileRead { path: PathBuf, source: hdf5::Error },

    #[error("Artifact serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Screening rule error: {0}")]
    Rule(#[from] serde_yaml::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid timestamp in {}: {}", .path.display(), .message)]
    Timestamp { path: PathBuf, message: String },

    #[error("Screening rule targets product '{rule}' but dataset is '{dataset}'")]
    ProductMismatch { rule: String, dataset: String },

    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    #[error("Pressure grid is not monotonically decreasing at {timestamp}")]
    PressureGridOrder { timestamp: NaiveDateTime },

    #[error("Missing field '{name}' in record at {timestamp}")]
    MissingField {
        name: String,
        timestamp: NaiveDateTime,
    },

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
