pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{haversine_distance, is_valid_geolocation};
pub use filename::{dataset_filename, metadata_filename, satellite_product_name};
pub use progress::ProgressReporter;
