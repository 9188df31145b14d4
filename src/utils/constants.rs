/// Source file extensions
pub const RADIOMETER_EXTENSION: &str = "hdf5";
pub const SATELLITE_EXTENSION: &str = "he5";

/// Group keys inside ground-based radiometer files
pub const RETRIEVAL_GROUP_KEY: &str = "MIRA2_O3_v_1";
pub const MEASUREMENT_GROUP_KEY: &str = "mira2_data";

/// Retrieval grid levels for the ground-based product. Diagnostic matrices
/// and profile vectors are truncated to this many levels.
pub const RETRIEVAL_LEVELS: usize = 41;

/// Nested group path segments inside satellite limb-sounder files
pub const SATELLITE_ROOT_GROUP: &str = "HDFEOS";
pub const SATELLITE_SWATHS_GROUP: &str = "SWATHS";
pub const SATELLITE_DATA_GROUP: &str = "Data Fields";
pub const SATELLITE_GEOLOCATION_GROUP: &str = "Geolocation Fields";

/// Reference coordinate for the satellite geolocation screen (Kiruna)
pub const REFERENCE_LATITUDE: f64 = 67.84;
pub const REFERENCE_LONGITUDE: f64 = 20.41;

/// Geolocation validity bounds
pub const MIN_VALID_LATITUDE: f64 = -90.0;
pub const MAX_VALID_LATITUDE: f64 = 90.0;
pub const MIN_VALID_LONGITUDE: f64 = -180.0;
pub const MAX_VALID_LONGITUDE: f64 = 180.0;

/// Satellite time epoch: seconds in the `Time` field count from this date
pub const SATELLITE_EPOCH: (i32, u32, u32) = (1993, 1, 1);

/// Campaign winter window (inclusive), used by the seasonal screen
pub const WINTER_START: (i32, u32, u32) = (2019, 10, 1);
pub const WINTER_END: (i32, u32, u32) = (2020, 5, 1);

/// Gap-filled placeholder records are stamped at this time of day
pub const FILL_HOUR: u32 = 12;

/// Artifact file extensions
pub const ARTIFACT_EXTENSION: &str = "bin";
pub const METADATA_MARKER: &str = "meta";
pub const RULE_EXTENSION: &str = "yaml";

/// Artifact name for the reference date range
pub const DATERANGE_ARTIFACT: &str = "daterange";
