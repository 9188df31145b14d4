use crate::utils::constants::{ARTIFACT_EXTENSION, METADATA_MARKER};

/// Filename of a persisted product dataset, e.g. `radiometer.bin`
pub fn dataset_filename(name: &str) -> String {
    format!("{}.{}", name, ARTIFACT_EXTENSION)
}

/// Filename of the metadata artifact paired with a dataset, e.g.
/// `radiometer.meta.bin`. The marker segment is what the screening stage
/// uses to tell the two artifacts of a pair apart.
pub fn metadata_filename(name: &str) -> String {
    format!("{}.{}.{}", name, METADATA_MARKER, ARTIFACT_EXTENSION)
}

/// Product name for a satellite dataset with the screen radius baked in,
/// e.g. `temperature_300km`
pub fn satellite_product_name(tag: &str, radius_km: u32) -> String {
    format!("{}_{}km", tag, radius_km)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_filename() {
        assert_eq!(dataset_filename("radiometer"), "radiometer.bin");
        assert_eq!(dataset_filename("temperature_300km"), "temperature_300km.bin");
    }

    #[test]
    fn test_metadata_filename() {
        let name = metadata_filename("radiometer");
        assert_eq!(name, "radiometer.meta.bin");
        assert!(name.contains("meta"));
    }

    #[test]
    fn test_satellite_product_name() {
        assert_eq!(satellite_product_name("temperature", 300), "temperature_300km");
        assert_eq!(satellite_product_name("o3", 500), "o3_500km");
    }
}
