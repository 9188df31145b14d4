use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    REFERENCE_LATITUDE, REFERENCE_LONGITUDE, RETRIEVAL_GROUP_KEY, RETRIEVAL_LEVELS,
};

/// The closed set of products this pipeline knows how to extract and
/// screen. Each variant carries its product-specific constants (swath
/// name, retrieval key, truncation size, reference coordinate) so that
/// components dispatch on the kind instead of comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// Ground-based microwave radiometer ozone retrievals
    Radiometer,
    /// Satellite limb-sounder temperature profiles
    Temperature,
    /// Satellite limb-sounder ozone profiles
    #[serde(rename = "o3", alias = "ozone")]
    Ozone,
}

impl ProductKind {
    /// Tag used in artifact filenames and rule files
    pub fn tag(&self) -> &'static str {
        match self {
            ProductKind::Radiometer => "radiometer",
            ProductKind::Temperature => "temperature",
            ProductKind::Ozone => "o3",
        }
    }

    /// Parse a product tag. Accepts the short aliases the source data
    /// trees use for satellite products ("t" for temperature).
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag.to_lowercase().as_str() {
            "radiometer" => Ok(ProductKind::Radiometer),
            "temperature" | "t" => Ok(ProductKind::Temperature),
            "o3" | "ozone" => Ok(ProductKind::Ozone),
            other => Err(ProcessingError::Config(format!(
                "Unknown product tag: '{}'",
                other
            ))),
        }
    }

    /// Swath group name inside satellite files; None for the
    /// ground-based product.
    pub fn swath_name(&self) -> Option<&'static str> {
        match self {
            ProductKind::Radiometer => None,
            ProductKind::Temperature => Some("Temperature"),
            ProductKind::Ozone => Some("O3"),
        }
    }

    /// Top-level group key marking a convergent ground-based retrieval;
    /// None for satellite products.
    pub fn retrieval_key(&self) -> Option<&'static str> {
        match self {
            ProductKind::Radiometer => Some(RETRIEVAL_GROUP_KEY),
            _ => None,
        }
    }

    /// Number of retrieval grid levels diagnostics are truncated to;
    /// None for satellite products (their level count comes from the
    /// file's pressure grid).
    pub fn retrieval_levels(&self) -> Option<usize> {
        match self {
            ProductKind::Radiometer => Some(RETRIEVAL_LEVELS),
            _ => None,
        }
    }

    /// Reference coordinate for the geolocation distance screen; None
    /// for the ground-based product (its instrument does not move).
    pub fn reference_coordinate(&self) -> Option<(f64, f64)> {
        match self {
            ProductKind::Radiometer => None,
            _ => Some((REFERENCE_LATITUDE, REFERENCE_LONGITUDE)),
        }
    }

    pub fn is_satellite(&self) -> bool {
        !matches!(self, ProductKind::Radiometer)
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
