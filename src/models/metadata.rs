use std::path::PathBuf;

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ProductKind;

/// Provenance record persisted alongside every product dataset. Created
/// once at finalization and never mutated afterwards; the screening stage
/// uses the product identity to select the screening variant and to
/// verify the rule file matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub product: ProductKind,
    pub created: NaiveDateTime,
    pub sources: Vec<PathBuf>,
}

impl ProductMetadata {
    pub fn new(product: ProductKind, sources: Vec<PathBuf>) -> Self {
        Self {
            product,
            created: Utc::now().naive_utc(),
            sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_captures_sources() {
        let sources = vec![PathBuf::from("a.hdf5"), PathBuf::from("b.hdf5")];
        let meta = ProductMetadata::new(ProductKind::Radiometer, sources.clone());

        assert_eq!(meta.product, ProductKind::Radiometer);
        assert_eq!(meta.sources, sources);
    }
}
