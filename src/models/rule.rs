use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::models::{ProductKind, ProductMetadata};

/// Mode of the status screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusScreen {
    /// Keep records whose status value is even
    #[serde(rename = "not_odd")]
    NotOdd,
    /// Keep records whose status value is exactly zero
    #[serde(rename = "equal_zero")]
    EqualZero,
}

/// Declarative per-product screening rule, loaded once per screening
/// invocation from a human-authored YAML file. The pressure band is
/// half-open [pmin, pmax) on a monotonically decreasing grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ScreenRule {
    /// Product identity this rule targets; must match the dataset's
    /// metadata before any mask is computed
    pub dataset: ProductKind,

    pub status: StatusScreen,

    /// Lower bound: quality values must be strictly greater
    pub quality: f64,

    /// Upper bound: convergence values must be strictly smaller
    pub convergence: f64,

    /// Pressure band bounds in hPa
    #[validate(range(min = 0.0))]
    pub pmin: f64,

    #[validate(range(min = 0.0))]
    pub pmax: f64,

    /// Lower bound on precision values inside the pressure band
    pub precision: f64,

    /// Restrict to the campaign winter window
    #[serde(default)]
    pub winter: bool,
}

impl ScreenRule {
    /// Load and validate a rule file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let rule: ScreenRule = serde_yaml::from_reader(file)?;
        rule.validate()?;

        if rule.pmin >= rule.pmax {
            return Err(ProcessingError::Config(format!(
                "Pressure band is empty: pmin {} >= pmax {}",
                rule.pmin, rule.pmax
            )));
        }

        Ok(rule)
    }

    /// Verify the rule targets the dataset it is about to screen
    pub fn verify_product(&self, metadata: &ProductMetadata) -> Result<()> {
        if self.dataset != metadata.product {
            return Err(ProcessingError::ProductMismatch {
                rule: self.dataset.tag().to_string(),
                dataset: metadata.product.tag().to_string(),
            });
        }
        Ok(())
    }
}
