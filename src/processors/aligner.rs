use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::models::{DateRange, ProductDataset};
use crate::utils::constants::FILL_HOUR;

/// Insert a NaN placeholder record for every reference date the dataset
/// has no record for, so the persisted product keeps a uniform daily
/// cadence. Placeholders are stamped at noon and mirror the field set
/// and per-field shapes of an existing real record; the dataset must
/// therefore contain at least one real record.
pub fn fill_missing_dates(
    mut dataset: ProductDataset,
    range: &DateRange,
) -> Result<ProductDataset> {
    let template = dataset.first_record().cloned().ok_or_else(|| {
        ProcessingError::EmptyDataset(
            "cannot derive placeholder shapes without at least one real record".to_string(),
        )
    })?;

    let present = dataset.dates();
    let mut filled = 0usize;

    for date in range.dates() {
        if !present.contains(date) {
            let timestamp = date.and_hms_opt(FILL_HOUR, 0, 0).unwrap();
            dataset.insert(timestamp, template.nan_like());
            filled += 1;
        }
    }

    debug!(filled, total = dataset.len(), "Gap filling complete");
    Ok(dataset)
}
