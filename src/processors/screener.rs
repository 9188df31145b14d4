use chrono::{NaiveDate, NaiveDateTime};
use ndarray::Array1;
use tracing::{info, warn};

use crate::error::{ProcessingError, Result};
use crate::models::{ProductDataset, ScreenRule, StatusScreen};
use crate::utils::constants::{WINTER_END, WINTER_START};

/// Boolean inclusion mask, one entry per timestamp in sorted order
pub type Mask = Vec<bool>;

/// Element-wise conjunction of independent masks of equal length
pub fn combine_masks(masks: &[Mask]) -> Mask {
    let len = masks.first().map(Vec::len).unwrap_or(0);
    debug_assert!(masks.iter().all(|m| m.len() == len));

    (0..len).map(|i| masks.iter().all(|m| m[i])).collect()
}

/// Evaluates the declarative quality screens of a rule against a
/// satellite product dataset. Each criterion produces an independent
/// mask over the sorted timestamp sequence; the final inclusion mask is
/// their conjunction.
pub struct SatelliteScreener<'a> {
    dataset: &'a ProductDataset,
    rule: &'a ScreenRule,
}

impl<'a> SatelliteScreener<'a> {
    pub fn new(dataset: &'a ProductDataset, rule: &'a ScreenRule) -> Self {
        Self { dataset, rule }
    }

    /// Status screen: parity or exact-zero test depending on the rule
    /// mode. NaN placeholder records fail either test.
    pub fn status_mask(&self) -> Result<Mask> {
        let status = self.scalar_field("status")?;
        let mask = match self.rule.status {
            StatusScreen::NotOdd => status.iter().map(|s| s % 2.0 == 0.0).collect(),
            StatusScreen::EqualZero => status.iter().map(|s| *s == 0.0).collect(),
        };
        Ok(mask)
    }

    /// Quality screen: strictly above the rule threshold
    pub fn quality_mask(&self) -> Result<Mask> {
        let quality = self.scalar_field("quality")?;
        Ok(quality.iter().map(|q| *q > self.rule.quality).collect())
    }

    /// Convergence screen: strictly below the rule threshold
    pub fn convergence_mask(&self) -> Result<Mask> {
        let convergence = self.scalar_field("convergence")?;
        Ok(convergence
            .iter()
            .map(|c| *c < self.rule.convergence)
            .collect())
    }

    /// Precision screen over the rule's pressure band. The band is the
    /// index range [first pressure < pmax, first pressure < pmin) on a
    /// monotonically decreasing grid; every precision value inside it
    /// must strictly exceed the threshold. A record whose grid never
    /// drops below either bound is rejected outright.
    pub fn precision_mask(&self) -> Result<Mask> {
        let mut mask = Vec::with_capacity(self.dataset.len());

        for (timestamp, record) in self.dataset.iter() {
            let pressure = record.vector("pressure").ok_or_else(|| {
                ProcessingError::MissingField {
                    name: "pressure".to_string(),
                    timestamp: *timestamp,
                }
            })?;
            let precision = record.vector("precision").ok_or_else(|| {
                ProcessingError::MissingField {
                    name: "precision".to_string(),
                    timestamp: *timestamp,
                }
            })?;

            // Placeholder records carry NaN grids and fall through to
            // rejection below; a real grid out of order is a
            // data-quality precondition violation.
            if pressure.iter().all(|p| p.is_finite()) && !is_strictly_decreasing(pressure) {
                return Err(ProcessingError::PressureGridOrder {
                    timestamp: *timestamp,
                });
            }

            let upper = pressure.iter().position(|&p| p < self.rule.pmax);
            let lower = pressure.iter().position(|&p| p < self.rule.pmin);

            let keep = match (upper, lower) {
                (Some(band_start), Some(band_end)) => precision
                    .iter()
                    .skip(band_start)
                    .take(band_end.saturating_sub(band_start))
                    .all(|&v| v > self.rule.precision),
                _ => false,
            };
            mask.push(keep);
        }

        Ok(mask)
    }

    /// Seasonal screen: all-true unless the winter flag restricts the
    /// selection to the campaign winter window
    pub fn seasonal_mask(&self, winter: bool) -> Mask {
        if !winter {
            return vec![true; self.dataset.len()];
        }

        let (start, end) = winter_window();
        self.dataset
            .iter()
            .map(|(ts, _)| *ts >= start && *ts <= end)
            .collect()
    }

    /// Conjunction of all five screens
    pub fn combined_mask(&self, winter: bool) -> Result<Mask> {
        let masks = [
            self.status_mask()?,
            self.quality_mask()?,
            self.convergence_mask()?,
            self.precision_mask()?,
            self.seasonal_mask(winter),
        ];
        let combined = combine_masks(&masks);

        info!(
            status = retained(&masks[0]),
            quality = retained(&masks[1]),
            convergence = retained(&masks[2]),
            precision = retained(&masks[3]),
            seasonal = retained(&masks[4]),
            combined = retained(&combined),
            total = self.dataset.len(),
            "Screening masks evaluated"
        );
        Ok(combined)
    }

    /// The subset of records passing every screen
    pub fn screen(&self, winter: bool) -> Result<ProductDataset> {
        let mask = self.combined_mask(winter)?;
        self.dataset.filter_by_mask(&mask)
    }

    fn scalar_field(&self, name: &str) -> Result<Vec<f64>> {
        self.dataset
            .iter()
            .map(|(timestamp, record)| {
                record
                    .scalar(name)
                    .ok_or_else(|| ProcessingError::MissingField {
                        name: name.to_string(),
                        timestamp: *timestamp,
                    })
            })
            .collect()
    }
}

/// Ground-based screening criteria are not defined yet: the variant
/// accepts the same inputs as the satellite screener and passes the
/// dataset through unchanged.
pub struct RadiometerScreener<'a> {
    dataset: &'a ProductDataset,
}

impl<'a> RadiometerScreener<'a> {
    pub fn new(dataset: &'a ProductDataset, _rule: &ScreenRule) -> Self {
        Self { dataset }
    }

    pub fn screen(&self) -> ProductDataset {
        warn!("Ground-based screening applies no filter; dataset passes through unchanged");
        self.dataset.clone()
    }
}

fn retained(mask: &[bool]) -> usize {
    mask.iter().filter(|&&keep| keep).count()
}

fn is_strictly_decreasing(values: &Array1<f64>) -> bool {
    values
        .iter()
        .zip(values.iter().skip(1))
        .all(|(a, b)| a > b)
}

fn winter_window() -> (NaiveDateTime, NaiveDateTime) {
    let (sy, sm, sd) = WINTER_START;
    let (ey, em, ed) = WINTER_END;
    let start = NaiveDate::from_ymd_opt(sy, sm, sd)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let end = NaiveDate::from_ymd_opt(ey, em, ed)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (start, end)
}
