use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};

/// The full campaign calendar: the ordered sequence of dates that must
/// each have exactly one record after gap filling. Externally supplied to
/// the aligner as a read-only artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    dates: Vec<NaiveDate>,
}

impl DateRange {
    /// Build the inclusive daily range [start, end]
    pub fn from_bounds(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ProcessingError::Config(format!(
                "Date range end {} precedes start {}",
                end, start
            )));
        }

        let mut dates = Vec::new();
        let mut current = start;
        while current <= end {
            dates.push(current);
            current = current
                .checked_add_days(Days::new(1))
                .ok_or_else(|| ProcessingError::Config("Date range overflow".to_string()))?;
        }

        Ok(Self { dates })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_bounds() {
        let start = NaiveDate::from_ymd_opt(2019, 12, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();

        let range = DateRange::from_bounds(start, end).unwrap();
        assert_eq!(range.len(), 4);
        assert_eq!(range.dates()[0], start);
        assert_eq!(range.dates()[3], end);
    }

    #[test]
    fn test_single_day() {
        let day = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        let range = DateRange::from_bounds(day, day).unwrap();
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_reversed_bounds_rejected() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(DateRange::from_bounds(start, end).is_err());
    }
}
