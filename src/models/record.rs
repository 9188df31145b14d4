use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};

/// A single named field of a record: a scalar or an array read from a
/// hierarchical source file. All real records of a product share the same
/// field set and per-field shapes, which is what makes NaN placeholder
/// synthesis well-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Scalar(f64),
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
}

impl FieldValue {
    pub fn shape(&self) -> Vec<usize> {
        match self {
            FieldValue::Scalar(_) => vec![],
            FieldValue::Vector(v) => vec![v.len()],
            FieldValue::Matrix(m) => m.shape().to_vec(),
        }
    }

    /// A NaN-filled value of identical shape
    pub fn nan_like(&self) -> FieldValue {
        match self {
            FieldValue::Scalar(_) => FieldValue::Scalar(f64::NAN),
            FieldValue::Vector(v) => FieldValue::Vector(Array1::from_elem(v.len(), f64::NAN)),
            FieldValue::Matrix(m) => FieldValue::Matrix(Array2::from_elem(m.raw_dim(), f64::NAN)),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FieldValue::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Array1<f64>> {
        match self {
            FieldValue::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Array2<f64>> {
        match self {
            FieldValue::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

/// Field-name to value mapping for one measurement or retrieval record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimestampedRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl TimestampedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(FieldValue::as_scalar)
    }

    pub fn vector(&self, name: &str) -> Option<&Array1<f64>> {
        self.fields.get(name).and_then(FieldValue::as_vector)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A placeholder record mirroring this record's field set and
    /// per-field shapes, filled entirely with NaN
    pub fn nan_like(&self) -> TimestampedRecord {
        let fields = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.nan_like()))
            .collect();
        Self { fields }
    }
}

/// Timestamp-ordered collection of records for one product. Backed by an
/// ordered map, so iteration is always strictly increasing in time and a
/// duplicate timestamp replaces the earlier record (source files are
/// assumed non-overlapping).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDataset {
    records: BTreeMap<NaiveDateTime, TimestampedRecord>,
}

impl ProductDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timestamp: NaiveDateTime, record: TimestampedRecord) {
        self.records.insert(timestamp, record);
    }

    pub fn get(&self, timestamp: &NaiveDateTime) -> Option<&TimestampedRecord> {
        self.records.get(timestamp)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDateTime, &TimestampedRecord)> {
        self.records.iter()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.records.keys().copied().collect()
    }

    /// Calendar dates with at least one record
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.records.keys().map(|ts| ts.date()).collect()
    }

    /// The earliest record, used as the shape template for gap filling
    pub fn first_record(&self) -> Option<&TimestampedRecord> {
        self.records.values().next()
    }

    /// Subset of records whose mask entry is true. The mask is aligned
    /// positionally with the sorted timestamp order.
    pub fn filter_by_mask(&self, mask: &[bool]) -> Result<ProductDataset> {
        if mask.len() != self.records.len() {
            return Err(ProcessingError::Config(format!(
                "Mask length {} does not match dataset length {}",
                mask.len(),
                self.records.len()
            )));
        }

        let records = self
            .records
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|((ts, record), _)| (*ts, record.clone()))
            .collect();

        Ok(Self { records })
    }
}
