use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::config::ColumnNames;
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// OutcomeClass – binary launch outcome
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (0 = failure, 1 = success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OutcomeClass {
    Failure = 0,
    Success = 1,
}

impl OutcomeClass {
    /// Interpret a numeric cell. Only exact 0 and 1 are accepted, so pandas
    /// float columns (`1.0`) load the same as integer ones.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(OutcomeClass::Failure)
        } else if value == 1.0 {
            Some(OutcomeClass::Success)
        } else {
            None
        }
    }

    /// The value as plotted on the scatter chart's y axis.
    pub fn as_f64(self) -> f64 {
        self as u8 as f64
    }

    pub fn is_success(self) -> bool {
        self == OutcomeClass::Success
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeClass::Failure => write!(f, "0 (failure)"),
            OutcomeClass::Success => write!(f, "1 (success)"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Non-negative, may be fractional.
    pub payload_mass_kg: f64,
    pub booster_version: String,
    pub outcome_class: OutcomeClass,
}

impl LaunchRecord {
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        booster_version: impl Into<String>,
        outcome_class: OutcomeClass,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            booster_version: booster_version.into(),
            outcome_class,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with its derived scalars.
///
/// Never mutated after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    columns: ColumnNames,
    min_payload: f64,
    max_payload: f64,
    /// Unique launch sites in first-seen order.
    distinct_sites: Vec<String>,
    /// Unique booster versions in first-seen order.
    distinct_boosters: Vec<String>,
}

impl LaunchDataset {
    /// Compute payload extremes and distinct values from the loaded records.
    pub fn from_records(
        records: Vec<LaunchRecord>,
        columns: ColumnNames,
    ) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;
        for rec in &records {
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
        }

        let distinct_sites = first_seen(records.iter().map(|r| r.launch_site.as_str()));
        let distinct_boosters = first_seen(records.iter().map(|r| r.booster_version.as_str()));

        Ok(Self {
            records,
            columns,
            min_payload,
            max_payload,
            distinct_sites,
            distinct_boosters,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Column names the dataset was loaded with (used for axis labels).
    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    pub fn distinct_sites(&self) -> &[String] {
        &self.distinct_sites
    }

    pub fn distinct_boosters(&self) -> &[String] {
        &self.distinct_boosters
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
