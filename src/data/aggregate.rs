use std::collections::BTreeMap;

use super::model::{LaunchRecord, OutcomeClass};

// ---------------------------------------------------------------------------
// AggregationResult – occurrence count per categorical key
// ---------------------------------------------------------------------------

/// Count of records per distinct key. Only keys actually observed appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for AggregationResult<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord> FromIterator<K> for AggregationResult<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut counts = BTreeMap::new();
        for key in keys {
            *counts.entry(key).or_insert(0) += 1;
        }
        Self { counts }
    }
}

impl<K: Ord> AggregationResult<K> {
    pub fn get<Q>(&self, key: &Q) -> Option<usize>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.get(key).copied()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the size of the aggregated subset.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(k, &n)| (k, n))
    }

    /// Entries ordered by count (largest first), ties broken by key.
    pub fn ranked(&self) -> Vec<(&K, usize)> {
        let mut entries: Vec<(&K, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

// ---------------------------------------------------------------------------
// Aggregations used by the pie chart
// ---------------------------------------------------------------------------

/// Successful launches per site. Sites without a success are absent.
pub fn count_successes_by_site<'a, I>(records: I) -> AggregationResult<String>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|rec| rec.outcome_class.is_success())
        .map(|rec| rec.launch_site.clone())
        .collect()
}

/// Outcome class occurrences for a subset (normally one site's records).
pub fn count_outcomes_for_site<'a, I>(records: I) -> AggregationResult<OutcomeClass>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .map(|rec| rec.outcome_class)
        .collect()
}
