use serde::Serialize;

use super::model::LaunchRecord;

/// Control value of the site dropdown meaning "every site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site selection (dropdown value)
// ---------------------------------------------------------------------------

/// Which launch site the dropdown currently points at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Map a raw dropdown value: the `"ALL"` sentinel selects every site,
    /// anything else is an exact site name.
    pub fn from_control_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The site name, or `None` for "every site".
    pub fn site(&self) -> Option<&str> {
        match self {
            SiteSelection::All => None,
            SiteSelection::Site(s) => Some(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Inclusive payload interval. `low > high` is accepted and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// A range every finite payload falls into.
    pub fn unbounded() -> Self {
        Self {
            low: f64::NEG_INFINITY,
            high: f64::INFINITY,
        }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

/// Payload range plus an optional exact-match site constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub payload: PayloadRange,
    /// `None` matches every site.
    pub site: Option<String>,
}

impl FilterCriteria {
    pub fn new(payload: PayloadRange, site: &SiteSelection) -> Self {
        Self {
            payload,
            site: site.site().map(str::to_string),
        }
    }

    /// Criteria restricting only by site.
    pub fn for_site(site: &SiteSelection) -> Self {
        Self::new(PayloadRange::unbounded(), site)
    }

    /// Whether a single record satisfies both predicates. Site comparison is
    /// case-sensitive.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        self.payload.contains(record.payload_mass_kg)
            && self
                .site
                .as_deref()
                .map_or(true, |site| record.launch_site == site)
    }
}

/// Return the records that satisfy `criteria`, in input order.
///
/// The input is only borrowed; an empty result is a valid outcome, not an
/// error.
pub fn filter_records<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|rec| criteria.matches(rec))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn payload_range_is_inclusive() {
        let range = PayloadRange::new(1000.0, 5000.0);
        assert!(range.contains(1000.0));
        assert!(range.contains(5000.0));
        assert!(!range.contains(999.9));
        assert!(!range.contains(5000.1));
    }

    #[test]
    fn filters_by_payload_range_in_order() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::new(PayloadRange::new(1000.0, 5000.0), &SiteSelection::All);
        let subset = filter_records(ds.records(), &criteria);

        let payloads: Vec<f64> = subset.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(payloads, vec![1500.0, 3000.0]);
        assert_eq!(subset[0].launch_site, "siteA");
        assert_eq!(subset[1].launch_site, "siteB");
    }

    #[test]
    fn only_records_within_range_are_kept() {
        let ds = sample_dataset();
        for (lo, hi) in [(0.0, 0.0), (0.0, 10_000.0), (600.0, 2999.0), (3000.0, 9000.0)] {
            let criteria = FilterCriteria::new(PayloadRange::new(lo, hi), &SiteSelection::All);
            let subset = filter_records(ds.records(), &criteria);
            assert!(subset.len() <= ds.len());
            assert!(subset
                .iter()
                .all(|r| lo <= r.payload_mass_kg && r.payload_mass_kg <= hi));
        }
    }

    #[test]
    fn site_filter_is_exact_and_case_sensitive() {
        let ds = sample_dataset();
        let site_b = SiteSelection::Site("siteB".into());
        let subset = filter_records(ds.records(), &FilterCriteria::for_site(&site_b));
        assert_eq!(subset.len(), 2);
        assert!(subset.iter().all(|r| r.launch_site == "siteB"));

        let shouting = SiteSelection::Site("SITEB".into());
        assert!(filter_records(ds.records(), &FilterCriteria::for_site(&shouting)).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::new(
            PayloadRange::new(400.0, 3000.0),
            &SiteSelection::Site("siteA".into()),
        );
        let once = filter_records(ds.records(), &criteria);
        let twice = filter_records(once.iter().copied(), &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn inverted_range_yields_empty_subset() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::new(PayloadRange::new(5000.0, 1000.0), &SiteSelection::All);
        assert!(filter_records(ds.records(), &criteria).is_empty());
    }

    #[test]
    fn all_sentinel_is_no_site_filter() {
        let ds = sample_dataset();
        let all = SiteSelection::from_control_value("ALL");
        assert_eq!(all, SiteSelection::All);

        let range = PayloadRange::new(0.0, 10_000.0);
        let with_all = filter_records(ds.records(), &FilterCriteria::new(range, &all));
        let unfiltered = FilterCriteria {
            payload: range,
            site: None,
        };
        assert_eq!(with_all, filter_records(ds.records(), &unfiltered));
        assert_eq!(with_all.len(), ds.len());
    }

    #[test]
    fn control_value_maps_to_site_name() {
        let sel = SiteSelection::from_control_value("KSC LC-39A");
        assert_eq!(sel.site(), Some("KSC LC-39A"));
        assert_eq!(SiteSelection::All.site(), None);
    }
}
