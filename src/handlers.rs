//! Chart handlers.
//!
//! Each handler is a pure function of the current control values and the
//! shared dataset. The UI calls them whenever a control changes; tests call
//! them directly.

use serde::Serialize;

use crate::data::aggregate::{count_outcomes_for_site, count_successes_by_site, AggregationResult};
use crate::data::filter::{filter_records, FilterCriteria, PayloadRange, SiteSelection};
use crate::data::model::{LaunchDataset, LaunchRecord};

/// Inner radius of the pie chart relative to its outer radius.
pub const PIE_HOLE: f64 = 0.3;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the whole pie in `0.0..=1.0`.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    /// Largest slice first. Empty when nothing matched.
    pub slices: Vec<PieSlice>,
    pub hole: f64,
}

impl PieChart {
    fn from_aggregation<K: Ord + ToString>(title: String, counts: &AggregationResult<K>) -> Self {
        let total = counts.total();
        let slices = counts
            .ranked()
            .into_iter()
            .map(|(key, count)| PieSlice {
                label: key.to_string(),
                count,
                fraction: count as f64 / total as f64,
            })
            .collect();
        Self {
            title,
            slices,
            hole: PIE_HOLE,
        }
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

/// Successful launches per site for "ALL", otherwise success vs. failure
/// for the selected site.
pub fn pie_chart(dataset: &LaunchDataset, site: &SiteSelection) -> PieChart {
    match site {
        SiteSelection::All => {
            let counts = count_successes_by_site(dataset.records());
            PieChart::from_aggregation("Success Rate by Launch Site".to_string(), &counts)
        }
        SiteSelection::Site(name) => {
            let subset = filter_records(dataset.records(), &FilterCriteria::for_site(site));
            let counts = count_outcomes_for_site(subset);
            PieChart::from_aggregation(format!("Success vs. Failure for {name}"), &counts)
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Points sharing one booster version (one colour on the chart).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub booster_version: String,
    /// `[payload_mass_kg, class]` pairs in dataset order.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    /// One series per booster version, first-seen order.
    pub series: Vec<ScatterSeries>,
    /// The filtered subset the series were built from.
    pub records: Vec<LaunchRecord>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.records.len()
    }
}

/// Payload vs. outcome for launches inside `payload`, optionally restricted
/// to one site.
pub fn scatter_chart(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    payload: PayloadRange,
) -> ScatterChart {
    let criteria = FilterCriteria::new(payload, site);
    let subset = filter_records(dataset.records(), &criteria);

    let mut series: Vec<ScatterSeries> = Vec::new();
    for rec in &subset {
        let point = [rec.payload_mass_kg, rec.outcome_class.as_f64()];
        match series
            .iter_mut()
            .find(|s| s.booster_version == rec.booster_version)
        {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                booster_version: rec.booster_version.clone(),
                points: vec![point],
            }),
        }
    }

    let title = match site.site() {
        None => "Payload Mass vs. Success Rate for All Sites".to_string(),
        Some(name) => format!("Payload Mass vs. Success Rate for {name}"),
    };
    let columns = dataset.columns();

    ScatterChart {
        title,
        x_label: columns.payload.clone(),
        y_label: columns.class.clone(),
        color_label: columns.booster.clone(),
        series,
        records: subset.into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn pie_for_all_sites_counts_successes() {
        let ds = sample_dataset();
        let pie = pie_chart(&ds, &SiteSelection::All);

        assert_eq!(pie.title, "Success Rate by Launch Site");
        assert_eq!(pie.hole, PIE_HOLE);
        let labels: Vec<(&str, usize)> = pie
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.count))
            .collect();
        assert_eq!(labels, vec![("siteB", 2), ("siteA", 1)]);
        assert!((pie.slices[0].fraction - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(pie.total(), 3);
    }

    #[test]
    fn pie_for_one_site_splits_outcomes() {
        let ds = sample_dataset();
        let pie = pie_chart(&ds, &SiteSelection::Site("siteA".into()));

        assert_eq!(pie.title, "Success vs. Failure for siteA");
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.total(), 2);
        assert!(pie.slices.iter().all(|s| s.fraction == 0.5));

        let site_b = pie_chart(&ds, &SiteSelection::Site("siteB".into()));
        assert_eq!(site_b.slices.len(), 1);
        assert_eq!(site_b.slices[0].label, "1 (success)");
        assert_eq!(site_b.slices[0].count, 2);
        assert_eq!(site_b.slices[0].fraction, 1.0);
    }

    #[test]
    fn pie_for_unknown_site_is_empty() {
        let ds = sample_dataset();
        let pie = pie_chart(&ds, &SiteSelection::Site("nowhere".into()));
        assert!(pie.slices.is_empty());
        assert_eq!(pie.total(), 0);
    }

    #[test]
    fn scatter_filters_range_and_groups_by_booster() {
        let ds = sample_dataset();
        let chart = scatter_chart(&ds, &SiteSelection::All, PayloadRange::new(1000.0, 5000.0));

        assert_eq!(chart.title, "Payload Mass vs. Success Rate for All Sites");
        assert_eq!(chart.x_label, "Payload Mass (kg)");
        assert_eq!(chart.y_label, "class");
        assert_eq!(chart.color_label, "Booster Version");
        assert_eq!(chart.point_count(), 2);
        assert_eq!(
            chart.series,
            vec![
                ScatterSeries {
                    booster_version: "v1".into(),
                    points: vec![[1500.0, 0.0]],
                },
                ScatterSeries {
                    booster_version: "v2".into(),
                    points: vec![[3000.0, 1.0]],
                },
            ]
        );
    }

    #[test]
    fn scatter_for_one_site() {
        let ds = sample_dataset();
        let chart = scatter_chart(
            &ds,
            &SiteSelection::Site("siteB".into()),
            PayloadRange::new(0.0, 10_000.0),
        );

        assert_eq!(chart.title, "Payload Mass vs. Success Rate for siteB");
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points, vec![[3000.0, 1.0], [9000.0, 1.0]]);
    }

    #[test]
    fn scatter_with_inverted_range_is_empty() {
        let ds = sample_dataset();
        let chart = scatter_chart(&ds, &SiteSelection::All, PayloadRange::new(9000.0, 100.0));
        assert!(chart.series.is_empty());
        assert_eq!(chart.point_count(), 0);
    }

    #[test]
    fn all_selection_matches_unfiltered_scatter() {
        let ds = sample_dataset();
        let range = PayloadRange::new(ds.min_payload(), ds.max_payload());
        let chart = scatter_chart(&ds, &SiteSelection::from_control_value("ALL"), range);
        assert_eq!(chart.records, ds.records());
    }
}
