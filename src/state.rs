use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use crate::color::ColorMap;
use crate::config::{ColumnNames, DashboardConfig, SliderConfig};
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::loader::load_dataset;
use crate::data::model::LaunchDataset;
use crate::error::DatasetError;
use crate::handlers::{pie_chart, scatter_chart, PieChart, ScatterChart};

/// Dropdown label of the "every site" entry.
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded). Never mutated once set;
    /// a new file replaces it wholesale.
    pub dataset: Option<Arc<LaunchDataset>>,

    /// File the dataset came from.
    pub source_path: Option<PathBuf>,

    /// Column names used when loading files.
    pub columns: ColumnNames,

    pub slider: SliderConfig,

    /// Current dropdown value.
    pub site: SiteSelection,

    /// Current payload slider value.
    pub payload: PayloadRange,

    /// Text typed into the dropdown's search box.
    pub site_search: String,

    /// Output of the pie handler for the current controls (cached).
    pub pie: Option<PieChart>,

    /// Output of the scatter handler for the current controls (cached).
    pub scatter: Option<ScatterChart>,

    /// Booster version colours for the scatter chart.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            source_path: None,
            columns: config.columns.clone(),
            slider: config.slider,
            site: SiteSelection::All,
            payload: PayloadRange::new(config.slider.min, config.slider.max),
            site_search: String::new(),
            pie: None,
            scatter: None,
            color_map: None,
            status_message: None,
        }
    }

    /// Load a file with the configured column names and make it current.
    /// On failure the previous dataset stays in place.
    pub fn load_file(&mut self, path: &Path) -> Result<(), DatasetError> {
        let dataset = load_dataset(path, &self.columns)?;
        log::info!(
            "Loaded {} launches from {} ({} sites, payload {}..={} kg)",
            dataset.len(),
            path.display(),
            dataset.distinct_sites().len(),
            dataset.min_payload(),
            dataset.max_payload()
        );
        self.set_dataset(dataset, path.to_path_buf());
        Ok(())
    }

    /// Ingest a newly loaded dataset and reset the controls to their defaults:
    /// every site, payload range spanning the dataset.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, source: PathBuf) {
        self.site = SiteSelection::All;
        self.site_search.clear();
        self.payload = PayloadRange::new(dataset.min_payload(), dataset.max_payload());
        self.color_map = Some(ColorMap::new(dataset.distinct_boosters()));

        self.dataset = Some(Arc::new(dataset));
        self.source_path = Some(source);
        self.status_message = None;

        self.refresh_pie();
        self.refresh_scatter();
    }

    /// Dropdown changed: both charts depend on the site.
    pub fn select_site(&mut self, site: SiteSelection) {
        if self.site == site {
            return;
        }
        self.site = site;
        self.refresh_pie();
        self.refresh_scatter();
    }

    /// Slider changed: only the scatter chart depends on the payload range.
    pub fn set_payload_range(&mut self, payload: PayloadRange) {
        if self.payload == payload {
            return;
        }
        self.payload = payload;
        self.refresh_scatter();
    }

    fn refresh_pie(&mut self) {
        self.pie = self.dataset.as_deref().map(|ds| {
            let pie = pie_chart(ds, &self.site);
            log::debug!("pie recomputed for {:?}: {} slices", self.site, pie.slices.len());
            pie
        });
    }

    fn refresh_scatter(&mut self) {
        self.scatter = self.dataset.as_deref().map(|ds| {
            let chart = scatter_chart(ds, &self.site, self.payload);
            log::debug!(
                "scatter recomputed for {:?} in {:?}: {} points",
                self.site,
                self.payload,
                chart.point_count()
            );
            chart
        });
    }

    /// Slider bounds for the current dataset.
    pub fn slider_bounds(&self) -> (f64, f64) {
        match &self.dataset {
            Some(ds) => self.slider.bounds_for(ds.min_payload(), ds.max_payload()),
            None => (self.slider.min, self.slider.max),
        }
    }

    /// Dropdown entries matching the search text (case-insensitive), the
    /// "All Sites" entry first.
    pub fn site_options(&self) -> Vec<(String, SiteSelection)> {
        let mut options = vec![(ALL_SITES_LABEL.to_string(), SiteSelection::All)];
        let Some(ds) = &self.dataset else {
            return options;
        };
        let needle = self.site_search.to_lowercase();
        options.extend(
            ds.distinct_sites()
                .iter()
                .filter(|site| site.to_lowercase().contains(&needle))
                .map(|site| (site.clone(), SiteSelection::Site(site.clone()))),
        );
        options
    }

    /// Label shown on the closed dropdown.
    pub fn site_label(&self) -> &str {
        self.site.site().unwrap_or(ALL_SITES_LABEL)
    }

    /// Write the current control values and chart data as pretty JSON.
    pub fn export_charts(&self, path: &Path) -> anyhow::Result<()> {
        let export = ChartExport {
            source: self.source_path.as_deref(),
            site: &self.site,
            payload: self.payload,
            pie: self.pie.as_ref(),
            scatter: self.scatter.as_ref(),
        };
        let json = serde_json::to_string_pretty(&export).context("serializing chart data")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported chart data to {}", path.display());
        Ok(())
    }

    /// Export from the UI: a failure goes to the status line, a success
    /// clears any earlier error.
    pub fn save_charts(&mut self, path: &Path) {
        match self.export_charts(path) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[derive(Serialize)]
struct ChartExport<'a> {
    source: Option<&'a Path>,
    site: &'a SiteSelection,
    payload: PayloadRange,
    pie: Option<&'a PieChart>,
    scatter: Option<&'a ScatterChart>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::data::model::tests::sample_dataset;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(&DashboardConfig::parse_from(["launch-dash"]));
        state.set_dataset(sample_dataset(), PathBuf::from("fixture.csv"));
        state
    }

    #[test]
    fn empty_state_has_no_charts() {
        let state = AppState::new(&DashboardConfig::parse_from(["launch-dash"]));
        assert!(state.pie.is_none());
        assert!(state.scatter.is_none());
        assert_eq!(state.site_options().len(), 1);
        assert_eq!(state.slider_bounds(), (0.0, 10_000.0));
    }

    #[test]
    fn new_dataset_resets_controls() {
        let state = loaded_state();
        assert_eq!(state.site, SiteSelection::All);
        assert_eq!(state.payload, PayloadRange::new(500.0, 9000.0));
        assert_eq!(state.site_label(), ALL_SITES_LABEL);

        let pie = state.pie.as_ref().unwrap();
        assert_eq!(pie.title, "Success Rate by Launch Site");
        assert_eq!(state.scatter.as_ref().unwrap().point_count(), 4);
    }

    #[test]
    fn site_change_recomputes_both_charts() {
        let mut state = loaded_state();
        state.select_site(SiteSelection::Site("siteB".into()));

        assert_eq!(state.pie.as_ref().unwrap().title, "Success vs. Failure for siteB");
        let scatter = state.scatter.as_ref().unwrap();
        assert_eq!(scatter.title, "Payload Mass vs. Success Rate for siteB");
        assert_eq!(scatter.point_count(), 2);
    }

    #[test]
    fn payload_change_recomputes_scatter_only() {
        let mut state = loaded_state();
        let pie_before = state.pie.clone();

        state.set_payload_range(PayloadRange::new(1000.0, 5000.0));
        assert_eq!(state.scatter.as_ref().unwrap().point_count(), 2);
        assert_eq!(state.pie, pie_before);
    }

    #[test]
    fn site_search_filters_options() {
        let mut state = loaded_state();
        assert_eq!(state.site_options().len(), 3);

        state.site_search = "SITEB".into();
        let options = state.site_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].1, SiteSelection::All);
        assert_eq!(options[1].1, SiteSelection::Site("siteB".into()));
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = loaded_state();
        let err = state.load_file(Path::new("does-not-exist.csv"));
        assert!(err.is_err());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 4);
    }

    #[test]
    fn export_writes_current_charts() {
        let mut state = loaded_state();
        state.select_site(SiteSelection::Site("siteA".into()));

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("charts.json");
        state.export_charts(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["site"]["Site"], "siteA");
        assert_eq!(json["pie"]["title"], "Success vs. Failure for siteA");
        assert_eq!(json["scatter"]["records"].as_array().unwrap().len(), 2);
        assert_eq!(json["source"], "fixture.csv");
    }

    #[test]
    fn successful_save_clears_earlier_error() {
        let mut state = loaded_state();
        let dir = tempfile::TempDir::new().unwrap();

        state.save_charts(&dir.path().join("missing-dir").join("charts.json"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));

        state.save_charts(&dir.path().join("charts.json"));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn successful_load_clears_earlier_error() {
        let mut state = loaded_state();
        state.status_message = Some("Error: previous failure".into());

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("launches.csv");
        std::fs::write(
            &path,
            "Launch Site,Payload Mass (kg),Booster Version,class\nKSC LC-39A,2490,F9 FT B1031.1,1\n",
        )
        .unwrap();

        state.load_file(&path).unwrap();
        assert!(state.status_message.is_none());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 1);
    }
}
