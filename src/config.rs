use std::path::PathBuf;

use clap::{Args, Parser};

/// Dataset loaded when `--data` is not given.
pub const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";

/// Upper bound on labelled tick marks under the payload slider.
pub const MAX_SLIDER_MARKS: usize = 50;

// ---------------------------------------------------------------------------
// Command line / configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Parser)]
#[command(name = "launch-dash")]
#[command(about = "Interactive dashboard for rocket launch outcome records", long_about = None)]
pub struct DashboardConfig {
    /// Dataset to load at startup (.csv, .json, .parquet).
    #[arg(long)]
    pub data: Option<PathBuf>,

    #[command(flatten)]
    pub columns: ColumnNames,

    #[command(flatten)]
    pub slider: SliderConfig,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl DashboardConfig {
    /// Path to load at startup and whether the user asked for it explicitly.
    ///
    /// An explicit path that fails to load is fatal; the default one is
    /// allowed to be absent.
    pub fn startup_dataset(&self) -> (PathBuf, bool) {
        match &self.data {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_DATA_PATH), false),
        }
    }
}

/// Names of the columns the dashboard reads from the source file.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ColumnNames {
    /// Column holding the launch site name.
    #[arg(long = "site-column", default_value = "Launch Site")]
    pub site: String,

    /// Column holding the payload mass in kilograms.
    #[arg(long = "payload-column", default_value = "Payload Mass (kg)")]
    pub payload: String,

    /// Column holding the booster version.
    #[arg(long = "booster-column", default_value = "Booster Version")]
    pub booster: String,

    /// Column holding the 0/1 outcome class.
    #[arg(long = "class-column", default_value = "class")]
    pub class: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            site: "Launch Site".to_string(),
            payload: "Payload Mass (kg)".to_string(),
            booster: "Booster Version".to_string(),
            class: "class".to_string(),
        }
    }
}

/// Bounds and granularity of the payload range slider.
#[derive(Debug, Clone, Copy, PartialEq, Args)]
pub struct SliderConfig {
    #[arg(long = "slider-min", default_value_t = 0.0)]
    pub min: f64,

    #[arg(long = "slider-max", default_value_t = 10_000.0)]
    pub max: f64,

    #[arg(long = "slider-step", default_value_t = 1_000.0, value_parser = parse_positive)]
    pub step: f64,

    /// Distance between labelled tick marks.
    #[arg(long = "slider-marks", default_value_t = 2_000.0, value_parser = parse_positive)]
    pub mark_every: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
            mark_every: 2_000.0,
        }
    }
}

impl SliderConfig {
    /// Slider bounds widened so the dataset's payload extremes stay reachable.
    pub fn bounds_for(&self, min_payload: f64, max_payload: f64) -> (f64, f64) {
        (self.min.min(min_payload), self.max.max(max_payload))
    }

    /// Tick mark positions from `min` to `max` inclusive.
    ///
    /// Spacing is widened when `mark_every` would produce more than
    /// [`MAX_SLIDER_MARKS`] intervals.
    pub fn marks(&self) -> Vec<f64> {
        let span = self.max - self.min;
        if !span.is_finite() || span < 0.0 || self.mark_every.is_nan() || self.mark_every <= 0.0 {
            return Vec::new();
        }
        let every = self.mark_every.max(span / MAX_SLIDER_MARKS as f64);
        let n = ((span / every).floor() as usize).min(MAX_SLIDER_MARKS);
        (0..=n).map(|i| self.min + i as f64 * every).collect()
    }
}

/// Step sizes must be finite and strictly positive.
fn parse_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a positive number, got {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let config = DashboardConfig::parse_from(["launch-dash"]);
        assert_eq!(config.columns, ColumnNames::default());
        assert_eq!(config.slider, SliderConfig::default());
        assert_eq!(config.log_level, "info");
        assert!(config.data.is_none());
    }

    #[test]
    fn column_overrides_are_parsed() {
        let config = DashboardConfig::parse_from([
            "launch-dash",
            "--data",
            "launches.parquet",
            "--site-column",
            "site",
            "--class-column",
            "outcome",
        ]);
        assert_eq!(config.columns.site, "site");
        assert_eq!(config.columns.class, "outcome");
        assert_eq!(config.columns.payload, "Payload Mass (kg)");
        assert_eq!(
            config.startup_dataset(),
            (PathBuf::from("launches.parquet"), true)
        );
    }

    #[test]
    fn default_dataset_is_not_explicit() {
        let config = DashboardConfig::parse_from(["launch-dash"]);
        assert_eq!(
            config.startup_dataset(),
            (PathBuf::from(DEFAULT_DATA_PATH), false)
        );
    }

    #[test]
    fn marks_every_two_thousand_kg() {
        let marks = SliderConfig::default().marks();
        assert_eq!(marks, vec![0.0, 2000.0, 4000.0, 6000.0, 8000.0, 10000.0]);
    }

    #[test]
    fn bounds_widen_to_cover_dataset() {
        let slider = SliderConfig::default();
        assert_eq!(slider.bounds_for(0.0, 9600.0), (0.0, 10_000.0));
        assert_eq!(slider.bounds_for(0.0, 15_600.0), (0.0, 15_600.0));
    }

    #[test]
    fn non_positive_steps_are_rejected() {
        for (flag, value) in [
            ("--slider-marks", "0"),
            ("--slider-marks", "-5"),
            ("--slider-step", "NaN"),
            ("--slider-step", "inf"),
        ] {
            let parsed = DashboardConfig::try_parse_from(["launch-dash", flag, value]);
            assert!(parsed.is_err(), "{flag} {value} should be rejected");
        }
    }

    #[test]
    fn tiny_mark_spacing_is_capped() {
        let slider = SliderConfig {
            mark_every: 0.000_001,
            ..SliderConfig::default()
        };
        let marks = slider.marks();
        assert!(marks.len() <= MAX_SLIDER_MARKS + 1);
        assert_eq!(marks.first(), Some(&0.0));
        assert!(marks.last().copied().unwrap() <= 10_000.0 + 1e-9);

        let parsed = DashboardConfig::parse_from(["launch-dash", "--slider-marks", "0.000001"]);
        assert!(parsed.slider.marks().len() <= MAX_SLIDER_MARKS + 1);
    }

    #[test]
    fn single_point_slider_has_one_mark() {
        let slider = SliderConfig {
            min: 500.0,
            max: 500.0,
            ..SliderConfig::default()
        };
        assert_eq!(slider.marks(), vec![500.0]);
    }
}
