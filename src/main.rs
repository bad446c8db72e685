mod app;
mod color;
mod config;
mod data;
mod error;
mod handlers;
mod state;
mod ui;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use app::LaunchDashApp;
use config::DashboardConfig;
use state::AppState;

fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let mut state = AppState::new(&config);
    let (path, explicit) = config.startup_dataset();
    if explicit || path.exists() {
        // The dashboard cannot render without a valid dataset.
        state
            .load_file(&path)
            .with_context(|| format!("loading dataset {}", path.display()))?;
    } else {
        log::warn!(
            "{} not found; starting without a dataset (File → Open… to load one)",
            path.display()
        );
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
