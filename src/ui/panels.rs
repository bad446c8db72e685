use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::PayloadRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(40.0)
                .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
    });
    ui.add_space(8.0);
}

// ---------------------------------------------------------------------------
// Left side panel – site dropdown and payload range
// ---------------------------------------------------------------------------

/// Render the control panel. Changes are forwarded to the state, which
/// recomputes only the charts depending on the changed control.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Launch site dropdown (searchable) ----
    ui.strong("Launch Site");
    let options = state.site_options();
    let current = state.site.clone();
    let selected_text = state.site_label().to_string();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_search)
                    .hint_text("Select a Launch Site here"),
            );
            ui.separator();
            for (label, site) in options {
                if ui.selectable_label(current == site, label).clicked() {
                    state.select_site(site);
                }
            }
        });
    ui.add_space(12.0);

    // ---- Payload range ----
    // Unclamped so the initial [min, max] of the dataset is not snapped to
    // the step before anyone touches a slider.
    ui.strong("Payload range (Kg):");
    let (min, max) = state.slider_bounds();
    let step = state.slider.step;
    let mut low = state.payload.low;
    let mut high = state.payload.high;
    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, min..=max)
                .clamping(egui::SliderClamping::Never)
                .step_by(step)
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, min..=max)
                .clamping(egui::SliderClamping::Never)
                .step_by(step)
                .text("to"),
        )
        .changed();
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for mark in state.slider.marks() {
            ui.small(format!("{mark:.0}"));
        }
    });
    if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }

    if state.payload.low > state.payload.high {
        ui.label(RichText::new("Lower bound exceeds upper bound: nothing matches.").italics());
    }
}

// ---------------------------------------------------------------------------
// Record table
// ---------------------------------------------------------------------------

/// List the records behind the scatter chart.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let Some(chart) = &state.scatter else {
        return;
    };
    let Some(ds) = &state.dataset else {
        return;
    };
    let columns = ds.columns();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in [&columns.site, &columns.payload, &columns.booster, &columns.class] {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, chart.records.len(), |mut row| {
                let rec = &chart.records[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.launch_site);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.booster_version);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.outcome_class.to_string());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.pie.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export charts (JSON)…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let shown = state.scatter.as_ref().map_or(0, |s| s.point_count());
            ui.label(format!("{} launches loaded, {} in range", ds.len(), shown));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_file(&path) {
            log::error!("Failed to load {}: {e}", path.display());
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .add_filter("JSON", &["json"])
        .set_file_name("launch_charts.json")
        .save_file();

    if let Some(path) = file {
        state.save_charts(&path);
    }
}
