use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

const CHART_HEIGHT: f32 = 340.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site dropdown + payload range ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::header(ui);

                    let (Some(pie), Some(scatter)) = (&self.state.pie, &self.state.scatter) else {
                        ui.centered_and_justified(|ui| {
                            ui.heading("Open a launch dataset to begin  (File → Open…)");
                        });
                        return;
                    };

                    plot::pie_chart(ui, pie, CHART_HEIGHT);
                    ui.add_space(12.0);
                    plot::scatter_chart(ui, scatter, self.state.color_map.as_ref(), CHART_HEIGHT);
                    ui.add_space(12.0);

                    egui::CollapsingHeader::new(format!("Launches ({})", scatter.point_count()))
                        .default_open(false)
                        .show(ui, |ui| {
                            panels::records_table(ui, &self.state);
                        });
                });
        });
    }
}
