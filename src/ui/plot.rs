use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{generate_palette, ColorMap};
use crate::handlers::{PieChart, ScatterChart};

/// Arc resolution of the pie: segments per full turn.
const SEGMENTS_PER_TURN: f64 = 120.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Quads approximating one donut slice of a unit-radius pie.
///
/// Angles run clockwise from twelve o'clock; `start` and `sweep` are in
/// radians. Each quad is convex so egui_plot fills it correctly.
pub fn slice_segments(start: f64, sweep: f64, hole: f64) -> Vec<[[f64; 2]; 4]> {
    if sweep <= 0.0 {
        return Vec::new();
    }
    let n = ((sweep / TAU) * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
    let at = |angle: f64, r: f64| {
        let theta = FRAC_PI_2 - angle;
        [r * theta.cos(), r * theta.sin()]
    };
    (0..n)
        .map(|i| {
            let a0 = start + sweep * i as f64 / n as f64;
            let a1 = start + sweep * (i + 1) as f64 / n as f64;
            [at(a0, 1.0), at(a1, 1.0), at(a1, hole), at(a0, hole)]
        })
        .collect()
}

/// Render the success pie chart.
pub fn pie_chart(ui: &mut Ui, pie: &PieChart, height: f32) {
    ui.heading(&pie.title);
    ui.label(format!("{} launches", pie.total()));

    if pie.slices.is_empty() {
        ui.label(RichText::new("No launches match the current selection.").italics());
    }

    let colors = generate_palette(pie.slices.len());

    Plot::new("success_pie")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (slice, &color) in pie.slices.iter().zip(colors.iter()) {
                let sweep = slice.fraction * TAU;
                for quad in slice_segments(start, sweep, pie.hole) {
                    let polygon = Polygon::new(PlotPoints::from(quad.to_vec()))
                        .name(&slice.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, color));
                    plot_ui.polygon(polygon);
                }

                // Percentage label in the middle of the ring.
                let mid = FRAC_PI_2 - (start + sweep / 2.0);
                let r = (1.0 + pie.hole) / 2.0;
                let label = RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                    .color(Color32::WHITE)
                    .strong();
                plot_ui.text(Text::new(PlotPoint::new(r * mid.cos(), r * mid.sin()), label));

                start += sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload mass vs. outcome, one colour per booster version.
pub fn scatter_chart(ui: &mut Ui, chart: &ScatterChart, color_map: Option<&ColorMap>, height: f32) {
    ui.heading(&chart.title);

    if chart.series.is_empty() {
        ui.label(RichText::new("No launches in the selected payload range.").italics());
    }

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let color = color_map
                    .map(|cm| cm.color_for(&series.booster_version))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .name(&series.booster_version)
                    .color(color)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(5.0);

                plot_ui.points(points);
            }
        });
}
