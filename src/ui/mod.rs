//! egui rendering of the dashboard: controls, charts and the record table.

pub mod panels;
pub mod plot;
