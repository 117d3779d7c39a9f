use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Record table (egui_extras)
// ---------------------------------------------------------------------------

/// Striped, scrollable table of the given record view. Rows render lazily so
/// the full dataset is fine to hand in.
pub fn record_table(ui: &mut Ui, id: &str, dataset: &Dataset, indices: &[usize], height: f32) {
    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().at_least(70.0), dataset.column_names.len())
            .max_scroll_height(height)
            .header(22.0, |mut header| {
                for col in &dataset.column_names {
                    header.col(|ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, indices.len(), |mut row| {
                    let rec = &dataset.records[indices[row.index()]];
                    for col in &dataset.column_names {
                        row.col(|ui| {
                            ui.label(rec.get(col).to_string());
                        });
                    }
                });
            });
    });
}
