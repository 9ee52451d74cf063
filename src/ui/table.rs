use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CellValue, Dataset};

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable grid of every row and column of the dataset.
pub fn dataset_table(ui: &mut Ui, dataset: &Dataset) {
    let n_cols = dataset.columns().len();
    if n_cols == 0 {
        ui.label("The dataset has no columns.");
        return;
    }

    egui::ScrollArea::horizontal()
        .id_salt("dataset_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(400.0)
                .column(Column::auto().at_least(40.0))
                .columns(Column::auto().at_least(60.0).resizable(true), n_cols)
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    header.col(|ui: &mut Ui| {
                        ui.strong("#");
                    });
                    for name in dataset.column_names() {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, dataset.len(), |mut row| {
                        let index = row.index();
                        row.col(|ui: &mut Ui| {
                            ui.label(index.to_string());
                        });
                        for cell in dataset.row(index) {
                            row.col(|ui: &mut Ui| {
                                let text = match cell {
                                    CellValue::Null => "None".to_string(),
                                    other => other.to_string(),
                                };
                                ui.label(text);
                            });
                        }
                    });
                });
        });
}
