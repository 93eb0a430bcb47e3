use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredDataset;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 420.0;

/// Render the filtered rows. The first column is the row's index in the
/// loaded file.
pub fn filtered_table(ui: &mut Ui, filtered: &FilteredDataset) {
    let dataset = filtered.dataset();
    let columns = dataset.columns();
    let indices = filtered.indices();

    ScrollArea::horizontal()
        .id_salt("filtered_table_scroll")
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(true)
                .max_scroll_height(MAX_TABLE_HEIGHT)
                .column(Column::auto().at_least(40.0))
                .columns(Column::auto().at_least(60.0).clip(true), columns.len())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                    for name in columns {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, indices.len(), |mut row| {
                        let index = indices[row.index()];
                        row.col(|ui| {
                            ui.weak(index.to_string());
                        });
                        let Some(cells) = dataset.row(index) else {
                            return;
                        };
                        for cell in cells {
                            row.col(|ui| {
                                if cell.is_null() {
                                    ui.weak("None");
                                } else {
                                    ui.label(cell.to_string());
                                }
                            });
                        }
                    });
                });
        });
}
