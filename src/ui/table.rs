use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::Subset;
use crate::data::model::{SalesRecord, COLUMNS};

/// Collapsible preview of the rows behind the current report.
pub fn rows_table(ui: &mut Ui, subset: &Subset<'_>) {
    let rows = subset.rows();
    egui::CollapsingHeader::new(format!("Filtered rows ({})", rows.len()))
        .id_salt("filtered_rows")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(320.0)
                .columns(Column::auto().at_least(60.0), COLUMNS.len())
                .header(20.0, |mut header| {
                    for name in COLUMNS {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, rows.len(), |mut row| {
                        let record = rows[row.index()];
                        for cell in cells(record) {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });
}

/// Display text for each column of a row, in [`COLUMNS`] order.
fn cells(r: &SalesRecord) -> [String; 9] {
    [
        r.region.clone(),
        r.category.clone(),
        r.sub_category.clone(),
        r.product_name.clone(),
        r.year.to_string(),
        r.month.to_string(),
        format!("{:.2}", r.sales),
        format!("{:.2}", r.profit),
        format!("{:.2}", r.profit_margin),
    ]
}
