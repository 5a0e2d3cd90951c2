use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use cord_explorer::stats::PreviewRow;

const HEADERS: [&str; 5] = ["title", "journal", "year", "source_x", "abstract_word_count"];

fn cell(value: Option<&str>) -> &str {
    value.unwrap_or("—")
}

/// Render the first filtered rows as a striped table.
pub fn preview_table(ui: &mut Ui, rows: &[PreviewRow]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .column(Column::initial(360.0).at_least(120.0).clip(true))
        .column(Column::initial(180.0).at_least(80.0).clip(true))
        .column(Column::auto())
        .column(Column::initial(120.0).clip(true))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in HEADERS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(&row.title);
                    });
                    table_row.col(|ui| {
                        ui.label(cell(row.journal.as_deref()));
                    });
                    table_row.col(|ui| {
                        ui.label(row.year.to_string());
                    });
                    table_row.col(|ui| {
                        ui.label(cell(row.source_x.as_deref()));
                    });
                    table_row.col(|ui| {
                        let count = row.abstract_word_count.map(|n| n.to_string());
                        ui.label(cell(count.as_deref()));
                    });
                });
            }
        });
}
