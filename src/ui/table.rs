use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Record;

use super::format::format_usd;

const HEADERS: [&str; 8] = [
    "Year",
    "Seniority",
    "Contract",
    "Company size",
    "Job title",
    "Remote work",
    "Residence",
    "Salary (USD)",
];

fn cells(r: &Record) -> [String; 8] {
    [
        r.year.to_string(),
        r.seniority.clone(),
        r.contract.clone(),
        r.company_size.clone(),
        r.job_title.clone(),
        r.remote_mode.clone(),
        r.residence_iso3.clone(),
        format_usd(r.salary_usd),
    ]
}

/// Scrollable table of the filtered records. Only visible rows are laid out.
pub fn records_table(ui: &mut Ui, records: &[&Record]) {
    if records.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), HEADERS.len())
        .max_scroll_height(360.0)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let record = records[row.index()];
                for text in cells(record) {
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn one_cell_per_header() {
        let r = record(2023, "Senior", "Data Scientist", "Remote", "USA", 150_000.0);
        let row = cells(&r);
        assert_eq!(row.len(), HEADERS.len());
        assert_eq!(row[0], "2023");
        assert_eq!(row[4], "Data Scientist");
        assert_eq!(row[7], "$150,000");
    }
}
