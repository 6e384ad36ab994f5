use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{FilterColumn, FilterValue};
use crate::state::AppState;

use super::format::format_count;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

enum FilterAction {
    SelectAll(FilterColumn),
    SelectNone(FilterColumn),
    Toggle(FilterColumn, FilterValue),
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut actions = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in FilterColumn::ALL {
                let Some(all_values) = dataset.distinct(col) else {
                    continue;
                };

                // Show count of selected / total in the header
                let n_selected = all_values
                    .iter()
                    .filter(|v| state.is_selected(col, v))
                    .count();
                let header_text = format!("{col}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col.source_name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                actions.push(FilterAction::SelectAll(col));
                            }
                            if ui.small_button("None").clicked() {
                                actions.push(FilterAction::SelectNone(col));
                            }
                        });

                        for val in all_values {
                            let mut checked = state.is_selected(col, val);
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                actions.push(FilterAction::Toggle(col, val.clone()));
                            }
                        }
                    });
            }
        });

    // Applying after the widgets keeps `dataset` borrowed only while drawing.
    for action in actions {
        match action {
            FilterAction::SelectAll(col) => state.select_all(col),
            FilterAction::SelectNone(col) => state.select_none(col),
            FilterAction::Toggle(col, val) => state.toggle_filter_value(col, &val),
        }
    }
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                format_count(ds.len()),
                format_count(state.visible_indices.len())
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
