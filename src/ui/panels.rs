use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::CellValue;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – multiselect filters
// ---------------------------------------------------------------------------

enum FilterAction {
    Toggle(&'static str, CellValue),
    Clear(&'static str),
    ClearAll,
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Choose Your Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut actions = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // Only columns the roster actually has get a widget.
            for spec in state.config.filters {
                if !dataset.has_column(spec.column) {
                    continue;
                }
                let options = dataset.unique_values(spec.column);
                let n_selected = state.selection.get(spec.column).selected().count();
                let header_text = if n_selected == 0 {
                    spec.label.to_string()
                } else {
                    format!("{}  ({n_selected} selected)", spec.label)
                };

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(spec.column)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        if n_selected > 0 && ui.small_button("Clear").clicked() {
                            actions.push(FilterAction::Clear(spec.column));
                        }
                        for value in options {
                            let mut checked = state.selection.is_selected(spec.column, &value);
                            if ui.checkbox(&mut checked, value.to_string()).changed() {
                                actions.push(FilterAction::Toggle(spec.column, value));
                            }
                        }
                    });
            }

            ui.separator();
            if !state.selection.is_unconstrained() && ui.button("Reset all filters").clicked() {
                actions.push(FilterAction::ClearAll);
            }
        });

    for action in actions {
        match action {
            FilterAction::Toggle(column, value) => state.toggle_filter_value(column, &value),
            FilterAction::Clear(column) => state.clear_filter(column),
            FilterAction::ClearAll => state.clear_all_filters(),
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
                "{} characters loaded, {} visible",
                ds.len(),
                state.visible_rows()
            ));
        }

        if let Some(name) = state.source_path.as_ref().and_then(|p| p.file_name()) {
            ui.separator();
            ui.weak(name.to_string_lossy().into_owned());
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
        .set_title("Open character roster")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        // Failures are logged and surfaced through `status_message`.
        if state.load_path(&path).is_ok() {
            log::debug!("Switched roster to {}", path.display());
        }
    }
}
