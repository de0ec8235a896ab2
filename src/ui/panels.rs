use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::FilterKind;
use crate::state::{AppState, FilterEvent};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // Interactions are collected first and applied once the widgets are drawn.
    let mut events = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            multi_select(
                ui,
                "Select Year",
                FilterKind::Year,
                &dataset.years,
                &state.selection.years,
                FilterEvent::ToggleYear,
                &mut events,
            );
            multi_select(
                ui,
                "Select Weather",
                FilterKind::Weather,
                &dataset.weathers,
                &state.selection.weathers,
                FilterEvent::ToggleWeather,
                &mut events,
            );
            multi_select(
                ui,
                "Select Season",
                FilterKind::Season,
                &dataset.seasons,
                &state.selection.seasons,
                FilterEvent::ToggleSeason,
                &mut events,
            );

            ui.separator();
            ui.checkbox(&mut state.show_raw, "Show DataFrame");
        });

    for event in events {
        log::debug!("Filter event: {event:?}");
        state.handle(event);
    }
}

/// A collapsible checkbox list with All / None buttons.
fn multi_select<T: Copy + Ord + ToString>(
    ui: &mut Ui,
    title: &str,
    kind: FilterKind,
    options: &BTreeSet<T>,
    selected: &BTreeSet<T>,
    toggle: fn(T) -> FilterEvent,
    events: &mut Vec<FilterEvent>,
) {
    // Show count of selected / total in the header
    let header_text = format!("{title}  ({}/{})", selected.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    events.push(FilterEvent::SelectAll(kind));
                }
                if ui.small_button("None").clicked() {
                    events.push(FilterEvent::SelectNone(kind));
                }
            });

            for &value in options {
                let mut checked = selected.contains(&value);
                if ui.checkbox(&mut checked, value.to_string()).changed() {
                    events.push(toggle(value));
                }
            }
        });
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
            let source = state
                .data_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{source}: {} rows loaded, {} visible",
                ds.len(),
                state.view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – dashboard body
// ---------------------------------------------------------------------------

/// Title, optional raw table, the seven chart sections and the footer.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Bike Rentals Dashboard").size(28.0));
            ui.add_space(8.0);

            if state.dataset.is_none() {
                ui.label("Open a file to view rentals  (File → Open…)");
                return;
            }

            if state.show_raw {
                ui.heading("Filtered Data");
                table::raw_table(ui, &state.view);
                ui.add_space(12.0);
            }

            for (i, section) in state.sections.iter().enumerate() {
                ui.heading(section.heading);
                plot::show_chart(
                    ui,
                    &format!("chart_{i}"),
                    &section.chart,
                    state.config.chart_height,
                    &state.colors,
                );
                ui.add_space(16.0);
            }

            ui.separator();
            ui.label(RichText::new(&state.config.footer).small().weak());
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open daily rental data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
