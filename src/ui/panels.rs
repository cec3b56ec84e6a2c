use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use iris_explorer::data::model::{Feature, Species, COLUMN_NAMES};
use iris_explorer::BinCount;

use crate::state::{AppState, VizKind};
use crate::ui::plot::to_color32;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Species multiselect ----
            ui.strong("Select species");
            for choice in AppState::choice_options() {
                let mut text = RichText::new(choice);
                if let Ok(species) = choice.parse::<Species>() {
                    let c = state.chart_builder().colors().color_for(species);
                    text = text.color(to_color32(c));
                }
                let mut checked = state.is_chosen(choice);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_choice(choice);
                }
            }
            ui.separator();

            // ---- Range filter ----
            ui.strong("Filter by feature");
            let mut feature = state.filter_feature;
            feature_combo(ui, "filter_feature", &mut feature);
            state.set_filter_feature(feature);

            ui.add_space(4.0);
            ui.strong("Value range");
            match state.range_bounds {
                Some(bounds) => {
                    let span = bounds.low()..=bounds.high();
                    let low_changed = ui
                        .add(egui::Slider::new(&mut state.range_low, span.clone()).text("min"))
                        .changed();
                    let high_changed = ui
                        .add(egui::Slider::new(&mut state.range_high, span).text("max"))
                        .changed();
                    if low_changed || high_changed {
                        state.recompute();
                    }
                }
                None => {
                    ui.label("No species selected.");
                }
            }
        });
}

/// Combo box listing the four features.
fn feature_combo(ui: &mut Ui, id: &str, feature: &mut Feature) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(feature.name())
        .show_ui(ui, |ui: &mut Ui| {
            for f in Feature::ALL {
                ui.selectable_value(feature, f, f.name());
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – summary, preview and chart controls
// ---------------------------------------------------------------------------

/// Headline metrics and per-feature statistics.
pub fn summary_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Data Summary");
    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Number of rows", state.summary.row_count);
        ui.separator();
        metric(ui, "Number of columns", state.summary.column_count);
        ui.separator();
        metric(ui, "Unique species", state.summary.species_count);
    });

    ui.add_space(6.0);
    egui::Grid::new("feature_stats")
        .striped(true)
        .num_columns(6)
        .show(ui, |ui: &mut Ui| {
            for header in ["feature", "count", "min", "max", "mean", "std"] {
                ui.strong(header);
            }
            ui.end_row();

            for stats in &state.stats {
                ui.label(stats.feature.name());
                ui.label(stats.count.to_string());
                for value in [stats.min, stats.max, stats.mean, stats.std_dev] {
                    ui.label(value.map(|v| format!("{v:.3}")).unwrap_or_else(|| "–".into()));
                }
                ui.end_row();
            }
        });
}

fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value.to_string()).size(24.0).strong());
    });
}

/// Table of the filtered rows.
pub fn data_preview(ui: &mut Ui, state: &AppState) {
    ui.heading("Data Preview");
    let records = state.dataset.records();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(240.0)
        .columns(Column::auto().at_least(90.0), COLUMN_NAMES.len())
        .header(20.0, |mut header| {
            for name in COLUMN_NAMES {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible_indices.len(), |mut row| {
                let rec = &records[state.visible_indices[row.index()]];
                for v in rec.features {
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{v:.1}"));
                    });
                }
                row.col(|ui: &mut Ui| {
                    ui.label(rec.label.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.species.name());
                });
            });
        });
}

/// Chart kind radio plus the axis / bin selectors for that kind.
pub fn chart_controls(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Visualizations");

    let before = (
        state.viz,
        state.scatter_x,
        state.scatter_y,
        state.histogram_feature,
        state.bin_count,
    );

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Choose visualization type:");
        for kind in [VizKind::Scatter, VizKind::Histogram] {
            ui.radio_value(&mut state.viz, kind, kind.label());
        }
    });

    ui.horizontal(|ui: &mut Ui| match state.viz {
        VizKind::Scatter => {
            ui.label("X-axis");
            feature_combo(ui, "scatter_x", &mut state.scatter_x);
            ui.label("Y-axis");
            feature_combo(ui, "scatter_y", &mut state.scatter_y);
        }
        VizKind::Histogram => {
            ui.label("Feature");
            feature_combo(ui, "histogram_feature", &mut state.histogram_feature);
            ui.add(
                egui::Slider::new(&mut state.bin_count, BinCount::MIN..=BinCount::MAX)
                    .text("Number of bins"),
            );
        }
    });

    let after = (
        state.viz,
        state.scatter_x,
        state.scatter_y,
        state.histogram_feature,
        state.bin_count,
    );
    if before != after {
        state.recompute();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered CSV…").clicked() {
                export_csv_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export chart JSON…").clicked() {
                export_chart_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.dataset.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn export_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered rows")
        .add_filter("CSV", &["csv"])
        .set_file_name("iris_filtered.csv")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_csv(&path) {
            log::error!("Failed to export CSV: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_chart_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart specification")
        .add_filter("JSON", &["json"])
        .set_file_name("iris_chart.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_chart_json(&path) {
            log::error!("Failed to export chart: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
