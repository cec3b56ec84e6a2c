use std::sync::Arc;

use eframe::egui::{self, ScrollArea, Ui};

use iris_explorer::data::model::Dataset;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct IrisExplorerApp {
    pub state: AppState,
}

impl IrisExplorerApp {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for IrisExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: summary, preview, chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Iris Data Explorer");
                    ui.label(
                        "Explore the classic Iris flower dataset. Use the filters on the \
                         left to subset the data and pick a chart below.",
                    );
                    ui.separator();

                    panels::summary_section(ui, &self.state);
                    ui.add_space(8.0);
                    panels::data_preview(ui, &self.state);
                    ui.separator();

                    panels::chart_controls(ui, &mut self.state);
                    plot::chart(ui, &self.state.chart);
                });
        });
    }
}
