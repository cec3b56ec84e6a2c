mod app;
mod state;
mod ui;

use app::IrisExplorerApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Bundled data must be valid before any window is shown.
    let dataset = match iris_explorer::data::loader::load() {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load bundled dataset: {e}");
            eprintln!("iris-explorer: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Iris Data Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(IrisExplorerApp::new(dataset)))),
    )
}
