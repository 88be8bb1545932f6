mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::TrashboardApp;
use data::loader;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Trashboard – Municipal Waste Analysis",
        options,
        Box::new(|_cc| {
            let mut app = TrashboardApp::default();

            // Load the default dataset once at startup when present; the
            // result stays immutable for the rest of the process.
            let default = Path::new(loader::DEFAULT_DATASET);
            if default.exists() {
                match loader::load(default) {
                    Ok(dataset) => {
                        log::info!(
                            "startup dataset: {} rows from {}",
                            dataset.len(),
                            default.display()
                        );
                        app.state.set_dataset(dataset);
                    }
                    Err(e) => {
                        log::error!("failed to load {}: {e}", default.display());
                        app.state.status_message = Some(format!("Error: {e}"));
                    }
                }
            }

            Ok(Box::new(app))
        }),
    )
}
