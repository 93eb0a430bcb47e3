mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::ExplorerApp;
use config::ExplorerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ExplorerConfig::from_args(std::env::args().skip(1));
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Middle-Earth Character Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(config)))),
    )
}
