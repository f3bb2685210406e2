mod app;
mod color;
mod data;
mod error;
mod settings;
mod state;
mod ui;

use app::{SpectralRibbonApp, WINDOW_POSITION, WINDOW_SIZE, WINDOW_TITLE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_position(WINDOW_POSITION)
            .with_resizable(false),
        ..Default::default()
    };

    log::info!("Starting {WINDOW_TITLE}");
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(SpectralRibbonApp::default()))),
    )
}
