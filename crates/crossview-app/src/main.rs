#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod controls;
mod dialogs;

const WINDOW_TITLE: &str = "Crossview";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([900.0, 600.0])
            .with_resizable(true),
        ..Default::default()
    };

    let res = eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(|_cc| Ok(Box::new(app::CrossviewApp::default()))),
    );
    if let Err(ref e) = res {
        tracing::error!("eframe::run_native failed: {e}");
    }
    res
}
