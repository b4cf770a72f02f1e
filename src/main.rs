#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use static_timeline::app::TimelineApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 420.0])
            .with_min_inner_size([600.0, 300.0])
            .with_title("Static Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Static Timeline",
        options,
        Box::new(|cc| Ok(Box::new(TimelineApp::new(cc)))),
    )
}
