//! Gender Atlas - Gender gaps in education, family and longevity
//!
//! A diverging bar chart of secondary-enrollment gaps by region, a life-path
//! stepper and a rotating world globe.

mod aggregate;
mod charts;
mod config;
mod data;
mod globe;
mod gui;
mod lifepath;
mod view_state;

use anyhow::Result;
use config::AppConfig;
use eframe::egui;
use gui::GenderAtlasApp;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gender_atlas=info")),
        )
        .init();

    let config = AppConfig::load();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Gender Atlas"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Gender Atlas",
        options,
        Box::new(move |cc| Ok(Box::new(GenderAtlasApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the window: {}", e))
}
