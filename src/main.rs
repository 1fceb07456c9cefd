//! TruckLog Planner - plan truck trips and view HOS daily logs.

mod core;
mod gui;

use crate::core::config::AppSettings;
use gui::TripPlannerApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = AppSettings::load();
    let (width, height) = settings.window_size.unwrap_or((1024.0, 768.0));

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TruckLog Planner",
        options,
        Box::new(|cc| Ok(Box::new(TripPlannerApp::new(cc, settings)))),
    )
}
