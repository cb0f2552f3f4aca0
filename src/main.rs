use eframe::egui;
use laptop_dash::app::LaptopDashApp;
use laptop_dash::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::info!("Starting dashboard with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Laptop Pulse – Market Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(LaptopDashApp::new(cc, config)))),
    )
}
