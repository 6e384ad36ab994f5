mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::SalaryDashboardApp;
use config::{CommandLine, DashboardConfig};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = CommandLine::parse_args();
    let mut state = AppState::new(DashboardConfig::from(&cli));

    // The dashboard is useless without its data, so a bad file stops here.
    let dataset = data::loader::load_file(&cli.data_path)
        .inspect_err(|e| log::error!("Failed to load dataset: {e:#}"))
        .context("startup dataset")?;
    state.set_dataset(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Dashboard – Data Industry",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
