use anyhow::{anyhow, Context, Result};
use brew_explorer::app::BrewExplorerApp;
use brew_explorer::config::AppConfig;
use brew_explorer::data;
use brew_explorer::state::AppState;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load().context("loading configuration")?;

    // The dashboard cannot do anything without its dataset.
    let dataset = data::loader::load_file(&config.dataset_path).map_err(|e| {
        log::error!("Failed to load dataset: {e}");
        e
    })?;
    let state = AppState::new(dataset, &config);
    log::info!(
        "Loaded {} rows x {} columns from {} ({} categorical, {} numerical)",
        state.dataset.len(),
        state.dataset.columns().len(),
        config.dataset_path.display(),
        state.classification.categorical.len(),
        state.classification.numerical.len(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Starbucks Dataset Exploration",
        options,
        Box::new(|_cc| Ok(Box::new(BrewExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow!("window error: {e}"))
}
