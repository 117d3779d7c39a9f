mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::AtomicAtlasApp;
use eframe::egui;
use state::AppState;

/// Dataset loaded at startup when present; File → Open works either way.
const DEFAULT_DATASET: &str = "data/nuclear_explosions.csv";
/// Optional country → flag URL override mapping.
const FLAG_CONFIG: &str = "data/flags.json";

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::default();
    let flag_path = Path::new(FLAG_CONFIG);
    if flag_path.exists() {
        match config::FlagConfig::from_json_file(flag_path) {
            Ok(flags) => state.flags = flags,
            Err(e) => log::warn!("Ignoring {FLAG_CONFIG}: {e:#}"),
        }
    }
    let default_path = Path::new(DEFAULT_DATASET);
    if default_path.exists() {
        match data::loader::load_file(default_path) {
            Ok(dataset) => {
                log::info!("Loaded {} detonation records from {DEFAULT_DATASET}", dataset.len());
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {DEFAULT_DATASET}: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    } else {
        log::warn!("Default dataset {DEFAULT_DATASET} not found; load one via File → Open");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Atomic Atlas – Nuclear Detonations Explorer",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render png/jpg/etc.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(AtomicAtlasApp::new(state)))
        }),
    )
}
