use drum_metronome::config::{ConfigError, MetronomeSettings};
use drum_metronome::ui::app::MetronomeApp;
use drum_metronome::{session, trace};
use std::path::PathBuf;
use std::process::ExitCode;

const WINDOW_WIDTH: f32 = 800.0;

fn main() -> ExitCode {
    trace::setup();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Decode and classify before any window exists
    let player = match session::load(&settings) {
        Ok(player) => player,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, settings.display.window_height])
            .with_title("Drum Metronome"),
        ..Default::default()
    };

    let display = settings.display.clone();
    let result = eframe::run_native(
        "Drum Metronome",
        native_options,
        Box::new(move |_cc| Ok(Box::new(MetronomeApp::new(player, &display)))),
    );

    if let Err(e) = result {
        log::error!("UI error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// First CLI argument, then the per-user settings file, then defaults
fn load_settings() -> Result<MetronomeSettings, ConfigError> {
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        log::info!("Using settings from {}", path.display());
        return MetronomeSettings::load(&path);
    }

    match MetronomeSettings::default_path() {
        Some(path) if path.exists() => {
            log::info!("Using settings from {}", path.display());
            MetronomeSettings::load(&path)
        }
        _ => {
            log::info!("No settings file found, using defaults");
            Ok(MetronomeSettings::default())
        }
    }
}
