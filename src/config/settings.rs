// Settings - Startup configuration for the metronome
// Loaded once from RON (or JSON) and never mutated afterwards

use crate::sequencer::note::DrumKit;
use crate::sequencer::timeline::Meter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Beats per measure must be at least 1")]
    InvalidBeatsPerMeasure,

    #[error("Invalid tempo: {0} BPM (must be a positive number)")]
    InvalidTempo(f64),

    #[error("Tempo too fast: {0} BPM gives a beat shorter than 1 ms")]
    TempoTooFast(f64),

    #[error("Ticks per quarter note must be at least 1")]
    InvalidTicksPerQuarter,

    #[error("Invalid display settings: {0}")]
    InvalidDisplay(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("RON write error: {0}")]
    RonWrite(#[from] ron::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Musical side of the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicSettings {
    pub beats_per_measure: u8,
    pub bpm: f64,
    /// Resolution of the tick timestamps in the drum file
    pub ticks_per_quarter: u16,
    /// Drum track to load
    pub midi_file: PathBuf,
    /// Which track of the file holds the drums
    pub track_index: usize,
    pub kit: DrumKit,
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self {
            beats_per_measure: 4,
            bpm: 173.0,
            ticks_per_quarter: Meter::DEFAULT_TICKS_PER_QUARTER,
            midi_file: PathBuf::from("drum.mid"),
            track_index: 0,
            kit: DrumKit::default(),
        }
    }
}

/// Visual side of the configuration, in logical pixels and RGB triplets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Measures shown at once, one per row
    pub rows: u32,
    pub cell_size: f32,
    /// Gap between neighbouring cells
    pub cell_padding: f32,
    /// Margin between a cell's frame and its fully grown shape
    pub shape_inset: f32,
    pub window_height: f32,
    pub background: [u8; 3],
    pub frame_color: [u8; 3],
    pub foreground: [u8; 3],
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            rows: 1,
            cell_size: 50.0,
            cell_padding: 3.0,
            shape_inset: 5.0,
            window_height: 400.0,
            background: [34, 34, 34],
            frame_color: [204, 204, 204],
            foreground: [255, 255, 255],
        }
    }
}

impl DisplaySettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::InvalidDisplay(
                "rows must be at least 1".to_string(),
            ));
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::InvalidDisplay(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if !(self.window_height > 0.0) {
            return Err(ConfigError::InvalidDisplay(format!(
                "window_height must be positive, got {}",
                self.window_height
            )));
        }
        if !(self.cell_padding >= 0.0) {
            return Err(ConfigError::InvalidDisplay(format!(
                "cell_padding must not be negative, got {}",
                self.cell_padding
            )));
        }
        if !(self.shape_inset >= 0.0) {
            return Err(ConfigError::InvalidDisplay(format!(
                "shape_inset must not be negative, got {}",
                self.shape_inset
            )));
        }
        Ok(())
    }
}

/// Full metronome configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetronomeSettings {
    pub music: MusicSettings,
    pub display: DisplaySettings,
}

impl MetronomeSettings {
    /// Settings file name inside the per-user config directory
    pub const FILE_NAME: &'static str = "settings.ron";

    /// `<config dir>/drum_metronome/settings.ron`, when the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("drum_metronome").join(Self::FILE_NAME))
    }

    /// Load settings from a file
    ///
    /// `.json` files go through serde_json, anything else is read as RON.
    /// A relative `midi_file` is resolved against the settings file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

        let mut settings: Self = if is_json(path) {
            serde_json::from_str(&contents)?
        } else {
            ron::from_str(&contents)?
        };

        if settings.music.midi_file.is_relative() {
            if let Some(dir) = path.parent() {
                settings.music.midi_file = dir.join(&settings.music.midi_file);
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Write settings to a file, format chosen by extension like `load`
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check everything that would otherwise fail later at construction
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.meter()?;
        self.display.validate()
    }

    /// Validated musical context derived from these settings
    pub fn meter(&self) -> Result<Meter, ConfigError> {
        Meter::from_parts(
            self.music.beats_per_measure,
            self.music.bpm,
            self.music.ticks_per_quarter,
        )
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
