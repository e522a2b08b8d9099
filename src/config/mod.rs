// Configuration for the drum metronome
// Settings are fixed at startup; see `settings` for the file format

pub mod settings;

pub use settings::{ConfigError, DisplaySettings, MetronomeSettings, MusicSettings};
