// Drum Metronome - Library exports for the app, tests and benchmarks

pub mod config;
pub mod midi;
pub mod sequencer;
pub mod session;
pub mod trace;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::{ConfigError, MetronomeSettings};
pub use midi::{DecodeError, DrumTrack};
pub use sequencer::{
    BeatClassifier, BeatGrid, BeatPlayer, BeatPosition, DominantEvent, DrumKit, FrameSnapshot,
    Meter, NoteEvent, Tempo, TimeSignature, Transport, TransportState, classify,
};
pub use session::SessionError;
