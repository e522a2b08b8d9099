// Session - Startup pipeline
// settings -> meter + kit -> decoded drum track -> beat grid -> player

use crate::config::{ConfigError, MetronomeSettings};
use crate::midi::{DecodeError, DrumTrack, decode_file};
use crate::sequencer::{BeatClassifier, BeatPlayer, DominantEvent};

/// Anything that prevents the metronome from starting
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Build a player from settings, reading the drum file from disk
///
/// Configuration is validated before the file is touched, and a decode failure
/// aborts before any classification happens.
pub fn load(settings: &MetronomeSettings) -> Result<BeatPlayer, SessionError> {
    settings.validate()?;

    let path = &settings.music.midi_file;
    log::info!("Loading drum track from {}", path.display());
    let track = decode_file(path, settings.music.track_index)?;

    build(settings, &track)
}

/// Build a player from an already decoded track
pub fn build(settings: &MetronomeSettings, track: &DrumTrack) -> Result<BeatPlayer, SessionError> {
    let meter = settings.meter()?;

    log::info!(
        "Decoded {} notes (file resolution {} ppq)",
        track.len(),
        track.ticks_per_quarter
    );
    if track.ticks_per_quarter != meter.ticks_per_quarter() {
        log::warn!(
            "File resolution is {} ppq but settings use {} ppq; beats may be misplaced",
            track.ticks_per_quarter,
            meter.ticks_per_quarter()
        );
    }

    let classifier = BeatClassifier::new(meter, settings.music.kit);
    let unmatched = classifier.unmatched(&track.notes);
    if unmatched > 0 {
        log::debug!("Ignored {} notes outside the drum kit", unmatched);
    }

    let grid = classifier.classify(&track.notes);
    log::info!(
        "Beat grid: {} cells over {} measures ({} cymbal, {} snare, {} kick), {}",
        grid.len(),
        grid.last_measure().unwrap_or(0),
        grid.count(DominantEvent::Cymbal),
        grid.count(DominantEvent::Snare),
        grid.count(DominantEvent::Kick),
        meter
    );

    Ok(BeatPlayer::new(grid, meter))
}
