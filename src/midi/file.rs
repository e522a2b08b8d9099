// MIDI file decoding
// Reads a Standard MIDI File and flattens one track into absolute-tick note-ons

use crate::sequencer::note::NoteEvent;
use midly::{MidiMessage, Smf, Timing, TrackEventKind};
use std::path::{Path, PathBuf};

/// Decode error types
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Failed to read MIDI file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse MIDI: {0}")]
    Parse(#[from] midly::Error),

    #[error("Timecode-based MIDI files are not supported (no ticks per quarter note)")]
    UnsupportedTiming,

    #[error("Track {index} not found (file has {available} tracks)")]
    MissingTrack { index: usize, available: usize },
}

/// Notes of the drum track, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrumTrack {
    /// Resolution declared in the file header
    pub ticks_per_quarter: u16,
    pub notes: Vec<NoteEvent>,
}

impl DrumTrack {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Read and decode `track_index` of the file at `path`
pub fn decode_file(path: &Path, track_index: usize) -> Result<DrumTrack, DecodeError> {
    let data = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_bytes(&data, track_index)
}

/// Decode `track_index` of an in-memory Standard MIDI File
///
/// Every NoteOn with a non-zero velocity becomes a `NoteEvent`, on any channel.
/// A NoteOn with velocity 0 is a note-off and is skipped, like NoteOff itself.
pub fn decode_bytes(data: &[u8], track_index: usize) -> Result<DrumTrack, DecodeError> {
    let smf = Smf::parse(data)?;

    let ticks_per_quarter = match smf.header.timing {
        Timing::Metrical(tpq) => tpq.as_int(),
        Timing::Timecode(..) => return Err(DecodeError::UnsupportedTiming),
    };

    let track = smf
        .tracks
        .get(track_index)
        .ok_or_else(|| DecodeError::MissingTrack {
            index: track_index,
            available: smf.tracks.len(),
        })?;

    let mut tick: u64 = 0;
    let mut notes = Vec::new();

    for event in track {
        tick += event.delta.as_int() as u64;

        if let TrackEventKind::Midi {
            message: MidiMessage::NoteOn { key, vel },
            ..
        } = event.kind
        {
            if vel.as_int() > 0 {
                notes.push(NoteEvent::new(key.as_int(), tick));
            }
        }
    }

    Ok(DrumTrack {
        ticks_per_quarter,
        notes,
    })
}
