// Note representation for the beat classifier
// A note is a percussion hit at an absolute tick, plus the drum roles it can resolve to

use serde::{Deserialize, Serialize};
use std::fmt;

/// A timed note-on decoded from the drum track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteEvent {
    /// MIDI note number (0-127); for General MIDI drums this selects the instrument
    pub pitch: u8,

    /// Absolute position in source ticks
    pub tick: u64,
}

impl NoteEvent {
    pub fn new(pitch: u8, tick: u64) -> Self {
        Self { pitch, tick }
    }
}

/// Percussion role chosen to represent one beat
///
/// Variants are declared in priority order, so the derived `Ord` ranks
/// `Cymbal < Snare < Kick` and the dominant role of a cell is the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DominantEvent {
    Cymbal,
    Snare,
    Kick,
}

impl DominantEvent {
    /// Keep whichever of the two roles has the higher priority
    pub fn dominant(self, other: DominantEvent) -> DominantEvent {
        self.min(other)
    }
}

impl fmt::Display for DominantEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cymbal => "cymbal",
            Self::Snare => "snare",
            Self::Kick => "kick",
        };
        f.write_str(name)
    }
}

/// MIDI note numbers identifying each percussion role
/// Defaults follow the General MIDI percussion map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrumKit {
    /// Bass drum (GM 36)
    pub kick: u8,
    /// Acoustic snare (GM 38)
    pub snare: u8,
    /// Crash cymbal 1 (GM 49)
    pub cymbal: u8,
}

impl DrumKit {
    pub fn new(kick: u8, snare: u8, cymbal: u8) -> Self {
        Self {
            kick,
            snare,
            cymbal,
        }
    }

    /// Map a pitch to its role, or `None` for voices outside the kit
    /// If two roles share a pitch the higher-priority role wins
    pub fn role_of(&self, pitch: u8) -> Option<DominantEvent> {
        if pitch == self.cymbal {
            Some(DominantEvent::Cymbal)
        } else if pitch == self.snare {
            Some(DominantEvent::Snare)
        } else if pitch == self.kick {
            Some(DominantEvent::Kick)
        } else {
            None
        }
    }
}

impl Default for DrumKit {
    fn default() -> Self {
        Self::new(36, 38, 49)
    }
}
