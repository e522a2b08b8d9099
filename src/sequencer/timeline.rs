// Timeline - Meter, tempo and beat quantization
// Handles conversion between source ticks, beat cells and real time

use crate::config::ConfigError;
use std::fmt;

/// Time signature, reduced to the number of beats per measure
/// A measure always spans four quarter notes, so a beat in 3/4 is 4/3 of a quarter note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    beats_per_measure: u8,
}

impl TimeSignature {
    /// Creates a new time signature
    pub fn new(beats_per_measure: u8) -> Result<Self, ConfigError> {
        if beats_per_measure == 0 {
            return Err(ConfigError::InvalidBeatsPerMeasure);
        }
        Ok(Self { beats_per_measure })
    }

    /// Common 4/4 time signature
    pub fn four_four() -> Self {
        Self {
            beats_per_measure: 4,
        }
    }

    /// Number of beats per measure
    pub fn beats_per_measure(&self) -> u8 {
        self.beats_per_measure
    }

    /// Beat duration relative to a quarter note
    /// Example: 4 beats = 1.0, 3 beats = 1.333, 8 beats = 0.5
    pub fn beat_duration_multiplier(&self) -> f64 {
        4.0 / self.beats_per_measure as f64
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/4", self.beats_per_measure)
    }
}

/// Tempo in BPM (Beats Per Minute)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    bpm: f64,
}

impl Tempo {
    /// Creates a new tempo
    /// BPM must be finite and strictly positive
    pub fn new(bpm: f64) -> Result<Self, ConfigError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(ConfigError::InvalidTempo(bpm));
        }
        Ok(Self { bpm })
    }

    /// Get BPM value
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Duration of one quarter note in seconds
    pub fn beat_duration_seconds(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Duration of one measure beat in milliseconds, before flooring
    pub fn beat_duration_ms(&self, time_signature: &TimeSignature) -> f64 {
        self.beat_duration_seconds() * 1000.0 * time_signature.beat_duration_multiplier()
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} BPM", self.bpm)
    }
}

/// Validated musical context shared by the classifier and the transport
///
/// Derived constants are computed once at construction. A `Meter` can only be
/// built from values that keep every derived quantity non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meter {
    time_signature: TimeSignature,
    tempo: Tempo,
    ticks_per_quarter: u16,
    ms_per_beat: f64,
}

impl Meter {
    /// Standard MIDI resolution (PPQN)
    pub const DEFAULT_TICKS_PER_QUARTER: u16 = 480;

    pub fn new(
        time_signature: TimeSignature,
        tempo: Tempo,
        ticks_per_quarter: u16,
    ) -> Result<Self, ConfigError> {
        if ticks_per_quarter == 0 {
            return Err(ConfigError::InvalidTicksPerQuarter);
        }

        let ms_per_beat = tempo.beat_duration_ms(&time_signature).floor();
        if ms_per_beat < 1.0 {
            return Err(ConfigError::TempoTooFast(tempo.bpm()));
        }

        Ok(Self {
            time_signature,
            tempo,
            ticks_per_quarter,
            ms_per_beat,
        })
    }

    /// Build a meter straight from raw configuration values
    pub fn from_parts(
        beats_per_measure: u8,
        bpm: f64,
        ticks_per_quarter: u16,
    ) -> Result<Self, ConfigError> {
        Self::new(
            TimeSignature::new(beats_per_measure)?,
            Tempo::new(bpm)?,
            ticks_per_quarter,
        )
    }

    pub fn tempo(&self) -> &Tempo {
        &self.tempo
    }

    pub fn beats_per_measure(&self) -> u8 {
        self.time_signature.beats_per_measure()
    }

    pub fn ticks_per_quarter(&self) -> u16 {
        self.ticks_per_quarter
    }

    /// Source ticks covered by one beat cell
    pub fn ticks_per_beat(&self) -> f64 {
        self.ticks_per_quarter as f64 * self.time_signature.beat_duration_multiplier()
    }

    /// Whole milliseconds per beat (floored)
    pub fn ms_per_beat(&self) -> f64 {
        self.ms_per_beat
    }

    /// Number of complete beats before `tick`
    ///
    /// Computed as `tick * beats / (ppq * 4)` in integers, which equals
    /// `floor(tick / ticks_per_beat)` without float rounding at cell boundaries.
    /// The product is widened to `u128`, so every `u64` tick lands in its true cell.
    pub fn beats_before(&self, tick: u64) -> u64 {
        let ticks_per_measure = self.ticks_per_quarter as u128 * 4;
        let beats = tick as u128 * self.beats_per_measure() as u128 / ticks_per_measure;
        // Exceeds u64 only for huge ticks with beats_per_measure > 4 * ppq
        u64::try_from(beats).unwrap_or(u64::MAX)
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} ({} ppq, {} ms/beat)",
            self.time_signature, self.tempo, self.ticks_per_quarter, self.ms_per_beat
        )
    }
}

/// A beat cell in the grid
/// Both fields are 1-based, matching the way measures and beats are counted aloud
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BeatPosition {
    pub measure: u32,
    pub beat: u8,
}

impl BeatPosition {
    pub fn new(measure: u32, beat: u8) -> Self {
        Self { measure, beat }
    }

    /// Snap a tick to the beat cell containing it
    /// Sub-beat timing is discarded; a tick exactly on a boundary belongs to the later cell
    pub fn from_tick(tick: u64, meter: &Meter) -> Self {
        let total_beats = meter.beats_before(tick);
        let beats_per_measure = meter.beats_per_measure() as u64;

        let measure = (total_beats / beats_per_measure + 1).min(u32::MAX as u64) as u32;
        let beat = (total_beats % beats_per_measure + 1) as u8;

        Self { measure, beat }
    }
}

impl fmt::Display for BeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.measure, self.beat)
    }
}
