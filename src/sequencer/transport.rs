// Transport - Frame-driven beat clock
// Advances measure/beat from a free-running millisecond timestamp and reports intra-beat progress

use super::timeline::{BeatPosition, Meter};

/// Position of the transport
///
/// `beat` stays in `0..=beats_per_measure`; it is 0 only before the first beat
/// fires. `measure` starts at 0 and becomes 1 together with that first beat, so
/// once started it lines up with the 1-based keys of `BeatGrid`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportState {
    pub measure: u32,
    pub beat: u8,
    /// Timestamp passed to the `advance` call that fired the current beat
    pub last_beat_ms: f64,
}

impl TransportState {
    /// Has at least one beat fired?
    pub fn is_started(&self) -> bool {
        self.beat != 0
    }

    /// Current cell, or `None` before the first beat
    pub fn position(&self) -> Option<BeatPosition> {
        self.is_started()
            .then(|| BeatPosition::new(self.measure, self.beat))
    }
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            measure: 0,
            beat: 0,
            last_beat_ms: 0.0,
        }
    }
}

/// Transport controller
/// Owns the beat position; mutated only through `advance`
#[derive(Debug, Clone)]
pub struct Transport {
    state: TransportState,
    beats_per_measure: u8,
    ms_per_beat: f64,
}

impl Transport {
    /// Create a transport whose clock starts at 0 ms
    pub fn new(meter: &Meter) -> Self {
        Self::starting_at(meter, 0.0)
    }

    /// Create a transport whose first beat fires one beat after `start_ms`
    pub fn starting_at(meter: &Meter, start_ms: f64) -> Self {
        Self {
            state: TransportState {
                last_beat_ms: start_ms,
                ..TransportState::default()
            },
            beats_per_measure: meter.beats_per_measure(),
            ms_per_beat: meter.ms_per_beat(),
        }
    }

    /// Get current state
    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn measure(&self) -> u32 {
        self.state.measure
    }

    pub fn beat(&self) -> u8 {
        self.state.beat
    }

    pub fn beats_per_measure(&self) -> u8 {
        self.beats_per_measure
    }

    pub fn ms_per_beat(&self) -> f64 {
        self.ms_per_beat
    }

    /// Advance by at most one beat
    ///
    /// Fires when at least one beat interval has elapsed since the last beat.
    /// A stalled, rewound or NaN clock counts as "not enough time" and leaves
    /// the state untouched. After a long stall the position catches up one beat
    /// per call rather than jumping. Returns whether a beat fired.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let elapsed = now_ms - self.state.last_beat_ms;

        // Negated so that NaN also bails out
        if !(elapsed >= self.ms_per_beat) {
            return false;
        }

        if self.state.beat % self.beats_per_measure == 0 {
            self.state.beat = 0;
            self.state.measure = self.state.measure.saturating_add(1);
            log::debug!("Transport entered measure {}", self.state.measure);
        }

        self.state.last_beat_ms = now_ms;
        self.state.beat += 1;

        log::trace!(
            "Beat {}:{} at {:.1} ms",
            self.state.measure,
            self.state.beat,
            now_ms
        );

        true
    }

    /// Fraction of the current beat interval elapsed at `now_ms`, clamped to [0, 1]
    ///
    /// Only meaningful once a beat has fired; the transport itself is not affected.
    pub fn progress(&self, now_ms: f64) -> f64 {
        let ratio = (now_ms - self.state.last_beat_ms) / self.ms_per_beat;

        if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport_173() -> Transport {
        Transport::new(&Meter::from_parts(4, 173.0, 480).unwrap())
    }

    #[test]
    fn test_initial_state() {
        let transport = transport_173();
        let state = transport.state();

        assert_eq!(state.measure, 0);
        assert_eq!(state.beat, 0);
        assert!(!state.is_started());
        assert_eq!(state.position(), None);
        assert_eq!(transport.ms_per_beat(), 346.0);
    }

    #[test]
    fn test_first_beat_opens_measure_one() {
        let mut transport = transport_173();

        assert!(!transport.advance(0.0));
        assert_eq!(transport.beat(), 0);

        assert!(transport.advance(347.0));
        assert_eq!(transport.measure(), 1);
        assert_eq!(transport.beat(), 1);
        assert_eq!(transport.state().position(), Some(BeatPosition::new(1, 1)));
    }

    #[test]
    fn test_measure_wraps_after_last_beat() {
        let mut transport = transport_173();

        for i in 1..=4 {
            transport.advance(347.0 * i as f64);
        }
        assert_eq!((transport.measure(), transport.beat()), (1, 4));

        transport.advance(347.0 * 5.0);
        assert_eq!((transport.measure(), transport.beat()), (2, 1));
    }

    #[test]
    fn test_exact_interval_fires() {
        let mut transport = transport_173();

        assert!(!transport.advance(345.9));
        assert!(transport.advance(346.0));
        assert_eq!(transport.state().last_beat_ms, 346.0);
    }

    #[test]
    fn test_at_most_one_beat_per_call() {
        let mut transport = transport_173();

        // Ten intervals elapsed, still a single beat
        assert!(transport.advance(3460.0));
        assert_eq!(transport.beat(), 1);

        // Same timestamp again: nothing new
        assert!(!transport.advance(3460.0));
        assert_eq!(transport.beat(), 1);
    }

    #[test]
    fn test_clock_going_backwards_is_ignored() {
        let mut transport = transport_173();
        transport.advance(1000.0);
        let before = transport.state();

        assert!(!transport.advance(500.0));
        assert!(!transport.advance(f64::NAN));
        assert_eq!(transport.state(), before);
    }

    #[test]
    fn test_progress() {
        let mut transport = transport_173();
        transport.advance(1000.0);

        assert_eq!(transport.progress(1000.0), 0.0);
        assert_eq!(transport.progress(1173.0), 0.5);
        assert_eq!(transport.progress(1346.0), 1.0);
        assert_eq!(transport.progress(9999.0), 1.0);

        // Rewound or NaN clocks never produce values outside [0, 1]
        assert_eq!(transport.progress(0.0), 0.0);
        assert_eq!(transport.progress(f64::NAN), 0.0);
        assert_eq!(transport.progress(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_starting_at_offset() {
        let meter = Meter::from_parts(4, 120.0, 480).unwrap();
        let mut transport = Transport::starting_at(&meter, 10_000.0);

        assert!(!transport.advance(10_499.0));
        assert!(transport.advance(10_500.0));
        assert_eq!(transport.beat(), 1);
    }

    #[test]
    fn test_single_beat_measure() {
        let meter = Meter::from_parts(1, 60.0, 480).unwrap();
        let mut transport = Transport::new(&meter);

        // 60 BPM, one beat per measure: each beat spans 4 quarters
        assert_eq!(transport.ms_per_beat(), 4000.0);

        for i in 1..=3 {
            transport.advance(4000.0 * i as f64);
            assert_eq!(transport.measure(), i);
            assert_eq!(transport.beat(), 1);
        }
    }
}
