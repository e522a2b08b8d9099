// Beat player - Binds the beat grid to the transport
// One call per rendered frame yields everything the renderer needs

use crate::sequencer::classifier::BeatGrid;
use crate::sequencer::note::DominantEvent;
use crate::sequencer::timeline::Meter;
use crate::sequencer::transport::Transport;

/// What the renderer draws on one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub measure: u32,
    /// 0 until the first beat fires
    pub beat: u8,
    /// Progress through the current beat, in [0, 1]
    pub progress: f64,
    /// Role at the current cell; `None` is a silent beat (or no beat yet)
    pub label: Option<DominantEvent>,
}

impl FrameSnapshot {
    pub fn is_started(&self) -> bool {
        self.beat != 0
    }
}

/// Sequencer player - owns the grid (read-only) and the transport (mutable)
#[derive(Debug, Clone)]
pub struct BeatPlayer {
    grid: BeatGrid,
    transport: Transport,
    meter: Meter,
}

impl BeatPlayer {
    /// Create a new player; the transport clock starts at 0 ms
    pub fn new(grid: BeatGrid, meter: Meter) -> Self {
        Self {
            transport: Transport::new(&meter),
            grid,
            meter,
        }
    }

    pub fn grid(&self) -> &BeatGrid {
        &self.grid
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn meter(&self) -> &Meter {
        &self.meter
    }

    /// Advance the transport to `now_ms` and describe the frame
    pub fn on_frame(&mut self, now_ms: f64) -> FrameSnapshot {
        self.transport.advance(now_ms);
        self.snapshot(now_ms)
    }

    /// Describe the frame at `now_ms` without advancing
    pub fn snapshot(&self, now_ms: f64) -> FrameSnapshot {
        let state = self.transport.state();
        let label = state.position().and_then(|position| self.grid.at(position));

        FrameSnapshot {
            measure: state.measure,
            beat: state.beat,
            progress: self.transport.progress(now_ms),
            label,
        }
    }
}
