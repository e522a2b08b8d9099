// Beat classifier - Reduces a drum track to one dominant role per beat
// Builds the sparse (measure, beat) grid the renderer reads from

use crate::sequencer::note::{DominantEvent, DrumKit, NoteEvent};
use crate::sequencer::timeline::{BeatPosition, Meter};
use std::collections::BTreeMap;

/// Sparse mapping `measure -> beat -> DominantEvent`
///
/// Measures and beats are 1-based. A cell without an entry is a silent beat,
/// which `get` reports as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeatGrid {
    measures: BTreeMap<u32, BTreeMap<u8, DominantEvent>>,
}

impl BeatGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label at (measure, beat), `None` when the beat is silent
    pub fn get(&self, measure: u32, beat: u8) -> Option<DominantEvent> {
        self.measures
            .get(&measure)
            .and_then(|beats| beats.get(&beat))
            .copied()
    }

    pub fn at(&self, position: BeatPosition) -> Option<DominantEvent> {
        self.get(position.measure, position.beat)
    }

    /// All recorded beats of one measure
    pub fn measure(&self, measure: u32) -> Option<&BTreeMap<u8, DominantEvent>> {
        self.measures.get(&measure)
    }

    /// Record a role at a cell, keeping the higher-priority role if one is already there
    pub fn record(&mut self, position: BeatPosition, role: DominantEvent) {
        self.measures
            .entry(position.measure)
            .or_default()
            .entry(position.beat)
            .and_modify(|current| *current = current.dominant(role))
            .or_insert(role);
    }

    /// Number of non-silent cells
    pub fn len(&self) -> usize {
        self.measures.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Highest measure holding at least one event
    pub fn last_measure(&self) -> Option<u32> {
        self.measures.keys().next_back().copied()
    }

    /// Count the cells resolved to `role`
    pub fn count(&self, role: DominantEvent) -> usize {
        self.iter().filter(|(_, r)| *r == role).count()
    }

    /// Non-silent cells in (measure, beat) order
    pub fn iter(&self) -> impl Iterator<Item = (BeatPosition, DominantEvent)> + '_ {
        self.measures.iter().flat_map(|(&measure, beats)| {
            beats
                .iter()
                .map(move |(&beat, &role)| (BeatPosition::new(measure, beat), role))
        })
    }
}

/// Quantizes note events into a `BeatGrid`
///
/// Pure: the same events produce the same grid whatever their order, because
/// each cell keeps the minimum-rank role among the events that land on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatClassifier {
    meter: Meter,
    kit: DrumKit,
}

impl BeatClassifier {
    pub fn new(meter: Meter, kit: DrumKit) -> Self {
        Self { meter, kit }
    }

    /// Build the grid; pitches outside the kit are skipped
    pub fn classify(&self, events: &[NoteEvent]) -> BeatGrid {
        let mut grid = BeatGrid::new();

        for event in events {
            let Some(role) = self.kit.role_of(event.pitch) else {
                continue;
            };
            grid.record(BeatPosition::from_tick(event.tick, &self.meter), role);
        }

        grid
    }

    /// Number of events the kit does not recognise
    pub fn unmatched(&self, events: &[NoteEvent]) -> usize {
        events
            .iter()
            .filter(|event| self.kit.role_of(event.pitch).is_none())
            .count()
    }
}

/// Shorthand for `BeatClassifier::new(*meter, *kit).classify(events)`
pub fn classify(events: &[NoteEvent], meter: &Meter, kit: &DrumKit) -> BeatGrid {
    BeatClassifier::new(*meter, *kit).classify(events)
}
