// Integration test for the load pipeline
// Writes real Standard MIDI Files to disk, then decodes, classifies and plays them

use drum_metronome::config::MetronomeSettings;
use drum_metronome::midi::{DecodeError, decode_file};
use drum_metronome::session::{self, SessionError};
use drum_metronome::{DominantEvent, NoteEvent};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use std::path::Path;

/// (delta ticks, key, velocity)
type Hit = (u32, u8, u8);

fn track_events<'a>(hits: &[Hit]) -> Vec<TrackEvent<'a>> {
    let mut events: Vec<TrackEvent<'a>> = hits
        .iter()
        .map(|&(delta, key, vel)| TrackEvent {
            delta: delta.into(),
            kind: TrackEventKind::Midi {
                channel: 9.into(),
                message: MidiMessage::NoteOn {
                    key: key.into(),
                    vel: vel.into(),
                },
            },
        })
        .collect();
    events.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    events
}

fn write_smf(path: &Path, ppq: u16, tracks: &[&[Hit]]) {
    let format = if tracks.len() == 1 {
        Format::SingleTrack
    } else {
        Format::Parallel
    };
    let smf = Smf {
        header: Header {
            format,
            timing: Timing::Metrical(ppq.into()),
        },
        tracks: tracks.iter().map(|hits| track_events(hits)).collect(),
    };

    let mut bytes = Vec::new();
    smf.write(&mut bytes).expect("Failed to write SMF");
    std::fs::write(path, bytes).expect("Failed to save SMF");
}

/// One bar of a basic rock groove plus a crash on the next downbeat
const GROOVE: &[Hit] = &[
    (0, 36, 100),   // 1:1 kick
    (0, 42, 80),    // hi-hat, ignored
    (480, 38, 100), // 1:2 snare
    (0, 36, 90),    // 1:2 kick under the snare
    (480, 36, 100), // 1:3 kick
    (960, 49, 110), // 2:1 crash
    (0, 36, 100),   // 2:1 kick
    (0, 38, 100),   // 2:1 snare
];

#[test]
fn test_decode_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drum.mid");
    write_smf(&path, 480, &[GROOVE]);

    let track = decode_file(&path, 0).unwrap();
    assert_eq!(track.ticks_per_quarter, 480);
    assert_eq!(track.len(), 8);
    assert_eq!(track.notes[0], NoteEvent::new(36, 0));
    assert_eq!(track.notes[5], NoteEvent::new(49, 1920));
}

#[test]
fn test_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drum.mid");
    write_smf(&path, 480, &[GROOVE]);

    let mut settings = MetronomeSettings::default();
    settings.music.midi_file = path;

    let mut player = session::load(&settings).unwrap();
    let grid = player.grid();
    assert_eq!(grid.get(1, 1), Some(DominantEvent::Kick));
    assert_eq!(grid.get(1, 2), Some(DominantEvent::Snare));
    assert_eq!(grid.get(1, 3), Some(DominantEvent::Kick));
    assert_eq!(grid.get(1, 4), None);
    assert_eq!(grid.get(2, 1), Some(DominantEvent::Cymbal));

    // Play through the first five beats at 173 BPM
    let interval = player.meter().ms_per_beat();
    let labels: Vec<_> = (1..=5)
        .map(|i| player.on_frame(interval * i as f64).label)
        .collect();
    assert_eq!(
        labels,
        vec![
            Some(DominantEvent::Kick),
            Some(DominantEvent::Snare),
            Some(DominantEvent::Kick),
            None,
            Some(DominantEvent::Cymbal),
        ]
    );
}

#[test]
fn test_second_track_selected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drum.mid");
    write_smf(&path, 480, &[&[], &[(480, 38, 100)]]);

    let mut settings = MetronomeSettings::default();
    settings.music.midi_file = path;
    settings.music.track_index = 1;

    let player = session::load(&settings).unwrap();
    assert_eq!(player.grid().get(1, 2), Some(DominantEvent::Snare));
}

#[test]
fn test_missing_track_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drum.mid");
    write_smf(&path, 480, &[GROOVE]);

    let mut settings = MetronomeSettings::default();
    settings.music.midi_file = path;
    settings.music.track_index = 2;

    assert!(matches!(
        session::load(&settings),
        Err(SessionError::Decode(DecodeError::MissingTrack { index: 2, .. }))
    ));
}

#[test]
fn test_malformed_file_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drum.mid");
    std::fs::write(&path, b"MThd garbage").unwrap();

    let mut settings = MetronomeSettings::default();
    settings.music.midi_file = path;

    assert!(matches!(
        session::load(&settings),
        Err(SessionError::Decode(DecodeError::Parse(_)))
    ));
}

#[test]
fn test_file_resolution_differs_from_settings() {
    // 96 ppq file while settings keep 480: classification uses the settings
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drum.mid");
    write_smf(&path, 96, &[&[(96, 38, 100)]]);

    let mut settings = MetronomeSettings::default();
    settings.music.midi_file = path.clone();
    let player = session::load(&settings).unwrap();
    assert_eq!(player.grid().get(1, 1), Some(DominantEvent::Snare));

    settings.music.ticks_per_quarter = 96;
    let player = session::load(&settings).unwrap();
    assert_eq!(player.grid().get(1, 2), Some(DominantEvent::Snare));
}
