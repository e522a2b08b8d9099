// Integration test for settings persistence
// Save/load in both formats, relative path resolution and fail-fast validation

use drum_metronome::config::{ConfigError, MetronomeSettings};
use drum_metronome::DrumKit;
use std::path::PathBuf;

#[test]
fn test_ron_save_load_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.ron");

    let mut settings = MetronomeSettings::default();
    settings.music.bpm = 128.0;
    settings.music.beats_per_measure = 3;
    settings.music.kit = DrumKit::new(35, 40, 57);
    settings.music.midi_file = dir.path().join("groove.mid");
    settings.display.rows = 4;
    settings.display.background = [0, 0, 0];

    settings.save(&path).unwrap();
    let loaded = MetronomeSettings::load(&path).unwrap();

    assert_eq!(loaded, settings);
    assert_eq!(loaded.meter().unwrap().ms_per_beat(), 625.0);
}

#[test]
fn test_json_save_load_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = MetronomeSettings::default();
    settings.music.midi_file = dir.path().join("drum.mid");
    settings.display.cell_size = 80.0;

    settings.save(&path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\"cell_size\": 80.0"));

    assert_eq!(MetronomeSettings::load(&path).unwrap(), settings);
}

#[test]
fn test_relative_midi_path_resolves_next_to_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.ron");
    std::fs::write(&path, r#"(music: (midi_file: "tracks/drum.mid"))"#).unwrap();

    let settings = MetronomeSettings::load(&path).unwrap();
    assert_eq!(
        settings.music.midi_file,
        dir.path().join(PathBuf::from("tracks/drum.mid"))
    );
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config").join("settings.ron");

    MetronomeSettings::default().save(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.ron");

    std::fs::write(&path, "(music: (beats_per_measure: 0))").unwrap();
    assert!(matches!(
        MetronomeSettings::load(&path),
        Err(ConfigError::InvalidBeatsPerMeasure)
    ));

    std::fs::write(&path, "(music: (bpm: 0.0))").unwrap();
    assert!(matches!(
        MetronomeSettings::load(&path),
        Err(ConfigError::InvalidTempo(_))
    ));

    std::fs::write(&path, "(display: (rows: 0))").unwrap();
    assert!(matches!(
        MetronomeSettings::load(&path),
        Err(ConfigError::InvalidDisplay(_))
    ));
}

#[test]
fn test_malformed_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();

    let ron_path = dir.path().join("broken.ron");
    std::fs::write(&ron_path, "(music: (bpm: \"fast\"))").unwrap();
    assert!(matches!(
        MetronomeSettings::load(&ron_path),
        Err(ConfigError::Ron(_))
    ));

    let json_path = dir.path().join("broken.json");
    std::fs::write(&json_path, "{ not json").unwrap();
    assert!(matches!(
        MetronomeSettings::load(&json_path),
        Err(ConfigError::Json(_))
    ));

    assert!(matches!(
        MetronomeSettings::load(&dir.path().join("absent.ron")),
        Err(ConfigError::Io(_))
    ));
}
