// Example: Driving the beat player without a window
// This shows how a render loop feeds timestamps to the player and reads back frames

use drum_metronome::{BeatClassifier, BeatPlayer, DrumKit, Meter, NoteEvent};

fn main() {
    // Setup: 4/4 at 173 BPM, 480 ticks per quarter note
    let meter = Meter::from_parts(4, 173.0, 480).expect("valid meter");
    let kit = DrumKit::default();

    // One bar of kick/snare with a crash on the next downbeat
    let events = [
        NoteEvent::new(36, 0),
        NoteEvent::new(38, 480),
        NoteEvent::new(36, 960),
        NoteEvent::new(38, 1440),
        NoteEvent::new(49, 1920),
        NoteEvent::new(36, 1920),
    ];

    let grid = BeatClassifier::new(meter, kit).classify(&events);
    let mut player = BeatPlayer::new(grid, meter);

    println!("Simulating 2 seconds of frames at 60 fps, {}", meter);
    println!("Expected: kick, snare, kick, snare, cymbal\n");

    let frame_ms = 1000.0 / 60.0;
    let mut last_beat = 0;

    for frame_num in 0..120 {
        let now_ms = frame_num as f64 * frame_ms;
        let frame = player.on_frame(now_ms);

        if frame.beat != last_beat {
            let label = frame
                .label
                .map(|role| role.to_string())
                .unwrap_or_else(|| "silence".to_string());
            println!(
                "Frame #{:3} @ {:7.1} ms: measure {} beat {} -> {}",
                frame_num, now_ms, frame.measure, frame.beat, label
            );
            last_beat = frame.beat;
        }
    }

    println!("\nIn the real app:");
    println!("- Frames come from eframe's update loop");
    println!("- progress drives shape growth and cymbal rotation");
}
