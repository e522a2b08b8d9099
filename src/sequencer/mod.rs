// Sequencer module
// Musical time, beat classification and the frame-driven transport

pub mod classifier;
pub mod note;
pub mod player;
pub mod timeline;
pub mod transport;

pub use classifier::{BeatClassifier, BeatGrid, classify};
pub use note::{DominantEvent, DrumKit, NoteEvent};
pub use player::{BeatPlayer, FrameSnapshot};
pub use timeline::{BeatPosition, Meter, Tempo, TimeSignature};
pub use transport::{Transport, TransportState};
