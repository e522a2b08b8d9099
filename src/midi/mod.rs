// MIDI module
// Standard MIDI File decoding for the drum track

pub mod file;

pub use file::{DecodeError, DrumTrack, decode_bytes, decode_file};
