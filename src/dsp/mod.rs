mod clipper;
mod oscillator;

pub use clipper::{Clipper, THRESHOLD_FLOOR};
pub use oscillator::{Oscillator, OscillatorBuilder, Waveform};
