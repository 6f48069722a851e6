//! Speech synthesis from the letter bank

pub mod buffer;
pub mod synth;
pub mod text;

pub use buffer::OutputBuffer;
pub use synth::{fade_gain, Synthesizer, FADE_SAMPLES, MAX_SECONDS_PER_CHAR};
