//! Animalese - letter-sample voice synthesizer
//!
//! Turns arbitrary text into "Animal Crossing"-style babble by resampling
//! one recorded sample per letter. Pitch is applied without changing the
//! length of each character slot, so speech can be kept in lockstep with a
//! typewriter-style text reveal.

pub mod config;
pub mod error;
pub mod playback;
pub mod speech;
pub mod voice;

pub use error::{AnimaleseError, LoadError, Result};
pub use playback::{PlaybackDevice, PlaybackState, Speaker};
pub use speech::{OutputBuffer, Synthesizer};
pub use voice::{VoiceBank, VoiceSettings};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "animalese";
