//! Playback backends

// PulseAudio output through a pacat subprocess
pub mod pulseaudio;

// Writes each utterance to a WAV file
pub mod wav_file;

// Records buffers in memory (headless runs and tests)
pub mod memory;
