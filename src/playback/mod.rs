//! Audio output
//!
//! The speaker renders text and hands finished buffers to a
//! `PlaybackDevice`. Devices play buffers exactly as given: pitch and
//! duration are already baked into the samples, so no rate scaling is
//! ever applied at this level.

pub mod backends;
pub mod speaker;

pub use speaker::{PlaybackState, Speaker};

use crate::speech::OutputBuffer;
use crate::{AnimaleseError, Result};
use log::{info, warn};
use std::path::PathBuf;

/// Sink for synthesized audio
pub trait PlaybackDevice: Send {
    /// Start playing `buffer` at `volume` (0.0-1.0), replacing anything
    /// already playing
    fn play(&mut self, buffer: &OutputBuffer, volume: f32) -> Result<()>;

    /// Halt playback immediately; a no-op when idle
    fn stop(&mut self) -> Result<()>;

    /// Whether audio is still being output
    fn is_active(&mut self) -> bool;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

/// Which device to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceChoice {
    /// PulseAudio if available, otherwise the in-memory device
    Auto,
    PulseAudio,
    WavFile(PathBuf),
    Memory,
}

impl DeviceChoice {
    /// Parse a device name: `auto`, `pulseaudio`, `memory` or `wav:<path>`
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Some(path) = value.strip_prefix("wav:") {
            if path.is_empty() {
                return Err(AnimaleseError::Config("wav device needs a path".to_string()));
            }
            return Ok(DeviceChoice::WavFile(PathBuf::from(path)));
        }

        match value.to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(DeviceChoice::Auto),
            "pulseaudio" | "pulse" => Ok(DeviceChoice::PulseAudio),
            "memory" | "null" => Ok(DeviceChoice::Memory),
            other => Err(AnimaleseError::Config(format!("Unknown playback device '{}'", other))),
        }
    }
}

/// Open a playback device
///
/// `Auto` tries PulseAudio (through `pacat`) and falls back to an in-memory
/// device that discards audio, so synthesis keeps working headless.
pub fn create_device(choice: &DeviceChoice) -> Result<Box<dyn PlaybackDevice>> {
    use backends::memory::MemoryDevice;
    use backends::pulseaudio::PulseAudioDevice;
    use backends::wav_file::WavFileDevice;

    match choice {
        DeviceChoice::PulseAudio => Ok(Box::new(PulseAudioDevice::new()?)),
        DeviceChoice::WavFile(path) => Ok(Box::new(WavFileDevice::new(path.clone()))),
        DeviceChoice::Memory => Ok(Box::new(MemoryDevice::new())),
        DeviceChoice::Auto => {
            info!("Trying PulseAudio backend...");
            match PulseAudioDevice::new() {
                Ok(device) => {
                    info!("✓ Successfully initialized PulseAudio backend");
                    Ok(Box::new(device))
                }
                Err(e) => {
                    warn!("✗ PulseAudio backend unavailable: {}", e);
                    warn!("Audio will be discarded (install pulseaudio-utils for pacat)");
                    Ok(Box::new(MemoryDevice::new()))
                }
            }
        }
    }
}
