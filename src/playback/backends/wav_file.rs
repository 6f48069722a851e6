//! WAV file backend
//!
//! Each utterance overwrites the target file. Nothing is ever audible, so
//! the device is never active once `play` returns.

use crate::playback::PlaybackDevice;
use crate::speech::OutputBuffer;
use crate::Result;
use log::info;
use std::path::{Path, PathBuf};

pub struct WavFileDevice {
    path: PathBuf,
}

impl WavFileDevice {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlaybackDevice for WavFileDevice {
    fn play(&mut self, buffer: &OutputBuffer, volume: f32) -> Result<()> {
        let scaled = OutputBuffer::new(
            buffer.samples().iter().map(|&s| s * volume).collect(),
            buffer.sample_rate(),
            buffer.samples_per_slot(),
        );
        scaled.save_wav(&self.path)?;
        info!(
            "Wrote {:.2}s of speech to {}",
            buffer.duration().as_secs_f32(),
            self.path.display()
        );
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_active(&mut self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "wav"
    }
}
