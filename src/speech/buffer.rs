//! Synthesized audio buffer

use crate::Result;
use log::debug;
use std::io::{Seek, Write};
use std::path::Path;
use std::time::Duration;

/// Mono audio produced by the synthesizer
///
/// Character `i` of the source text occupies samples
/// `[i * samples_per_slot, (i + 1) * samples_per_slot)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    samples_per_slot: usize,
}

impl OutputBuffer {
    pub(crate) fn new(samples: Vec<f32>, sample_rate: u32, samples_per_slot: usize) -> Self {
        Self {
            samples,
            sample_rate,
            samples_per_slot,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples per character slot
    pub fn samples_per_slot(&self) -> usize {
        self.samples_per_slot
    }

    /// Number of character slots
    pub fn slot_count(&self) -> usize {
        if self.samples_per_slot == 0 {
            return 0;
        }
        self.samples.len() / self.samples_per_slot
    }

    /// Samples belonging to one character
    pub fn slot(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.samples_per_slot)?;
        self.samples.get(start..start + self.samples_per_slot)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length at the buffer's sample rate
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Encode as a 32-bit float mono WAV stream
    pub fn write_wav<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::new(writer, spec)?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Write the buffer to a WAV file
    pub fn save_wav(&self, path: &Path) -> Result<()> {
        debug!("Writing {} samples to {}", self.samples.len(), path.display());
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write_wav(file)
    }
}
