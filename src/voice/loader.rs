//! Voice bank loading from WAV recordings

use super::bank::VoiceBank;
use crate::error::LoadError;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// File name searched for when no bank path is configured
pub const DEFAULT_BANK_FILE: &str = "animalese.wav";

/// Decode a WAV stream into a voice bank
///
/// Integer PCM is scaled to [-1, 1). Multi-channel recordings keep only
/// the first channel.
pub fn load_wav<R: Read>(reader: R) -> Result<VoiceBank, LoadError> {
    let reader = hound::WavReader::new(reader)
        .map_err(|e| LoadError::Unreadable(format!("Failed to parse WAV: {}", e)))?;
    let spec = reader.spec();
    debug!(
        "WAV source: {} channel(s), {}Hz, {} bits, {:?}",
        spec.channels, spec.sample_rate, spec.bits_per_sample, spec.sample_format
    );

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<f32>, _>>()
        }
        hound::SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<Vec<f32>, _>>(),
    }
    .map_err(|e| LoadError::Unreadable(format!("Failed to decode samples: {}", e)))?;

    let channels = spec.channels.max(1) as usize;
    let samples = if channels == 1 {
        interleaved
    } else {
        warn!("Voice bank has {} channels, using the first", channels);
        interleaved.into_iter().step_by(channels).collect()
    };

    VoiceBank::from_samples(samples, spec.sample_rate)
}

/// Load a voice bank from a WAV file on disk
pub fn load_wav_file(path: &Path) -> Result<VoiceBank, LoadError> {
    if !path.is_file() {
        return Err(LoadError::SourceMissing);
    }

    let file = File::open(path)
        .map_err(|e| LoadError::Unreadable(format!("{}: {}", path.display(), e)))?;
    let bank = load_wav(BufReader::new(file))?;
    info!(
        "Loaded voice bank from {} ({} samples at {}Hz)",
        path.display(),
        bank.len(),
        bank.sample_rate()
    );
    Ok(bank)
}

/// Pick the recording to load
///
/// An explicitly configured path wins even if it does not exist, so a typo
/// in the config is reported instead of silently using another voice.
/// Otherwise the first existing fallback is used.
pub fn resolve_source(
    configured: Option<&Path>,
    fallbacks: &[PathBuf],
) -> Result<PathBuf, LoadError> {
    if let Some(path) = configured {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        warn!("Configured voice bank {} not found", path.display());
        return Err(LoadError::SourceMissing);
    }

    for candidate in fallbacks {
        debug!("Looking for voice bank at {}", candidate.display());
        if candidate.is_file() {
            info!("Using fallback voice bank {}", candidate.display());
            return Ok(candidate.clone());
        }
    }

    Err(LoadError::SourceMissing)
}

/// Standard fallback locations for the voice bank
///
/// `./resources/animalese.wav`, then `<data dir>/animalese/animalese.wav`.
pub fn default_fallbacks() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("resources").join(DEFAULT_BANK_FILE)];
    if let Some(data) = dirs::data_dir() {
        paths.push(data.join(crate::APP_NAME).join(DEFAULT_BANK_FILE));
    }
    paths
}
