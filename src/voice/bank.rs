//! Letter sample bank
//!
//! The bank is one flat mono recording holding the 26 letters A-Z back to
//! back, each occupying a fixed 0.15s block. Letters are addressed purely by
//! position; the recording carries no boundary markers.

use crate::error::LoadError;
use log::debug;

/// Duration of each letter block in the source recording (seconds)
pub const LIBRARY_LETTER_DURATION: f32 = 0.15;

/// Number of letters in the bank ('A'..='Z')
pub const LETTER_COUNT: usize = 26;

/// Immutable library of letter samples
#[derive(Debug, Clone)]
pub struct VoiceBank {
    samples: Vec<f32>,
    sample_rate: u32,
    samples_per_letter: usize,
}

impl VoiceBank {
    /// Build a bank from a flat mono sample buffer
    ///
    /// The buffer may be shorter than 26 full letter blocks; letters past
    /// the end simply read as silence.
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Result<Self, LoadError> {
        if sample_rate == 0 {
            return Err(LoadError::Unreadable("sample rate is zero".to_string()));
        }

        let samples_per_letter = (LIBRARY_LETTER_DURATION * sample_rate as f32).floor() as usize;
        debug!(
            "Voice bank: {} samples at {}Hz, {} samples per letter",
            samples.len(),
            sample_rate,
            samples_per_letter
        );

        Ok(Self {
            samples,
            sample_rate,
            samples_per_letter,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples_per_letter(&self) -> usize {
        self.samples_per_letter
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of letters whose block is fully present in the buffer
    pub fn complete_letters(&self) -> usize {
        if self.samples_per_letter == 0 {
            return 0;
        }
        (self.samples.len() / self.samples_per_letter).min(LETTER_COUNT)
    }

    /// Locate a letter's block as `(start, len)`
    ///
    /// Only uppercase ASCII letters have a block. The range is not checked
    /// against the buffer length.
    pub fn letter_slice(&self, letter: char) -> Option<(usize, usize)> {
        if !letter.is_ascii_uppercase() {
            return None;
        }
        let index = (letter as u8 - b'A') as usize;
        Some((self.samples_per_letter * index, self.samples_per_letter))
    }

    /// Read the recording at a fractional offset from `start`
    ///
    /// Linearly interpolates between the two neighbouring samples. When the
    /// upper neighbour is past the end of the buffer the lower sample is used
    /// as-is; when the lower one is past the end too, there is no sample.
    /// The clamp is buffer-wide, so reads may run into the next letter.
    pub fn sample_at(&self, start: usize, offset: f64) -> Option<f32> {
        let whole = offset.floor();
        let index = start.checked_add(whole as usize)?;
        let current = *self.samples.get(index)?;

        match self.samples.get(index + 1) {
            Some(&next) => {
                let frac = (offset - whole) as f32;
                Some(current * (1.0 - frac) + next * frac)
            }
            None => Some(current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_bank(rate: u32, len: usize) -> VoiceBank {
        let samples = (0..len).map(|i| i as f32).collect();
        VoiceBank::from_samples(samples, rate).unwrap()
    }

    #[test]
    fn test_samples_per_letter() {
        assert_eq!(ramp_bank(40000, 0).samples_per_letter(), 6000);
        assert_eq!(ramp_bank(44100, 0).samples_per_letter(), 6615);
        assert_eq!(ramp_bank(100, 0).samples_per_letter(), 15);
    }

    #[test]
    fn test_zero_rate_rejected() {
        let result = VoiceBank::from_samples(vec![0.0; 10], 0);
        assert!(matches!(result, Err(LoadError::Unreadable(_))));
    }

    #[test]
    fn test_letter_slice() {
        let bank = ramp_bank(40000, 0);
        assert_eq!(bank.letter_slice('A'), Some((0, 6000)));
        assert_eq!(bank.letter_slice('H'), Some((42000, 6000)));
        assert_eq!(bank.letter_slice('Z'), Some((150000, 6000)));
        assert_eq!(bank.letter_slice('a'), None);
        assert_eq!(bank.letter_slice(' '), None);
    }

    #[test]
    fn test_sample_at_interpolates() {
        let bank = ramp_bank(100, 30);
        assert_eq!(bank.sample_at(0, 0.0), Some(0.0));
        assert_eq!(bank.sample_at(10, 2.5), Some(12.5));
        assert_eq!(bank.sample_at(15, 0.25), Some(15.25));
    }

    #[test]
    fn test_sample_at_buffer_edge() {
        let bank = ramp_bank(100, 30);
        // Upper neighbour missing: nearest sample is used unchanged
        assert_eq!(bank.sample_at(29, 0.5), Some(29.0));
        assert_eq!(bank.sample_at(25, 5.0), None);
        assert_eq!(bank.sample_at(100, 0.0), None);
    }

    #[test]
    fn test_complete_letters() {
        assert_eq!(ramp_bank(100, 15 * 26).complete_letters(), 26);
        assert_eq!(ramp_bank(100, 15 * 3 + 7).complete_letters(), 3);
        assert_eq!(ramp_bank(100, 15 * 40).complete_letters(), 26);
    }
}
