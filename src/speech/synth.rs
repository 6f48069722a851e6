//! Letter resampling synthesizer
//!
//! Each character of the input gets a fixed-width slot in the output. For a
//! letter, the slot is filled by walking that letter's recording at `pitch`
//! source samples per output sample, so pitch changes the voice without
//! changing how long the slot lasts. Anything that is not a letter is a
//! silent slot, which keeps word and sentence pacing intact.

use super::buffer::OutputBuffer;
use crate::voice::VoiceBank;
use crate::{AnimaleseError, Result};
use log::debug;
use std::sync::Arc;

/// Samples ramped at each end of a letter slot to avoid clicks
pub const FADE_SAMPLES: usize = 64;

/// Longest slot accepted for a single character (seconds)
pub const MAX_SECONDS_PER_CHAR: f32 = 10.0;

/// Resynthesizes text from a voice bank
#[derive(Debug, Clone)]
pub struct Synthesizer {
    bank: Arc<VoiceBank>,
}

impl Synthesizer {
    pub fn new(bank: Arc<VoiceBank>) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &VoiceBank {
        &self.bank
    }

    /// Output samples per character for a given slot duration
    ///
    /// Zero for durations that are not positive or exceed
    /// `MAX_SECONDS_PER_CHAR`.
    pub fn samples_per_slot(&self, duration_per_char: f32) -> usize {
        if !(duration_per_char > 0.0) || duration_per_char > MAX_SECONDS_PER_CHAR {
            return 0;
        }
        (duration_per_char * self.bank.sample_rate() as f32).floor() as usize
    }

    /// Render `text` with `duration_per_char` seconds per character
    ///
    /// Fails with `EmptyInput` for empty text, `DegenerateDuration` when the
    /// duration rounds down to zero samples or is longer than
    /// `MAX_SECONDS_PER_CHAR`, and `InvalidPitch` for a pitch
    /// that is not a positive finite number. Out-of-range reads from the
    /// bank are silence, never errors.
    pub fn synthesize(&self, text: &str, duration_per_char: f32, pitch: f32) -> Result<OutputBuffer> {
        if text.is_empty() {
            return Err(AnimaleseError::EmptyInput);
        }
        if !(pitch > 0.0) || !pitch.is_finite() {
            return Err(AnimaleseError::InvalidPitch(pitch));
        }

        let slot_len = self.samples_per_slot(duration_per_char);
        let char_count = text.chars().count();
        let total = match char_count.checked_mul(slot_len) {
            Some(total) if total > 0 => total,
            _ => return Err(AnimaleseError::DegenerateDuration(duration_per_char)),
        };

        let mut samples = vec![0.0f32; total];
        for (slot, ch) in samples.chunks_exact_mut(slot_len).zip(text.chars()) {
            if let Some((start, _)) = self.bank.letter_slice(ch.to_ascii_uppercase()) {
                self.render_letter(slot, start, pitch);
            }
        }

        debug!(
            "Generated {} samples for {} chars ({} per char), pitch {:.2}",
            total, char_count, slot_len, pitch
        );

        Ok(OutputBuffer::new(samples, self.bank.sample_rate(), slot_len))
    }

    /// Fill one slot from the recording starting at `start`
    fn render_letter(&self, slot: &mut [f32], start: usize, pitch: f32) {
        let len = slot.len();
        let step = pitch as f64;

        for (i, out) in slot.iter_mut().enumerate() {
            // Past the end of the recording stays silent, and so does
            // every later offset in this slot.
            let Some(sample) = self.bank.sample_at(start, i as f64 * step) else {
                break;
            };
            *out = sample * fade_gain(i, len);
        }
    }
}

/// Anti-click envelope for offset `i` in a slot of `len` samples
///
/// Ramps 0 -> 1 over the first `FADE_SAMPLES` and 1 -> 0 over the last,
/// landing exactly on zero at both ends. Short slots get the product of
/// both ramps where they overlap.
pub fn fade_gain(i: usize, len: usize) -> f32 {
    let fade = FADE_SAMPLES as f32;
    let mut gain = 1.0;

    if i < FADE_SAMPLES {
        gain *= i as f32 / fade;
    }
    if i + FADE_SAMPLES >= len {
        gain *= len.saturating_sub(i + 1) as f32 / fade;
    }

    gain
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bank where every letter is a constant level: A = 0.01, B = 0.02, ...
    fn stepped_bank(rate: u32) -> Arc<VoiceBank> {
        let per_letter = (0.15 * rate as f32).floor() as usize;
        let samples = (0..26 * per_letter)
            .map(|i| ((i / per_letter) + 1) as f32 / 100.0)
            .collect();
        Arc::new(VoiceBank::from_samples(samples, rate).unwrap())
    }

    #[test]
    fn test_fade_gain_ends() {
        assert_eq!(fade_gain(0, 1000), 0.0);
        assert_eq!(fade_gain(32, 1000), 0.5);
        assert_eq!(fade_gain(64, 1000), 1.0);
        assert_eq!(fade_gain(500, 1000), 1.0);
        assert_eq!(fade_gain(935, 1000), 1.0);
        assert_eq!(fade_gain(936, 1000), 63.0 / 64.0);
        assert_eq!(fade_gain(999, 1000), 0.0);
    }

    #[test]
    fn test_fade_gain_overlap_multiplies() {
        // 100-sample slot: offsets 36..64 are inside both ramps
        let len = 100;
        assert_eq!(fade_gain(40, len), (40.0 / 64.0) * (59.0 / 64.0));
        assert_eq!(fade_gain(10, len), 10.0 / 64.0);
        assert_eq!(fade_gain(90, len), 9.0 / 64.0);
    }

    #[test]
    fn test_slot_length_formula() {
        let synth = Synthesizer::new(stepped_bank(1000));
        let out = synth.synthesize("abc de", 0.2, 1.0).unwrap();
        assert_eq!(out.samples_per_slot(), 200);
        assert_eq!(out.len(), 6 * 200);
        assert_eq!(out.sample_rate(), 1000);
    }

    #[test]
    fn test_letter_values_and_silence() {
        let synth = Synthesizer::new(stepped_bank(1000));
        let out = synth.synthesize("b!", 0.2, 1.0).unwrap();

        let letter = out.slot(0).unwrap();
        assert_eq!(letter[100], 0.02);
        assert_eq!(letter[0], 0.0);
        assert_eq!(letter[199], 0.0);
        assert!(out.slot(1).unwrap().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_high_pitch_bleeds_into_next_letter() {
        // 'A' block is 150 samples; at pitch 2 offset 100 reads sample 200
        let synth = Synthesizer::new(stepped_bank(1000));
        let out = synth.synthesize("a", 0.2, 2.0).unwrap();
        assert_eq!(out.samples()[100], 0.02);
    }

    #[test]
    fn test_truncated_bank_reads_silence() {
        let bank = VoiceBank::from_samples(vec![0.5; 300], 1000).unwrap();
        let synth = Synthesizer::new(Arc::new(bank));
        // 'Z' starts far beyond the 300 available samples
        let out = synth.synthesize("z", 0.2, 1.0).unwrap();
        assert!(out.samples().iter().all(|&s| s == 0.0));

        // 'B' starts at 150; only 150 samples remain for a 200-sample slot
        let out = synth.synthesize("b", 0.2, 1.0).unwrap();
        assert_eq!(out.samples()[100], 0.5);
        assert!(out.samples()[150..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_rejected_inputs() {
        let synth = Synthesizer::new(stepped_bank(1000));
        assert!(matches!(synth.synthesize("", 0.1, 1.0), Err(AnimaleseError::EmptyInput)));
        assert!(matches!(
            synth.synthesize("a b", 0.0, 1.0),
            Err(AnimaleseError::DegenerateDuration(_))
        ));
        assert!(matches!(
            synth.synthesize("a", 0.0005, 1.0),
            Err(AnimaleseError::DegenerateDuration(_))
        ));
        assert!(matches!(
            synth.synthesize("ab", 1.0e30, 1.0),
            Err(AnimaleseError::DegenerateDuration(_))
        ));
        assert!(matches!(
            synth.synthesize("ab", f32::INFINITY, 1.0),
            Err(AnimaleseError::DegenerateDuration(_))
        ));
        assert!(matches!(
            synth.synthesize("a", 0.1, 0.0),
            Err(AnimaleseError::InvalidPitch(_))
        ));
        assert!(matches!(
            synth.synthesize("a", 0.1, f32::NAN),
            Err(AnimaleseError::InvalidPitch(_))
        ));
    }
}
