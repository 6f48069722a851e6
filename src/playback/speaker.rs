//! Speaking state machine
//!
//! A `Speaker` owns one playback device and plays at most one utterance at
//! a time. Every successful speak call stops whatever is playing and
//! replaces it; there is no queue.

use super::PlaybackDevice;
use crate::speech::{text, OutputBuffer, Synthesizer};
use crate::voice::settings::{clamp, PITCH_RANGE};
use crate::voice::{VoiceBank, VoiceSettings};
use crate::{AnimaleseError, Result};
use log::{debug, info, warn};
use std::sync::Arc;

/// Whether the speaker believes audio is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Speaking,
}

/// Text-to-babble front end used by dialogue UIs
pub struct Speaker {
    synth: Option<Synthesizer>,
    device: Box<dyn PlaybackDevice>,
    settings: VoiceSettings,
    state: PlaybackState,
}

impl Speaker {
    /// Create a speaker with no voice bank loaded yet
    ///
    /// Speak calls fail with `NotInitialized` until `load_bank` is called.
    pub fn new(device: Box<dyn PlaybackDevice>, settings: VoiceSettings) -> Self {
        debug!("Creating speaker on {} device", device.name());
        Self {
            synth: None,
            device,
            settings,
            state: PlaybackState::Idle,
        }
    }

    /// Install the voice bank used for all further speech
    pub fn load_bank(&mut self, bank: Arc<VoiceBank>) {
        info!(
            "Speaker ready: {}Hz, {} samples per letter",
            bank.sample_rate(),
            bank.samples_per_letter()
        );
        self.synth = Some(Synthesizer::new(bank));
    }

    pub fn is_initialized(&self) -> bool {
        self.synth.is_some()
    }

    pub fn settings(&self) -> &VoiceSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut VoiceSettings {
        &mut self.settings
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Speak at the configured letter duration and pitch
    pub fn speak(&mut self, text: &str) -> Result<()> {
        let duration = self.settings.letter_duration();
        let pitch = self.settings.pitch();
        self.speak_internal(text, duration, pitch)
    }

    /// Speak at the configured letter duration with a one-off pitch
    ///
    /// The pitch is clamped to 0.5-2.0 and does not change the settings.
    pub fn speak_with_pitch(&mut self, text: &str, pitch: f32) -> Result<()> {
        let duration = self.settings.letter_duration();
        self.speak_internal(text, duration, clamp(pitch, PITCH_RANGE, self.settings.pitch()))
    }

    /// Speak in step with an external reveal of `seconds_per_char`
    ///
    /// The slot length is `seconds_per_char` times the configured duration
    /// multiplier.
    pub fn speak_synced(&mut self, text: &str, seconds_per_char: f32) -> Result<()> {
        let pitch = self.settings.pitch();
        self.speak_synced_with_pitch(text, seconds_per_char, pitch)
    }

    /// `speak_synced` with a one-off pitch
    pub fn speak_synced_with_pitch(
        &mut self,
        text: &str,
        seconds_per_char: f32,
        pitch: f32,
    ) -> Result<()> {
        let duration = seconds_per_char * self.settings.duration_multiplier();
        let pitch = clamp(pitch, PITCH_RANGE, self.settings.pitch());
        self.speak_internal(text, duration, pitch)?;
        debug!(
            "Synced speech: {:.3}s per char, multiplier {:.2}",
            seconds_per_char,
            self.settings.duration_multiplier()
        );
        Ok(())
    }

    /// Render without playing, using the configured voice settings
    pub fn render(&self, text: &str, duration_per_char: f32, pitch: f32) -> Result<OutputBuffer> {
        let synth = self.synth.as_ref().ok_or(AnimaleseError::NotInitialized)?;
        let prepared = text::prepare(text, self.settings.shorten_words);
        synth.synthesize(&prepared, duration_per_char, pitch)
    }

    fn speak_internal(&mut self, text: &str, duration_per_char: f32, pitch: f32) -> Result<()> {
        // Synthesis failures leave the current utterance untouched
        let buffer = match self.render(text, duration_per_char, pitch) {
            Ok(buffer) => buffer,
            Err(e) => {
                warn!("Not speaking: {}", e);
                return Err(e);
            }
        };

        self.device.stop()?;
        self.state = PlaybackState::Idle;

        self.device.play(&buffer, self.settings.volume())?;
        self.state = PlaybackState::Speaking;

        info!(
            "Speaking {} chars, duration {:.2}s, pitch {:.2}",
            buffer.slot_count(),
            buffer.duration().as_secs_f32(),
            pitch
        );
        Ok(())
    }

    /// Halt speech immediately; safe to call while idle
    pub fn stop(&mut self) -> Result<()> {
        debug!("Stopping speech");
        self.device.stop()?;
        self.state = PlaybackState::Idle;
        Ok(())
    }

    /// True while an utterance is playing
    ///
    /// Polls the device; once it reports the audio finished, the speaker
    /// moves back to `Idle`.
    pub fn is_speaking(&mut self) -> bool {
        if self.state == PlaybackState::Speaking && !self.device.is_active() {
            debug!("Playback finished");
            self.state = PlaybackState::Idle;
        }
        self.state == PlaybackState::Speaking
    }
}

impl Drop for Speaker {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
