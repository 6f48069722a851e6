//! Voice parameters applied by the speaker

/// Allowed pitch factor range
pub const PITCH_RANGE: (f32, f32) = (0.5, 2.0);
/// Allowed standalone letter duration range (seconds)
pub const LETTER_DURATION_RANGE: (f32, f32) = (0.02, 0.15);
/// Allowed volume range
pub const VOLUME_RANGE: (f32, f32) = (0.0, 1.0);
/// Allowed sync duration multiplier range
pub const DURATION_MULTIPLIER_RANGE: (f32, f32) = (0.5, 3.0);

/// Tunable voice parameters
///
/// Every setter clamps into its range, so a `VoiceSettings` value is always
/// safe to synthesize with.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    pitch: f32,
    letter_duration: f32,
    volume: f32,
    duration_multiplier: f32,

    /// Reduce every word to its first and last letter before speaking
    pub shorten_words: bool,
}

impl VoiceSettings {
    pub fn new() -> Self {
        Self {
            pitch: 1.0,
            letter_duration: 0.05,
            volume: 0.6,
            duration_multiplier: 1.0,
            shorten_words: false,
        }
    }

    /// Pitch factor (1.0 = recorded voice, <1 deeper, >1 higher)
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = clamp(pitch, PITCH_RANGE, 1.0);
    }

    /// Seconds per character for unsynced speech
    pub fn letter_duration(&self) -> f32 {
        self.letter_duration
    }

    pub fn set_letter_duration(&mut self, seconds: f32) {
        self.letter_duration = clamp(seconds, LETTER_DURATION_RANGE, 0.05);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp(volume, VOLUME_RANGE, 0.6);
    }

    /// Stretch applied on top of a caller's seconds-per-character schedule
    ///
    /// 1.0 matches the reveal exactly, 2.0 makes the voice twice as slow.
    pub fn duration_multiplier(&self) -> f32 {
        self.duration_multiplier
    }

    pub fn set_duration_multiplier(&mut self, multiplier: f32) {
        self.duration_multiplier = clamp(multiplier, DURATION_MULTIPLIER_RANGE, 1.0);
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.set_pitch(pitch);
        self
    }

    pub fn with_letter_duration(mut self, seconds: f32) -> Self {
        self.set_letter_duration(seconds);
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.set_volume(volume);
        self
    }

    pub fn with_duration_multiplier(mut self, multiplier: f32) -> Self {
        self.set_duration_multiplier(multiplier);
        self
    }

    pub fn with_shorten_words(mut self, shorten: bool) -> Self {
        self.shorten_words = shorten;
        self
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp into `range`, replacing NaN with `fallback`
pub(crate) fn clamp(value: f32, range: (f32, f32), fallback: f32) -> f32 {
    if value.is_nan() {
        return fallback;
    }
    value.clamp(range.0, range.1)
}
