//! Error types for the Animalese synthesizer

use std::io;
use thiserror::Error;

/// Failure to obtain a usable voice bank
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("voice bank source missing and no fallback found")]
    SourceMissing,

    #[error("voice bank unreadable: {0}")]
    Unreadable(String),
}

/// Main error type for Animalese
#[derive(Error, Debug)]
pub enum AnimaleseError {
    #[error("Voice bank error: {0}")]
    Load(#[from] LoadError),

    #[error("Voice bank not initialized")]
    NotInitialized,

    #[error("Cannot speak empty text")]
    EmptyInput,

    #[error("No audio produced: unusable duration of {0}s per character")]
    DegenerateDuration(f32),

    #[error("Invalid pitch factor: {0}")]
    InvalidPitch(f32),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("{0}")]
    Other(String),
}

impl AnimaleseError {
    /// True for the conditions where synthesis produced nothing to play
    ///
    /// Callers driving a typewriter reveal treat these as "stay silent"
    /// rather than as failures.
    pub fn is_no_audio(&self) -> bool {
        matches!(
            self,
            AnimaleseError::EmptyInput | AnimaleseError::DegenerateDuration(_)
        )
    }
}

/// Result type alias for Animalese operations
pub type Result<T> = std::result::Result<T, AnimaleseError>;

impl From<String> for AnimaleseError {
    fn from(s: String) -> Self {
        AnimaleseError::Other(s)
    }
}

impl From<&str> for AnimaleseError {
    fn from(s: &str) -> Self {
        AnimaleseError::Other(s.to_string())
    }
}
