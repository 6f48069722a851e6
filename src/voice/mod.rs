//! Letter sample library and voice parameters

pub mod bank;
pub mod loader;
pub mod settings;

pub use bank::{VoiceBank, LETTER_COUNT, LIBRARY_LETTER_DURATION};
pub use loader::{default_fallbacks, load_wav, load_wav_file, resolve_source};
pub use settings::VoiceSettings;
