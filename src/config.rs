//! Configuration management

use crate::playback::DeviceChoice;
use crate::voice::VoiceSettings;
use crate::{AnimaleseError, Result};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Persistent synthesizer settings
///
/// Backed by an INI file (`~/.animalese.cfg`) with `[voice]`, `[bank]` and
/// `[playback]` sections.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// File the configuration was loaded from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `~/.animalese.cfg`, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, writing defaults there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(path)
                .map_err(|e| AnimaleseError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(path)
                .map_err(|e| AnimaleseError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self {
            ini,
            path: Some(path.to_path_buf()),
        })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| AnimaleseError::Config("Config has no file to save to".to_string()))?;
        debug!("Saving config to {:?}", path);
        self.ini
            .write_to_file(path)
            .map_err(|e| AnimaleseError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.animalese.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".animalese.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let defaults = VoiceSettings::default();
        let mut ini = Ini::new();

        ini.with_section(Some("voice"))
            .set("pitch", defaults.pitch().to_string())
            .set("letter_duration", defaults.letter_duration().to_string())
            .set("volume", defaults.volume().to_string())
            .set("duration_multiplier", defaults.duration_multiplier().to_string())
            .set("shorten_words", defaults.shorten_words.to_string());

        ini.with_section(Some("bank"));

        ini.with_section(Some("playback")).set("device", "auto");

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Voice parameters, clamped into their valid ranges
    pub fn voice_settings(&self) -> VoiceSettings {
        let defaults = VoiceSettings::default();
        VoiceSettings::new()
            .with_pitch(self.get_float("voice", "pitch", defaults.pitch()))
            .with_letter_duration(self.get_float(
                "voice",
                "letter_duration",
                defaults.letter_duration(),
            ))
            .with_volume(self.get_float("voice", "volume", defaults.volume()))
            .with_duration_multiplier(self.get_float(
                "voice",
                "duration_multiplier",
                defaults.duration_multiplier(),
            ))
            .with_shorten_words(self.get_bool("voice", "shorten_words", defaults.shorten_words))
    }

    /// Voice bank recording, if one is configured
    pub fn bank_path(&self) -> Option<PathBuf> {
        self.ini
            .get_from(Some("bank"), "path")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    /// Playback device selection
    pub fn device(&self) -> Result<DeviceChoice> {
        DeviceChoice::parse(&self.get_string("playback", "device", "auto"))
    }
}

/// Parse configuration from INI text without touching the disk
impl FromStr for Config {
    type Err = AnimaleseError;

    fn from_str(contents: &str) -> Result<Self> {
        let ini = Ini::load_from_str(contents)
            .map_err(|e| AnimaleseError::IniParse(format!("Failed to parse config: {}", e)))?;
        Ok(Self { ini, path: None })
    }
}
