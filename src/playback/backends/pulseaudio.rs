//! PulseAudio backend using pacat
//!
//! Streams raw 32-bit float mono samples into a `pacat` child process.
//! Works on native Linux and on WSL with WSLg, where the PulseAudio server
//! is exposed at /mnt/wslg/PulseServer.
//!
//! Dependencies:
//! - pacat (install with: sudo apt install pulseaudio-utils)

use crate::playback::PlaybackDevice;
use crate::speech::OutputBuffer;
use crate::{AnimaleseError, Result};
use log::{debug, error, info};
use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::thread;

/// PulseAudio backend
pub struct PulseAudioDevice {
    /// Currently running pacat process
    current_process: Option<Child>,

    /// Path to pacat
    pacat_path: String,
}

impl PulseAudioDevice {
    /// Point PULSE_SERVER at the WSLg socket when it exists
    fn setup_pulseaudio() {
        const WSLG_PULSE_PATH: &str = "/mnt/wslg/PulseServer";

        if std::env::var("PULSE_SERVER").is_ok() {
            debug!("PULSE_SERVER already set via environment");
            return;
        }

        if std::path::Path::new(WSLG_PULSE_PATH).exists() {
            info!("Auto-detected WSLG PulseAudio server at {}", WSLG_PULSE_PATH);
            std::env::set_var("PULSE_SERVER", WSLG_PULSE_PATH);
            return;
        }

        // pacat falls back to the default socket
        debug!("Using default PulseAudio configuration");
    }

    /// Create a new PulseAudio device
    ///
    /// Verifies pacat is installed
    pub fn new() -> Result<Self> {
        debug!("Creating PulseAudio backend");

        Self::setup_pulseaudio();

        let pacat_path = Self::find_pacat()?;
        debug!("Found pacat at: {}", pacat_path);

        Ok(Self {
            current_process: None,
            pacat_path,
        })
    }

    /// Find pacat executable
    fn find_pacat() -> Result<String> {
        let paths = ["pacat", "/usr/bin/pacat"];

        for path in paths {
            if let Ok(status) = Command::new(path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                if status.success() {
                    return Ok(path.to_string());
                }
            }
        }

        Err(AnimaleseError::Playback(
            "pacat not found. Install with: sudo apt install pulseaudio-utils".to_string(),
        ))
    }

    /// Scale samples by volume and encode as little-endian f32
    fn encode_samples(samples: &[f32], volume: f32) -> Vec<u8> {
        samples
            .iter()
            .flat_map(|&s| (s * volume).to_le_bytes())
            .collect()
    }

    /// Kill the running pacat process, if any
    fn cancel_process(&mut self) {
        if let Some(mut child) = self.current_process.take() {
            debug!("Killing pacat process");
            match child.kill() {
                Ok(_) => {
                    let _ = child.wait(); // Clean up zombie
                }
                Err(e) => {
                    debug!("Failed to kill pacat process: {}", e);
                }
            }
        }
    }
}

impl PlaybackDevice for PulseAudioDevice {
    fn play(&mut self, buffer: &OutputBuffer, volume: f32) -> Result<()> {
        self.cancel_process();

        let mut cmd = Command::new(&self.pacat_path);
        cmd.arg("--playback")
            .arg("--raw")
            .arg("--format=float32le")
            .arg("--channels=1")
            .arg(format!("--rate={}", buffer.sample_rate()))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let mut child = cmd.spawn().map_err(|e| {
            error!("Failed to spawn pacat: {}", e);
            AnimaleseError::Playback(format!("Failed to start pacat: {}", e))
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AnimaleseError::Playback("pacat stdin unavailable".to_string()))?;
        let bytes = Self::encode_samples(buffer.samples(), volume);

        // Feed on a separate thread so speak() returns immediately. Closing
        // stdin lets pacat drain and exit on its own.
        thread::spawn(move || {
            if let Err(e) = stdin.write_all(&bytes) {
                debug!("pacat stream ended early: {}", e);
            }
        });

        debug!(
            "pacat started: {} samples at {}Hz",
            buffer.len(),
            buffer.sample_rate()
        );
        self.current_process = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        debug!("Stopping playback");
        self.cancel_process();
        Ok(())
    }

    fn is_active(&mut self) -> bool {
        let Some(child) = self.current_process.as_mut() else {
            return false;
        };

        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                debug!("pacat exited: {}", status);
                self.current_process = None;
                false
            }
            Err(e) => {
                debug!("Failed to poll pacat: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "pulseaudio"
    }
}

impl Drop for PulseAudioDevice {
    fn drop(&mut self) {
        debug!("Shutting down PulseAudio backend");
        self.cancel_process();
    }
}
