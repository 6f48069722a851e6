//! In-memory playback backend
//!
//! Keeps the most recent buffers it is asked to play and reports each one
//! as playing for its real duration, like a sound card that discards the
//! audio. A `MemoryHandle` shares the recording with the owner of the
//! boxed device and can end playback early.

use crate::playback::PlaybackDevice;
use crate::speech::OutputBuffer;
use crate::Result;
use log::debug;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// Recordings kept by a default `MemoryDevice`
pub const DEFAULT_HISTORY: usize = 16;

/// One `play` call
#[derive(Debug, Clone)]
pub struct Recording {
    pub buffer: OutputBuffer,
    pub volume: f32,
}

#[derive(Debug)]
struct MemoryLog {
    recordings: VecDeque<Recording>,
    history: usize,
    plays: usize,
    stops: usize,
    /// When the current buffer runs out
    playing_until: Option<Instant>,
}

impl MemoryLog {
    fn is_active(&self) -> bool {
        self.playing_until.map_or(false, |end| Instant::now() < end)
    }
}

/// Shared view of a `MemoryDevice`
#[derive(Debug, Clone)]
pub struct MemoryHandle {
    log: Arc<Mutex<MemoryLog>>,
}

impl MemoryHandle {
    fn lock(&self) -> MutexGuard<'_, MemoryLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Retained recordings, oldest first
    pub fn recordings(&self) -> Vec<Recording> {
        self.lock().recordings.iter().cloned().collect()
    }

    pub fn last(&self) -> Option<Recording> {
        self.lock().recordings.back().cloned()
    }

    /// Total number of `play` calls, including dropped recordings
    pub fn play_count(&self) -> usize {
        self.lock().plays
    }

    pub fn stop_count(&self) -> usize {
        self.lock().stops
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_active()
    }

    /// End the current buffer now instead of at its natural end
    pub fn finish(&self) {
        self.lock().playing_until = None;
    }
}

#[derive(Debug)]
pub struct MemoryDevice {
    handle: MemoryHandle,
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY)
    }

    /// Device keeping at most `history` recordings (at least one)
    pub fn with_history(history: usize) -> Self {
        let log = MemoryLog {
            recordings: VecDeque::new(),
            history: history.max(1),
            plays: 0,
            stops: 0,
            playing_until: None,
        };
        Self {
            handle: MemoryHandle {
                log: Arc::new(Mutex::new(log)),
            },
        }
    }

    pub fn handle(&self) -> MemoryHandle {
        self.handle.clone()
    }
}

impl Default for MemoryDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackDevice for MemoryDevice {
    fn play(&mut self, buffer: &OutputBuffer, volume: f32) -> Result<()> {
        debug!("Recording {} samples in memory", buffer.len());
        let mut log = self.handle.lock();
        if log.recordings.len() == log.history {
            log.recordings.pop_front();
        }
        log.recordings.push_back(Recording {
            buffer: buffer.clone(),
            volume,
        });
        log.plays += 1;
        log.playing_until = Some(Instant::now() + buffer.duration());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let mut log = self.handle.lock();
        log.stops += 1;
        log.playing_until = None;
        Ok(())
    }

    fn is_active(&mut self) -> bool {
        self.handle.is_active()
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
