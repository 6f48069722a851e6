//! Integration tests for the speaking state machine
//!
//! Uses the in-memory playback device so results can be inspected without
//! any audio hardware.

use animalese::playback::backends::memory::{MemoryDevice, MemoryHandle};
use animalese::playback::{create_device, DeviceChoice};
use animalese::{AnimaleseError, PlaybackState, Speaker, VoiceBank, VoiceSettings};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn bank() -> Arc<VoiceBank> {
    // 1000Hz keeps buffers small: 150 samples per letter
    let samples = (0..26 * 150).map(|i| ((i % 150) as f32 / 150.0) - 0.5).collect();
    Arc::new(VoiceBank::from_samples(samples, 1000).unwrap())
}

fn ready_speaker(settings: VoiceSettings) -> (Speaker, MemoryHandle) {
    let device = MemoryDevice::new();
    let handle = device.handle();
    let mut speaker = Speaker::new(Box::new(device), settings);
    speaker.load_bank(bank());
    (speaker, handle)
}

#[test]
fn test_speak_before_load_fails_fast() {
    let device = MemoryDevice::new();
    let handle = device.handle();
    let mut speaker = Speaker::new(Box::new(device), VoiceSettings::default());

    assert!(!speaker.is_initialized());
    assert!(matches!(speaker.speak("hello"), Err(AnimaleseError::NotInitialized)));
    assert!(matches!(
        speaker.speak_synced("hello", 0.05),
        Err(AnimaleseError::NotInitialized)
    ));
    assert_eq!(handle.play_count(), 0);
    assert_eq!(speaker.state(), PlaybackState::Idle);
}

#[test]
fn test_speak_transitions_to_speaking() {
    let (mut speaker, handle) = ready_speaker(VoiceSettings::default());
    assert_eq!(speaker.state(), PlaybackState::Idle);

    speaker.speak("hello").unwrap();
    assert_eq!(speaker.state(), PlaybackState::Speaking);
    assert!(speaker.is_speaking());
    assert_eq!(handle.play_count(), 1);
}

#[test]
fn test_completion_returns_to_idle() {
    let (mut speaker, handle) = ready_speaker(VoiceSettings::default());
    speaker.speak("hello").unwrap();

    handle.finish();
    assert!(!speaker.is_speaking());
    assert_eq!(speaker.state(), PlaybackState::Idle);
}

#[test]
fn test_memory_device_finishes_on_its_own() {
    let device = create_device(&DeviceChoice::Memory).unwrap();
    let mut speaker = Speaker::new(device, VoiceSettings::default());
    speaker.load_bank(bank());

    // Two 0.05s slots at 1000Hz
    speaker.speak("hi").unwrap();
    assert!(speaker.is_speaking());

    let started = Instant::now();
    while speaker.is_speaking() {
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "speech never finished"
        );
        thread::sleep(Duration::from_millis(10));
    }
    assert!(started.elapsed() < Duration::from_millis(500));
    assert_eq!(speaker.state(), PlaybackState::Idle);
}

#[test]
fn test_stop_is_idempotent() {
    let (mut speaker, _handle) = ready_speaker(VoiceSettings::default());

    assert!(speaker.stop().is_ok());
    assert_eq!(speaker.state(), PlaybackState::Idle);

    speaker.speak("hi").unwrap();
    speaker.stop().unwrap();
    speaker.stop().unwrap();
    assert_eq!(speaker.state(), PlaybackState::Idle);
    assert!(!speaker.is_speaking());
}

#[test]
fn test_new_speech_replaces_old() {
    let (mut speaker, handle) = ready_speaker(VoiceSettings::default());
    speaker.speak("first line").unwrap();
    let stops_before = handle.stop_count();

    speaker.speak("second").unwrap();
    assert_eq!(handle.stop_count(), stops_before + 1);
    assert_eq!(handle.play_count(), 2);
    assert_eq!(handle.last().unwrap().buffer.slot_count(), 6);
    assert!(speaker.is_speaking());
}

#[test]
fn test_synced_duration_uses_multiplier() {
    let settings = VoiceSettings::default().with_duration_multiplier(2.0);
    let (mut speaker, handle) = ready_speaker(settings);

    speaker.speak_synced("abc", 0.04).unwrap();
    let played = handle.last().unwrap();
    // 0.04s * 2.0 at 1000Hz
    assert_eq!(played.buffer.samples_per_slot(), 80);
    assert_eq!(played.buffer.len(), 240);
}

#[test]
fn test_synced_pitch_keeps_length() {
    let (mut speaker, handle) = ready_speaker(VoiceSettings::default());

    speaker.speak_synced_with_pitch("abc", 0.05, 0.5).unwrap();
    let low = handle.last().unwrap().buffer;
    speaker.speak_synced_with_pitch("abc", 0.05, 2.0).unwrap();
    let high = handle.last().unwrap().buffer;

    assert_eq!(low.len(), high.len());
    assert_ne!(low.samples(), high.samples());
}

#[test]
fn test_volume_passed_to_device() {
    let settings = VoiceSettings::default().with_volume(0.25);
    let (mut speaker, handle) = ready_speaker(settings);
    speaker.speak_with_pitch("yo", 1.5).unwrap();
    assert_eq!(handle.last().unwrap().volume, 0.25);
}

#[test]
fn test_no_audio_leaves_state_unchanged() {
    let (mut speaker, handle) = ready_speaker(VoiceSettings::default());

    let err = speaker.speak("").unwrap_err();
    assert!(err.is_no_audio());
    assert_eq!(speaker.state(), PlaybackState::Idle);

    let err = speaker.speak_synced("a b", 0.0).unwrap_err();
    assert!(matches!(err, AnimaleseError::DegenerateDuration(_)));
    assert_eq!(speaker.state(), PlaybackState::Idle);
    assert_eq!(handle.play_count(), 0);
}

#[test]
fn test_huge_sync_duration_is_rejected() {
    let (mut speaker, handle) = ready_speaker(VoiceSettings::default());

    let err = speaker.speak_synced("ab", 1.0e30).unwrap_err();
    assert!(matches!(err, AnimaleseError::DegenerateDuration(_)));
    assert_eq!(speaker.state(), PlaybackState::Idle);
    assert_eq!(handle.play_count(), 0);
}
