//! Voice recording input collector.

use std::path::PathBuf;

use crate::wizard::{
    capture::{AudioClip, CaptureSlot, Recorder},
    error::{CaptureError, ValidationError},
};

/// Microphone plus the last finished recording.
///
/// The microphone is released when recording stops or when the entry is dropped.
pub struct VoiceEntry {
    mic: CaptureSlot<AudioClip>,
    clip: Option<AudioClip>,
}

impl VoiceEntry {
    pub fn new(recorder: Option<Recorder>) -> Self {
        Self {
            mic: CaptureSlot::new(recorder, "microphone"),
            clip: None,
        }
    }

    pub fn can_record(&self) -> bool {
        self.mic.is_available()
    }

    pub fn is_recording(&self) -> bool {
        self.mic.is_active()
    }

    /// Starts a new recording, discarding the previous clip.
    pub fn start_recording(&mut self) -> Result<(), CaptureError> {
        self.mic.start()?;
        self.clip = None;
        Ok(())
    }

    pub fn stop_recording(&mut self) -> Result<&AudioClip, CaptureError> {
        let clip = self.mic.stop()?;
        Ok(self.clip.insert(clip))
    }

    /// Uses an existing audio file instead of recording.
    pub fn use_file(&mut self, path: impl Into<PathBuf>) {
        self.mic.abort();
        self.clip = Some(AudioClip::new(path));
    }

    pub const fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    pub fn discard(&mut self) {
        self.mic.abort();
        self.clip = None;
    }

    /// Returns the finished clip if one exists on disk.
    pub fn validate(&self) -> Result<AudioClip, ValidationError> {
        if self.is_recording() {
            return Err(ValidationError::NoRecording);
        }
        let clip = self.clip.as_ref().ok_or(ValidationError::NoRecording)?;
        if !clip.path.is_file() {
            return Err(ValidationError::FileNotFound(clip.path.clone()));
        }
        Ok(clip.clone())
    }
}
