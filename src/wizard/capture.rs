//! # Capture Devices
//!
//! Microphone and camera access for the voice and barcode methods. A device is
//! acquired on `start` and released on `stop`/`abort`; a [`CaptureSlot`]
//! releases an active device when it is dropped, so no capture outlives the
//! input step that owns it.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::path::PathBuf;

use super::error::CaptureError;

/// A finished voice recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub path: PathBuf,
}

impl AudioClip {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// A hardware resource that captures one artifact per start/stop cycle.
pub trait CaptureDevice: Send {
    type Output;

    /// Acquires the device and begins capturing.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Finishes capturing, releases the device, and returns the artifact.
    fn stop(&mut self) -> Result<Self::Output, CaptureError>;

    /// Releases the device and discards anything captured.
    fn abort(&mut self);

    fn is_active(&self) -> bool;
}

/// Boxed microphone.
pub type Recorder = Box<dyn CaptureDevice<Output = AudioClip>>;

/// Boxed barcode camera; yields the decoded code.
pub type Scanner = Box<dyn CaptureDevice<Output = String>>;

/// Owns an optional device and releases it on drop.
pub struct CaptureSlot<O> {
    device: Option<Box<dyn CaptureDevice<Output = O>>>,
    device_name: &'static str,
}

impl<O> CaptureSlot<O> {
    pub fn new(device: Option<Box<dyn CaptureDevice<Output = O>>>, device_name: &'static str) -> Self {
        Self {
            device,
            device_name,
        }
    }

    pub fn is_available(&self) -> bool {
        self.device.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.device.as_ref().is_some_and(|d| d.is_active())
    }

    pub fn start(&mut self) -> Result<(), CaptureError> {
        let device = self.device.as_mut().ok_or(CaptureError::Unavailable {
            device: self.device_name,
        })?;
        if device.is_active() {
            return Err(CaptureError::AlreadyActive {
                device: self.device_name,
            });
        }
        tracing::debug!(device = self.device_name, "capture started");
        device.start()
    }

    pub fn stop(&mut self) -> Result<O, CaptureError> {
        let device = self.device.as_mut().ok_or(CaptureError::Unavailable {
            device: self.device_name,
        })?;
        if !device.is_active() {
            return Err(CaptureError::NotActive {
                device: self.device_name,
            });
        }
        tracing::debug!(device = self.device_name, "capture stopped");
        device.stop()
    }

    pub fn abort(&mut self) {
        if let Some(device) = self.device.as_mut() {
            if device.is_active() {
                tracing::debug!(device = self.device_name, "capture aborted");
                device.abort();
            }
        }
    }
}

impl<O> Drop for CaptureSlot<O> {
    fn drop(&mut self) {
        self.abort();
    }
}
