//! Microphone and camera backed by configured commands.
//!
//! The `record` command receives the output file path and records until it is
//! killed. The `scan` command prints one decoded barcode and exits.

use std::{
    fs, io,
    path::PathBuf,
    process::{Child, Command, Stdio},
};

use chrono::Utc;

use crate::{
    converter::Converter,
    wizard::{AudioClip, CaptureDevice, CaptureError},
};

fn spawn_error(device: &'static str, err: &io::Error) -> CaptureError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        CaptureError::PermissionDenied { device }
    } else {
        CaptureError::Failed {
            device,
            message: err.to_string(),
        }
    }
}

fn command(converter: &Converter) -> Command {
    let mut cmd = Command::new(converter.program());
    cmd.args(converter.args());
    cmd
}

fn kill(child: &mut Child) {
    // Already-exited children report an error here; either way it is gone.
    let _ = child.kill();
    let _ = child.wait();
}

/// Records audio files into a scratch directory.
pub struct CommandRecorder {
    converter: Converter,
    output_dir: PathBuf,
    child: Option<Child>,
    target: Option<PathBuf>,
}

impl CommandRecorder {
    pub fn new(converter: Converter, output_dir: PathBuf) -> Self {
        Self {
            converter,
            output_dir,
            child: None,
            target: None,
        }
    }
}

impl CaptureDevice for CommandRecorder {
    type Output = AudioClip;

    fn start(&mut self) -> Result<(), CaptureError> {
        let failed = |message: String| CaptureError::Failed {
            device: "microphone",
            message,
        };
        fs::create_dir_all(&self.output_dir).map_err(|e| failed(e.to_string()))?;
        let target = self
            .output_dir
            .join(format!("recording-{}.wav", Utc::now().format("%Y%m%d-%H%M%S%3f")));

        let child = command(&self.converter)
            .arg(&target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error("microphone", &e))?;

        tracing::info!(path = %target.display(), "recording started");
        self.child = Some(child);
        self.target = Some(target);
        Ok(())
    }

    fn stop(&mut self) -> Result<AudioClip, CaptureError> {
        let mut child = self.child.take().ok_or(CaptureError::NotActive {
            device: "microphone",
        })?;
        let target = self.target.take().ok_or(CaptureError::NotActive {
            device: "microphone",
        })?;

        if let Ok(Some(status)) = child.try_wait() {
            if !status.success() {
                return Err(CaptureError::Failed {
                    device: "microphone",
                    message: format!("{} exited with {status}", self.converter.program()),
                });
            }
        } else {
            kill(&mut child);
        }

        let recorded = fs::metadata(&target).map(|m| m.len() > 0).unwrap_or(false);
        if !recorded {
            return Err(CaptureError::Failed {
                device: "microphone",
                message: "no audio was recorded".to_string(),
            });
        }
        tracing::info!(path = %target.display(), "recording finished");
        Ok(AudioClip::new(target))
    }

    fn abort(&mut self) {
        if let Some(mut child) = self.child.take() {
            kill(&mut child);
        }
        if let Some(target) = self.target.take() {
            let _ = fs::remove_file(target);
        }
    }

    fn is_active(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for CommandRecorder {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            kill(&mut child);
        }
    }
}

/// Reads a single barcode from a camera command.
pub struct CommandScanner {
    converter: Converter,
    child: Option<Child>,
}

impl CommandScanner {
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            child: None,
        }
    }
}

impl CaptureDevice for CommandScanner {
    type Output = String;

    fn start(&mut self) -> Result<(), CaptureError> {
        let child = command(&self.converter)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error("camera", &e))?;
        self.child = Some(child);
        Ok(())
    }

    /// Collects the decoded code. A scan still running is cancelled.
    fn stop(&mut self) -> Result<String, CaptureError> {
        let mut child = self
            .child
            .take()
            .ok_or(CaptureError::NotActive { device: "camera" })?;

        if !matches!(child.try_wait(), Ok(Some(_))) {
            kill(&mut child);
            return Err(CaptureError::Failed {
                device: "camera",
                message: "no barcode was read".to_string(),
            });
        }

        let output = child.wait_with_output().map_err(|e| CaptureError::Failed {
            device: "camera",
            message: e.to_string(),
        })?;
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(ToString::to_string)
            .ok_or(CaptureError::Failed {
                device: "camera",
                message: "no barcode was read".to_string(),
            })
    }

    fn abort(&mut self) {
        if let Some(mut child) = self.child.take() {
            kill(&mut child);
        }
    }

    fn is_active(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for CommandScanner {
    fn drop(&mut self) {
        self.abort();
    }
}
