//! Microphone capture
//!
//! A dedicated thread owns the CPAL input stream (streams are not Send)
//! and reduces incoming audio to one power value per 100ms window,
//! pushed through a crossbeam channel for the UI to consume. Whatever
//! rate and channel count the device delivers, frames are downmixed to
//! mono and windowed at the device's native rate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use crossbeam::channel::{self, Receiver, Sender};
use murmur_core::timeline::power_from_samples;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no input device available")]
    NoInputDevice,
    #[error("input device not found: {0}")]
    DeviceNotFound(String),
    #[error("failed to enumerate input devices: {0}")]
    Devices(#[from] cpal::DevicesError),
    #[error("failed to query device config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(SampleFormat),
    #[error("failed to build input stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start input stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
    #[error("failed to spawn capture thread: {0}")]
    Thread(#[from] std::io::Error),
    #[error("capture thread exited during startup")]
    WorkerExited,
}

/// Handle to a running capture stream.
///
/// Dropping the handle stops the stream and ends the worker thread.
pub struct CaptureHandle {
    receiver: Arc<Receiver<u8>>,
    stop: Arc<AtomicBool>,
}

impl CaptureHandle {
    /// Receiving end of the power channel (one value per 100ms)
    pub fn receiver(&self) -> Arc<Receiver<u8>> {
        self.receiver.clone()
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Start capturing from the named input device (or the system default).
///
/// Blocks until the stream is running or startup failed.
pub fn start_capture(device_name: Option<String>) -> Result<CaptureHandle, CaptureError> {
    let (power_tx, power_rx) = channel::unbounded();
    let (ready_tx, ready_rx) = channel::bounded(1);
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = stop.clone();

    std::thread::Builder::new()
        .name("murmur-capture".to_string())
        .spawn(move || {
            let stream = match build_capture_stream(device_name.as_deref(), power_tx) {
                Ok(stream) => {
                    let _ = ready_tx.send(Ok(()));
                    stream
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            while !thread_stop.load(Ordering::Relaxed) {
                std::thread::sleep(Duration::from_millis(50));
            }
            drop(stream);
            log::info!("capture thread stopped");
        })?;

    ready_rx.recv().map_err(|_| CaptureError::WorkerExited)??;
    Ok(CaptureHandle {
        receiver: Arc::new(power_rx),
        stop,
    })
}

fn build_capture_stream(
    device_name: Option<&str>,
    power_tx: Sender<u8>,
) -> Result<cpal::Stream, CaptureError> {
    let host = cpal::default_host();
    let device = match device_name {
        Some(name) => {
            let mut devices = host.input_devices()?;
            devices
                .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                .ok_or_else(|| CaptureError::DeviceNotFound(name.to_string()))?
        }
        None => host.default_input_device().ok_or(CaptureError::NoInputDevice)?,
    };
    let supported = device.default_input_config()?;
    log::info!(
        "capture: device {:?}, {} Hz, {} ch, {:?}",
        device.name().unwrap_or_else(|_| "<unknown>".to_string()),
        supported.sample_rate().0,
        supported.channels(),
        supported.sample_format()
    );

    let window = (supported.sample_rate().0 / 10).max(1) as usize;
    let channels = supported.channels() as usize;
    let config = supported.config();

    let stream = match supported.sample_format() {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, channels, window, power_tx)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, channels, window, power_tx)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config, channels, window, power_tx)?,
        other => return Err(CaptureError::UnsupportedFormat(other)),
    };
    stream.play()?;
    Ok(stream)
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    window: usize,
    power_tx: Sender<u8>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let mut accumulator = PowerAccumulator::new(window);
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            for frame in data.chunks_exact(channels) {
                let mono = frame
                    .iter()
                    .map(|s| f32::from_sample(*s))
                    .sum::<f32>()
                    / channels as f32;
                if let Some(power) = accumulator.push(mono) {
                    // Send failure means the UI side is gone; the stream
                    // will be torn down shortly after
                    let _ = power_tx.send(power);
                }
            }
        },
        |err| log::error!("capture stream error: {}", err),
        None,
    )
}

/// Accumulates mono samples and emits one power value per full window.
struct PowerAccumulator {
    window: usize,
    buffer: Vec<f32>,
}

impl PowerAccumulator {
    fn new(window: usize) -> Self {
        Self {
            window,
            buffer: Vec::with_capacity(window),
        }
    }

    fn push(&mut self, sample: f32) -> Option<u8> {
        self.buffer.push(sample);
        if self.buffer.len() < self.window {
            return None;
        }
        let power = power_from_samples(&self.buffer);
        self.buffer.clear();
        Some(power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_emits_per_window() {
        let mut acc = PowerAccumulator::new(4);
        assert_eq!(acc.push(0.5), None);
        assert_eq!(acc.push(0.5), None);
        assert_eq!(acc.push(0.5), None);
        let power = acc.push(0.5);
        assert!(power.is_some());
        // Constant 0.5 amplitude: RMS 0.5 scaled to u8
        assert_eq!(power, Some(128));
        // Buffer resets for the next window
        assert_eq!(acc.push(0.0), None);
    }

    #[test]
    fn test_accumulator_silence() {
        let mut acc = PowerAccumulator::new(2);
        acc.push(0.0);
        assert_eq!(acc.push(0.0), Some(0));
    }
}
