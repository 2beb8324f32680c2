//! Append-only power sample series
//!
//! One `u8` power sample per `SAMPLES_PER_SLICE` samples of audio. The
//! series only grows while recording and is immutable during playback;
//! renderers see it read-only.

use super::coords::{POWER_SCALE_FACTOR, SAMPLES_PER_SLICE, SAMPLE_RATE};

/// Ordered, append-only sequence of quantized loudness values.
#[derive(Debug, Clone, Default)]
pub struct PowerSeries {
    samples: Vec<u8>,
}

impl PowerSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self { samples: Vec::new() }
    }

    /// Number of bars recorded so far
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append one power sample (one more bar of audio)
    pub fn push(&mut self, power: u8) {
        self.samples.push(power);
    }

    /// Append a batch of power samples (e.g. a whole imported recording)
    pub fn extend_from_slice(&mut self, powers: &[u8]) {
        self.samples.extend_from_slice(powers);
    }

    /// Read-only view of all samples
    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    /// Total recorded duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 * SAMPLES_PER_SLICE as f64 / SAMPLE_RATE as f64
    }
}

/// Quantize one slice of mono samples to a power value.
///
/// RMS over the slice, clamped to `[0, POWER_SCALE_FACTOR - 1]`. An empty
/// slice is silence.
pub fn power_from_samples(samples: &[f32]) -> u8 {
    if samples.is_empty() {
        return 0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    let rms = (sum_sq / samples.len() as f64).sqrt();
    let max = (POWER_SCALE_FACTOR - 1) as f64;
    (rms.clamp(0.0, 1.0) * max).round() as u8
}
