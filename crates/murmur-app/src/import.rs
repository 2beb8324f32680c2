//! WAV file import
//!
//! Reads a recording from disk and reduces it to the 100ms-per-bar power
//! series the waveform timeline renders. Any sample rate and channel
//! count is accepted; frames are downmixed to mono before windowing.

use std::path::Path;

use murmur_core::timeline::{power_from_samples, PowerSeries};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read WAV file: {0}")]
    Wav(#[from] hound::Error),
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),
    #[error("WAV file has no channels")]
    NoChannels,
}

/// Read a WAV file into a power series (one bar per 100ms).
pub fn import_wav(path: &Path) -> Result<PowerSeries, ImportError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(ImportError::NoChannels);
    }
    log::info!(
        "import_wav: {:?} ({} Hz, {} ch, {:?} {} bit)",
        path,
        spec.sample_rate,
        spec.channels,
        spec.sample_format,
        spec.bits_per_sample
    );

    let mono = read_mono(&mut reader)?;
    Ok(series_from_mono(&mono, spec.sample_rate))
}

/// Decode all samples to f32 and downmix interleaved frames to mono.
fn read_mono(reader: &mut hound::WavReader<impl std::io::Read>) -> Result<Vec<f32>, ImportError> {
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => {
            reader.samples::<f32>().collect::<Result<_, _>>()?
        }
        (hound::SampleFormat::Int, bits) if bits <= 32 => {
            let scale = (1i64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
        (_, bits) => return Err(ImportError::UnsupportedBitDepth(bits)),
    };

    if channels == 1 {
        return Ok(samples);
    }
    Ok(samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect())
}

/// Window mono samples into 100ms bars at the material's native rate.
///
/// A trailing partial window still produces a bar, so short recordings
/// and ragged tails stay visible.
pub fn series_from_mono(samples: &[f32], sample_rate: u32) -> PowerSeries {
    let window = (sample_rate / 10).max(1) as usize;
    let mut series = PowerSeries::new();
    for chunk in samples.chunks(window) {
        series.push(power_from_samples(chunk));
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_windowing() {
        // 2.5s at 8kHz: 25 full-or-partial 100ms windows
        let samples = vec![0.5f32; 20_000];
        let series = series_from_mono(&samples, 8_000);
        assert_eq!(series.len(), 25);
    }

    #[test]
    fn test_trailing_partial_window_kept() {
        let samples = vec![0.5f32; 1_200]; // 1.5 windows at 8kHz
        let series = series_from_mono(&samples, 8_000);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_silence_and_full_scale() {
        let silent = series_from_mono(&vec![0.0f32; 1_600], 16_000);
        assert_eq!(silent.as_slice(), &[0]);

        let loud = series_from_mono(&vec![1.0f32; 1_600], 16_000);
        assert_eq!(loud.as_slice(), &[255]);
    }

    #[test]
    fn test_empty_input() {
        assert!(series_from_mono(&[], 16_000).is_empty());
    }
}
