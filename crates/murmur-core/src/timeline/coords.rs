//! Time / bar-index / pixel-x conversions
//!
//! All conversions floor (truncate) rather than round, so a sample sitting
//! exactly on a slice boundary belongs to the later bar whether it arrives
//! as a time or as a pixel position.

// =============================================================================
// Timeline constants
// =============================================================================

/// Recognizer-rate audio: 16 kHz mono
pub const SAMPLE_RATE: u32 = 16_000;

/// Samples aggregated into one bar (100 ms at 16 kHz)
pub const SAMPLES_PER_SLICE: u32 = 1_600;

/// Power samples are quantized to `[0, POWER_SCALE_FACTOR - 1]`
pub const POWER_SCALE_FACTOR: u32 = 256;

/// Rendered bar width in pixels
pub const BAR_WIDTH: f32 = 3.0;

/// Gap between adjacent bars in pixels
pub const BAR_GAP: f32 = 1.0;

/// Convert a playback/record time in seconds to a bar index.
///
/// Pure and total: negative input clamps to bar 0.
pub fn time_to_bar_index(seconds: f64) -> usize {
    let slices = seconds * SAMPLE_RATE as f64 / SAMPLES_PER_SLICE as f64;
    if slices <= 0.0 {
        0
    } else {
        slices.floor() as usize
    }
}

/// Convert a transcript-part timestamp in milliseconds to a bar index.
///
/// Integer arithmetic: a part ending at an exact bar boundary (e.g.
/// 1200 ms at 100 ms/bar) must land on that bar, not one off from float
/// rounding.
pub fn ms_to_bar_index(ms: u64) -> usize {
    ((ms as u128 * SAMPLE_RATE as u128) / (SAMPLES_PER_SLICE as u128 * 1000)) as usize
}

/// Pixel x of a bar's left edge.
///
/// Accepts half-integer indices (`idx - 0.5`) solely for drawing separators
/// between bars; such values must never be used to index the power series.
pub fn bar_index_to_x(bar_idx: f32) -> f32 {
    bar_idx * (BAR_WIDTH + BAR_GAP)
}

/// Coarse inverse of [`bar_index_to_x`] for viewport culling only.
///
/// Callers must pad the result; the mapping ignores where inside the
/// bar-plus-gap cell `x` falls.
pub fn x_to_bar_index(x: f32) -> usize {
    let idx = (x / (BAR_WIDTH + BAR_GAP)).floor();
    if idx <= 0.0 {
        0
    } else {
        idx as usize
    }
}

/// Full pixel width of a series of `bar_count` bars.
pub fn content_width(bar_count: usize) -> f32 {
    bar_count as f32 * (BAR_WIDTH + BAR_GAP)
}
