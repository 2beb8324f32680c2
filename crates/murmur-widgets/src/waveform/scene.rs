//! Windowed waveform scene building
//!
//! Turns a potentially very long power series plus the speaker-range set
//! into the minimal ordered set of drawable primitives covering the current
//! viewport. Pure: recomputed on any input change, no caching across
//! frames, unit-testable without a renderer.

use murmur_core::timeline::{
    bar_index_to_x, time_to_bar_index, x_to_bar_index, SpeakerLabelRange, BAR_GAP, BAR_WIDTH,
    POWER_SCALE_FACTOR,
};

/// Bars of culling pad either side of the viewport, absorbing glyph
/// overhang at the edges and small scroll jitter
pub const VIEWPORT_PAD_BARS: usize = 5;

/// Glyph height of a silent bar
pub const BAR_MIN_HEIGHT: f32 = 2.0;

/// Glyph height cap for a full-power bar
pub const BAR_MAX_HEIGHT: f32 = 120.0;

/// Horizontal inset keeping a floating range label off the viewport edge
pub const RANGE_LABEL_INSET: f32 = 6.0;

/// Visible region of the timeline in content pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One drawable element of the waveform scene, in content coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Background block behind all bars of one speaker range
    RangeBlock { x: f32, width: f32, label_index: usize },
    /// Separator line on the leading edge of a range, centered in the gap
    /// before its first bar
    RangeSeparator { x: f32, label_index: usize },
    /// Floating speaker label, clamped into the viewport
    RangeLabel { x: f32, label_index: usize },
    /// One bar glyph; `future` bars (at or past the play head) render dimmed
    Bar { x: f32, height: f32, future: bool },
    /// Play-head marker line
    Playhead { x: f32 },
}

/// Build the scene for one frame.
///
/// Walks the visible bar indices ascending while advancing a cursor through
/// the sorted range list in lock-step, a single linear merge of two
/// monotonic streams. Each range's block, separator, and label are emitted
/// exactly once, when the walk first enters it.
///
/// Degenerate inputs (empty series, unknown viewport before first layout)
/// produce an empty scene.
pub fn build_scene(
    series: &[u8],
    ranges: &[SpeakerLabelRange],
    viewport: Viewport,
    current_time: Option<f64>,
) -> Vec<Primitive> {
    if series.is_empty() || viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec::new();
    }

    let start = x_to_bar_index(viewport.x).saturating_sub(VIEWPORT_PAD_BARS);
    let end = (x_to_bar_index(viewport.x + viewport.width) + VIEWPORT_PAD_BARS)
        .min(series.len() - 1);

    let playhead_bar = current_time.map(time_to_bar_index);
    let max_height = viewport.height.min(BAR_MAX_HEIGHT);
    let power_max = (POWER_SCALE_FACTOR - 1) as f32;
    let view_right = viewport.x + viewport.width;

    let mut scene = Vec::new();

    // Skip ranges entirely left of the window
    let mut cursor = ranges.partition_point(|r| r.end_bar <= start);
    let mut entered: Option<usize> = None;

    for bar in start..=end {
        while cursor < ranges.len() && ranges[cursor].end_bar <= bar {
            cursor += 1;
        }
        if let Some(range) = ranges.get(cursor) {
            if bar >= range.start_bar && entered != Some(cursor) {
                emit_range(&mut scene, range, viewport);
                entered = Some(cursor);
            }
        }

        let x = bar_index_to_x(bar as f32);
        // Padded edges can produce bars fully outside the viewport
        if x + BAR_WIDTH <= viewport.x || x >= view_right {
            continue;
        }
        let power = series[bar] as f32 / power_max;
        let height = BAR_MIN_HEIGHT + power * (max_height - BAR_MIN_HEIGHT);
        let future = playhead_bar.is_some_and(|p| bar >= p);
        scene.push(Primitive::Bar { x, height, future });
    }

    if let Some(playhead) = playhead_bar {
        let x = bar_index_to_x(playhead as f32) + BAR_WIDTH / 2.0;
        if x >= viewport.x && x <= view_right {
            scene.push(Primitive::Playhead { x });
        }
    }

    scene
}

fn emit_range(scene: &mut Vec<Primitive>, range: &SpeakerLabelRange, viewport: Viewport) {
    let block_start = bar_index_to_x(range.start_bar as f32);
    // The block covers the range's bars but not the gap after its last one
    let block_end = bar_index_to_x(range.end_bar as f32) - BAR_GAP;
    scene.push(Primitive::RangeBlock {
        x: block_start,
        width: block_end - block_start,
        label_index: range.label_index,
    });
    scene.push(Primitive::RangeSeparator {
        x: bar_index_to_x(range.start_bar as f32 - 0.5),
        label_index: range.label_index,
    });
    // The label floats at the range start but never leaves the viewport
    // while any part of the range is visible
    let label_x = block_start
        .max(viewport.x + RANGE_LABEL_INSET)
        .min(block_end - RANGE_LABEL_INSET);
    scene.push(Primitive::RangeLabel {
        x: label_x,
        label_index: range.label_index,
    });
}
