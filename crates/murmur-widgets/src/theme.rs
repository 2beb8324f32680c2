//! Shared theme constants for murmur UI components

use iced::Color;

/// Speaker colors, indexed by stable first-seen speaker label index.
///
/// Used for the waveform range blocks, range labels, and transcript
/// speaker headers; wraps around past eight speakers.
pub const SPEAKER_COLORS: [Color; 8] = [
    Color::from_rgb(0.3, 0.6, 1.0),  // Blue
    Color::from_rgb(1.0, 0.6, 0.2),  // Orange
    Color::from_rgb(0.3, 0.85, 0.5), // Green
    Color::from_rgb(0.9, 0.4, 0.7),  // Pink
    Color::from_rgb(0.6, 0.5, 1.0),  // Violet
    Color::from_rgb(0.95, 0.85, 0.3), // Yellow
    Color::from_rgb(0.3, 0.85, 0.85), // Cyan
    Color::from_rgb(0.95, 0.4, 0.35), // Red
];

/// Color for a speaker label index (wraps past the palette)
pub fn speaker_color(label_index: usize) -> Color {
    SPEAKER_COLORS[label_index % SPEAKER_COLORS.len()]
}

/// Waveform panel background
pub const WAVEFORM_BG: Color = Color::from_rgb(0.08, 0.08, 0.1);

/// Played (or recorded-so-far) bar glyphs
pub const BAR_COLOR: Color = Color::from_rgb(0.85, 0.87, 0.92);

/// Bars at or past the play head, dimmed
pub const BAR_FUTURE_COLOR: Color = Color::from_rgb(0.38, 0.4, 0.46);

/// Play-head marker line
pub const PLAYHEAD_COLOR: Color = Color::from_rgb(1.0, 0.35, 0.3);

/// Alpha applied to a speaker's color for its background block
pub const RANGE_BLOCK_ALPHA: f32 = 0.18;

/// Alpha applied to a speaker's color for its leading separator
pub const RANGE_SEPARATOR_ALPHA: f32 = 0.8;
