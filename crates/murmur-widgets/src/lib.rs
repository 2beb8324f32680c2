//! Iced widgets for the murmur recording timeline
//!
//! This crate renders a live or recorded audio signal as a scrolling bar
//! waveform with overlaid speaker-diarization ranges, plus a transcript
//! panel synchronized to the same time axis.
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! Following idiomatic iced patterns, this crate separates concerns:
//!
//! - **Scene building** (`waveform::build_scene`): pure computation from
//!   state to drawable primitives, unit-testable without a renderer
//! - **State structs** (`WaveformState`, `TranscriptPanelState`): panel
//!   state including each panel's autoscroll controller
//! - **View functions** (`waveform_timeline`, `transcript_panel`): take
//!   state + callbacks, return `Element<Message>`
//! - **Canvas Program**: custom waveform drawing and click-to-seek

pub mod subscription;
pub mod theme;
pub mod transcript;
pub mod waveform;

pub use subscription::channel_subscription;
pub use theme::{speaker_color, SPEAKER_COLORS};
pub use transcript::{
    transcript_panel, TranscriptPanelState, TRANSCRIPT_SCROLLABLE_ID,
};
pub use waveform::{
    build_scene, waveform_timeline, Primitive, Viewport, WaveformState, BAR_MAX_HEIGHT,
    BAR_MIN_HEIGHT, VIEWPORT_PAD_BARS, WAVEFORM_PANEL_HEIGHT, WAVEFORM_SCROLLABLE_ID,
};
