//! Waveform timeline widget
//!
//! Renders the power series as a scrolling bar waveform with overlaid
//! speaker ranges and a play-head marker.
//!
//! Split into layers so the windowing logic stays renderer-free:
//!
//! - `scene`: pure windowed scene building (viewport culling, range merge)
//! - `state`: panel state, autoscroll controller, follow-target math
//! - `canvas`: iced canvas `Program` drawing a scene + click-to-seek
//! - `view`: view function wiring the canvas into a horizontal scrollable

mod canvas;
mod scene;
mod state;
mod view;

pub use scene::{
    build_scene, Primitive, Viewport, BAR_MAX_HEIGHT, BAR_MIN_HEIGHT, RANGE_LABEL_INSET,
    VIEWPORT_PAD_BARS,
};
pub use state::WaveformState;
pub use view::{waveform_timeline, WAVEFORM_PANEL_HEIGHT, WAVEFORM_SCROLLABLE_ID};
