//! Transcript panel widget
//!
//! Scrollable paragraph list synchronized to the waveform's time axis:
//! speaker headers colored by stable label index, per-paragraph
//! click-to-seek, and vertical autoscroll following playback.

mod state;
mod view;

pub use state::{
    TranscriptPanelState, EST_CHARS_PER_LINE, PARAGRAPH_LINE_HEIGHT, PARAGRAPH_SPACING,
    SPEAKER_HEADER_HEIGHT,
};
pub use view::{transcript_panel, TRANSCRIPT_SCROLLABLE_ID};
