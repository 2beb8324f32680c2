//! Transcript panel state and follow-target math
//!
//! iced exposes no per-widget layout query, so paragraph heights are
//! estimated from character counts at a fixed line height, the same way
//! other row-based panels estimate visible rows for scroll targeting. The
//! estimate only steers autoscroll; rendering uses real layout.

use murmur_core::timeline::AutoscrollController;
use murmur_core::transcript::{Transcript, TranscriptParagraph};

/// Estimated rendered height of one wrapped text line
pub const PARAGRAPH_LINE_HEIGHT: f32 = 22.0;

/// Estimated height of a speaker header row
pub const SPEAKER_HEADER_HEIGHT: f32 = 18.0;

/// Vertical spacing between paragraphs
pub const PARAGRAPH_SPACING: f32 = 10.0;

/// Estimated characters per wrapped line at the panel's default width
pub const EST_CHARS_PER_LINE: usize = 56;

/// State for the scrolling transcript panel.
#[derive(Debug, Default)]
pub struct TranscriptPanelState {
    /// Vertical autoscroll (follow the paragraph at the play head)
    pub autoscroll: AutoscrollController,
    /// Last observed vertical scroll offset
    scroll_y: f32,
    /// Panel height from the last layout, zero until known
    view_height: f32,
}

impl TranscriptPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_view_height(&mut self, height: f32) {
        self.view_height = height;
    }

    /// Feed one observed scroll offset into the panel and its controller
    pub fn observe_scroll(&mut self, offset: f32, max_offset: f32) {
        self.scroll_y = offset;
        self.autoscroll.observe_scroll(offset, max_offset);
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Offset that centers the paragraph at the current playback time.
    ///
    /// Without a current time the newest content is exposed instead (live
    /// transcription appends at the bottom). `None` before first layout or
    /// while the transcript is empty.
    pub fn follow_target(&self, transcript: &Transcript, current_time_ms: Option<u64>) -> Option<f32> {
        if self.view_height <= 0.0 || transcript.is_empty() {
            return None;
        }
        let total: f32 = transcript
            .paragraphs()
            .iter()
            .map(estimated_paragraph_height)
            .sum();
        let max_offset = (total - self.view_height).max(0.0);

        let Some(current) = current_time_ms else {
            return Some(max_offset);
        };

        let mut y = 0.0;
        let mut target = None;
        for paragraph in transcript.paragraphs() {
            let height = estimated_paragraph_height(paragraph);
            if let Some(start) = paragraph.start_ms() {
                if start <= current {
                    // Last timed paragraph at or before the play head wins
                    target = Some(y + height / 2.0);
                } else if target.is_some() {
                    break;
                }
            }
            y += height;
        }

        let center = target?;
        Some((center - self.view_height / 2.0).clamp(0.0, max_offset))
    }
}

/// Estimate the rendered height of one paragraph.
pub fn estimated_paragraph_height(paragraph: &TranscriptParagraph) -> f32 {
    let chars = paragraph.text().chars().count();
    let lines = (chars / EST_CHARS_PER_LINE + 1) as f32;
    let header = if paragraph.speaker_label().is_some() {
        SPEAKER_HEADER_HEIGHT
    } else {
        0.0
    };
    header + lines * PARAGRAPH_LINE_HEIGHT + PARAGRAPH_SPACING
}
