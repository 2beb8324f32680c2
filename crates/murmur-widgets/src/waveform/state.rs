//! Waveform panel state
//!
//! Pure data plus the panel's autoscroll controller; the series and range
//! list are owned by the application and passed in read-only per frame.

use murmur_core::timeline::{
    bar_index_to_x, content_width, time_to_bar_index, AutoscrollController, BAR_WIDTH,
};

use super::scene::Viewport;

/// State for the scrolling waveform timeline panel.
#[derive(Debug, Default)]
pub struct WaveformState {
    /// Horizontal autoscroll (follow the play head / newest bar)
    pub autoscroll: AutoscrollController,
    /// Last observed horizontal scroll offset in content pixels
    scroll_x: f32,
    /// Panel size from the last layout, zero until known
    view_width: f32,
    view_height: f32,
}

impl WaveformState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the panel size (layout change or scrollable bounds report)
    pub fn set_view_size(&mut self, width: f32, height: f32) {
        self.view_width = width;
        self.view_height = height;
    }

    /// Feed one observed scroll offset into the panel and its controller
    pub fn observe_scroll(&mut self, offset: f32, max_offset: f32) {
        self.scroll_x = offset;
        self.autoscroll.observe_scroll(offset, max_offset);
    }

    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    /// Viewport for scene building; `None` before the first layout
    pub fn viewport(&self) -> Option<Viewport> {
        if self.view_width <= 0.0 || self.view_height <= 0.0 {
            return None;
        }
        Some(Viewport {
            x: self.scroll_x,
            y: 0.0,
            width: self.view_width,
            height: self.view_height,
        })
    }

    /// Offset that centers the current-time bar, falling back to exposing
    /// the most recently appended bar when no current time exists.
    pub fn follow_target(&self, series_len: usize, current_time: Option<f64>) -> f32 {
        let max_offset = (content_width(series_len) - self.view_width).max(0.0);
        match current_time {
            Some(t) => {
                let center = bar_index_to_x(time_to_bar_index(t) as f32) + BAR_WIDTH / 2.0;
                (center - self.view_width / 2.0).clamp(0.0, max_offset)
            }
            None => max_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::timeline::BAR_GAP;

    const CELL: f32 = BAR_WIDTH + BAR_GAP;

    fn state(view_width: f32) -> WaveformState {
        let mut s = WaveformState::new();
        s.set_view_size(view_width, 120.0);
        s
    }

    #[test]
    fn test_follow_target_centers_playhead_bar() {
        let s = state(100.0 * CELL);
        // 1000 bars of content, play head at bar 500
        let target = s.follow_target(1000, Some(50.0));
        let center = 500.0 * CELL + BAR_WIDTH / 2.0;
        assert!((target - (center - 50.0 * CELL)).abs() < 0.5);
    }

    #[test]
    fn test_follow_target_clamps_at_edges() {
        let s = state(100.0 * CELL);
        assert_eq!(s.follow_target(1000, Some(0.0)), 0.0);
        let max = 900.0 * CELL;
        assert_eq!(s.follow_target(1000, Some(1e6)), max);
    }

    #[test]
    fn test_follow_target_without_time_exposes_newest_bar() {
        let s = state(100.0 * CELL);
        assert_eq!(s.follow_target(1000, None), 900.0 * CELL);
        // Content narrower than the panel never scrolls
        assert_eq!(s.follow_target(10, None), 0.0);
    }

    #[test]
    fn test_viewport_unknown_before_layout() {
        let s = WaveformState::new();
        assert!(s.viewport().is_none());
        assert!(state(400.0).viewport().is_some());
    }
}
