//! Autoscroll state machine
//!
//! Keeps a panel following the play head until the user scrolls, without a
//! platform signal distinguishing user from programmatic scrolling. Each
//! issued scroll command records the closed interval between the pre-scroll
//! and target offsets as the "expected range"; offsets observed inside it
//! (plus a small rounding margin) are attributed to the ongoing command.
//! Offsets at or beyond the content's natural scroll end never pause:
//! content shrinkage (a live transcript momentarily shortened by a
//! recognition correction) can snap the offset back without user
//! involvement.
//!
//! Used identically by the waveform panel (horizontal offsets) and the
//! transcript panel (vertical offsets). Single logical thread; no locking.

use std::time::{Duration, Instant};

/// Rounding margin around the expected range and the scroll end, in pixels
pub const SCROLL_EXPECT_MARGIN: f32 = 4.0;

/// Minimum interval between issued scroll commands, so a scroll animation
/// can make visible progress before being superseded
pub const SCROLL_COMMAND_INTERVAL: Duration = Duration::from_millis(500);

/// Whether the panel is following the play head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowState {
    #[default]
    Following,
    Paused,
}

/// Closed offset interval claimed by the last issued command.
#[derive(Debug, Clone, Copy)]
struct ExpectedScroll {
    lo: f32,
    hi: f32,
}

impl ExpectedScroll {
    fn contains(&self, offset: f32) -> bool {
        offset >= self.lo - SCROLL_EXPECT_MARGIN && offset <= self.hi + SCROLL_EXPECT_MARGIN
    }
}

/// Per-panel autoscroll controller.
///
/// The expected range persists until superseded by the next command or a
/// pause: one programmatic scroll can surface as several viewport events,
/// and all of them belong to it.
#[derive(Debug, Default)]
pub struct AutoscrollController {
    state: FollowState,
    expected: Option<ExpectedScroll>,
    last_command_at: Option<Instant>,
}

impl AutoscrollController {
    /// Create a controller in the initial Following state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn is_following(&self) -> bool {
        self.state == FollowState::Following
    }

    /// Feed one observed scroll offset.
    ///
    /// `max_offset` is the content's natural scroll end (content size minus
    /// viewport size, never negative). Transitions to Paused when the offset
    /// is user-attributed.
    pub fn observe_scroll(&mut self, offset: f32, max_offset: f32) {
        if self.state == FollowState::Paused {
            return;
        }
        if let Some(expected) = self.expected {
            if expected.contains(offset) {
                return;
            }
        }
        if offset >= max_offset - SCROLL_EXPECT_MARGIN {
            return;
        }
        log::debug!("autoscroll paused: offset {offset} outside expected range");
        self.state = FollowState::Paused;
        self.expected = None;
    }

    /// Ask to issue a scroll command toward `target`.
    ///
    /// Returns the target to issue, or `None` while Paused or inside the
    /// throttle window. On success the expected range and command time are
    /// recorded; the caller fires the actual scroll.
    pub fn try_command(&mut self, current: f32, target: f32, now: Instant) -> Option<f32> {
        if self.state == FollowState::Paused {
            return None;
        }
        if let Some(at) = self.last_command_at {
            if now.duration_since(at) < SCROLL_COMMAND_INTERVAL {
                return None;
            }
        }
        self.arm(current, target, now);
        Some(target)
    }

    /// Stop following without an observed scroll (e.g. a configuration
    /// that opens panels unfollowed)
    pub fn pause(&mut self) {
        self.state = FollowState::Paused;
        self.expected = None;
    }

    /// Explicit user resume: re-enter Following and issue one immediate
    /// command, bypassing the throttle.
    pub fn resume(&mut self, current: f32, target: f32, now: Instant) -> f32 {
        self.state = FollowState::Following;
        self.arm(current, target, now);
        target
    }

    fn arm(&mut self, current: f32, target: f32, now: Instant) {
        let (lo, hi) = if current <= target { (current, target) } else { (target, current) };
        self.expected = Some(ExpectedScroll { lo, hi });
        self.last_command_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_END: f32 = f32::MAX;

    #[test]
    fn test_offset_inside_commanded_range_keeps_following() {
        // Commanded range [500, 800] px; event at 780 stays Following
        let mut ctl = AutoscrollController::new();
        let now = Instant::now();
        assert_eq!(ctl.try_command(500.0, 800.0, now), Some(800.0));
        ctl.observe_scroll(780.0, NO_END);
        assert!(ctl.is_following());
        // Margin covers rounding just outside the interval
        ctl.observe_scroll(803.0, NO_END);
        assert!(ctl.is_following());
    }

    #[test]
    fn test_offset_outside_commanded_range_pauses() {
        let mut ctl = AutoscrollController::new();
        let now = Instant::now();
        ctl.try_command(500.0, 800.0, now);
        ctl.observe_scroll(200.0, NO_END);
        assert_eq!(ctl.state(), FollowState::Paused);

        // Once paused, further commands are refused
        assert_eq!(ctl.try_command(0.0, 100.0, now + SCROLL_COMMAND_INTERVAL), None);
    }

    #[test]
    fn test_scroll_end_snap_back_never_pauses() {
        let mut ctl = AutoscrollController::new();
        ctl.try_command(500.0, 800.0, Instant::now());
        // Content shrank: offset snapped to the new scroll end (300 px)
        ctl.observe_scroll(300.0, 300.0);
        assert!(ctl.is_following());
    }

    #[test]
    fn test_scroll_without_any_command_pauses() {
        let mut ctl = AutoscrollController::new();
        ctl.observe_scroll(150.0, 1000.0);
        assert_eq!(ctl.state(), FollowState::Paused);
    }

    #[test]
    fn test_command_throttle() {
        let mut ctl = AutoscrollController::new();
        let t0 = Instant::now();
        assert!(ctl.try_command(0.0, 100.0, t0).is_some());
        assert_eq!(ctl.try_command(50.0, 200.0, t0 + Duration::from_millis(100)), None);
        assert!(ctl
            .try_command(50.0, 200.0, t0 + SCROLL_COMMAND_INTERVAL)
            .is_some());
    }

    #[test]
    fn test_resume_bypasses_throttle_and_refollows() {
        let mut ctl = AutoscrollController::new();
        let t0 = Instant::now();
        ctl.try_command(0.0, 100.0, t0);
        ctl.observe_scroll(900.0, 2000.0);
        assert_eq!(ctl.state(), FollowState::Paused);

        // Reaching the scroll end does not auto-resume
        ctl.observe_scroll(2000.0, 2000.0);
        assert_eq!(ctl.state(), FollowState::Paused);

        let target = ctl.resume(900.0, 400.0, t0 + Duration::from_millis(10));
        assert_eq!(target, 400.0);
        assert!(ctl.is_following());
        // The resume command's range covers subsequent events
        ctl.observe_scroll(600.0, 2000.0);
        assert!(ctl.is_following());
    }

    #[test]
    fn test_expected_range_persists_across_events() {
        // iced can emit several viewport events for one programmatic
        // scroll; all of them attribute to the same command.
        let mut ctl = AutoscrollController::new();
        ctl.try_command(0.0, 400.0, Instant::now());
        ctl.observe_scroll(100.0, NO_END);
        ctl.observe_scroll(250.0, NO_END);
        ctl.observe_scroll(400.0, NO_END);
        assert!(ctl.is_following());
    }
}
