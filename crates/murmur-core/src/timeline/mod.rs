//! Recording timeline: coordinate mapping, power series, speaker ranges,
//! and the autoscroll state machine
//!
//! The coordinate mapper underlies everything else: one bar represents
//! `SAMPLES_PER_SLICE` samples of recognizer-rate audio, and all three axes
//! (seconds, bar index, pixel x) convert through it with floor semantics so
//! a boundary sample consistently belongs to the later bar in both
//! directions.

mod autoscroll;
mod coords;
mod power;
mod speaker;

pub use autoscroll::{
    AutoscrollController, FollowState, SCROLL_COMMAND_INTERVAL, SCROLL_EXPECT_MARGIN,
};
pub use coords::{
    bar_index_to_x, content_width, ms_to_bar_index, time_to_bar_index, x_to_bar_index, BAR_GAP,
    BAR_WIDTH, POWER_SCALE_FACTOR, SAMPLES_PER_SLICE, SAMPLE_RATE,
};
pub use power::{power_from_samples, PowerSeries};
pub use speaker::{extract_speaker_ranges, SpeakerLabelRange};
