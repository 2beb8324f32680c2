//! Murmur Core - timeline and transcript logic shared by the UI crates

pub mod timeline;
pub mod transcript;

pub use timeline::{
    bar_index_to_x, content_width, extract_speaker_ranges, ms_to_bar_index, power_from_samples,
    time_to_bar_index, x_to_bar_index, AutoscrollController, FollowState, PowerSeries,
    SpeakerLabelRange, BAR_GAP, BAR_WIDTH, POWER_SCALE_FACTOR, SAMPLES_PER_SLICE, SAMPLE_RATE,
};
pub use transcript::{TextPart, TimeRange, Transcript, TranscriptParagraph};
