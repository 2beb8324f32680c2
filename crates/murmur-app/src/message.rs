//! Application messages

use crate::feed::FeedEvent;

#[derive(Debug, Clone)]
pub enum Message {
    /// UI clock (~30fps) driving the transport and autoscroll
    Tick,
    /// One power bar from the capture thread (100ms of audio)
    Power(u8),
    /// Transcript feed delivered a partial or final paragraph
    Feed(FeedEvent),
    /// Waveform panel scrolled to `(offset, max_offset)`
    WaveformScrolled { offset: f32, max_offset: f32 },
    /// Transcript panel scrolled to `(offset, max_offset)`
    TranscriptScrolled { offset: f32, max_offset: f32 },
    /// Bar clicked in the waveform, time in seconds
    SeekSeconds(f64),
    /// Paragraph timestamp clicked in the transcript, time in milliseconds
    SeekMs(u64),
    TogglePlayback,
    /// Re-center both panels on the play head and resume following
    JumpToLatest,
    WindowResized(iced::Size),
}
