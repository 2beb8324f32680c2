//! Main application state and update loop

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crossbeam::channel::Receiver;
use iced::widget::{button, column, row, scrollable, text, Id, Space};
use iced::{Element, Length, Subscription, Task, Theme};
use murmur_core::timeline::{extract_speaker_ranges, PowerSeries, SpeakerLabelRange};
use murmur_core::transcript::Transcript;
use murmur_widgets::{
    channel_subscription, transcript_panel, waveform_timeline, TranscriptPanelState,
    WaveformState, TRANSCRIPT_SCROLLABLE_ID, WAVEFORM_PANEL_HEIGHT, WAVEFORM_SCROLLABLE_ID,
};

use crate::capture::{self, CaptureHandle};
use crate::config::AppConfig;
use crate::feed::{self, FeedEvent};
use crate::import;
use crate::message::Message;
use crate::transport::Transport;

/// Estimated height of the header row, used to size the transcript panel
const HEADER_HEIGHT: f32 = 44.0;
/// Outer layout padding and inter-panel spacing
const LAYOUT_PADDING: f32 = 12.0;

/// Startup options resolved from the command line and config file.
#[derive(Debug, Clone)]
pub struct BootOptions {
    /// Review a recording from disk instead of capturing live
    pub wav: Option<PathBuf>,
    /// Transcript file: loaded whole in review, replayed live otherwise
    pub transcript: Option<PathBuf>,
    /// Input device override for live capture
    pub device: Option<String>,
    pub config: AppConfig,
}

pub struct MurmurApp {
    series: PowerSeries,
    transcript: Transcript,
    ranges: Vec<SpeakerLabelRange>,
    /// Whether the newest paragraph is an uncommitted partial
    last_is_partial: bool,

    waveform: WaveformState,
    panel: TranscriptPanelState,
    transport: Transport,

    /// Live capture mode (vs. reviewing an imported recording)
    live: bool,
    /// In live mode: user clicked back into the recording, so the play
    /// head follows the transport instead of the newest bar
    reviewing: bool,

    capture: Option<CaptureHandle>,
    feed_rx: Option<Arc<Receiver<FeedEvent>>>,
}

impl MurmurApp {
    pub fn new(options: BootOptions) -> (Self, Task<Message>) {
        let mut app = Self {
            series: PowerSeries::new(),
            transcript: Transcript::new(),
            ranges: Vec::new(),
            last_is_partial: false,
            waveform: WaveformState::new(),
            panel: TranscriptPanelState::new(),
            transport: Transport::new(),
            live: options.wav.is_none(),
            reviewing: false,
            capture: None,
            feed_rx: None,
        };
        app.apply_window_size(iced::Size::new(
            options.config.display.window_width,
            options.config.display.window_height,
        ));
        if !options.config.display.follow_by_default {
            app.waveform.autoscroll.pause();
            app.panel.autoscroll.pause();
        }

        if let Some(wav) = &options.wav {
            match import::import_wav(wav) {
                Ok(series) => {
                    log::info!("loaded {} bars from {:?}", series.len(), wav);
                    app.series = series;
                }
                Err(e) => log::error!("failed to import {:?}: {}", wav, e),
            }
            if let Some(path) = &options.transcript {
                match feed::load_paragraphs(path) {
                    Ok(paragraphs) => {
                        app.transcript.replace_paragraphs(paragraphs);
                        app.ranges = extract_speaker_ranges(&app.transcript);
                    }
                    Err(e) => log::error!("failed to load transcript {:?}: {}", path, e),
                }
            }
        } else {
            let device = options
                .device
                .clone()
                .or_else(|| options.config.audio.input_device.clone());
            match capture::start_capture(device) {
                Ok(handle) => app.capture = Some(handle),
                Err(e) => log::error!("capture unavailable: {} - running without input", e),
            }
            if let Some(path) = &options.transcript {
                match feed::load_paragraphs(path) {
                    Ok(paragraphs) => app.feed_rx = Some(feed::start_replay(paragraphs)),
                    Err(e) => log::error!("failed to load transcript {:?}: {}", path, e),
                }
            }
        }

        (app, Task::none())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => self.on_tick(Instant::now()),
            Message::Power(power) => {
                self.series.push(power);
                Task::none()
            }
            Message::Feed(event) => {
                self.apply_feed_event(event);
                Task::none()
            }
            Message::WaveformScrolled { offset, max_offset } => {
                self.waveform.observe_scroll(offset, max_offset);
                Task::none()
            }
            Message::TranscriptScrolled { offset, max_offset } => {
                self.panel.observe_scroll(offset, max_offset);
                Task::none()
            }
            Message::SeekSeconds(seconds) => self.seek_to_ms((seconds * 1000.0) as u64),
            Message::SeekMs(ms) => self.seek_to_ms(ms),
            Message::TogglePlayback => {
                self.transport.toggle(Instant::now());
                Task::none()
            }
            Message::JumpToLatest => {
                self.reviewing = false;
                self.recenter_now(Instant::now())
            }
            Message::WindowResized(size) => {
                self.apply_window_size(size);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let waveform = waveform_timeline(
            &self.series,
            &self.ranges,
            self.transcript.speaker_labels(),
            &self.waveform,
            self.playhead_seconds(),
            Message::SeekSeconds,
            |offset, max_offset| Message::WaveformScrolled { offset, max_offset },
        );
        let transcript = transcript_panel(
            &self.transcript,
            self.playhead_ms(),
            Message::SeekMs,
            |offset, max_offset| Message::TranscriptScrolled { offset, max_offset },
        );

        column![self.view_header(), waveform, transcript]
            .spacing(LAYOUT_PADDING)
            .padding(LAYOUT_PADDING)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![iced::event::listen_with(|event, _status, _window| {
            match event {
                iced::Event::Window(iced::window::Event::Resized(size)) => {
                    Some(Message::WindowResized(size))
                }
                _ => None,
            }
        })];

        if self.capture.is_some() || self.feed_rx.is_some() || self.transport.is_playing() {
            subs.push(
                iced::time::every(std::time::Duration::from_millis(33)).map(|_| Message::Tick),
            );
        }
        if let Some(capture) = &self.capture {
            subs.push(channel_subscription(capture.receiver()).map(Message::Power));
        }
        if let Some(rx) = &self.feed_rx {
            subs.push(channel_subscription(rx.clone()).map(Message::Feed));
        }

        Subscription::batch(subs)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn on_tick(&mut self, now: Instant) -> Task<Message> {
        if !self.live || self.reviewing {
            self.transport.tick(now, self.duration_ms());
        }
        self.issue_follow_commands(now, false)
    }

    /// Compute autoscroll targets for both panels and emit scroll
    /// commands. `immediate` resumes paused panels and bypasses the
    /// command throttle.
    fn issue_follow_commands(&mut self, now: Instant, immediate: bool) -> Task<Message> {
        let mut tasks = Vec::new();

        let target = self
            .waveform
            .follow_target(self.series.len(), self.playhead_seconds());
        let current = self.waveform.scroll_x();
        let command = if immediate {
            Some(self.waveform.autoscroll.resume(current, target, now))
        } else {
            self.waveform.autoscroll.try_command(current, target, now)
        };
        if let Some(x) = command {
            tasks.push(scroll_command(
                WAVEFORM_SCROLLABLE_ID.clone(),
                scrollable::AbsoluteOffset { x, y: 0.0 },
            ));
        }

        if let Some(target) = self.panel.follow_target(&self.transcript, self.playhead_ms()) {
            let current = self.panel.scroll_y();
            let command = if immediate {
                Some(self.panel.autoscroll.resume(current, target, now))
            } else {
                self.panel.autoscroll.try_command(current, target, now)
            };
            if let Some(y) = command {
                tasks.push(scroll_command(
                    TRANSCRIPT_SCROLLABLE_ID.clone(),
                    scrollable::AbsoluteOffset { x: 0.0, y },
                ));
            }
        }

        Task::batch(tasks)
    }

    fn recenter_now(&mut self, now: Instant) -> Task<Message> {
        self.issue_follow_commands(now, true)
    }

    fn seek_to_ms(&mut self, ms: u64) -> Task<Message> {
        self.transport.seek_ms(ms, self.duration_ms());
        if self.live {
            self.reviewing = true;
        }
        // Recenter both panels on the new position right away
        self.recenter_now(Instant::now())
    }

    fn apply_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Partial(paragraph) => {
                if self.last_is_partial {
                    self.transcript.replace_last_paragraph(paragraph);
                } else {
                    self.transcript.push_paragraph(paragraph);
                }
                self.last_is_partial = true;
            }
            FeedEvent::Final(paragraph) => {
                if self.last_is_partial {
                    self.transcript.replace_last_paragraph(paragraph);
                } else {
                    self.transcript.push_paragraph(paragraph);
                }
                self.last_is_partial = false;
            }
        }
        self.ranges = extract_speaker_ranges(&self.transcript);
    }

    fn apply_window_size(&mut self, size: iced::Size) {
        self.waveform
            .set_view_size(size.width - 2.0 * LAYOUT_PADDING, WAVEFORM_PANEL_HEIGHT);
        let panel_height =
            size.height - WAVEFORM_PANEL_HEIGHT - HEADER_HEIGHT - 4.0 * LAYOUT_PADDING;
        self.panel.set_view_height(panel_height.max(0.0));
    }

    fn view_header(&self) -> Element<'_, Message> {
        let status = if self.live && !self.reviewing {
            format!("● Recording  {}", format_clock(self.duration_ms()))
        } else if self.transport.is_playing() {
            format!("▶ {}", format_clock(self.transport.position_ms()))
        } else {
            format!("⏸ {}", format_clock(self.transport.position_ms()))
        };
        let status = text(status).size(16);

        let mut controls = row![status].spacing(10).align_y(iced::Alignment::Center);

        if !self.live || self.reviewing {
            let label = if self.transport.is_playing() { "Pause" } else { "Play" };
            controls = controls.push(
                button(text(label).size(13)).on_press(Message::TogglePlayback),
            );
        }

        let any_paused = self.reviewing
            || !self.waveform.autoscroll.is_following()
            || !self.panel.autoscroll.is_following();
        if any_paused {
            let label = if self.live { "Latest" } else { "Follow" };
            controls = controls.push(
                button(text(label).size(13))
                    .on_press(Message::JumpToLatest)
                    .style(button::secondary),
            );
        }

        controls = controls.push(Space::new().width(Length::Fill));
        controls = controls.push(
            text(format!("{} speakers", self.transcript.speaker_labels().len())).size(13),
        );
        controls.into()
    }

    fn duration_ms(&self) -> u64 {
        (self.series.duration_seconds() * 1000.0) as u64
    }

    /// `None` until playback starts, keeping the play head and future
    /// dimming off a freshly opened recording
    fn playhead_seconds(&self) -> Option<f64> {
        if self.live && !self.reviewing {
            Some(self.series.duration_seconds())
        } else if self.transport.started() {
            Some(self.transport.position_seconds())
        } else {
            None
        }
    }

    fn playhead_ms(&self) -> Option<u64> {
        if self.live && !self.reviewing {
            Some(self.duration_ms())
        } else if self.transport.started() {
            Some(self.transport.position_ms())
        } else {
            None
        }
    }
}

fn scroll_command(id: Id, offset: scrollable::AbsoluteOffset) -> Task<Message> {
    iced::advanced::widget::operate(iced::advanced::widget::operation::scrollable::scroll_to(
        id.into(),
        offset.into(),
    ))
}

/// `m:ss` elapsed-time clock
fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::transcript::{TextPart, TimeRange, TranscriptParagraph};

    fn app() -> MurmurApp {
        let options = BootOptions {
            // Nonexistent path keeps boot offline: import fails cleanly
            // and no capture thread is started
            wav: Some(PathBuf::from("/nonexistent/recording.wav")),
            transcript: None,
            device: None,
            config: AppConfig::default(),
        };
        MurmurApp::new(options).0
    }

    fn spoken(label: &str, start_ms: u64, end_ms: u64) -> TranscriptParagraph {
        TranscriptParagraph {
            parts: vec![TextPart {
                text: "words".to_string(),
                time_range: Some(TimeRange { start_ms, end_ms }),
                speaker_label: Some(label.to_string()),
                leading_space: false,
            }],
        }
    }

    #[test]
    fn test_partial_then_final_replaces_in_place() {
        let mut app = app();
        app.apply_feed_event(FeedEvent::Partial(spoken("A", 0, 500)));
        assert_eq!(app.transcript.paragraphs().len(), 1);

        app.apply_feed_event(FeedEvent::Partial(spoken("A", 0, 900)));
        assert_eq!(app.transcript.paragraphs().len(), 1, "partial replaces partial");

        app.apply_feed_event(FeedEvent::Final(spoken("A", 0, 1_000)));
        assert_eq!(app.transcript.paragraphs().len(), 1, "final commits the partial");

        app.apply_feed_event(FeedEvent::Final(spoken("B", 1_200, 2_000)));
        assert_eq!(app.transcript.paragraphs().len(), 2, "next final appends");
    }

    #[test]
    fn test_feed_events_refresh_ranges() {
        let mut app = app();
        assert!(app.ranges.is_empty());
        app.apply_feed_event(FeedEvent::Final(spoken("A", 0, 1_000)));
        assert_eq!(app.ranges.len(), 1);
        assert_eq!(app.ranges[0].label_index, 0);
    }

    #[test]
    fn test_seek_enters_review_in_live_mode() {
        let mut app = app();
        app.live = true;
        app.series.extend_from_slice(&[10; 50]); // 5s of material
        let _ = app.seek_to_ms(2_000);
        assert!(app.reviewing);
        assert_eq!(app.transport.position_ms(), 2_000);

        let _ = app.update(Message::JumpToLatest);
        assert!(!app.reviewing);
    }

    #[test]
    fn test_playhead_follows_newest_bar_while_recording() {
        let mut app = app();
        app.live = true;
        app.series.extend_from_slice(&[10; 30]); // 3s recorded
        assert_eq!(app.playhead_ms(), Some(3_000));

        let _ = app.seek_to_ms(1_000);
        assert_eq!(app.playhead_ms(), Some(1_000));
    }

    #[test]
    fn test_no_playhead_before_first_play() {
        let mut app = app();
        app.series.extend_from_slice(&[10; 30]);
        assert_eq!(app.playhead_ms(), None, "freshly opened recording");

        let _ = app.update(Message::TogglePlayback);
        assert_eq!(app.playhead_ms(), Some(0));
    }
}
