//! Transcript view function
//!
//! Renders the paragraph list into a vertical scrollable, mirroring the
//! waveform panel: scroll offsets are reported back so the autoscroll
//! controller can attribute them, and the scrollable ID allows the
//! application to issue programmatic scroll commands.

use std::sync::LazyLock;

use iced::widget::{button, column, container, row, scrollable, text, Id, Row, Space};
use iced::{Alignment, Element, Length};
use murmur_core::transcript::{TextPart, Transcript, TranscriptParagraph};

use crate::theme::speaker_color;

/// Scrollable ID for the transcript panel (used for programmatic scrolling)
pub static TRANSCRIPT_SCROLLABLE_ID: LazyLock<Id> = LazyLock::new(Id::unique);

/// Create the transcript panel element.
///
/// * `on_seek` - called with a paragraph's start time in milliseconds when
///   its timestamp is clicked
/// * `on_scroll` - called with `(offset, max_offset)` on every scroll event
pub fn transcript_panel<'a, Message>(
    transcript: &'a Transcript,
    current_time_ms: Option<u64>,
    on_seek: impl Fn(u64) -> Message + 'a,
    on_scroll: impl Fn(f32, f32) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let active_idx = active_paragraph(transcript, current_time_ms);

    let paragraphs: Vec<Element<Message>> = transcript
        .paragraphs()
        .iter()
        .enumerate()
        .map(|(i, paragraph)| {
            view_paragraph(
                transcript,
                paragraph,
                current_time_ms,
                active_idx == Some(i),
                &on_seek,
            )
        })
        .collect();

    scrollable(
        column(paragraphs)
            .spacing(10)
            .padding(12)
            .width(Length::Fill),
    )
    .id(TRANSCRIPT_SCROLLABLE_ID.clone())
    .width(Length::Fill)
    .height(Length::Fill)
    .on_scroll(move |viewport: scrollable::Viewport| {
        let offset = viewport.absolute_offset().y;
        let max_offset = (viewport.content_bounds().height - viewport.bounds().height).max(0.0);
        on_scroll(offset, max_offset)
    })
    .into()
}

/// One paragraph: optional colored speaker header, then a timestamp
/// button beside the paragraph's parts in a wrapping row. Every timed
/// part is itself a seek target, and the part containing the current
/// time renders highlighted.
fn view_paragraph<'a, Message>(
    transcript: &'a Transcript,
    paragraph: &'a TranscriptParagraph,
    current_time_ms: Option<u64>,
    active: bool,
    on_seek: &(impl Fn(u64) -> Message + 'a),
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let header: Element<Message> = match paragraph.speaker_label() {
        Some(label) => {
            let color = transcript
                .label_index(label)
                .map(speaker_color)
                .unwrap_or(iced::Color::WHITE);
            text(label.to_string()).size(13).color(color).into()
        }
        None => Space::new().height(0).into(),
    };

    let timestamp: Element<Message> = match paragraph.start_ms() {
        Some(start_ms) => button(text(format_timestamp(start_ms)).size(11))
            .on_press(on_seek(start_ms))
            .padding([2, 6])
            .style(button::text)
            .into(),
        None => Space::new().width(44).into(),
    };

    let parts: Vec<Element<Message>> = paragraph
        .parts
        .iter()
        .map(|part| view_part(part, current_time_ms, on_seek))
        .collect();

    let body = row![
        timestamp,
        Row::with_children(parts).spacing(5).wrap()
    ]
    .spacing(8)
    .align_y(Alignment::Start);

    let content = column![header, body].spacing(2);

    if active {
        container(content)
            .padding(4)
            .width(Length::Fill)
            .style(|theme: &iced::Theme| container::Style {
                background: Some(
                    theme
                        .extended_palette()
                        .background
                        .weak
                        .color
                        .into(),
                ),
                border: iced::Border {
                    radius: 4.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .into()
    } else {
        container(content).padding(4).width(Length::Fill).into()
    }
}

/// One part: timed parts are seek buttons, untimed parts plain text.
fn view_part<'a, Message>(
    part: &'a TextPart,
    current_time_ms: Option<u64>,
    on_seek: &(impl Fn(u64) -> Message + 'a),
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    match part.time_range {
        Some(range) => {
            let style = if part_is_active(part, current_time_ms) {
                button::primary
            } else {
                button::text
            };
            button(text(&part.text).size(15))
                .on_press(on_seek(range.start_ms))
                .padding([0, 2])
                .style(style)
                .into()
        }
        None => text(&part.text).size(15).into(),
    }
}

/// Whether the play head sits inside this part's time range
fn part_is_active(part: &TextPart, current_time_ms: Option<u64>) -> bool {
    match (part.time_range, current_time_ms) {
        (Some(range), Some(current)) => range.start_ms <= current && current < range.end_ms,
        _ => false,
    }
}

/// Index of the paragraph the play head is in, or the last one it has
/// passed. `None` before playback reaches the first timed paragraph.
fn active_paragraph(transcript: &Transcript, current_time_ms: Option<u64>) -> Option<usize> {
    let current = current_time_ms?;
    let mut active = None;
    for (i, paragraph) in transcript.paragraphs().iter().enumerate() {
        match paragraph.start_ms() {
            Some(start) if start <= current => active = Some(i),
            Some(_) => break,
            None => {}
        }
    }
    active
}

/// `m:ss` for times under an hour, `h:mm:ss` past it
fn format_timestamp(ms: u64) -> String {
    let total_secs = ms / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}
