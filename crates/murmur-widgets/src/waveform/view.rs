//! Waveform view function
//!
//! Wires the timeline canvas into a horizontal scrollable, reporting scroll
//! offsets back to the application so the autoscroll controller can
//! attribute them.

use std::sync::LazyLock;

use iced::widget::{scrollable, Canvas, Id};
use iced::{Element, Length};
use murmur_core::timeline::{content_width, PowerSeries, SpeakerLabelRange};

use super::canvas::TimelineCanvas;
use super::state::WaveformState;

/// Fixed height of the waveform timeline panel
pub const WAVEFORM_PANEL_HEIGHT: f32 = 140.0;

/// Scrollable ID for the waveform panel (used for programmatic scrolling)
pub static WAVEFORM_SCROLLABLE_ID: LazyLock<Id> = LazyLock::new(Id::unique);

/// Create the scrolling waveform timeline element.
///
/// * `on_seek` - called with a time in seconds when a bar is clicked
/// * `on_scroll` - called with `(offset, max_offset)` on every scroll event
pub fn waveform_timeline<'a, Message>(
    series: &'a PowerSeries,
    ranges: &'a [SpeakerLabelRange],
    speaker_labels: &'a [String],
    state: &WaveformState,
    current_time: Option<f64>,
    on_seek: impl Fn(f64) -> Message + 'a,
    on_scroll: impl Fn(f32, f32) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let canvas = Canvas::new(TimelineCanvas {
        series: series.as_slice(),
        ranges,
        speaker_labels,
        viewport: state.viewport(),
        current_time,
        on_seek,
    })
    .width(Length::Fixed(content_width(series.len()).max(1.0)))
    .height(Length::Fixed(WAVEFORM_PANEL_HEIGHT));

    scrollable(canvas)
        .id(WAVEFORM_SCROLLABLE_ID.clone())
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new(),
        ))
        .width(Length::Fill)
        .height(Length::Shrink)
        .on_scroll(move |viewport: scrollable::Viewport| {
            let offset = viewport.absolute_offset().x;
            let max_offset = (viewport.content_bounds().width - viewport.bounds().width).max(0.0);
            on_scroll(offset, max_offset)
        })
        .into()
}
