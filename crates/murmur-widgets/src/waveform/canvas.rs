//! Canvas Program for the waveform timeline
//!
//! Draws the scene produced by [`build_scene`] and translates clicks into
//! seek callbacks, following idiomatic iced 0.14 canvas patterns.

use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke};
use iced::{mouse, Color, Point, Rectangle, Size, Theme};
use murmur_core::timeline::{
    x_to_bar_index, SpeakerLabelRange, BAR_WIDTH, SAMPLES_PER_SLICE, SAMPLE_RATE,
};

use super::scene::{build_scene, Primitive, Viewport};
use crate::theme::{
    speaker_color, BAR_COLOR, BAR_FUTURE_COLOR, PLAYHEAD_COLOR, RANGE_BLOCK_ALPHA,
    RANGE_SEPARATOR_ALPHA, WAVEFORM_BG,
};

/// Font size of floating range labels
const RANGE_LABEL_SIZE: f32 = 12.0;

/// Canvas program rendering the windowed waveform with click-to-seek.
///
/// The canvas spans the full content width inside a horizontal scrollable;
/// the scene builder culls to `viewport`, so off-screen bars cost nothing.
pub struct TimelineCanvas<'a, Message, F>
where
    F: Fn(f64) -> Message,
{
    pub series: &'a [u8],
    pub ranges: &'a [SpeakerLabelRange],
    pub speaker_labels: &'a [String],
    pub viewport: Option<Viewport>,
    pub current_time: Option<f64>,
    pub on_seek: F,
}

impl<'a, Message, F> Program<Message> for TimelineCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(f64) -> Message,
{
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        if let Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(position) = cursor.position_in(bounds) {
                let bar = x_to_bar_index(position.x).min(self.series.len().saturating_sub(1));
                let seconds = bar as f64 * SAMPLES_PER_SLICE as f64 / SAMPLE_RATE as f64;
                return Some(canvas::Action::publish((self.on_seek)(seconds)));
            }
        }
        None
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) && !self.series.is_empty() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), WAVEFORM_BG);

        let Some(viewport) = self.viewport else {
            return vec![frame.into_geometry()];
        };

        let height = bounds.height;
        let center_y = height / 2.0;
        let scene = build_scene(self.series, self.ranges, viewport, self.current_time);

        for primitive in &scene {
            match *primitive {
                Primitive::RangeBlock { x, width, label_index } => {
                    let base = speaker_color(label_index);
                    frame.fill_rectangle(
                        Point::new(x, 0.0),
                        Size::new(width, height),
                        Color { a: RANGE_BLOCK_ALPHA, ..base },
                    );
                }
                Primitive::RangeSeparator { x, label_index } => {
                    let base = speaker_color(label_index);
                    frame.stroke(
                        &Path::line(Point::new(x, 0.0), Point::new(x, height)),
                        Stroke::default()
                            .with_color(Color { a: RANGE_SEPARATOR_ALPHA, ..base })
                            .with_width(1.0),
                    );
                }
                Primitive::RangeLabel { x, label_index } => {
                    let name = self
                        .speaker_labels
                        .get(label_index)
                        .map(String::as_str)
                        .unwrap_or("?");
                    frame.fill_text(canvas::Text {
                        content: name.to_string(),
                        position: Point::new(x, 4.0),
                        size: RANGE_LABEL_SIZE.into(),
                        color: speaker_color(label_index),
                        ..canvas::Text::default()
                    });
                }
                Primitive::Bar { x, height: bar_height, future } => {
                    let color = if future { BAR_FUTURE_COLOR } else { BAR_COLOR };
                    frame.fill_rectangle(
                        Point::new(x, center_y - bar_height / 2.0),
                        Size::new(BAR_WIDTH, bar_height),
                        color,
                    );
                }
                Primitive::Playhead { x } => {
                    frame.stroke(
                        &Path::line(Point::new(x, 0.0), Point::new(x, height)),
                        Stroke::default().with_color(PLAYHEAD_COLOR).with_width(2.0),
                    );
                }
            }
        }

        vec![frame.into_geometry()]
    }
}
