//! Transcript data model
//!
//! Paragraphs of timed text parts as produced by an external recognizer.
//! The recognizer streams results: the in-flight paragraph may be replaced
//! wholesale while partial, then finalized. The ordered distinct-speaker
//! list is owned here, next to the data it is derived from, so consumers
//! (range extraction, theming) resolve label strings to stable indices
//! without any implicit shared state.

use serde::{Deserialize, Serialize};

/// Closed time range of one text part, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_ms: u64,
    pub end_ms: u64,
}

/// One recognized token (word or sentence fragment).
///
/// Untimed and unlabeled parts are normal: partial results often lack a
/// time range, and only diarized output carries speaker labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
    #[serde(default)]
    pub time_range: Option<TimeRange>,
    #[serde(default)]
    pub speaker_label: Option<String>,
    /// Whether a space precedes this part when concatenating
    #[serde(default)]
    pub leading_space: bool,
}

/// One recognized paragraph: an ordered run of parts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptParagraph {
    pub parts: Vec<TextPart>,
}

impl TranscriptParagraph {
    /// Speaker label of the paragraph: its first part's label
    pub fn speaker_label(&self) -> Option<&str> {
        self.parts.first()?.speaker_label.as_deref()
    }

    /// Paragraph start time: its first part's range start
    pub fn start_ms(&self) -> Option<u64> {
        self.parts.first()?.time_range.map(|r| r.start_ms)
    }

    /// Paragraph end time: its last part's range end
    pub fn end_ms(&self) -> Option<u64> {
        self.parts.last()?.time_range.map(|r| r.end_ms)
    }

    /// Concatenated text honoring leading-space flags
    pub fn text(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            if part.leading_space && !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&part.text);
        }
        out
    }
}

/// The full transcript plus the ordered distinct-speaker list seen so far.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    paragraphs: Vec<TranscriptParagraph>,
    speaker_labels: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraphs(&self) -> &[TranscriptParagraph] {
        &self.paragraphs
    }

    /// Distinct speaker labels in first-seen order
    pub fn speaker_labels(&self) -> &[String] {
        &self.speaker_labels
    }

    /// Resolve a label string to its stable first-seen index
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.speaker_labels.iter().position(|l| l == label)
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Append a finalized paragraph
    pub fn push_paragraph(&mut self, paragraph: TranscriptParagraph) {
        self.register_labels(&paragraph);
        self.paragraphs.push(paragraph);
    }

    /// Replace the in-flight tail paragraph wholesale (partial result).
    ///
    /// Appends instead when the transcript is empty.
    pub fn replace_last_paragraph(&mut self, paragraph: TranscriptParagraph) {
        self.register_labels(&paragraph);
        match self.paragraphs.last_mut() {
            Some(last) => *last = paragraph,
            None => self.paragraphs.push(paragraph),
        }
    }

    /// Replace the whole paragraph list, rebuilding the label list.
    ///
    /// Recognition refinement can retroactively shift paragraph boundaries,
    /// so consumers treat every call as a full reset of derived data.
    pub fn replace_paragraphs(&mut self, paragraphs: Vec<TranscriptParagraph>) {
        self.speaker_labels.clear();
        self.paragraphs = paragraphs;
        let paragraphs = std::mem::take(&mut self.paragraphs);
        for paragraph in &paragraphs {
            self.register_labels(paragraph);
        }
        self.paragraphs = paragraphs;
    }

    fn register_labels(&mut self, paragraph: &TranscriptParagraph) {
        for part in &paragraph.parts {
            if let Some(label) = &part.speaker_label {
                if !self.speaker_labels.iter().any(|l| l == label) {
                    self.speaker_labels.push(label.clone());
                }
            }
        }
    }
}
