//! Speaker-diarization ranges aligned to bar indices
//!
//! Derived data: the range list is discarded and fully recomputed on every
//! transcript change, because recognition refinement can retroactively
//! shift paragraph boundaries. O(n) in paragraph count, which is bounded by
//! recording length.

use super::coords::ms_to_bar_index;
use crate::transcript::Transcript;

/// Contiguous span of bars attributed to one identified speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeakerLabelRange {
    pub start_bar: usize,
    /// Exclusive end bar
    pub end_bar: usize,
    /// Stable index into the transcript's first-seen speaker-label list
    pub label_index: usize,
}

/// Build the sorted, non-overlapping speaker range list for a transcript.
///
/// Paragraphs without a speaker label on their first part, or without a
/// start or end time, are skipped; a paragraph whose start and end fall in
/// the same bar is degenerate and dropped. An empty result is valid: the
/// waveform renders plain.
///
/// Paragraphs are expected in non-decreasing time order, so each emitted
/// range starts at or after the previous one ends. A violation is an
/// upstream contract breach: fatal in debug builds, warn-and-drop in
/// release.
pub fn extract_speaker_ranges(transcript: &Transcript) -> Vec<SpeakerLabelRange> {
    let mut ranges: Vec<SpeakerLabelRange> = Vec::new();

    for paragraph in transcript.paragraphs() {
        let Some(label) = paragraph.speaker_label() else {
            continue;
        };
        let (Some(start_ms), Some(end_ms)) = (paragraph.start_ms(), paragraph.end_ms()) else {
            continue;
        };
        let Some(label_index) = transcript.label_index(label) else {
            // The transcript registers labels from its own parts, so a miss
            // here means the label list and paragraph list diverged.
            debug_assert!(false, "speaker label {label:?} missing from label list");
            log::warn!("Dropping range for unregistered speaker label {label:?}");
            continue;
        };

        let start_bar = ms_to_bar_index(start_ms);
        let end_bar = ms_to_bar_index(end_ms);
        if start_bar == end_bar {
            continue;
        }

        if let Some(prev) = ranges.last() {
            debug_assert!(
                start_bar >= prev.end_bar,
                "paragraphs out of order: range starts at bar {start_bar}, previous ends at {}",
                prev.end_bar
            );
            if start_bar < prev.end_bar {
                log::warn!(
                    "Dropping overlapping speaker range [{start_bar}, {end_bar}): \
                     previous range ends at bar {}",
                    prev.end_bar
                );
                continue;
            }
        }

        ranges.push(SpeakerLabelRange { start_bar, end_bar, label_index });
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{TextPart, TimeRange, TranscriptParagraph};

    fn spoken(label: &str, start_ms: u64, end_ms: u64) -> TranscriptParagraph {
        TranscriptParagraph {
            parts: vec![TextPart {
                text: format!("{label} says"),
                time_range: Some(TimeRange { start_ms, end_ms }),
                speaker_label: Some(label.to_string()),
                leading_space: false,
            }],
        }
    }

    fn transcript_of(paragraphs: Vec<TranscriptParagraph>) -> Transcript {
        let mut t = Transcript::new();
        for p in paragraphs {
            t.push_paragraph(p);
        }
        t
    }

    #[test]
    fn test_two_speakers_at_100ms_bars() {
        // Speaker A 0-1200 ms, speaker B 1200-2400 ms => [{0,12,0},{12,24,1}]
        let t = transcript_of(vec![spoken("A", 0, 1200), spoken("B", 1200, 2400)]);
        assert_eq!(
            extract_speaker_ranges(&t),
            vec![
                SpeakerLabelRange { start_bar: 0, end_bar: 12, label_index: 0 },
                SpeakerLabelRange { start_bar: 12, end_bar: 24, label_index: 1 },
            ]
        );
    }

    #[test]
    fn test_output_sorted_and_non_overlapping() {
        let t = transcript_of(vec![
            spoken("A", 0, 500),
            spoken("B", 700, 1500),
            spoken("A", 1500, 2000),
        ]);
        let ranges = extract_speaker_ranges(&t);
        assert_eq!(ranges.len(), 3);
        for pair in ranges.windows(2) {
            assert!(pair[0].start_bar < pair[0].end_bar);
            assert!(pair[1].start_bar >= pair[0].end_bar, "ranges overlap: {pair:?}");
        }
        // Same label resolves to the same index both times
        assert_eq!(ranges[0].label_index, ranges[2].label_index);
    }

    #[test]
    fn test_degenerate_paragraph_yields_no_range() {
        // 40 ms wide: start and end land in bar 0
        let t = transcript_of(vec![spoken("A", 10, 50)]);
        assert!(extract_speaker_ranges(&t).is_empty());
    }

    #[test]
    fn test_unlabeled_and_untimed_paragraphs_skipped() {
        let unlabeled = TranscriptParagraph {
            parts: vec![TextPart {
                text: "no speaker".into(),
                time_range: Some(TimeRange { start_ms: 0, end_ms: 1000 }),
                speaker_label: None,
                leading_space: false,
            }],
        };
        let untimed = TranscriptParagraph {
            parts: vec![TextPart {
                text: "no times".into(),
                time_range: None,
                speaker_label: Some("A".into()),
                leading_space: false,
            }],
        };
        let t = transcript_of(vec![unlabeled, untimed, spoken("B", 2000, 3000)]);
        let ranges = extract_speaker_ranges(&t);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start_bar, 20);
    }

    #[test]
    fn test_abutting_same_speaker_ranges_stay_separate() {
        let t = transcript_of(vec![spoken("A", 0, 1000), spoken("A", 1000, 2000)]);
        let ranges = extract_speaker_ranges(&t);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].end_bar, ranges[1].start_bar);
        assert_eq!(ranges[0].label_index, ranges[1].label_index);
    }

    #[test]
    fn test_no_speakers_is_plain_waveform_mode() {
        assert!(extract_speaker_ranges(&Transcript::new()).is_empty());
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_release_drops_overlapping_range() {
        // Out-of-order input breaches the upstream contract; release builds
        // drop the offender rather than emit an overlap.
        let t = transcript_of(vec![spoken("A", 0, 2000), spoken("B", 500, 1500)]);
        let ranges = extract_speaker_ranges(&t);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].end_bar, 20);
    }
}
