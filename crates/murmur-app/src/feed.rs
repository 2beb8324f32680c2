//! Transcript feed
//!
//! Transcripts are YAML files holding a list of paragraphs. They can be
//! loaded whole (reviewing a recording) or replayed on their own
//! timestamps (simulating a live transcription engine): each timed
//! paragraph arrives first as a partial at its start time, then as a
//! final at its end time, the same two-phase delivery a recognizer
//! produces.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver};
use murmur_core::transcript::TranscriptParagraph;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read transcript file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse transcript YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// One delivery from the transcript feed.
///
/// A `Partial` replaces the previous partial for the same paragraph;
/// a `Final` commits it.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Partial(TranscriptParagraph),
    Final(TranscriptParagraph),
}

/// Load a transcript file's paragraph list.
pub fn load_paragraphs(path: &Path) -> Result<Vec<TranscriptParagraph>, FeedError> {
    let contents = std::fs::read_to_string(path)?;
    let paragraphs: Vec<TranscriptParagraph> = serde_yaml::from_str(&contents)?;
    log::info!("load_paragraphs: {} paragraphs from {:?}", paragraphs.len(), path);
    Ok(paragraphs)
}

/// Replay a paragraph list on its own timestamps from a background thread.
///
/// Untimed paragraphs are committed immediately after their predecessor.
/// The thread exits once every paragraph is delivered or the receiving
/// end is dropped.
pub fn start_replay(paragraphs: Vec<TranscriptParagraph>) -> Arc<Receiver<FeedEvent>> {
    let (tx, rx) = channel::unbounded();

    std::thread::spawn(move || {
        let t0 = Instant::now();
        for paragraph in paragraphs {
            match (paragraph.start_ms(), paragraph.end_ms()) {
                (Some(start), end) => {
                    sleep_until(t0, start);
                    if tx.send(FeedEvent::Partial(paragraph.clone())).is_err() {
                        return;
                    }
                    if let Some(end) = end {
                        sleep_until(t0, end);
                    }
                    if tx.send(FeedEvent::Final(paragraph)).is_err() {
                        return;
                    }
                }
                (None, _) => {
                    if tx.send(FeedEvent::Final(paragraph)).is_err() {
                        return;
                    }
                }
            }
        }
        log::info!("transcript replay finished");
    });

    Arc::new(rx)
}

fn sleep_until(t0: Instant, offset_ms: u64) {
    let target = t0 + Duration::from_millis(offset_ms);
    let now = Instant::now();
    if target > now {
        std::thread::sleep(target - now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::transcript::{TextPart, TimeRange, Transcript};

    fn paragraph(label: &str, range: Option<(u64, u64)>, text: &str) -> TranscriptParagraph {
        TranscriptParagraph {
            parts: vec![TextPart {
                text: text.to_string(),
                time_range: range.map(|(start_ms, end_ms)| TimeRange { start_ms, end_ms }),
                speaker_label: Some(label.to_string()),
                leading_space: false,
            }],
        }
    }

    #[test]
    fn test_yaml_paragraphs_rebuild_transcript() {
        let yaml = "\
- parts:
    - text: \"hello there\"
      time_range: { start_ms: 0, end_ms: 900 }
      speaker_label: \"Speaker 1\"
- parts:
    - text: \"hi\"
      time_range: { start_ms: 1200, end_ms: 1600 }
      speaker_label: \"Speaker 2\"
";
        let paragraphs: Vec<TranscriptParagraph> = serde_yaml::from_str(yaml).unwrap();
        let mut transcript = Transcript::new();
        transcript.replace_paragraphs(paragraphs);
        assert_eq!(transcript.paragraphs().len(), 2);
        assert_eq!(transcript.speaker_labels(), &["Speaker 1", "Speaker 2"]);
        assert_eq!(transcript.paragraphs()[1].start_ms(), Some(1200));
    }

    #[test]
    fn test_replay_delivers_partial_then_final() {
        let rx = start_replay(vec![
            paragraph("A", Some((0, 10)), "first"),
            paragraph("B", None, "untimed"),
        ]);
        let timeout = Duration::from_secs(2);

        match rx.recv_timeout(timeout).unwrap() {
            FeedEvent::Partial(p) => assert_eq!(p.text(), "first"),
            other => panic!("expected partial, got {:?}", other),
        }
        match rx.recv_timeout(timeout).unwrap() {
            FeedEvent::Final(p) => assert_eq!(p.text(), "first"),
            other => panic!("expected final, got {:?}", other),
        }
        match rx.recv_timeout(timeout).unwrap() {
            FeedEvent::Final(p) => assert_eq!(p.text(), "untimed"),
            other => panic!("expected final, got {:?}", other),
        }
    }
}
