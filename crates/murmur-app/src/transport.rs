//! Playback transport for reviewing recorded audio
//!
//! A wall-clock driven position counter: `tick` advances the position by
//! the elapsed time since the previous tick while playing, and pauses
//! automatically at the end of the material.

use std::time::Instant;

#[derive(Debug, Default)]
pub struct Transport {
    playing: bool,
    position_ms: f64,
    last_tick: Option<Instant>,
    started: bool,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// False until the first play or seek, so the UI can distinguish "no
    /// play head yet" from "play head at zero"
    pub fn started(&self) -> bool {
        self.started
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms.max(0.0) as u64
    }

    pub fn position_seconds(&self) -> f64 {
        self.position_ms / 1000.0
    }

    pub fn play(&mut self, now: Instant) {
        self.playing = true;
        self.started = true;
        self.last_tick = Some(now);
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.last_tick = None;
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.playing {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Jump to an absolute position, clamped to the material
    pub fn seek_ms(&mut self, position_ms: u64, duration_ms: u64) {
        self.position_ms = position_ms.min(duration_ms) as f64;
        self.started = true;
    }

    /// Advance the position while playing. Returns true if it moved.
    pub fn tick(&mut self, now: Instant, duration_ms: u64) -> bool {
        if !self.playing {
            return false;
        }
        let elapsed = match self.last_tick {
            Some(last) => now.saturating_duration_since(last),
            None => std::time::Duration::ZERO,
        };
        self.last_tick = Some(now);
        if elapsed.is_zero() {
            return false;
        }

        self.position_ms += elapsed.as_secs_f64() * 1000.0;
        if self.position_ms >= duration_ms as f64 {
            self.position_ms = duration_ms as f64;
            self.pause();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_tick_advances_while_playing() {
        let mut t = Transport::new();
        let start = Instant::now();
        t.play(start);
        assert!(t.tick(start + Duration::from_millis(250), 10_000));
        assert!((t.position_ms() as i64 - 250).abs() <= 1);
        assert!(t.is_playing());
    }

    #[test]
    fn test_tick_noop_while_paused() {
        let mut t = Transport::new();
        let start = Instant::now();
        assert!(!t.tick(start + Duration::from_millis(100), 10_000));
        assert_eq!(t.position_ms(), 0);
    }

    #[test]
    fn test_pauses_at_end() {
        let mut t = Transport::new();
        let start = Instant::now();
        t.seek_ms(900, 1_000);
        t.play(start);
        t.tick(start + Duration::from_millis(500), 1_000);
        assert_eq!(t.position_ms(), 1_000);
        assert!(!t.is_playing());
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut t = Transport::new();
        t.seek_ms(5_000, 3_000);
        assert_eq!(t.position_ms(), 3_000);
    }

    #[test]
    fn test_toggle() {
        let mut t = Transport::new();
        let now = Instant::now();
        t.toggle(now);
        assert!(t.is_playing());
        t.toggle(now);
        assert!(!t.is_playing());
    }

    #[test]
    fn test_started_after_first_play_or_seek() {
        let mut t = Transport::new();
        assert!(!t.started());
        t.play(Instant::now());
        assert!(t.started());

        let mut t = Transport::new();
        t.seek_ms(100, 1_000);
        assert!(t.started());
    }
}
