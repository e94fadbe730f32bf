//! Round timer
//!
//! Converts host timestamps (milliseconds, monotonic) into elapsed ramp time and
//! whole seconds remaining. Pausing freezes the elapsed value; resuming
//! re-anchors the start so no time is gained or lost.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundClock {
    /// Timestamp the round effectively started at (shifted by pauses)
    start_ms: f64,
    /// Round length in seconds
    length_secs: f64,
    /// Set while paused
    paused_at_ms: Option<f64>,
}

impl RoundClock {
    /// Anchor a new clock at `now_ms`
    pub fn start(now_ms: f64, length_secs: f64) -> Self {
        Self {
            start_ms: now_ms,
            length_secs: length_secs.max(0.0),
            paused_at_ms: None,
        }
    }

    /// Seconds of round time consumed so far (never negative)
    pub fn elapsed_secs(&self, now_ms: f64) -> f64 {
        let reference = self.paused_at_ms.unwrap_or(now_ms);
        ((reference - self.start_ms) / 1000.0).max(0.0)
    }

    /// Whole seconds remaining, rounded up
    pub fn time_left_secs(&self, now_ms: f64) -> u32 {
        let left = (self.length_secs - self.elapsed_secs(now_ms)).ceil();
        left.max(0.0) as u32
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        self.time_left_secs(now_ms) == 0
    }

    /// Freeze the clock. Returns false if it was already frozen.
    pub fn pause(&mut self, now_ms: f64) -> bool {
        if self.paused_at_ms.is_some() {
            return false;
        }
        self.paused_at_ms = Some(now_ms);
        true
    }

    /// Unfreeze the clock, returning how long it was paused (ms).
    ///
    /// The start anchor moves forward by exactly that amount, so
    /// `elapsed_secs` continues from the value it had at `pause`.
    pub fn resume(&mut self, now_ms: f64) -> Option<f64> {
        let paused_at = self.paused_at_ms.take()?;
        let paused_for = (now_ms - paused_at).max(0.0);
        self.start_ms += paused_for;
        Some(paused_for)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_left_rounds_up() {
        let clock = RoundClock::start(1000.0, 60.0);
        assert_eq!(clock.time_left_secs(1000.0), 60);
        assert_eq!(clock.time_left_secs(1001.0), 60);
        assert_eq!(clock.time_left_secs(2000.0), 59);
        assert_eq!(clock.time_left_secs(60_999.0), 1);
        assert_eq!(clock.time_left_secs(61_000.0), 0);
        assert!(clock.is_expired(61_000.0));
    }

    #[test]
    fn test_time_left_never_negative() {
        let clock = RoundClock::start(0.0, 60.0);
        assert_eq!(clock.time_left_secs(500_000.0), 0);
        // Timestamps before the anchor read as zero elapsed
        assert_eq!(clock.elapsed_secs(-5000.0), 0.0);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut clock = RoundClock::start(0.0, 60.0);
        assert!(clock.pause(20_500.0));
        assert!(!clock.pause(25_000.0));
        assert!((clock.elapsed_secs(90_000.0) - 20.5).abs() < 1e-9);
        assert_eq!(clock.time_left_secs(90_000.0), 40);
    }

    #[test]
    fn test_resume_preserves_elapsed() {
        let mut clock = RoundClock::start(0.0, 60.0);
        clock.pause(20_500.0);
        let paused_for = clock.resume(30_500.0);
        assert_eq!(paused_for, Some(10_000.0));
        assert!((clock.elapsed_secs(30_500.0) - 20.5).abs() < 1e-9);
        assert_eq!(clock.time_left_secs(30_500.0), 40);
        assert_eq!(clock.resume(31_000.0), None);
    }
}
