//! Pausable progress timers.
//!
//! Every timed activity in the kitchen (chopping, cooking, washing, plate
//! return) is an elapsed/duration pair advanced by the caller's tick. A
//! paused activity simply isn't advanced, so progress survives pauses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressTimer {
    pub elapsed: f32,
    pub duration: f32,
}

impl ProgressTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
        }
    }

    /// Add `dt` seconds. Returns true once the timer has run out.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.is_finished() {
            self.elapsed += dt.max(0.0);
        }
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn is_started(&self) -> bool {
        self.elapsed > 0.0
    }

    /// Fraction complete, clamped to 0..=1.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Lengthen the timer without touching elapsed time.
    pub fn extend(&mut self, extra: f32) {
        self.duration += extra;
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_until_finished() {
        let mut t = ProgressTimer::new(2.0);
        assert!(!t.advance(0.5));
        assert!(!t.advance(1.0));
        assert!(t.advance(0.5));
        assert!(t.is_finished());
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_finished_timer_does_not_grow() {
        let mut t = ProgressTimer::new(1.0);
        t.advance(1.5);
        t.advance(10.0);
        assert_eq!(t.elapsed, 1.5);
    }

    #[test]
    fn test_extend_keeps_elapsed() {
        let mut t = ProgressTimer::new(6.0);
        t.advance(6.0);
        assert!(t.is_finished());
        t.extend(6.0);
        assert!(!t.is_finished());
        assert_eq!(t.elapsed, 6.0);
        assert!((t.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_is_complete() {
        let t = ProgressTimer::new(0.0);
        assert!(t.is_finished());
        assert_eq!(t.progress(), 1.0);
    }
}
