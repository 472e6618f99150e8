//! Game session: score, level clock and phase.

use serde::{Deserialize, Serialize};

use galley_logic::scoring::star_rating;

use crate::events::{EventQueue, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Running,
    Paused,
    TimeOver,
}

/// State of one play-through of a level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSession {
    pub score: i32,
    /// Whole seconds left on the level clock
    pub time_remaining: u32,
    pub phase: SessionPhase,
    /// Stars earned, set once time runs out
    pub stars: Option<u8>,
    /// Fraction of the current second already elapsed
    clock: f32,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, duration_seconds: u32, name: &str, events: &mut EventQueue) {
        *self = Self {
            time_remaining: duration_seconds,
            phase: SessionPhase::Running,
            ..Self::default()
        };
        log::info!("Level '{}' started ({}s)", name, duration_seconds);
        events.push(GameEvent::LevelStarted {
            name: name.to_string(),
            duration_seconds,
        });
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.phase = SessionPhase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        self.phase = SessionPhase::Running;
        true
    }

    pub fn add_score(&mut self, delta: i32, events: &mut EventQueue) {
        self.score += delta;
        events.push(GameEvent::ScoreUpdated {
            score: self.score,
            delta,
        });
    }

    /// Run the level clock. Returns true on the tick the clock hits zero.
    pub fn advance(&mut self, dt: f32, events: &mut EventQueue) -> bool {
        if !self.is_running() {
            return false;
        }
        self.clock += dt.max(0.0);
        while self.clock >= 1.0 && self.time_remaining > 0 {
            self.clock -= 1.0;
            self.time_remaining -= 1;
            events.push(GameEvent::CountdownTick {
                seconds_left: self.time_remaining,
            });
        }
        self.time_remaining == 0
    }

    /// End the level and rate it.
    pub fn finish(&mut self, thresholds: &[i32; 3], events: &mut EventQueue) -> u8 {
        let stars = star_rating(self.score, thresholds);
        self.phase = SessionPhase::TimeOver;
        self.stars = Some(stars);
        log::info!("Time over: score {} ({} stars)", self.score, stars);
        events.push(GameEvent::TimeOver {
            score: self.score,
            stars,
        });
        stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_ticks_whole_seconds() {
        let mut events = EventQueue::new();
        let mut session = GameSession::new();
        session.start(3, "test", &mut events);
        events.drain();

        assert!(!session.advance(0.5, &mut events));
        assert!(events.is_empty());
        assert!(!session.advance(0.75, &mut events));
        assert_eq!(session.time_remaining, 2);
        assert!(session.advance(2.0, &mut events));
        assert_eq!(session.time_remaining, 0);

        let ticks: Vec<_> = events.drain();
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[2], GameEvent::CountdownTick { seconds_left: 0 });
    }

    #[test]
    fn test_paused_clock_does_not_run() {
        let mut events = EventQueue::new();
        let mut session = GameSession::new();
        session.start(10, "test", &mut events);
        assert!(session.pause());
        assert!(!session.pause());
        session.advance(5.0, &mut events);
        assert_eq!(session.time_remaining, 10);
        assert!(session.resume());
        session.advance(5.0, &mut events);
        assert_eq!(session.time_remaining, 5);
    }

    #[test]
    fn test_score_and_rating() {
        let mut events = EventQueue::new();
        let mut session = GameSession::new();
        session.start(1, "test", &mut events);
        session.add_score(26, &mut events);
        session.add_score(-10, &mut events);
        assert_eq!(session.score, 16);
        assert!(events.iter().any(|e| *e == GameEvent::ScoreUpdated { score: 16, delta: -10 }));

        let stars = session.finish(&[10, 20, 30], &mut events);
        assert_eq!(stars, 1);
        assert_eq!(session.phase, SessionPhase::TimeOver);
        assert!(!session.is_running());
    }
}
