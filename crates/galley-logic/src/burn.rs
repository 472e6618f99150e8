//! Burn timeline: what happens to a pot left on the heat after cooking.
//!
//! Five stages over 13.3 seconds of (pause-adjusted) heat:
//!
//! | Stage | Window (s) | Warning pulse |
//! |-------|------------|---------------|
//! | Smoking | 0 – 4 | none |
//! | Warning | 4 – 6.3 | every 0.5 s, ×1.15 |
//! | Urgent | 6.3 – 9.3 | every 0.2 s, ×1.25 |
//! | Critical | 9.3 – 12.3 | every 0.1 s, ×1.35 |
//! | Scorching | 12.3 – 13.3 | every 0.1 s, ×1.35, liquid darkens |
//!
//! At the end the pot is burned.

use serde::{Deserialize, Serialize};

/// Stage boundaries in seconds.
pub const BURN_TIMELINE: [f32; 6] = [0.0, 4.0, 6.3, 9.3, 12.3, 13.3];

/// Total heat time before a pot burns.
pub const BURN_DURATION: f32 = BURN_TIMELINE[5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BurnStage {
    Smoking,
    Warning,
    Urgent,
    Critical,
    Scorching,
}

impl BurnStage {
    /// Stage for a given elapsed burn time (clamped to the last stage).
    pub fn at(elapsed: f32) -> Self {
        if elapsed < BURN_TIMELINE[1] {
            BurnStage::Smoking
        } else if elapsed < BURN_TIMELINE[2] {
            BurnStage::Warning
        } else if elapsed < BURN_TIMELINE[3] {
            BurnStage::Urgent
        } else if elapsed < BURN_TIMELINE[4] {
            BurnStage::Critical
        } else {
            BurnStage::Scorching
        }
    }

    /// Seconds between warning pulses, `None` while only smoking.
    pub fn pulse_interval(self) -> Option<f32> {
        match self {
            BurnStage::Smoking => None,
            BurnStage::Warning => Some(0.5),
            BurnStage::Urgent => Some(0.2),
            BurnStage::Critical | BurnStage::Scorching => Some(0.1),
        }
    }

    /// Scale factor for the warning pulse.
    pub fn pulse_intensity(self) -> f32 {
        match self {
            BurnStage::Smoking => 1.0,
            BurnStage::Warning => 1.15,
            BurnStage::Urgent => 1.25,
            BurnStage::Critical | BurnStage::Scorching => 1.35,
        }
    }
}

/// Result of advancing the timeline by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BurnStep {
    /// Stage after this tick, if it differs from the stage before.
    pub entered: Option<BurnStage>,
    /// Intensity of the warning pulse fired this tick, if any.
    pub pulse: Option<f32>,
    /// The timeline completed this tick.
    pub burned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BurnTimeline {
    pub elapsed: f32,
    pulse_accumulator: f32,
}

impl BurnTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.elapsed > 0.0
    }

    pub fn stage(&self) -> BurnStage {
        BurnStage::at(self.elapsed)
    }

    /// How far the liquid has darkened toward the burnt colour (0..=1).
    pub fn scorch_fraction(&self) -> f32 {
        let start = BURN_TIMELINE[4];
        let span = BURN_TIMELINE[5] - start;
        ((self.elapsed - start) / span).clamp(0.0, 1.0)
    }

    pub fn advance(&mut self, dt: f32) -> BurnStep {
        let dt = dt.max(0.0);
        let before = self.stage();
        let was_started = self.is_started();
        self.elapsed += dt;

        let mut step = BurnStep::default();
        if self.elapsed >= BURN_DURATION {
            step.burned = true;
            self.reset();
            return step;
        }

        let now = self.stage();
        if now != before || !was_started {
            step.entered = Some(now);
        }

        if let Some(interval) = now.pulse_interval() {
            self.pulse_accumulator += dt;
            if self.pulse_accumulator > interval {
                self.pulse_accumulator = 0.0;
                step.pulse = Some(now.pulse_intensity());
            }
        }
        step
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.pulse_accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(BurnStage::at(0.0), BurnStage::Smoking);
        assert_eq!(BurnStage::at(3.99), BurnStage::Smoking);
        assert_eq!(BurnStage::at(4.0), BurnStage::Warning);
        assert_eq!(BurnStage::at(6.3), BurnStage::Urgent);
        assert_eq!(BurnStage::at(9.3), BurnStage::Critical);
        assert_eq!(BurnStage::at(12.3), BurnStage::Scorching);
    }

    #[test]
    fn test_burns_at_end_of_timeline() {
        let mut t = BurnTimeline::new();
        assert!(!t.advance(13.0).burned);
        assert!(t.advance(0.5).burned);
        assert_eq!(t.elapsed, 0.0);
    }

    #[test]
    fn test_single_large_step_burns() {
        let mut t = BurnTimeline::new();
        assert!(t.advance(BURN_DURATION).burned);
    }

    #[test]
    fn test_first_step_reports_smoking() {
        let mut t = BurnTimeline::new();
        let step = t.advance(0.016);
        assert_eq!(step.entered, Some(BurnStage::Smoking));
        assert_eq!(step.pulse, None);
        assert_eq!(t.advance(0.016).entered, None);
    }

    #[test]
    fn test_pulse_cadence_quickens() {
        let dt = 0.05;
        let mut t = BurnTimeline::new();
        let mut pulses_warning = 0;
        let mut pulses_critical = 0;
        // Run to 13.0s, counting pulses per stage.
        for _ in 0..260 {
            let stage_before = t.stage();
            let step = t.advance(dt);
            if step.pulse.is_some() {
                match stage_before {
                    BurnStage::Warning => pulses_warning += 1,
                    BurnStage::Critical => pulses_critical += 1,
                    _ => {}
                }
            }
        }
        assert!(pulses_warning >= 3 && pulses_warning <= 5, "{pulses_warning}");
        assert!(pulses_critical >= 14, "{pulses_critical}");
    }

    #[test]
    fn test_scorch_fraction_only_in_last_stage() {
        let mut t = BurnTimeline::new();
        t.advance(12.0);
        assert_eq!(t.scorch_fraction(), 0.0);
        t.advance(0.8);
        assert!((t.scorch_fraction() - 0.5).abs() < 1e-3);
    }
}
