use std::time::{Duration, Instant};

use crate::exercise::Exercise;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    #[strum(serialize = "Work Period")]
    Work,
    #[strum(serialize = "Break Period")]
    Break,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Complete,
    Cancelled,
}

/// How a phase run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseOutcome {
    Completed,
    Cancelled,
}

/// represents one timed phase being displayed to the user
#[derive(Clone, Debug)]
pub struct TimerState {
    pub started_at: Instant,
    pub target: Duration,
    pub phase: Phase,
    pub exercise: Option<&'static Exercise>,
    elapsed: Duration,
    fraction: f64,
    cancelled: bool,
}

impl TimerState {
    /// `target` must be non-zero
    pub fn new(
        started_at: Instant,
        target: Duration,
        phase: Phase,
        exercise: Option<&'static Exercise>,
    ) -> Self {
        debug_assert!(!target.is_zero(), "phase target must be positive");
        Self {
            started_at,
            target,
            phase,
            exercise,
            elapsed: Duration::ZERO,
            fraction: 0.0,
            cancelled: false,
        }
    }

    pub fn work(started_at: Instant, target: Duration) -> Self {
        Self::new(started_at, target, Phase::Work, None)
    }

    pub fn rest(started_at: Instant, target: Duration, exercise: &'static Exercise) -> Self {
        Self::new(started_at, target, Phase::Break, Some(exercise))
    }

    /// Recompute progress for `now`. Terminal states are left untouched and
    /// progress never moves backwards.
    pub fn advance(&mut self, now: Instant) {
        if self.is_terminal() {
            return;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed <= self.elapsed {
            return;
        }

        if elapsed >= self.target {
            self.elapsed = self.target;
            self.fraction = 1.0;
        } else {
            self.elapsed = elapsed;
            self.fraction = (elapsed.as_secs_f64() / self.target.as_secs_f64()).clamp(0.0, 1.0);
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn status(&self) -> Status {
        if self.cancelled {
            Status::Cancelled
        } else if self.fraction >= 1.0 {
            Status::Complete
        } else {
            Status::Running
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status() != Status::Running
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn remaining(&self) -> Duration {
        self.target.saturating_sub(self.elapsed)
    }

    /// `None` while still running
    pub fn outcome(&self) -> Option<PhaseOutcome> {
        match self.status() {
            Status::Running => None,
            Status::Complete => Some(PhaseOutcome::Completed),
            Status::Cancelled => Some(PhaseOutcome::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::DEFAULT_EXERCISES;

    fn minute_timer() -> (Instant, TimerState) {
        let start = Instant::now();
        (start, TimerState::work(start, Duration::from_secs(60)))
    }

    #[test]
    fn test_new_timer_is_running_at_zero() {
        let (_, timer) = minute_timer();
        assert_eq!(timer.fraction(), 0.0);
        assert_eq!(timer.status(), Status::Running);
        assert_eq!(timer.remaining(), Duration::from_secs(60));
        assert_eq!(timer.outcome(), None);
    }

    #[test]
    fn test_advance_half_way() {
        let (start, mut timer) = minute_timer();
        timer.advance(start + Duration::from_secs(30));
        assert!((timer.fraction() - 0.5).abs() < 0.05);
        assert_eq!(timer.status(), Status::Running);
    }

    #[test]
    fn test_fraction_is_exactly_one_at_target() {
        let (start, mut timer) = minute_timer();
        timer.advance(start + Duration::from_secs(60));
        assert_eq!(timer.fraction(), 1.0);
        assert_eq!(timer.status(), Status::Complete);
        assert_eq!(timer.outcome(), Some(PhaseOutcome::Completed));
    }

    #[test]
    fn test_fraction_clamped_past_target() {
        let (start, mut timer) = minute_timer();
        timer.advance(start + Duration::from_secs(600));
        assert_eq!(timer.fraction(), 1.0);
        assert_eq!(timer.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_fraction_never_decreases() {
        let (start, mut timer) = minute_timer();
        timer.advance(start + Duration::from_secs(40));
        let before = timer.fraction();
        timer.advance(start + Duration::from_secs(10));
        assert_eq!(timer.fraction(), before);
        // an instant before the start counts as zero elapsed
        let mut fresh = TimerState::work(start + Duration::from_secs(5), Duration::from_secs(60));
        fresh.advance(start);
        assert_eq!(fresh.fraction(), 0.0);
    }

    #[test]
    fn test_matches_elapsed_over_target() {
        let start = Instant::now();
        let mut timer = TimerState::work(start, Duration::from_secs(8));
        for secs in 1..8 {
            timer.advance(start + Duration::from_secs(secs));
            assert!((timer.fraction() - secs as f64 / 8.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cancel_is_terminal_at_any_progress() {
        for secs in [0, 30, 60] {
            let (start, mut timer) = minute_timer();
            timer.advance(start + Duration::from_secs(secs));
            timer.cancel();
            assert_eq!(timer.status(), Status::Cancelled);
            assert_eq!(timer.outcome(), Some(PhaseOutcome::Cancelled));
        }
    }

    #[test]
    fn test_advance_after_cancel_is_noop() {
        let (start, mut timer) = minute_timer();
        timer.advance(start + Duration::from_secs(15));
        timer.cancel();
        timer.advance(start + Duration::from_secs(45));
        assert!((timer.fraction() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_break_timer_carries_exercise() {
        let start = Instant::now();
        let timer = TimerState::rest(start, Duration::from_secs(60), &DEFAULT_EXERCISES[0]);
        assert_eq!(timer.phase, Phase::Break);
        assert_eq!(timer.exercise.map(|e| e.name), Some("Push-ups"));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Work.to_string(), "Work Period");
        assert_eq!(Phase::Break.to_string(), "Break Period");
    }
}
