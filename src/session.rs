use std::io::{BufRead, Write};
use std::time::Duration;

use tracing::{error, info, warn};

use crate::{
    error::{MoveitError, Result},
    exercise::Catalog,
    notify::Notifier,
    phase::PhaseRunner,
    timer::{Phase, PhaseOutcome},
    util::minutes,
};

pub const QUIT_SENTINEL: &str = "q";
/// One week; longer phases are rejected on the command line
pub const MAX_MINUTES: u64 = 7 * 24 * 60;
pub const NEXT_SESSION_PROMPT: &str = "Press Enter to start next session or press 'q' to quit: ";

/// Work and break lengths, in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPlan {
    pub work_minutes: u64,
    pub break_minutes: u64,
}

impl SessionPlan {
    pub fn new(work_minutes: u64, break_minutes: u64) -> Self {
        Self {
            work_minutes,
            break_minutes,
        }
    }

    pub fn work(&self) -> Duration {
        minutes(self.work_minutes)
    }

    pub fn rest(&self) -> Duration {
        minutes(self.break_minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// quit key pressed during a phase
    Cancelled,
    /// sentinel typed at the prompt
    Quit,
    /// stdin closed at the prompt
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Work/Break pairs that ran to the end
    pub completed_sessions: u32,
    pub ended_by: SessionEnd,
}

/// Drives Work -> Break pairs until the user stops
pub struct SessionLoop<P: PhaseRunner, N: Notifier> {
    plan: SessionPlan,
    catalog: Catalog,
    phases: P,
    notifier: N,
    abort_on_notify_error: bool,
}

impl<P: PhaseRunner, N: Notifier> SessionLoop<P, N> {
    pub fn new(plan: SessionPlan, catalog: Catalog, phases: P, notifier: N) -> Self {
        Self {
            plan,
            catalog,
            phases,
            notifier,
            abort_on_notify_error: true,
        }
    }

    pub fn abort_on_notify_error(mut self, abort: bool) -> Self {
        self.abort_on_notify_error = abort;
        self
    }

    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<SessionSummary> {
        let mut completed_sessions = 0;

        loop {
            self.notify(
                "Work Period Starting",
                &format!("Focus for the next {} minutes", self.plan.work_minutes),
            )?;
            if self.phases.run_phase(Phase::Work, self.plan.work(), None)? == PhaseOutcome::Cancelled {
                return Ok(self.finish(completed_sessions, SessionEnd::Cancelled));
            }

            let exercise = self.catalog.select_now();
            self.notify("Break Time", &format!("Time for {}", exercise.name))?;
            if self
                .phases
                .run_phase(Phase::Break, self.plan.rest(), Some(exercise))?
                == PhaseOutcome::Cancelled
            {
                return Ok(self.finish(completed_sessions, SessionEnd::Cancelled));
            }

            completed_sessions += 1;
            self.notify("Time to Focus", "Good Job, Start Focus Time")?;

            match prompt_next(&mut input, &mut output)? {
                Some(true) => continue,
                Some(false) => return Ok(self.finish(completed_sessions, SessionEnd::Quit)),
                None => return Ok(self.finish(completed_sessions, SessionEnd::EndOfInput)),
            }
        }
    }

    fn notify(&self, title: &str, message: &str) -> Result<()> {
        match self.notifier.notify(title, message) {
            Ok(()) => Ok(()),
            Err(e) if self.abort_on_notify_error => {
                error!(error = %e, "notification failed");
                Err(MoveitError::Notify(e))
            }
            Err(e) => {
                warn!(error = %e, "notification failed, continuing");
                Ok(())
            }
        }
    }

    fn finish(&self, completed_sessions: u32, ended_by: SessionEnd) -> SessionSummary {
        info!(completed_sessions, ?ended_by, "session loop finished");
        SessionSummary {
            completed_sessions,
            ended_by,
        }
    }
}

/// Some(true) to go again, Some(false) on the quit sentinel, None once input is closed
fn prompt_next<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<bool>> {
    output
        .write_all(NEXT_SESSION_PROMPT.as_bytes())
        .and_then(|_| output.flush())
        .map_err(MoveitError::Console)?;

    let mut line = String::new();
    if input.read_line(&mut line).map_err(MoveitError::Console)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim() != QUIT_SENTINEL))
}
