use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info};

use crate::{
    error::{MoveitError, Result},
    exercise::Exercise,
    runtime::{Clock, PhaseEvent, PhaseEventSource, Runner, Ticker},
    timer::{Phase, PhaseOutcome, TimerState},
    ui::{BarLayout, PhaseView},
};

/// Runs one timed phase to completion or cancellation
pub trait PhaseRunner {
    fn run_phase(
        &mut self,
        phase: Phase,
        target: Duration,
        exercise: Option<&'static Exercise>,
    ) -> Result<PhaseOutcome>;
}

impl<P: PhaseRunner + ?Sized> PhaseRunner for &mut P {
    fn run_phase(
        &mut self,
        phase: Phase,
        target: Duration,
        exercise: Option<&'static Exercise>,
    ) -> Result<PhaseOutcome> {
        (**self).run_phase(phase, target, exercise)
    }
}

/// q, Esc and ctrl+c end the whole session
pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Event loop for a single phase: every Tick advances the timer, a quit key
/// cancels it, a resize re-fits the bar, and each event is followed by a redraw.
/// Returns the terminal state.
pub fn drive_phase<B, E, T, C>(
    terminal: &mut Terminal<B>,
    runner: &mut Runner<E, T>,
    clock: &C,
    layout: BarLayout,
    mut state: TimerState,
) -> Result<TimerState>
where
    B: Backend,
    E: PhaseEventSource,
    T: Ticker,
    C: Clock,
{
    let mut bar_width = layout.width_for(terminal.size().map_err(MoveitError::Display)?.width);

    terminal
        .draw(|f| f.render_widget(PhaseView::new(&state, bar_width), f.area()))
        .map_err(MoveitError::Display)?;

    while !state.is_terminal() {
        match runner.step().map_err(MoveitError::Display)? {
            PhaseEvent::Tick => state.advance(clock.now()),
            PhaseEvent::Key(key) => {
                if is_quit_key(&key) {
                    debug!(phase = %state.phase, fraction = state.fraction(), "quit key pressed");
                    state.cancel();
                }
            }
            PhaseEvent::Resize(width, _) => bar_width = layout.width_for(width),
        }

        terminal
            .draw(|f| f.render_widget(PhaseView::new(&state, bar_width), f.area()))
            .map_err(MoveitError::Display)?;
    }

    Ok(state)
}

/// Phase runner over any ratatui backend and event source
pub struct TerminalPhases<B: Backend, E: PhaseEventSource, T: Ticker, C: Clock> {
    pub terminal: Terminal<B>,
    runner: Runner<E, T>,
    clock: C,
    layout: BarLayout,
}

impl<B, E, T, C> TerminalPhases<B, E, T, C>
where
    B: Backend,
    E: PhaseEventSource,
    T: Ticker,
    C: Clock,
{
    pub fn new(terminal: Terminal<B>, runner: Runner<E, T>, clock: C, layout: BarLayout) -> Self {
        Self {
            terminal,
            runner,
            clock,
            layout,
        }
    }
}

impl<B, E, T, C> PhaseRunner for TerminalPhases<B, E, T, C>
where
    B: Backend,
    E: PhaseEventSource,
    T: Ticker,
    C: Clock,
{
    fn run_phase(
        &mut self,
        phase: Phase,
        target: Duration,
        exercise: Option<&'static Exercise>,
    ) -> Result<PhaseOutcome> {
        info!(%phase, target_secs = target.as_secs(), exercise = exercise.map(|e| e.name), "phase started");

        let state = TimerState::new(self.clock.now(), target, phase, exercise);
        let state = drive_phase(
            &mut self.terminal,
            &mut self.runner,
            &self.clock,
            self.layout,
            state,
        )?;

        // drive_phase only returns once the state is terminal
        let outcome = state.outcome().unwrap_or(PhaseOutcome::Completed);
        info!(%phase, ?outcome, fraction = state.fraction(), "phase ended");
        Ok(outcome)
    }
}
