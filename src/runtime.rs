use std::cell::Cell;
use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the phase loop
#[derive(Clone, Debug)]
pub enum PhaseEvent {
    Key(KeyEvent),
    /// New terminal width and height
    Resize(u16, u16),
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait PhaseEventSource {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(Some(event)) if one arrives in time, Ok(None) if the timeout expires.
    fn recv_timeout(&self, timeout: Duration) -> io::Result<Option<PhaseEvent>>;
}

/// Production event source polling crossterm on the loop's own thread, so
/// nothing is left reading stdin once a phase is over.
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl CrosstermEventSource {
    pub fn new() -> Self {
        Self
    }
}

impl PhaseEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> io::Result<Option<PhaseEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            CtEvent::Key(key) if key.kind == KeyEventKind::Press => Some(PhaseEvent::Key(key)),
            CtEvent::Resize(width, height) => Some(PhaseEvent::Resize(width, height)),
            _ => None,
        })
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<PhaseEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<PhaseEvent>) -> Self {
        Self { rx }
    }
}

impl PhaseEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> io::Result<Option<PhaseEvent>> {
        match self.rx.recv_timeout(timeout) {
            Ok(ev) => Ok(Some(ev)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            // a hung-up producer behaves like a quiet terminal
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(timeout);
                Ok(None)
            }
        }
    }
}

/// Configurable ticker interface
pub trait Ticker {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Source of "now" for timer updates
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Simulated clock: every reading moves time forward by a fixed step
#[derive(Debug)]
pub struct SteppingClock {
    current: Cell<Instant>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(start: Instant, step: Duration) -> Self {
        Self {
            current: Cell::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Instant {
        let now = self.current.get();
        self.current.set(now + self.step);
        now
    }
}

/// Runner that serializes ticks and terminal events into one stream.
/// Ticks follow a fixed schedule regardless of how many events arrive in between.
pub struct Runner<E: PhaseEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: PhaseEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Blocks until the next event, or returns Tick once the tick deadline passes
    pub fn step(&mut self) -> io::Result<PhaseEvent> {
        loop {
            let now = Instant::now();
            if now >= self.next_tick {
                self.next_tick += self.ticker.interval();
                if self.next_tick <= now {
                    // fell behind (slow draw, suspended process): resync instead of bursting
                    self.next_tick = now + self.ticker.interval();
                }
                return Ok(PhaseEvent::Tick);
            }

            if let Some(ev) = self.event_source.recv_timeout(self.next_tick - now)? {
                return Ok(ev);
            }
        }
    }
}
