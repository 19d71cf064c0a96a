use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use moveit::{
    app_dirs::AppDirs,
    config::{FileSettingsStore, Settings},
    error::{MoveitError, Result},
    exercise::{Catalog, Exercise},
    notify::{DesktopNotifier, Notifier, SilentNotifier},
    phase::{PhaseRunner, TerminalPhases},
    runtime::{CrosstermEventSource, FixedTicker, Runner, SystemClock},
    session::{SessionEnd, SessionLoop, SessionPlan, MAX_MINUTES},
    timer::{Phase, PhaseOutcome},
    ui::CANCELLED_MESSAGE,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::{self, OpenOptions},
    io::{self, stdin, Stdout},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// pomodoro timer that suggests a quick exercise for every break
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Alternates work and break periods with a live progress bar and desktop notifications. Every break comes with an exercise to do until the timer runs out."
)]
pub struct Cli {
    /// length of each work period in minutes
    #[clap(value_parser = clap::value_parser!(u64).range(1..=MAX_MINUTES))]
    work_minutes: u64,

    /// length of each break in minutes
    #[clap(value_parser = clap::value_parser!(u64).range(1..=MAX_MINUTES))]
    break_minutes: u64,

    /// read settings from this file instead of the default location
    #[clap(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// do not send desktop notifications
    #[clap(long)]
    no_notify: bool,
}

impl Cli {
    fn plan(&self) -> SessionPlan {
        SessionPlan::new(self.work_minutes, self.break_minutes)
    }

    fn settings_store(&self) -> FileSettingsStore {
        match &self.config {
            Some(path) => FileSettingsStore::with_path(path),
            None => FileSettingsStore::new(),
        }
    }

    fn notifier(&self, settings: &Settings) -> Box<dyn Notifier> {
        if self.no_notify || !settings.notifications {
            Box::new(SilentNotifier)
        } else {
            Box::new(DesktopNotifier)
        }
    }
}

type CrosstermPhases =
    TerminalPhases<CrosstermBackend<Stdout>, CrosstermEventSource, FixedTicker, SystemClock>;

/// Takes over the screen for the length of each phase and hands it back for the prompt
struct ScreenPhases {
    inner: CrosstermPhases,
}

impl ScreenPhases {
    fn new(settings: &Settings) -> Result<Self> {
        let terminal =
            Terminal::new(CrosstermBackend::new(io::stdout())).map_err(MoveitError::Display)?;
        let runner = Runner::new(
            CrosstermEventSource::new(),
            FixedTicker::new(settings.tick_interval()),
        );

        Ok(Self {
            inner: TerminalPhases::new(terminal, runner, SystemClock, settings.bar_layout()),
        })
    }

    fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(self.inner.terminal.backend_mut(), EnterAlternateScreen, Hide)?;
        self.inner.terminal.clear()
    }

    fn leave(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.inner.terminal.backend_mut(), LeaveAlternateScreen, Show)
    }
}

impl PhaseRunner for ScreenPhases {
    fn run_phase(
        &mut self,
        phase: Phase,
        target: Duration,
        exercise: Option<&'static Exercise>,
    ) -> Result<PhaseOutcome> {
        if let Err(e) = self.enter() {
            // partial setup still needs undoing
            let _ = self.leave();
            return Err(MoveitError::Display(e));
        }

        let outcome = self.inner.run_phase(phase, target, exercise);
        let restored = self.leave().map_err(MoveitError::Display);

        let outcome = outcome?;
        restored?;
        Ok(outcome)
    }
}

fn init_logging() {
    // the terminal belongs to the TUI, so logs only ever go to a file
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moveit=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let store = cli.settings_store();
    let settings = store.load_or_create();
    info!(
        work_minutes = cli.work_minutes,
        break_minutes = cli.break_minutes,
        settings = %store.path().display(),
        "starting moveit"
    );

    let phases = ScreenPhases::new(&settings).context("failed to set up the terminal")?;
    let mut session = SessionLoop::new(
        cli.plan(),
        Catalog::default(),
        phases,
        cli.notifier(&settings),
    )
    .abort_on_notify_error(settings.abort_on_notify_error);

    let summary = session
        .run(stdin().lock(), io::stdout())
        .context("session ended with an error")?;

    if summary.ended_by == SessionEnd::Cancelled {
        println!("{}", CANCELLED_MESSAGE);
    }

    Ok(())
}
