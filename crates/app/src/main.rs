mod bell;
mod display;
mod input;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::TryRecvError,
        Arc,
    },
    thread,
    time::Duration,
};

use clap::{Args, Parser, Subcommand};
use input::Command;
use ring_timer_core::{
    render_frame, render_idle, AppConfig, CanvasConfig, Frame, ManualTimeSource, RingTimerError,
    Session, SessionState, SvgSurface, SystemTimeSource, TimeSource,
};
use tracing_subscriber::EnvFilter;

/// Longest stretch the offline simulation will step through, one day.
const MAX_SIMULATED_SECONDS: f64 = 86_400.0;

fn main() -> ring_timer_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { settings, svg, limit } => run_live(&settings, svg.as_deref(), limit),
        Commands::Snapshot {
            settings,
            at,
            output,
            idle,
        } => run_snapshot(&settings, at, &output, idle),
        Commands::Config { output } => print_config(output.as_deref()),
    }
}

fn run_live(
    settings: &Settings,
    svg: Option<&Path>,
    limit: Option<f64>,
) -> ring_timer_core::Result<()> {
    let config = settings.load()?;
    let limit_ms = limit.map(seconds_to_ms).transpose()?;
    let frame_interval = Duration::from_millis(config.frame_interval_ms);
    let canvas = config.canvas.clone();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|err| RingTimerError::msg(format!("failed to install Ctrl-C handler: {err}")))?;

    tracing::info!(frame_ms = config.frame_interval_ms, "starting ring timer");
    eprintln!("{}", input::HELP);

    let time = SystemTimeSource::start();
    let commands = input::spawn_reader();
    let mut session = Session::new(config, bell::terminal_bank());
    if let Some(path) = svg {
        write_idle_svg(path, &canvas, &session)?;
    }

    let mut last_frame: Option<Frame> = None;
    while keep_running(&running, limit_ms, time.now_ms()) {
        let now = time.now_ms();

        // A closed stdin leaves the timer running until the limit or Ctrl-C.
        let command = match commands.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        };
        if let Some(command) = command {
            if apply_command(&mut session, command, now)? {
                break;
            }
            if session.state() == SessionState::Idle {
                last_frame = None;
                if let Some(path) = svg {
                    write_idle_svg(path, &canvas, &session)?;
                }
            }
        }

        if let Some(report) = session.tick(now) {
            let completed = !report.completions.is_empty();
            last_frame = Some(report.frame);
            if completed {
                if let (Some(path), Some(frame)) = (svg, last_frame.as_ref()) {
                    write_svg(path, &canvas, frame)?;
                }
            }
        }

        print!("\r{}   ", display::status_line(&session, now));
        io::stdout().flush()?;

        thread::sleep(frame_interval);
    }
    println!();

    if let Some(path) = svg {
        match last_frame.as_ref() {
            Some(frame) => write_svg(path, &canvas, frame)?,
            None => write_idle_svg(path, &canvas, &session)?,
        }
    }
    tracing::info!("ring timer stopped");
    Ok(())
}

/// False once Ctrl-C was pressed or the optional time limit is reached.
fn keep_running(running: &AtomicBool, limit_ms: Option<f64>, now: f64) -> bool {
    running.load(Ordering::SeqCst) && limit_ms.map_or(true, |limit| now < limit)
}

/// Feeds one keyboard command to the session. Returns `true` on quit.
fn apply_command(
    session: &mut Session,
    command: Command,
    now: f64,
) -> ring_timer_core::Result<bool> {
    match command {
        Command::Toggle => {
            let state = session.toggle(now)?;
            tracing::debug!(?state, "toggled");
        }
        Command::Work(delta) => session.adjust_work(delta),
        Command::Rest(delta) => session.adjust_rest(delta),
        Command::Reset => {
            let outcome = session.reset();
            tracing::info!(?outcome, "reset requested");
        }
        Command::Quit => return Ok(true),
    }
    Ok(false)
}

/// Converts a point in time given in seconds to milliseconds.
fn seconds_to_ms(seconds: f64) -> ring_timer_core::Result<f64> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(RingTimerError::InvalidConfig(
            "times must be a finite, non-negative number of seconds",
        ));
    }
    Ok(seconds * 1000.0)
}

/// End of an offline simulation in milliseconds, bounded to one day.
fn simulation_end_ms(at: f64) -> ring_timer_core::Result<f64> {
    let end = seconds_to_ms(at)?;
    if at > MAX_SIMULATED_SECONDS {
        return Err(RingTimerError::InvalidConfig(
            "snapshot time must not exceed one day",
        ));
    }
    Ok(end)
}

/// Simulates a session from time zero up to `at` seconds, ticking at the
/// configured frame cadence, and writes the last frame as SVG.
fn run_snapshot(
    settings: &Settings,
    at: f64,
    output: &Path,
    idle: bool,
) -> ring_timer_core::Result<()> {
    let config = settings.load()?;
    let end = simulation_end_ms(at)?;
    let canvas = config.canvas.clone();
    let step = config.frame_interval_ms as f64;
    let mut session = Session::new(config, bell::silent_bank());

    if idle {
        write_idle_svg(output, &canvas, &session)?;
        tracing::info!(?output, "wrote idle picture");
        return Ok(());
    }

    let time = ManualTimeSource::new(0.0);
    session.start(time.now_ms())?;

    let mut frame = Frame::default();
    let mut completions = 0;
    loop {
        if let Some(report) = session.tick(time.now_ms()) {
            completions += report.completions.len();
            frame = report.frame;
        }
        if time.now_ms() >= end {
            break;
        }
        time.set((time.now_ms() + step).min(end));
    }

    write_svg(output, &canvas, &frame)?;
    tracing::info!(?output, at, completions, "wrote snapshot");
    println!("{}", display::status_line(&session, time.now_ms()));
    Ok(())
}

fn surface(canvas: &CanvasConfig) -> SvgSurface {
    SvgSurface::new(canvas.width, canvas.height).with_background(canvas.background.clone())
}

fn write_svg(path: &Path, canvas: &CanvasConfig, frame: &Frame) -> ring_timer_core::Result<()> {
    let mut surface = surface(canvas);
    render_frame(&mut surface, canvas, frame);
    std::fs::write(path, surface.to_svg())?;
    tracing::debug!(?path, "frame written");
    Ok(())
}

/// Full rings for the next session, drawn while nothing is running.
fn write_idle_svg(
    path: &Path,
    canvas: &CanvasConfig,
    session: &Session,
) -> ring_timer_core::Result<()> {
    let mut surface = surface(canvas);
    render_idle(&mut surface, canvas, &session.idle_rings()?);
    std::fs::write(path, surface.to_svg())?;
    tracing::debug!(?path, "idle picture written");
    Ok(())
}

fn print_config(output: Option<&Path>) -> ring_timer_core::Result<()> {
    let json = AppConfig::default().to_json_pretty()?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(?path, "wrote default configuration");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Concentric ring work/rest timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the timer in real time, reading commands from stdin.
    Run {
        #[command(flatten)]
        settings: Settings,
        /// Write the latest frame to this SVG file at each period switch and on exit.
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Stop after this many seconds.
        #[arg(long)]
        limit: Option<f64>,
    },
    /// Simulate a session offline and render the rings at a given moment.
    Snapshot {
        #[command(flatten)]
        settings: Settings,
        /// Seconds since the session started.
        #[arg(long, default_value_t = 0.0)]
        at: f64,
        /// Output path for the SVG picture.
        #[arg(short, long)]
        output: PathBuf,
        /// Draw the full rings shown before a session starts.
        #[arg(long)]
        idle: bool,
    },
    /// Print the default configuration as JSON.
    Config {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Configuration file plus command line overrides.
#[derive(Args, Debug)]
struct Settings {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Work period in minutes.
    #[arg(long)]
    work: Option<u32>,
    /// Rest period in minutes.
    #[arg(long)]
    rest: Option<u32>,
    /// Milliseconds between frames.
    #[arg(long)]
    frame_ms: Option<u64>,
}

impl Settings {
    fn load(&self) -> ring_timer_core::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(work) = self.work {
            config.periods.work_minutes = work.max(1);
        }
        if let Some(rest) = self.rest {
            config.periods.rest_minutes = rest.max(1);
        }
        if let Some(frame_ms) = self.frame_ms {
            config.frame_interval_ms = frame_ms;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_periods() {
        let cli = Cli::parse_from([
            "ring-timer", "snapshot", "--work", "50", "--rest", "0", "-o", "out.svg",
        ]);
        let Commands::Snapshot { settings, .. } = cli.command else {
            panic!("expected the snapshot command");
        };

        let config = settings.load().unwrap();
        assert_eq!(config.periods.work_minutes, 50);
        assert_eq!(config.periods.rest_minutes, 1);
    }

    #[test]
    fn snapshot_time_must_be_finite_and_bounded() {
        for at in ["NaN", "inf", "-1", "86401"] {
            let flag = format!("--at={at}");
            let cli = Cli::parse_from(["ring-timer", "snapshot", flag.as_str(), "-o", "out.svg"]);
            let Commands::Snapshot { at, .. } = cli.command else {
                panic!("expected the snapshot command");
            };

            let err = simulation_end_ms(at).unwrap_err();
            assert!(matches!(err, RingTimerError::InvalidConfig(_)), "{at}");
        }
        assert_eq!(simulation_end_ms(61.5).unwrap(), 61_500.0);
        assert_eq!(simulation_end_ms(0.0).unwrap(), 0.0);
    }

    #[test]
    fn interrupt_or_limit_stops_the_loop() {
        let running = AtomicBool::new(true);

        assert!(keep_running(&running, None, 1e12));
        assert!(keep_running(&running, Some(5_000.0), 4_999.0));
        assert!(!keep_running(&running, Some(5_000.0), 5_000.0));

        running.store(false, Ordering::SeqCst);
        assert!(!keep_running(&running, None, 0.0));
    }

    #[test]
    fn first_toggle_starts_an_idle_session() {
        let mut session = Session::new(AppConfig::default(), bell::silent_bank());
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.idle_rings().unwrap().len(), 3);

        assert!(!apply_command(&mut session, Command::Toggle, 1_000.0).unwrap());
        assert!(session.is_running());
        assert_eq!(session.rings()[0].target_time(), 2_000.0);

        assert!(!apply_command(&mut session, Command::Toggle, 1_500.0).unwrap());
        assert!(!apply_command(&mut session, Command::Work(1), 1_600.0).unwrap());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(apply_command(&mut session, Command::Quit, 1_700.0).unwrap());
    }

    #[test]
    fn zero_frame_interval_is_rejected() {
        let cli = Cli::parse_from(["ring-timer", "run", "--frame-ms", "0"]);
        let Commands::Run { settings, .. } = cli.command else {
            panic!("expected the run command");
        };

        assert!(settings.load().is_err());
    }
}
