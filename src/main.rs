//! Palenspel headless runner
//!
//! Drives the simulation with scripted controllers and writes one JSON line
//! per drawn frame to stdout. Logging goes to stderr (`RUST_LOG=info`).

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use palenspel::frame::{DrawSink, JsonLinesSink, NullSink};
use palenspel::input::ScriptedInput;
use palenspel::session::{Session, SessionEnd};
use palenspel::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Human (scripted) controllers
    #[arg(long)]
    humans: Option<usize>,
    /// Bot controllables
    #[arg(long)]
    bots: Option<usize>,
    /// Frames per round
    #[arg(long)]
    frames: Option<u64>,
    /// Rounds to play before exiting
    #[arg(long)]
    rounds: Option<u32>,
    /// Seed for scripted controllers
    #[arg(long)]
    seed: Option<u64>,
    /// Delay between frames in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Do not emit frames, only logs
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(humans) = self.humans {
            settings.humans = humans;
        }
        if let Some(bots) = self.bots {
            settings.bots = bots;
        }
        if let Some(frames) = self.frames {
            settings.round_frames = Some(frames);
        }
        if let Some(rounds) = self.rounds {
            settings.max_rounds = Some(rounds);
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(delay) = self.delay_ms {
            settings.frame_delay_ms = delay;
        }
    }
}

fn run<D: DrawSink>(settings: Settings, sink: D) -> ExitCode {
    let input = ScriptedInput::new(settings.seed);
    let mut session = match Session::new(settings, input, sink) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("palenspel: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match session.run() {
        SessionEnd::Quit { controller } => log::info!("quit by controller {}", controller),
        SessionEnd::Completed { rounds } => log::info!("played {} rounds", rounds),
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("palenspel: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    cli.apply(&mut settings);

    // Headless runs need an end; default to a single 3600-frame round
    if settings.round_frames.is_none() && settings.target_score.is_none() {
        settings.round_frames = Some(3600);
    }
    if settings.max_rounds.is_none() {
        settings.max_rounds = Some(1);
    }

    if cli.quiet {
        run(settings, NullSink)
    } else {
        let stdout = io::stdout();
        run(settings, JsonLinesSink::new(BufWriter::new(stdout.lock())))
    }
}
