use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use flappy_game::animation::AnimationTable;
use flappy_game::audio::AudioMode;
use flappy_game::config::GameConfig;
use flappy_game::runtime::RuntimeContext;
use flappy_game::simulation::SimulationLoop;

#[derive(Parser, Debug)]
#[command(name = "flappy_game", version, about = "Flap through the gaps. One point per pipe.")]
struct Cli {
    /// RON game configuration; unset fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RON animation table; the built-in table is used otherwise.
    #[arg(long)]
    animations: Option<PathBuf>,

    /// Simulation ticks per second.
    #[arg(long)]
    tick_rate: Option<u32>,

    #[arg(long, value_enum, default_value_t = AudioArg::Bell)]
    audio: AudioArg,

    /// Seed for obstacle generation.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (the terminal itself is taken by the game).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AudioArg {
    Silent,
    Bell,
    Tones,
}

impl From<AudioArg> for AudioMode {
    fn from(arg: AudioArg) -> Self {
        match arg {
            AudioArg::Silent => AudioMode::Silent,
            AudioArg::Bell => AudioMode::Bell,
            AudioArg::Tones => AudioMode::Tones,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(rate) = cli.tick_rate {
        config.tick_rate = rate;
    }

    let table = match &cli.animations {
        Some(path) => AnimationTable::load(path)
            .with_context(|| format!("Failed to load animations {}", path.display()))?,
        None => AnimationTable::builtin().context("Built-in animation table is invalid")?,
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut simulation = SimulationLoop::new(config, Arc::new(table), rng)?;

    let mut runtime = RuntimeContext::acquire(simulation.config(), cli.audio.into())
        .context("Failed to initialise terminal or audio")?;
    let summary = simulation.run(&mut runtime.host());
    drop(runtime);

    let summary = summary?;
    tracing::info!(sessions = summary.sessions, best_score = summary.best_score, "bye");
    Ok(())
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::sink).try_init(),
    };
    if installed.is_err() {
        eprintln!("tracing subscriber already set");
    }
    Ok(())
}
