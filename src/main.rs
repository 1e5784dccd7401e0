use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{Env, Target};
use snake_duel::game::GameConfig;
use snake_duel::modes::{HeadlessConfig, HeadlessMode, HumanMode};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snake_duel")]
#[command(version, about = "Snake duel against a food-chasing AI")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Number of rounds to play (headless only)
    #[arg(long, default_value = "10")]
    rounds: u32,

    /// Print the headless summary as JSON
    #[arg(long)]
    json: bool,

    /// RNG seed for reproducible headless rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play against the AI with keyboard controls
    Human,
    /// Play rounds with an autopilot and print the results
    Headless,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            env_logger::Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        // The terminal UI owns stderr; stay quiet unless RUST_LOG asks otherwise
        None => env_logger::init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = GameConfig::default();

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Headless => {
            let mut headless_mode = HeadlessMode::new(HeadlessConfig {
                rounds: cli.rounds,
                json: cli.json,
                seed: cli.seed,
                game_config: config,
            });
            headless_mode.run()?;
        }
    }

    Ok(())
}
