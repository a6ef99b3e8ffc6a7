//! # Mazecrawl Main Entry Point
//!
//! Parses the command line, sets up logging, generates the maze and runs the
//! game in a terminal session.

use clap::Parser;
use log::info;
use mazecrawl::{
    CrawlResult, GameCompletionState, GameState, GenerationConfig, MapSnapshot, TerminalDisplay,
};
use std::fs::File;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Command line arguments for Mazecrawl.
#[derive(Parser, Debug)]
#[command(name = "mazecrawl")]
#[command(about = "Crawl through a procedurally generated maze and slay the dragon")]
#[command(version)]
struct Args {
    /// Random seed for maze generation; defaults to the current time
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file; without it only errors reach stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the generated map as JSON and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> CrawlResult<()> {
    let args = Args::parse();

    initialize_logging(&args)?;

    let seed = args.seed.unwrap_or_else(seed_from_clock);
    let config = GenerationConfig::new(seed);
    info!("Starting {} with seed {}", GameState::version_banner(), seed);

    if args.dump {
        let game = GameState::new_game(&config)?;
        println!("{}", MapSnapshot::from_world(&game.world).to_json()?);
        return Ok(());
    }

    run_game(&config)
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

/// Initializes logging. The terminal is in raw mode while playing, so logs
/// go to a file when one is given.
#[cfg(not(feature = "dev-tools"))]
fn initialize_logging(args: &Args) -> CrawlResult<()> {
    let mut builder = env_logger::Builder::new();
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .parse_filters(&args.log_level)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder
                .filter_level(log::LevelFilter::Error)
                .target(env_logger::Target::Stderr);
        }
    }
    builder.init();
    Ok(())
}

#[cfg(feature = "dev-tools")]
fn initialize_logging(args: &Args) -> CrawlResult<()> {
    use std::sync::Mutex;
    use tracing_subscriber::EnvFilter;

    let subscriber = tracing_subscriber::fmt().with_target(false).with_ansi(false);
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            subscriber
                .with_env_filter(EnvFilter::new(&args.log_level))
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            subscriber
                .with_env_filter(EnvFilter::new("error"))
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Plays one game in the terminal and prints how it went.
fn run_game(config: &GenerationConfig) -> CrawlResult<()> {
    let mut game = GameState::new_game(config)?;

    // The display restores the terminal when dropped, before the summary
    let outcome = {
        let mut display = TerminalDisplay::new()?;
        game.run(&mut display)
    }?;

    let verdict = match outcome {
        GameCompletionState::Won => "You slew the dragon",
        GameCompletionState::Died => "You died",
        GameCompletionState::Quit | GameCompletionState::Playing => "You quit",
    };
    let stats = &game.statistics;
    println!(
        "{} after {} turns: {} steps, {} monsters killed, {} items collected.",
        verdict, stats.turns, stats.steps_taken, stats.monsters_killed, stats.items_collected
    );
    info!("Session ended: {:?}", outcome);
    Ok(())
}
