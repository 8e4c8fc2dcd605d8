//! go-rules: a Go rules engine.
//!
//! ## Usage
//!
//! - `go-rules` - Show a demo
//! - `go-rules gtp` - Start GTP server for GUI integration
//! - `go-rules selfcheck` - Cross-check the engine against the reference judge
//! - `go-rules tokenize <FILE>` - Print the tokens of an SGF file (`-` for stdin)

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fastrand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use go_rules::constants::{DEFAULT_RULESET, DEFAULT_SEED, DEFAULT_SELFCHECK_GAMES, DEFAULT_SIZE};
use go_rules::coordinate::Coordinate;
use go_rules::game::Game;
use go_rules::gtp::GtpEngine;
use go_rules::playout::{PlayoutStats, cross_check, default_max_moves, playout};
use go_rules::ruleset::Ruleset;
use go_rules::sgf::{Token, tokenize};

/// go-rules: a Go rules engine
#[derive(Parser)]
#[command(name = "go-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ruleset (AGA, Japanese, Chinese, NewZealand, TrompTaylor)
    #[arg(long, global = true, default_value_t = DEFAULT_RULESET)]
    ruleset: Ruleset,

    /// Board size
    #[arg(long, global = true, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        /// Seed for generated moves
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Run a simple demo of the engine
    Demo,
    /// Play random games and compare every move with the reference judge
    Selfcheck {
        #[arg(long, default_value_t = DEFAULT_SELFCHECK_GAMES)]
        games: usize,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Tokenize an SGF file and print one token per line
    Tokenize {
        /// Path to the SGF file, or `-` for stdin
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Gtp { seed }) => {
            let mut engine = GtpEngine::new(cli.ruleset, cli.size, seed);
            engine.run(io::stdin().lock(), io::stdout().lock())
        }
        Some(Commands::Selfcheck { games, seed }) => selfcheck(cli.ruleset, cli.size, games, seed),
        Some(Commands::Tokenize { path }) => print_tokens(&path),
        Some(Commands::Demo) | None => run_demo(cli.ruleset, cli.size),
    }
}

/// Logs go to stderr so stdout stays clean for GTP.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_demo(ruleset: Ruleset, size: usize) -> Result<()> {
    println!("go-rules: Go rules engine\n");

    // Demo 1: capture in the center of a small board
    println!("=== Capture Demo ===");
    let mut game = Game::new(ruleset, 5, 5)?;
    for (column, row) in [(1, 2), (2, 2), (3, 2), (4, 4), (2, 1), (4, 3), (2, 3)] {
        let result = game.play(Coordinate::new(column, row))?;
        if result.captures > 0 {
            println!("({column},{row}) captured {} stone(s)", result.captures);
        }
    }
    println!("{game:#}");

    // Demo 2: random playout
    println!("=== Random Playout Demo ===");
    let mut game = Game::new(ruleset, size, size)?;
    let mut rng = Rng::with_seed(DEFAULT_SEED);
    let max = default_max_moves(&game);
    let stats = playout(&mut game, &mut rng, max);
    println!("{stats:?}");
    println!("{game}");
    Ok(())
}

fn selfcheck(ruleset: Ruleset, size: usize, games: usize, seed: u64) -> Result<()> {
    let mut total = PlayoutStats::default();
    for i in 0..games {
        let game_seed = seed.wrapping_add(i as u64);
        let mut game = Game::new(ruleset, size, size)?;
        let mut rng = Rng::with_seed(game_seed);
        let max = default_max_moves(&game);
        let stats = cross_check(&mut game, &mut rng, max)
            .with_context(|| format!("self-check game {i} (seed {game_seed})"))?;
        total.merge(stats);
    }
    info!(games, ?total, "self-check passed");
    println!(
        "{games} games, {} moves, {} captures, {} suicides, {} rejected: engine agrees with judge",
        total.moves, total.captures, total.suicides, total.rejected
    );
    Ok(())
}

fn print_tokens(path: &Path) -> Result<()> {
    let mut text = String::new();
    if path.as_os_str() == "-" {
        io::stdin()
            .read_to_string(&mut text)
            .context("reading SGF from stdin")?;
    } else {
        text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
    }

    let tokens = tokenize(&text);
    for token in &tokens {
        println!("{token:?}");
    }
    if let Some(Token::Invalid { offset }) = tokens.last() {
        bail!("invalid SGF at byte offset {offset}");
    }
    Ok(())
}
