//! Gomoku: a two-player connected-stone game in the terminal.
//!
//! ## Usage
//!
//! - `gomoku` - Start a freestyle game on a 15x15 board
//! - `gomoku -b 19 --rules renju` - Start a Renju game on a 19x19 board
//! - `gomoku -o match.gmk` - Save the match on exit
//! - `gomoku -r match.gmk` - Resume a stopped match
//! - `gomoku replay match.gmk` - Replay a saved match move by move

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gomoku::console::Console;
use gomoku::game::{Game, GameState, Ruleset};
use gomoku::save;

/// Gomoku: freestyle and Renju five-in-a-row in the terminal
#[derive(Parser)]
#[command(name = "gomoku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a saved match move by move
    Replay {
        /// Saved match file
        file: PathBuf,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Board side length (15, 17 or 19)
    #[arg(short = 'b', long = "board-size", default_value_t = 15, conflicts_with = "resume")]
    board_size: usize,

    /// Rule variant
    #[arg(long = "rules", value_enum, default_value = "freestyle")]
    rules: RulesArg,

    /// Save the match to this file on exit
    #[arg(short = 'o', long = "save", value_name = "FILE")]
    save: Option<PathBuf>,

    /// Resume a stopped match from this file
    #[arg(short = 'r', long = "resume", value_name = "FILE")]
    resume: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum RulesArg {
    Freestyle,
    Renju,
}

impl From<RulesArg> for Ruleset {
    fn from(arg: RulesArg) -> Self {
        match arg {
            RulesArg::Freestyle => Ruleset::Freestyle,
            RulesArg::Renju => Ruleset::Renju,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Replay { file }) => replay(&file),
        None => play(cli.play),
    }
}

fn play(args: PlayArgs) -> anyhow::Result<()> {
    let mut game = match &args.resume {
        Some(path) => {
            let mut game = save::import_from_path(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            game.resume()
                .with_context(|| format!("{} cannot be resumed", path.display()))?;
            game
        }
        None => {
            if !matches!(args.board_size, 15 | 17 | 19) {
                bail!("board size must be 15, 17 or 19 (got {})", args.board_size);
            }
            Game::new(args.board_size, args.rules.into())?
        }
    };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout()).clear_screen(true);
    console.run(&mut game)?;

    if let Some(path) = &args.save {
        save::export_to_path(&game, path)
            .with_context(|| format!("failed to save {}", path.display()))?;
    }
    Ok(())
}

fn replay(file: &Path) -> anyhow::Result<()> {
    let game = save::import_from_path(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    if game.state() == GameState::Playing {
        bail!("{} does not record a stopped or concluded match", file.display());
    }

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout()).clear_screen(true);
    console.replay(&game, Duration::from_secs(1))?;
    Ok(())
}
