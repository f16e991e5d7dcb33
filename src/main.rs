//! MCTS-Four: play connect-four style games against an MCTS engine.
//!
//! ## Usage
//!
//! - `mcts-four` - Play interactively (same as `mcts-four play`)
//! - `mcts-four demo` - Watch the engine play a random opponent
//! - `mcts-four --rows 6 --cols 7 --simulations 2000 play` - Custom game

use std::io;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

use mcts_four::board::{Side, Status};
use mcts_four::config::{Config, Geometry, SearchConfig};
use mcts_four::constants::{COLS, EXPLORATION, N_SIMS, ROWS, WIN_LENGTH};
use mcts_four::game::Game;
use mcts_four::logging;
use mcts_four::mcts::dump_stats;

/// MCTS-Four: connect-four style game against a Monte Carlo Tree Search AI
#[derive(Parser)]
#[command(name = "mcts-four")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct Settings {
    /// Number of rows
    #[arg(long, default_value_t = ROWS)]
    rows: usize,

    /// Number of columns
    #[arg(long, default_value_t = COLS)]
    cols: usize,

    /// Marks in a row needed to win
    #[arg(long, default_value_t = WIN_LENGTH)]
    win_length: usize,

    /// Simulations per engine move
    #[arg(long, default_value_t = N_SIMS)]
    simulations: usize,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = EXPLORATION)]
    exploration: f64,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Let the engine move first
    #[arg(long)]
    ai_first: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Settings {
    fn config(&self) -> Config {
        Config {
            geometry: Geometry::new(self.rows, self.cols, self.win_length),
            search: SearchConfig {
                simulations: self.simulations,
                exploration: self.exploration,
                seed: self.seed,
            },
            ai_first: self.ai_first,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine on stdin/stdout
    Play,
    /// Watch the engine play against a uniformly random opponent
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = logging::init(&cli.settings.log_level).context("failed to start logger")?;

    let config = cli.settings.config();
    let mut game = Game::new(config).context("invalid game settings")?;
    info!("starting game: {:?}", config);

    match cli.command {
        Some(Commands::Demo) => run_demo(&mut game, config.search.seed),
        Some(Commands::Play) | None => {
            let stdin = io::stdin();
            game.run(stdin.lock(), io::stdout())?;
            Ok(())
        }
    }
}

fn run_demo(game: &mut Game, seed: Option<u64>) -> anyhow::Result<()> {
    println!("MCTS-Four: engine vs random mover\n");
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(1)),
        None => fastrand::Rng::new(),
    };
    let mut out = io::stdout();
    print!("{}", game.board());
    println!();

    while !game.status().is_over() {
        match game.to_move() {
            Side::Human => {
                let moves = game.board().available_moves();
                let mv = moves[rng.usize(..moves.len())];
                println!("Random mover plays {mv}");
                game.play_human(mv)?;
            }
            Side::Ai => {
                let decision = game.play_ai()?;
                dump_stats(&mut out, &decision)?;
            }
        }
        print!("{}", game.board());
        println!();
    }

    match game.status() {
        Status::Won(Side::Ai) => println!("AI wins!"),
        Status::Won(Side::Human) => println!("Random mover wins!"),
        _ => println!("Draw!"),
    }
    Ok(())
}
