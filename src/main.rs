use std::io;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::info;

use minesweeper_agent::config::{DEFAULT_MINES, DEFAULT_SIZE};
use minesweeper_agent::{manual_game_loop, play_many, Board, GameConfig, ManualAgent};

/// Play minesweeper, either by hand or with the rule-based agent.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Board width and height
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Number of mines
    #[arg(long, default_value_t = DEFAULT_MINES)]
    mines: usize,

    /// Seed for mine placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games the agent plays
    #[arg(long, default_value_t = 1)]
    games: u64,

    /// Read moves (`reveal X Y`, `flag X Y`) from stdin instead of running the agent
    #[arg(long)]
    manual: bool,

    /// Log more; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(level(args.verbose))
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::new(args.size, args.mines, args.seed)?;

    if args.manual {
        let board = Board::from_config(&config)?;
        let size = board.size();
        let mut agent = ManualAgent::new(board, size);
        println!("Please input your move: TYPE X Y");
        let stdin = io::stdin();
        let condition = manual_game_loop(&mut agent, stdin.lock(), io::stdout())?;
        info!(?condition, "manual game over");
        return Ok(());
    }

    let stats = play_many(&config, args.games)?;
    println!("won {} of {} games", stats.won, stats.games());
    Ok(())
}
