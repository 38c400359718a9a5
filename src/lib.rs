pub mod agent;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod interaction;
pub mod rule_based;

use std::io::{BufRead, Write};
use tracing::{info, warn};

pub use agent::{Agent, ExternallyControlled, ManualAgent, Strategy, Unimplemented};
pub use board::Board;
pub use config::GameConfig;
pub use error::{ConfigError, GameError, ManualError, PlayError, StrategyError};
pub use game::{Action, ActionType, Cell, Condition, Game, Observation};
pub use geometry::{neighbor_points, Point};
pub use rule_based::RuleBasedAgent;

/// Lets a person play through `input`, echoing the board to `output` after every move.
///
/// Returns the final condition, or `InProgress` if the input runs out first.
pub fn manual_game_loop<G, R, W>(
    agent: &mut ManualAgent<G>,
    input: R,
    mut output: W,
) -> Result<Condition, ManualError<G::Error>>
where
    G: Game,
    R: BufRead,
    W: Write,
{
    agent.play();
    write!(output, "{}", agent.obs())?;
    for line in input.lines() {
        let line = line?;
        let action = match interaction::parse_action(&line) {
            Some(action) if action.point.fits(agent.size()) => action,
            Some(action) => {
                warn!(%action, "move is off the board");
                writeln!(output, "Coordinates must be below {}", agent.size())?;
                continue;
            }
            None => {
                warn!(input = line.trim(), "unrecognized move");
                writeln!(output, "Must be of the form: TYPE X Y")?;
                continue;
            }
        };
        let (obs, condition) = agent.submit(action).map_err(ManualError::Session)?;
        write!(output, "{}", obs)?;
        match condition {
            Condition::Won => writeln!(output, "you win!")?,
            Condition::Lost => writeln!(output, "you lose")?,
            Condition::InProgress => continue,
        }
        return Ok(condition);
    }
    Ok(Condition::InProgress)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayStats {
    pub won: usize,
    pub lost: usize,
}

impl PlayStats {
    pub fn games(&self) -> usize {
        self.won + self.lost
    }

    pub fn record(&mut self, condition: Condition) {
        match condition {
            Condition::Won => self.won += 1,
            Condition::Lost => self.lost += 1,
            Condition::InProgress => {}
        }
    }
}

/// Plays `games` boards built from `config` with the rule-based strategy.
pub fn play_many(config: &GameConfig, games: u64) -> Result<PlayStats, PlayError<GameError>> {
    let mut stats = PlayStats::default();
    for n in 0..games {
        let game_config = config.nth_game(n);
        let board = Board::from_config(&game_config).map_err(PlayError::Session)?;
        let mut agent = Agent::new(board, game_config.size, RuleBasedAgent::new());
        stats.record(agent.play()?);
    }
    info!(won = stats.won, lost = stats.lost, "finished {} games", stats.games());
    Ok(stats)
}
