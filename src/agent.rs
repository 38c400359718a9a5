use tracing::{debug, info, trace};

use super::error::{PlayError, StrategyError};
use super::game::{Action, Condition, Game, Observation};
use super::geometry::{neighbor_points, Point};

/// Decision rule an [`Agent`] delegates to.
///
/// The provided `decide` refuses to pick anything, so a strategy that forgets
/// to override it fails on the first turn instead of looping silently.
pub trait Strategy {
    fn decide(&mut self, _obs: &Observation) -> Result<Action, StrategyError> {
        Err(StrategyError::Unimplemented)
    }
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn decide(&mut self, obs: &Observation) -> Result<Action, StrategyError> {
        (**self).decide(obs)
    }
}

/// A strategy with no decision rule of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unimplemented;

impl Strategy for Unimplemented {}

/// Marks a player whose moves come from outside the program.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExternallyControlled;

impl Strategy for ExternallyControlled {
    fn decide(&mut self, _obs: &Observation) -> Result<Action, StrategyError> {
        Err(StrategyError::ExternallyControlled)
    }
}

/// Drives one game session with one strategy until the session ends.
#[derive(Debug)]
pub struct Agent<G, S> {
    game: G,
    size: usize,
    strategy: S,
}

impl<G: Game, S: Strategy> Agent<G, S> {
    pub fn new(game: G, size: usize, strategy: S) -> Agent<G, S> {
        Agent { game, size, strategy }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn into_game(self) -> G {
        self.game
    }

    pub fn get_next_action(&mut self, obs: &Observation) -> Result<Action, StrategyError> {
        self.strategy.decide(obs)
    }

    pub fn neighbors(&self, point: &Point) -> Vec<Point> {
        neighbor_points(point, self.size)
    }

    /// Runs observe, decide, step until the session reports a terminal condition.
    ///
    /// There is no turn limit: a session that never ends keeps this looping.
    pub fn play(&mut self) -> Result<Condition, PlayError<G::Error>> {
        let mut obs = self.game.obs();
        let mut turn = 0usize;
        loop {
            trace!("turn {}:\n{}", turn, obs);
            let action = self.get_next_action(&obs)?;
            debug!(turn, %action, "submitting action");
            let (next, condition) = self.game.step(action).map_err(PlayError::Session)?;
            turn += 1;
            if condition.is_terminal() {
                info!(turns = turn, ?condition, "game finished");
                return Ok(condition);
            }
            obs = next;
        }
    }
}

/// Holds a session for a player acting from outside the program.
///
/// `play` never touches the session; the surrounding program reads the board
/// with `obs` and forwards moves with `submit`.
#[derive(Debug)]
pub struct ManualAgent<G> {
    game: G,
    size: usize,
    strategy: ExternallyControlled,
}

impl<G: Game> ManualAgent<G> {
    pub fn new(game: G, size: usize) -> ManualAgent<G> {
        ManualAgent { game, size, strategy: ExternallyControlled }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn play(&mut self) {}

    pub fn get_next_action(&mut self, obs: &Observation) -> Result<Action, StrategyError> {
        self.strategy.decide(obs)
    }

    pub fn obs(&self) -> Observation {
        self.game.obs()
    }

    pub fn submit(&mut self, action: Action) -> Result<(Observation, Condition), G::Error> {
        debug!(%action, "relaying external action");
        self.game.step(action)
    }

    pub fn into_game(self) -> G {
        self.game
    }
}
