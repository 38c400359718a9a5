use super::agent::Strategy;
use super::error::StrategyError;
use super::game::{Action, ActionType, Observation};
use super::geometry::Point;

/// Baseline strategy: reveal the first hidden cell, scanning row by row.
///
/// It ignores the numbers on revealed cells entirely. When nothing is left
/// hidden it falls back to revealing the top-left corner, which may well be a
/// cell that is already open. The scan always covers the whole observation,
/// so the board size comes from the board being looked at.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedAgent;

impl RuleBasedAgent {
    pub fn new() -> RuleBasedAgent {
        RuleBasedAgent
    }

    fn first_unrevealed(&self, obs: &Observation) -> Option<Point> {
        obs.points().find(|point| obs[*point].is_unrevealed())
    }
}

impl Strategy for RuleBasedAgent {
    fn decide(&mut self, obs: &Observation) -> Result<Action, StrategyError> {
        let point = self.first_unrevealed(obs).unwrap_or(Point(0, 0));
        Ok(Action::new(ActionType::Reveal, point))
    }
}
