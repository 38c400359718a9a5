use regex::Regex;
use std::sync::OnceLock;

use super::game::{Action, ActionType};
use super::geometry::Point;

fn command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(reveal|click|flag)\s+(\d+)\s+(\d+)\s*$").expect("command pattern is valid")
    })
}

/// Reads a move typed as `TYPE X Y`, e.g. `reveal 3 4` or `flag 0 2`.
///
/// `click` is accepted as another name for `reveal`.
pub fn parse_action(input: &str) -> Option<Action> {
    let cap = command_pattern().captures(input)?;
    let x: usize = cap[2].parse().ok()?;
    let y: usize = cap[3].parse().ok()?;
    let kind = match &cap[1] {
        "reveal" | "click" => ActionType::Reveal,
        "flag" => ActionType::Flag,
        _ => return None,
    };
    Some(Action::new(kind, Point(x, y)))
}
