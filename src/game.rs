use std::fmt;
use std::ops::Index;

use super::error::GameError;
use super::geometry::{self, Point};

/// What an observer can see at one board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Unrevealed,
    Revealed(u8),
    Flagged,
    Mine,
}

impl Cell {
    pub fn is_unrevealed(&self) -> bool {
        matches!(*self, Cell::Unrevealed)
    }

    fn to_str(&self) -> String {
        match *self {
            Cell::Unrevealed => String::from("□"),
            Cell::Flagged => String::from("▶"),
            Cell::Mine => String::from("X"),
            Cell::Revealed(0) => String::from("_"),
            Cell::Revealed(count) => count.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Reveal,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub kind: ActionType,
    pub point: Point,
}

impl Action {
    pub fn new(kind: ActionType, point: Point) -> Action {
        Action { kind, point }
    }

    pub fn reveal(x: usize, y: usize) -> Action {
        Action::new(ActionType::Reveal, Point(x, y))
    }

    pub fn flag(x: usize, y: usize) -> Action {
        Action::new(ActionType::Flag, Point(x, y))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            ActionType::Reveal => "reveal",
            ActionType::Flag => "flag",
        };
        write!(f, "{} {} {}", verb, self.point.0, self.point.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    InProgress,
    Won,
    Lost,
}

impl Condition {
    pub fn is_terminal(&self) -> bool {
        !matches!(*self, Condition::InProgress)
    }
}

/// A square snapshot of the board as handed out by a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    rows: Vec<Vec<Cell>>,
}

impl Observation {
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Observation, GameError> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Observation { rows })
    }

    /// For sessions whose grid is square by construction.
    pub(crate) fn from_square_rows(rows: Vec<Vec<Cell>>) -> Observation {
        debug_assert!(rows.iter().all(|row| row.len() == rows.len()));
        Observation { rows }
    }

    pub fn filled(size: usize, cell: Cell) -> Observation {
        Observation { rows: vec![vec![cell; size]; size] }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, point: &Point) -> Option<Cell> {
        self.rows.get(point.0).and_then(|row| row.get(point.1)).copied()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> {
        geometry::points(self.size())
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.rows.iter().flatten().filter(|&&c| c == cell).count()
    }
}

impl Index<Point> for Observation {
    type Output = Cell;

    fn index(&self, point: Point) -> &Cell {
        &self.rows[point.0][point.1]
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter() {
            let line: String = row.iter().map(|cell| cell.to_str()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// A game session an agent can drive.
///
/// `step` has to stay callable after the session ended; what it returns then is
/// up to the implementation.
pub trait Game {
    type Error: std::error::Error;

    fn obs(&self) -> Observation;
    fn step(&mut self, action: Action) -> Result<(Observation, Condition), Self::Error>;
}
