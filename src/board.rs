use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use tracing::{debug, info};

use super::config::GameConfig;
use super::error::GameError;
use super::game::{Action, ActionType, Cell as ObservedCell, Condition, Game, Observation};
use super::geometry::{neighbor_points, points, Point};

/// First reveal keeps every cell within this distance clear of mines.
const SAFE_RADIUS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Content {
    Mine,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KnowledgeState {
    Unknown,
    Flag,
    Known,
}

impl KnowledgeState {
    fn is_unknown(&self) -> bool {
        matches!(*self, KnowledgeState::Unknown)
    }
}

#[derive(Debug, Clone)]
struct Cell {
    content: Content,
    mined_neighbor_count: u8,
    knowledge: KnowledgeState,
}

impl Cell {
    fn create_empty() -> Cell {
        Cell { content: Content::Empty, mined_neighbor_count: 0, knowledge: KnowledgeState::Unknown }
    }

    fn toggle_flag(&mut self) {
        self.knowledge = match self.knowledge {
            KnowledgeState::Known => KnowledgeState::Known,
            KnowledgeState::Flag => KnowledgeState::Unknown,
            KnowledgeState::Unknown => KnowledgeState::Flag,
        };
    }

    fn is_mine(&self) -> bool {
        matches!(self.content, Content::Mine)
    }

    fn observe(&self, lost: bool) -> ObservedCell {
        match (self.knowledge, self.content) {
            (KnowledgeState::Known, Content::Mine) => ObservedCell::Mine,
            (_, Content::Mine) if lost => ObservedCell::Mine,
            (KnowledgeState::Flag, _) => ObservedCell::Flagged,
            (KnowledgeState::Unknown, _) => ObservedCell::Unrevealed,
            (KnowledgeState::Known, Content::Empty) => ObservedCell::Revealed(self.mined_neighbor_count),
        }
    }
}

/// Square minesweeper board that lays its mines out on the first reveal.
#[derive(Debug)]
pub struct Board {
    size: usize,
    field: Vec<Vec<Cell>>,
    mine_count: usize,
    initialized: bool,
    revealed_count: usize,
    condition: Condition,
    rng: StdRng,
}

impl Board {
    pub fn new(size: usize, mine_count: usize, seed: Option<u64>) -> Result<Board, GameError> {
        // the first reveal clears up to a full 3x3 block
        let safe_area = (2 * SAFE_RADIUS + 1).pow(2);
        let needed = mine_count.checked_add(safe_area).ok_or(GameError::TooManyMines)?;
        let area = size.checked_mul(size).ok_or(GameError::TooManyMines)?;
        if needed > area {
            return Err(GameError::TooManyMines);
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let field = vec![vec![Cell::create_empty(); size]; size];
        Ok(Board {
            size,
            field,
            mine_count,
            initialized: false,
            revealed_count: 0,
            condition: Condition::InProgress,
            rng,
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Board, GameError> {
        Board::new(config.size, config.mines, config.seed)
    }

    /// Board with mines at fixed points, bypassing the first-reveal placement.
    pub fn with_mines(size: usize, mines: &[Point]) -> Result<Board, GameError> {
        if mines.iter().any(|point| !point.fits(size)) {
            return Err(GameError::InvalidCoords);
        }
        let mut board = Board {
            size,
            field: vec![vec![Cell::create_empty(); size]; size],
            mine_count: 0,
            initialized: false,
            revealed_count: 0,
            condition: Condition::InProgress,
            rng: StdRng::seed_from_u64(0),
        };
        let unique: HashSet<Point> = mines.iter().copied().collect();
        board.place_mines(unique.into_iter().collect());
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    fn retrieve_cell(&self, point: &Point) -> &Cell {
        &self.field[point.0][point.1]
    }

    fn retrieve_cell_mutable(&mut self, point: &Point) -> &mut Cell {
        &mut self.field[point.0][point.1]
    }

    fn safe_cell_count(&self) -> usize {
        self.size * self.size - self.mine_count
    }

    fn sample_points(&mut self, disallowed: &Point) -> Result<Vec<Point>, GameError> {
        let mut possible: Vec<Point> = points(self.size)
            .filter(|point| disallowed.distance(point) > SAFE_RADIUS)
            .collect();
        if possible.len() < self.mine_count {
            return Err(GameError::TooManyMines);
        }
        possible.shuffle(&mut self.rng);
        possible.truncate(self.mine_count);
        Ok(possible)
    }

    fn place_mines(&mut self, mines: Vec<Point>) {
        for point in mines.iter() {
            self.retrieve_cell_mutable(point).content = Content::Mine;
            for neighbor in neighbor_points(point, self.size) {
                self.retrieve_cell_mutable(&neighbor).mined_neighbor_count += 1;
            }
        }
        self.mine_count = mines.len();
        self.initialized = true;
    }

    fn initialize(&mut self, point: &Point) -> Result<(), GameError> {
        let mines = self.sample_points(point)?;
        debug!(mines = mines.len(), first = %point, "placing mines");
        self.place_mines(mines);
        Ok(())
    }

    pub fn toggle_flag(&mut self, point: &Point) {
        self.retrieve_cell_mutable(point).toggle_flag()
    }

    pub fn probe(&mut self, point: &Point) -> Result<Condition, GameError> {
        // flagged and open cells are left alone, and do not count as the first reveal
        if !self.retrieve_cell(point).knowledge.is_unknown() {
            return Ok(self.condition);
        }
        if !self.initialized {
            self.initialize(point)?;
        }
        if self.retrieve_cell(point).is_mine() {
            self.retrieve_cell_mutable(point).knowledge = KnowledgeState::Known;
            self.condition = Condition::Lost;
            info!(at = %point, "mine revealed");
            return Ok(self.condition);
        }

        let region = self.find_region(*point);
        for point in region.iter() {
            self.reveal_point(point);
        }

        if self.revealed_count == self.safe_cell_count() {
            self.condition = Condition::Won;
            info!("all safe cells revealed");
        }
        Ok(self.condition)
    }

    /// Hidden safe cells opened by revealing `start`: it plus everything reachable through zero cells.
    fn find_region(&self, start: Point) -> HashSet<Point> {
        let mut region = HashSet::with_capacity(16);
        region.insert(start);
        let mut pending = vec![start];
        while let Some(point) = pending.pop() {
            let cell = self.retrieve_cell(&point);
            if cell.is_mine() || cell.mined_neighbor_count > 0 {
                continue;
            }
            for neighbor in neighbor_points(&point, self.size) {
                let next = self.retrieve_cell(&neighbor);
                if next.knowledge.is_unknown() && !next.is_mine() && region.insert(neighbor) {
                    pending.push(neighbor);
                }
            }
        }
        region
    }

    fn reveal_point(&mut self, point: &Point) {
        let cell = self.retrieve_cell_mutable(point);
        if cell.knowledge.is_unknown() {
            cell.knowledge = KnowledgeState::Known;
            self.revealed_count += 1;
        }
    }
}

impl Game for Board {
    type Error = GameError;

    fn obs(&self) -> Observation {
        let lost = self.condition == Condition::Lost;
        let rows = self
            .field
            .iter()
            .map(|row| row.iter().map(|cell| cell.observe(lost)).collect())
            .collect();
        Observation::from_square_rows(rows)
    }

    fn step(&mut self, action: Action) -> Result<(Observation, Condition), GameError> {
        if !action.point.fits(self.size) {
            return Err(GameError::InvalidCoords);
        }
        if self.condition.is_terminal() {
            return Ok((self.obs(), self.condition));
        }
        match action.kind {
            ActionType::Reveal => {
                self.probe(&action.point)?;
            }
            ActionType::Flag => self.toggle_flag(&action.point),
        }
        Ok((self.obs(), self.condition))
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
mod board_tests {
    use super::*;

    #[test]
    fn toggle_flag_correctness() {
        let states = [KnowledgeState::Unknown, KnowledgeState::Flag, KnowledgeState::Known];
        for start_state in states.iter() {
            let mut cell = Cell::create_empty();
            cell.knowledge = *start_state;
            cell.toggle_flag();
            match (start_state, cell.knowledge) {
                (KnowledgeState::Known, KnowledgeState::Known) => {}
                (KnowledgeState::Flag, KnowledgeState::Unknown) => {}
                (KnowledgeState::Unknown, KnowledgeState::Flag) => {}
                _ => panic!("got an unexpected toggle state"),
            };
        }
    }

    #[test]
    fn rejects_overfull_board() {
        assert_eq!(Board::new(3, 1, Some(0)).err(), Some(GameError::TooManyMines));
        assert!(Board::new(4, 7, Some(0)).is_ok());
    }

    #[test]
    fn rejects_out_of_bounds_actions() {
        let mut board = Board::new(4, 2, Some(1)).unwrap();
        assert_eq!(board.step(Action::reveal(4, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.step(Action::flag(0, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn revealing_a_mine_loses() {
        let mut board = Board::with_mines(3, &[Point(1, 1)]).unwrap();
        let (obs, condition) = board.step(Action::reveal(1, 1)).unwrap();
        assert_eq!(condition, Condition::Lost);
        assert_eq!(obs[Point(1, 1)], ObservedCell::Mine);
    }

    #[test]
    fn loss_shows_every_mine() {
        let mut board = Board::with_mines(3, &[Point(0, 0), Point(2, 2)]).unwrap();
        let (obs, _) = board.step(Action::reveal(0, 0)).unwrap();
        assert_eq!(obs[Point(2, 2)], ObservedCell::Mine);
    }

    #[test]
    fn zero_cell_flood_fills() {
        let mut board = Board::with_mines(4, &[Point(0, 0)]).unwrap();
        let (obs, condition) = board.step(Action::reveal(3, 3)).unwrap();
        assert_eq!(condition, Condition::Won);
        assert_eq!(obs[Point(0, 1)], ObservedCell::Revealed(1));
        assert_eq!(obs[Point(1, 1)], ObservedCell::Revealed(1));
        assert_eq!(obs[Point(2, 2)], ObservedCell::Revealed(0));
        assert_eq!(obs[Point(0, 0)], ObservedCell::Unrevealed);
    }

    #[test]
    fn numbered_cell_reveals_alone() {
        let mut board = Board::with_mines(3, &[Point(0, 0)]).unwrap();
        let (obs, condition) = board.step(Action::reveal(1, 1)).unwrap();
        assert_eq!(condition, Condition::InProgress);
        assert_eq!(obs.count(ObservedCell::Unrevealed), 8);
        assert_eq!(obs[Point(1, 1)], ObservedCell::Revealed(1));
    }

    #[test]
    fn flags_toggle_and_block_reveals() {
        let mut board = Board::with_mines(3, &[Point(0, 0)]).unwrap();
        let (obs, _) = board.step(Action::flag(0, 0)).unwrap();
        assert_eq!(obs[Point(0, 0)], ObservedCell::Flagged);
        let (_, condition) = board.step(Action::reveal(0, 0)).unwrap();
        assert_eq!(condition, Condition::InProgress);
        let (obs, _) = board.step(Action::flag(0, 0)).unwrap();
        assert_eq!(obs[Point(0, 0)], ObservedCell::Unrevealed);
    }

    #[test]
    fn steps_after_the_end_change_nothing() {
        let mut board = Board::with_mines(3, &[Point(0, 0)]).unwrap();
        let (lost_obs, condition) = board.step(Action::reveal(0, 0)).unwrap();
        assert_eq!(condition, Condition::Lost);
        let (obs, condition) = board.step(Action::reveal(2, 2)).unwrap();
        assert_eq!(condition, Condition::Lost);
        assert_eq!(obs, lost_obs);
    }

    #[test]
    fn large_empty_region_opens_in_one_reveal() {
        let mut board = Board::with_mines(300, &[Point(299, 299)]).unwrap();
        let (obs, condition) = board.step(Action::reveal(0, 0)).unwrap();
        assert_eq!(condition, Condition::Won);
        assert_eq!(obs.count(ObservedCell::Unrevealed), 1);
        assert_eq!(obs[Point(298, 298)], ObservedCell::Revealed(1));
    }

    #[test]
    fn huge_dimensions_are_rejected() {
        assert_eq!(Board::new(9, usize::MAX, None).err(), Some(GameError::TooManyMines));
        assert_eq!(Board::new(usize::MAX / 2, 10, None).err(), Some(GameError::TooManyMines));
    }

    #[test]
    fn reveal_on_flag_keeps_first_reveal_safe() {
        for seed in 0..50 {
            let mut board = Board::new(9, 72, Some(seed)).unwrap();
            board.step(Action::flag(0, 0)).unwrap();
            let (_, condition) = board.step(Action::reveal(0, 0)).unwrap();
            assert_eq!(condition, Condition::InProgress);
            let (obs, condition) = board.step(Action::reveal(8, 8)).unwrap();
            assert_ne!(condition, Condition::Lost, "seed {}", seed);
            assert_eq!(obs[Point(8, 8)], ObservedCell::Revealed(0));
        }
    }

    #[test]
    fn observation_matches_board() {
        let mut board = Board::with_mines(4, &[Point(1, 2)]).unwrap();
        board.step(Action::flag(1, 2)).unwrap();
        let obs = board.obs();
        assert_eq!(obs.size(), 4);
        assert_eq!(obs[Point(1, 2)], ObservedCell::Flagged);
        assert_eq!(obs.count(ObservedCell::Unrevealed), 15);
    }

    #[test]
    fn board_is_debuggable() {
        let board = Board::with_mines(2, &[Point(0, 0)]).unwrap();
        assert!(format!("{:?}", board).starts_with("Board"));
    }

    #[test]
    fn seeded_boards_repeat() {
        let mut first = Board::new(9, 10, Some(42)).unwrap();
        let mut second = Board::new(9, 10, Some(42)).unwrap();
        assert_eq!(first.step(Action::reveal(4, 4)), second.step(Action::reveal(4, 4)));
    }

    proptest! {
        #[test]
        fn first_reveal_is_safe(size in 4..16usize, x in 0..16usize, y in 0..16usize, seed in any::<u64>()) {
            let mines = size * size - 9;
            let point = Point(x % size, y % size);
            let mut board = Board::new(size, mines, Some(seed)).unwrap();
            let (obs, condition) = board.step(Action::reveal(point.0, point.1)).unwrap();
            prop_assert_ne!(condition, Condition::Lost);
            prop_assert_eq!(board.mine_count(), mines);
            prop_assert_eq!(obs[point], ObservedCell::Revealed(0));
        }

        #[test]
        fn mine_counts_match_layout(size in 4..12usize, mines in 1..7usize, seed in any::<u64>()) {
            let mut board = Board::new(size, mines, Some(seed)).unwrap();
            board.step(Action::reveal(0, 0)).unwrap();
            for point in points(size) {
                let cell = board.retrieve_cell(&point);
                let expected = neighbor_points(&point, size).iter()
                    .filter(|neighbor| board.retrieve_cell(neighbor).is_mine())
                    .count();
                prop_assert_eq!(cell.mined_neighbor_count as usize, expected);
            }
        }
    }
}
