use super::error::ConfigError;

pub const DEFAULT_SIZE: usize = 9;
pub const DEFAULT_MINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub size: usize,
    pub mines: usize,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { size: DEFAULT_SIZE, mines: DEFAULT_MINES, seed: None }
    }
}

impl GameConfig {
    pub fn new(size: usize, mines: usize, seed: Option<u64>) -> Result<GameConfig, ConfigError> {
        let config = GameConfig { size, mines, seed };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.mines == 0 {
            return Err(ConfigError::NoMines);
        }
        // the first reveal needs a mine-free 3x3 block
        let too_many = ConfigError::TooManyMines { size: self.size, mines: self.mines };
        let needed = self.mines.checked_add(9).ok_or(too_many)?;
        let area = self.size.checked_mul(self.size).ok_or(too_many)?;
        if needed > area {
            return Err(too_many);
        }
        Ok(())
    }

    /// Same board with its seed shifted, so a batch of seeded games differ from each other.
    pub fn nth_game(&self, n: u64) -> GameConfig {
        GameConfig { seed: self.seed.map(|seed| seed.wrapping_add(n)), ..*self }
    }
}
