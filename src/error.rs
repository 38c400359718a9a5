use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Strategy does not implement a decision rule")]
    Unimplemented,
    #[error("Strategy is externally controlled and makes no decisions")]
    ExternallyControlled,
}

/// Anything that stops [`Agent::play`](crate::Agent::play).
///
/// Session errors are carried as-is so callers see exactly what the game reported.
#[derive(Error, Debug, PartialEq)]
pub enum PlayError<E> {
    #[error(transparent)]
    Strategy(#[from] StrategyError),
    #[error(transparent)]
    Session(E),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape is not square")]
    InvalidBoardShape,
    #[error("Too many mines")]
    TooManyMines,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board size must be at least 1")]
    EmptyBoard,
    #[error("At least one mine is required")]
    NoMines,
    #[error("{mines} mines do not fit on a {size}x{size} board with a safe first reveal")]
    TooManyMines { size: usize, mines: usize },
}

/// Failures of a manually driven game loop.
#[derive(Error, Debug)]
pub enum ManualError<E> {
    #[error("Failed to read or write the terminal")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Session(E),
}
