use thiserror::Error;

use crate::core::{Card, CardError};

/// Everything that can stop a simulation. All of these except `Cancelled`
/// are found while validating, before any board is generated.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SimulationError {
    #[error("At least one player's hole cards are needed")]
    NoPlayers,

    #[error("Invalid number of board cards for a Texas Hold'em game: {0}")]
    InvalidBoardLength(usize),

    #[error("Card {0} is used more than once")]
    DuplicateCard(Card),

    #[error("The number of monte carlo trials must be positive")]
    InvalidTrialCount,

    #[error("{0} players have unknown hole cards, only one is supported")]
    UnsupportedMultiUnknown(usize),

    #[error("At least one worker thread is needed")]
    InvalidThreadCount,

    #[error("Not enough cards left in the deck: needed {needed}, available {available}")]
    NotEnoughCards { needed: usize, available: usize },

    #[error("Card {0} is in the deck but is also in play")]
    DeckMismatch(Card),

    #[error("The number of iterations does not fit in a u64")]
    TooManyIterations,

    /// Building a result from counts that never recorded an iteration.
    #[error("The simulation would not run any iterations")]
    NoIterations,

    #[error("The simulation was cancelled")]
    Cancelled,

    #[error("Invalid card input: {0}")]
    Card(CardError),
}

impl From<CardError> for SimulationError {
    fn from(err: CardError) -> Self {
        match err {
            // A duplicate is a scenario problem, not a parse problem.
            CardError::DuplicateCard(c) => SimulationError::DuplicateCard(c),
            other => SimulationError::Card(other),
        }
    }
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimulationError>;
