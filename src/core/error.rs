use thiserror::Error;

use super::Card;

/// Errors from parsing cards and building decks.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CardError {
    #[error("Unexpected value character '{0}'")]
    UnexpectedValueChar(char),
    #[error("Unexpected suit character '{0}'")]
    UnexpectedSuitChar(char),
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Not enough characters to make a card")]
    TooFewChars,
    #[error("Hole cards need exactly two cards, found {0}")]
    WrongHoleCardCount(usize),
    #[error("Card {0} has no second hole card")]
    UnpairedCard(Card),
    #[error("Hole cards must be both known or both unknown")]
    MixedUnknown,
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
}
