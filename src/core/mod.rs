/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// A set of cards packed into a u64.
mod card_bit_set;
/// Export `CardBitSet` and its iterator.
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Errors from parsing cards and building decks.
mod error;
/// Export `CardError`
pub use self::error::CardError;

/// The hole cards of a single player, known or unknown.
mod hole_cards;
/// Export `HoleCards`
pub use self::hole_cards::HoleCards;

/// The live deck, the cards not yet in play.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Code to rank hands.
mod rank;
/// Export the trait and the results.
pub use self::rank::{HandCategory, HandRank, Rankable};

/// Enumerate combinations of cards, optionally from an offset.
mod card_iter;
/// Export `CardIter` and the binomial helper.
pub use self::card_iter::{nck, CardIter};
