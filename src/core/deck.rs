use super::error::CardError;
use super::{Card, CardBitSet, HoleCards};

/// The live deck: the 52 card universe minus every card already in play.
///
/// A `Deck` is never dealt from during a simulation. Board generators and the
/// hole card expander draw combinations out of it, so one deck can be shared
/// read-only between worker threads.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck {
    cards: CardBitSet,
}

impl Deck {
    /// A full 52 card deck.
    pub fn new() -> Self {
        Self {
            cards: CardBitSet::default(),
        }
    }

    /// The full deck minus the dead cards.
    ///
    /// Fails with [`CardError::DuplicateCard`] if a dead card is listed more
    /// than once, since that means the same card was given to two places.
    pub fn without<I>(dead: I) -> Result<Self, CardError>
    where
        I: IntoIterator<Item = Card>,
    {
        let mut cards = CardBitSet::default();
        for c in dead {
            if !cards.remove(c) {
                return Err(CardError::DuplicateCard(c));
            }
        }
        Ok(Self { cards })
    }

    /// Build the live deck for a scenario, removing every known hole card
    /// and every board card.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::{Card, Deck, HoleCards};
    ///
    /// let hands = HoleCards::parse_list("AsKs ? ?").unwrap();
    /// let board = Card::parse_many("2c7d9h").unwrap();
    /// let deck = Deck::for_scenario(&hands, &board).unwrap();
    /// assert_eq!(47, deck.len());
    /// ```
    pub fn for_scenario(hole_cards: &[HoleCards], board: &[Card]) -> Result<Self, CardError> {
        let dead = hole_cards
            .iter()
            .filter_map(HoleCards::cards)
            .flatten()
            .chain(board.iter().copied());
        Self::without(dead)
    }

    /// Number of cards left.
    pub fn len(&self) -> usize {
        self.cards.count()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(card)
    }

    /// Remove a card, returns true if it was in the deck.
    pub fn remove(&mut self, card: Card) -> bool {
        self.cards.remove(card)
    }

    /// The live cards as a bit set.
    pub fn bit_set(&self) -> CardBitSet {
        self.cards
    }

    /// The live cards in index order. Enumeration code works off this flat
    /// list so that the n-th combination is well defined.
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> {
        self.cards.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl From<CardBitSet> for Deck {
    fn from(cards: CardBitSet) -> Self {
        Self { cards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Suit, Value};

    #[test]
    fn test_new_deck_has_all_cards() {
        let d = Deck::new();
        assert_eq!(52, d.len());
        assert_eq!(52, d.to_vec().len());
        assert!(d.contains(Card::new(Value::Ace, Suit::Heart)));
    }

    #[test]
    fn test_without_removes_dead_cards() {
        let dead = Card::parse_many("AsAhKsKh").unwrap();
        let d = Deck::without(dead.iter().copied()).unwrap();
        assert_eq!(48, d.len());
        for c in dead {
            assert!(!d.contains(c));
        }
    }

    #[test]
    fn test_duplicate_dead_card_is_an_error() {
        let dead = Card::parse_many("AsKdAs").unwrap();
        assert_eq!(
            Err(CardError::DuplicateCard(Card::new(Value::Ace, Suit::Spade))),
            Deck::without(dead)
        );
    }

    #[test]
    fn test_for_scenario_skips_unknown() {
        let hands = HoleCards::parse_list("AsKs ? ? QdQh").unwrap();
        let d = Deck::for_scenario(&hands, &[]).unwrap();
        assert_eq!(48, d.len());
    }

    #[test]
    fn test_for_scenario_duplicate_between_players_and_board() {
        let hands = HoleCards::parse_list("AsKs QdQh").unwrap();
        let board = Card::parse_many("2c7dQh").unwrap();
        assert_eq!(
            Err(CardError::DuplicateCard(Card::new(Value::Queen, Suit::Heart))),
            Deck::for_scenario(&hands, &board)
        );
    }

    #[test]
    fn test_remove() {
        let mut d = Deck::new();
        let c = Card::new(Value::Two, Suit::Club);
        assert!(d.remove(c));
        assert!(!d.remove(c));
        assert_eq!(51, d.len());
    }
}
