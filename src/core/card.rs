use std::fmt;
use std::str::FromStr;

use super::error::CardError;

/// Card rank or value.
/// This is basically the face value - 2
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// Take a u8 in `0..13` and turn it into a value.
    ///
    /// Values outside the range are clamped to Ace.
    pub fn from_u8(v: u8) -> Self {
        VALUES[v.min(12) as usize]
    }

    /// The face rank of the card, 2 for a deuce up to 14 for an ace.
    pub fn rank(self) -> u8 {
        self as u8 + 2
    }

    /// Convert a character into a `Value`.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::Ace),
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'J' => Some(Self::Jack),
            'T' => Some(Self::Ten),
            '9' => Some(Self::Nine),
            '8' => Some(Self::Eight),
            '7' => Some(Self::Seven),
            '6' => Some(Self::Six),
            '5' => Some(Self::Five),
            '4' => Some(Self::Four),
            '3' => Some(Self::Three),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    /// Convert this value to a char.
    pub fn to_char(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Jack => 'J',
            Self::Ten => 'T',
            Self::Nine => '9',
            Self::Eight => '8',
            Self::Seven => '7',
            Self::Six => '6',
            Self::Five => '5',
            Self::Four => '4',
            Self::Three => '3',
            Self::Two => '2',
        }
    }
}

/// Enum for the four different suits.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    /// Translate a suit from a u8. Values above 3 are clamped to Diamond.
    pub fn from_u8(s: u8) -> Self {
        SUITS[s.min(3) as usize]
    }

    /// This Suit to a character.
    pub fn to_char(self) -> char {
        match self {
            Self::Spade => 's',
            Self::Club => 'c',
            Self::Heart => 'h',
            Self::Diamond => 'd',
        }
    }

    /// Convert a character into a `Suit`.
    pub fn from_char(s: char) -> Option<Self> {
        match s.to_ascii_lowercase() {
            's' => Some(Self::Spade),
            'c' => Some(Self::Club),
            'h' => Some(Self::Heart),
            'd' => Some(Self::Diamond),
            _ => None,
        }
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
///
/// Cards order by value first and then by suit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    /// Create a new card.
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// The index of this card in `0..52`. Used as the bit position in a
    /// [`CardBitSet`](super::CardBitSet).
    pub fn index(&self) -> u8 {
        self.suit as u8 * 13 + self.value as u8
    }

    /// Inverse of [`Card::index`].
    pub fn from_index(idx: u8) -> Self {
        Self {
            value: Value::from_u8(idx % 13),
            suit: Suit::from_u8(idx / 13),
        }
    }

    /// Parse a run of cards such as `"AsKd"`, `"As Kd 2c"` or `"as,kd"`.
    ///
    /// Whitespace and commas between cards are ignored. Duplicates are not
    /// checked here, that is the job of the deck.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::{Card, Suit, Value};
    ///
    /// let cards = Card::parse_many("As Td").unwrap();
    /// assert_eq!(cards, vec![
    ///     Card::new(Value::Ace, Suit::Spade),
    ///     Card::new(Value::Ten, Suit::Diamond),
    /// ]);
    /// ```
    pub fn parse_many(s: &str) -> Result<Vec<Self>, CardError> {
        let mut chars = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',');
        let mut cards = Vec::new();

        while let Some(vc) = chars.next() {
            let value = Value::from_char(vc).ok_or(CardError::UnexpectedValueChar(vc))?;
            let sc = chars.next().ok_or(CardError::TooFewChars)?;
            let suit = Suit::from_char(sc).ok_or(CardError::UnexpectedSuitChar(sc))?;
            cards.push(Self::new(value, suit));
        }

        Ok(cards)
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let vc = chars.next().ok_or(CardError::TooFewChars)?;
        let sc = chars.next().ok_or(CardError::TooFewChars)?;
        if chars.next().is_some() {
            return Err(CardError::UnparsedCharsRemaining);
        }

        let value = Value::from_char(vc).ok_or(CardError::UnexpectedValueChar(vc))?;
        let suit = Suit::from_char(sc).ok_or(CardError::UnexpectedSuitChar(sc))?;
        Ok(Self::new(value, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor() {
        let c = Card::new(Value::Three, Suit::Spade);
        assert_eq!(Suit::Spade, c.suit);
        assert_eq!(Value::Three, c.value);
    }

    #[test]
    fn test_rank_is_face_value() {
        assert_eq!(2, Value::Two.rank());
        assert_eq!(10, Value::Ten.rank());
        assert_eq!(11, Value::Jack.rank());
        assert_eq!(14, Value::Ace.rank());
    }

    #[test]
    fn test_index_round_trips_for_every_card() {
        let mut seen = [false; 52];
        for suit in Suit::suits() {
            for value in Value::values() {
                let c = Card::new(value, suit);
                let idx = c.index();
                assert!(idx < 52);
                assert!(!seen[idx as usize], "index {idx} used twice");
                seen[idx as usize] = true;
                assert_eq!(c, Card::from_index(idx));
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_order_by_value_then_suit() {
        let two_d = Card::new(Value::Two, Suit::Diamond);
        let three_s = Card::new(Value::Three, Suit::Spade);
        let three_c = Card::new(Value::Three, Suit::Club);
        assert!(two_d < three_s);
        assert!(three_s < three_c);
    }

    #[test]
    fn test_parse_single() {
        assert_eq!(
            Card::new(Value::Ace, Suit::Spade),
            "As".parse::<Card>().unwrap()
        );
        assert_eq!(
            Card::new(Value::Ten, Suit::Heart),
            "th".parse::<Card>().unwrap()
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Err(CardError::TooFewChars), "A".parse::<Card>());
        assert_eq!(
            Err(CardError::UnexpectedValueChar('X')),
            "Xs".parse::<Card>()
        );
        assert_eq!(
            Err(CardError::UnexpectedSuitChar('x')),
            "Ax".parse::<Card>()
        );
        assert_eq!(
            Err(CardError::UnparsedCharsRemaining),
            "Asd".parse::<Card>()
        );
    }

    #[test]
    fn test_parse_many() {
        let cards = Card::parse_many("2c, 7d 9h").unwrap();
        assert_eq!(3, cards.len());
        assert_eq!(Card::new(Value::Nine, Suit::Heart), cards[2]);
        assert!(Card::parse_many("").unwrap().is_empty());
        assert_eq!(Err(CardError::TooFewChars), Card::parse_many("2c7"));
    }

    #[test]
    fn test_display() {
        assert_eq!("Kd", Card::new(Value::King, Suit::Diamond).to_string());
        assert_eq!("5s", Card::new(Value::Five, Suit::Spade).to_string());
    }
}
