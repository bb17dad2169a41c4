use std::fmt;
use std::str::FromStr;

use super::error::CardError;
use super::{Card, CardBitSet, Suit, Value};

/// The two private cards of one player.
///
/// `Unknown` stands for "any two cards still in the deck". The simulation
/// expands it into every possible concrete pair (exhaustive mode) or samples
/// one pair per trial (monte carlo mode).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoleCards {
    Known(Card, Card),
    Unknown,
}

impl HoleCards {
    /// Create known hole cards. Fails if both cards are the same.
    pub fn new(first: Card, second: Card) -> Result<Self, CardError> {
        if first == second {
            return Err(CardError::DuplicateCard(first));
        }
        Ok(Self::Known(first, second))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The two cards if they are known.
    pub fn cards(&self) -> Option<[Card; 2]> {
        match *self {
            Self::Known(a, b) => Some([a, b]),
            Self::Unknown => None,
        }
    }

    /// The cards as a bit set, empty for unknown hole cards.
    pub fn bit_set(&self) -> CardBitSet {
        match *self {
            Self::Known(a, b) => [a, b].into_iter().collect(),
            Self::Unknown => CardBitSet::new(),
        }
    }

    /// Parse a list of hole cards for several players.
    ///
    /// Tokens are cards like `As` or the unknown marker `?`. Known cards are
    /// taken two at a time. An unknown hand is written `? ?` or a lone `?`,
    /// so `"AsKs ? ? QdQh"` and `"AsKs ? QdQh"` are both three players with
    /// the middle one unknown. A known card followed by `?` is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::HoleCards;
    ///
    /// let hands = HoleCards::parse_list("AsKs ? ? QdQh").unwrap();
    /// assert_eq!(3, hands.len());
    /// assert!(hands[1].is_unknown());
    /// assert_eq!(hands, HoleCards::parse_list("AsKs ? QdQh").unwrap());
    /// ```
    pub fn parse_list(s: &str) -> Result<Vec<Self>, CardError> {
        let mut tokens = tokenize(s)?.into_iter().peekable();
        let mut hands = Vec::new();

        while let Some(first) = tokens.next() {
            let hand = match first {
                None => {
                    // A second `?` belongs to the same hand.
                    tokens.next_if(Option::is_none);
                    Self::Unknown
                }
                Some(a) => match tokens.next() {
                    Some(Some(b)) => Self::new(a, b)?,
                    Some(None) => return Err(CardError::MixedUnknown),
                    None => return Err(CardError::UnpairedCard(a)),
                },
            };
            hands.push(hand);
        }

        Ok(hands)
    }
}

/// Split a string into card tokens where `None` is the unknown marker.
fn tokenize(s: &str) -> Result<Vec<Option<Card>>, CardError> {
    let mut chars = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',');
    let mut tokens = Vec::new();

    while let Some(vc) = chars.next() {
        if vc == '?' {
            tokens.push(None);
            continue;
        }
        let value = Value::from_char(vc).ok_or(CardError::UnexpectedValueChar(vc))?;
        let sc = chars.next().ok_or(CardError::TooFewChars)?;
        let suit = Suit::from_char(sc).ok_or(CardError::UnexpectedSuitChar(sc))?;
        tokens.push(Some(Card::new(value, suit)));
    }

    Ok(tokens)
}

impl FromStr for HoleCards {
    type Err = CardError;

    /// Parses a single player's hole cards: `"AsKd"`, `"As Kd"`, `"?"` or
    /// `"? ?"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s)?;
        match tokens.as_slice() {
            [None] | [None, None] => Ok(Self::Unknown),
            [Some(a), Some(b)] => Self::new(*a, *b),
            [_, _] => Err(CardError::MixedUnknown),
            other => Err(CardError::WrongHoleCardCount(other.len())),
        }
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(a, b) => write!(f, "{a}{b}"),
            Self::Unknown => write!(f, "??"),
        }
    }
}
