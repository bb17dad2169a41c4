use std::fmt;

use crate::core::{HoleCards, Value};

/// What to do with a hand before the flop.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreflopAction {
    CallOrRaise,
    CallOrPotentiallyRaise,
    Fold,
}

impl fmt::Display for PreflopAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PreflopAction::CallOrRaise => "Call or Raise",
            PreflopAction::CallOrPotentiallyRaise => "Call or potentially Raise",
            PreflopAction::Fold => "Fold",
        };
        f.write_str(text)
    }
}

/// The rule that decided a [`PreflopAction`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreflopReason {
    /// At least one jack, queen, king or ace.
    HighCard,
    /// A pocket pair.
    Pair,
    /// Values within four of each other.
    Connected,
    /// Both cards share a suit.
    Suited,
    /// None of the above.
    Weak,
}

impl PreflopReason {
    pub fn action(self) -> PreflopAction {
        match self {
            PreflopReason::HighCard | PreflopReason::Pair | PreflopReason::Suited => {
                PreflopAction::CallOrRaise
            }
            PreflopReason::Connected => PreflopAction::CallOrPotentiallyRaise,
            PreflopReason::Weak => PreflopAction::Fold,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PreflopReason::HighCard => "You have a high card (Jack, Queen, King, or Ace).",
            PreflopReason::Pair => "You have a pair, which can be strong pre-flop.",
            PreflopReason::Connected => {
                "Your cards are close in value, potentially leading to a straight."
            }
            PreflopReason::Suited => "Your cards are suited, increasing the chances of a flush.",
            PreflopReason::Weak => "Your cards do not indicate a strong hand pre-flop.",
        }
    }
}

impl fmt::Display for PreflopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Rule of thumb advice for a starting hand.
///
/// The rules are checked in order and the first match wins: any jack or
/// better, a pocket pair, values within four, suited. Anything else folds.
/// Unknown hole cards get no advice.
///
/// # Examples
///
/// ```
/// use holdem_equity::core::HoleCards;
/// use holdem_equity::holdem::{preflop_advice, PreflopAction};
///
/// let hand: HoleCards = "7c2d".parse().unwrap();
/// assert_eq!(Some(PreflopAction::Fold), preflop_advice(&hand).map(|r| r.action()));
/// ```
pub fn preflop_advice(hole_cards: &HoleCards) -> Option<PreflopReason> {
    let [a, b] = hole_cards.cards()?;

    let reason = if a.value >= Value::Jack || b.value >= Value::Jack {
        PreflopReason::HighCard
    } else if a.value == b.value {
        PreflopReason::Pair
    } else if a.value.rank().abs_diff(b.value.rank()) <= 4 {
        PreflopReason::Connected
    } else if a.suit == b.suit {
        PreflopReason::Suited
    } else {
        PreflopReason::Weak
    };
    Some(reason)
}
