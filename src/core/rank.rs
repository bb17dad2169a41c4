use std::fmt;

use super::{Card, CardBitSet};

/// How strong a hand is: its category plus a tie break key.
///
/// The derived ordering compares the category first and the key second, so
/// two hands compare the way poker rules say they should.
///
/// - `Straight` and `StraightFlush` keys run from 0 for the wheel
///   (A-2-3-4-5) to 9 for broadway.
/// - Every other key is a bit set of values, one bit per [`Value`]. Hands
///   built from sets (pairs, trips, quads) keep the set values shifted up by
///   13 bits and the kickers in the low 13, so sets outweigh kickers.
///
/// [`Value`]: super::Value
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub enum HandRank {
    HighCard(u32),
    OnePair(u32),
    TwoPair(u32),
    ThreeOfAKind(u32),
    Straight(u32),
    Flush(u32),
    FullHouse(u32),
    FourOfAKind(u32),
    StraightFlush(u32),
}

impl HandRank {
    /// The category of this hand with the tie break stripped.
    pub fn category(&self) -> HandCategory {
        (*self).into()
    }

    /// The tie break key used to order hands of the same category.
    pub fn key(&self) -> u32 {
        match *self {
            HandRank::HighCard(k)
            | HandRank::OnePair(k)
            | HandRank::TwoPair(k)
            | HandRank::ThreeOfAKind(k)
            | HandRank::Straight(k)
            | HandRank::Flush(k)
            | HandRank::FullHouse(k)
            | HandRank::FourOfAKind(k)
            | HandRank::StraightFlush(k) => k,
        }
    }
}

/// The nine hand categories without any tie break information, lowest
/// first. Used as the histogram bucket for simulation results.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub enum HandCategory {
    HighCard = 0,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    /// Number of categories.
    pub const COUNT: usize = 9;

    /// Every category from weakest to strongest.
    pub const ALL: [HandCategory; HandCategory::COUNT] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    /// Position of this category in [`HandCategory::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl From<HandRank> for HandCategory {
    fn from(rank: HandRank) -> Self {
        match rank {
            HandRank::HighCard(_) => HandCategory::HighCard,
            HandRank::OnePair(_) => HandCategory::OnePair,
            HandRank::TwoPair(_) => HandCategory::TwoPair,
            HandRank::ThreeOfAKind(_) => HandCategory::ThreeOfAKind,
            HandRank::Straight(_) => HandCategory::Straight,
            HandRank::Flush(_) => HandCategory::Flush,
            HandRank::FullHouse(_) => HandCategory::FullHouse,
            HandRank::FourOfAKind(_) => HandCategory::FourOfAKind,
            HandRank::StraightFlush(_) => HandCategory::StraightFlush,
        }
    }
}

/// Ace, two, three, four and five.
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Where the set values sit in a rank key.
const SET_SHIFT: u32 = 13;

/// Key of the highest straight in a value set, or `None` without one.
fn rank_straight(values: u32) -> Option<u32> {
    // Bit `v` survives only when `v` and the four values under it are all
    // present, so the surviving bits are straight tops.
    let tops = values & (values << 1) & (values << 2) & (values << 3) & (values << 4);
    if tops != 0 {
        Some(31 - tops.leading_zeros() - 3)
    } else if values & WHEEL == WHEEL {
        Some(0)
    } else {
        None
    }
}

/// Drop the lowest bits until at most `n` are left.
fn keep_n(mut bits: u32, n: u32) -> u32 {
    while bits.count_ones() > n {
        bits &= bits - 1;
    }
    bits
}

/// Value bit sets gathered from a pile of cards.
struct Tally {
    /// Every value present.
    values: u32,
    /// Values present in each suit.
    suited: [u32; 4],
    /// `by_count[n]` holds the values seen exactly `n` times.
    by_count: [u32; 5],
}

impl Tally {
    fn of(cards: impl Iterator<Item = Card>) -> Self {
        let mut counts = [0u8; 13];
        let mut suited = [0u32; 4];
        let mut values = 0;
        for card in cards {
            let bit = 1 << card.value as u32;
            values |= bit;
            suited[card.suit as usize] |= bit;
            counts[card.value as usize] += 1;
        }

        let mut by_count = [0u32; 5];
        for (value, &n) in counts.iter().enumerate() {
            by_count[n as usize] |= 1 << value;
        }
        Self {
            values,
            suited,
            by_count,
        }
    }

    fn quads(&self) -> u32 {
        self.by_count[4]
    }

    fn sets(&self) -> u32 {
        self.by_count[3]
    }

    fn pairs(&self) -> u32 {
        self.by_count[2]
    }

    /// Values of the first suit holding five or more cards.
    fn flush(&self) -> Option<u32> {
        self.suited.iter().copied().find(|s| s.count_ones() >= 5)
    }
}

/// Anything that holds cards can be ranked. Implemented for `[Card]`,
/// `Vec<Card>` and `CardBitSet`.
pub trait Rankable {
    /// The cards to rank.
    fn cards(&self) -> impl Iterator<Item = Card>;

    /// The best five card hand among all the cards.
    ///
    /// Meant for seven card hold'em hands but any count works. Fewer than
    /// five cards are ranked on what is there, which scores a partial board.
    /// Use [`Rankable::rank_five`] when there are exactly five.
    ///
    /// # Examples
    /// ```
    /// use holdem_equity::core::{Card, HandRank, Rankable};
    ///
    /// let hand = Card::parse_many("2h2d8d8sKd6sTh").unwrap();
    /// let rank = hand.rank();
    /// assert!(HandRank::TwoPair(0) <= rank);
    /// assert!(HandRank::TwoPair(u32::MAX) >= rank);
    /// ```
    fn rank(&self) -> HandRank {
        let t = Tally::of(self.cards());

        if let Some(flush) = t.flush() {
            return match rank_straight(flush) {
                Some(top) => HandRank::StraightFlush(top),
                None => HandRank::Flush(keep_n(flush, 5)),
            };
        }

        let (quads, sets, pairs) = (t.quads(), t.sets(), t.pairs());
        if quads != 0 {
            let kicker = keep_n(t.values ^ quads, 1);
            return HandRank::FourOfAKind((quads << SET_SHIFT) | kicker);
        }

        if sets != 0 {
            // The top set fills up with the best of any other set or pair.
            let top = keep_n(sets, 1);
            let filler = (sets ^ top) | pairs;
            if filler != 0 {
                return HandRank::FullHouse((top << SET_SHIFT) | keep_n(filler, 1));
            }
        }

        if let Some(top) = rank_straight(t.values) {
            HandRank::Straight(top)
        } else if sets != 0 {
            HandRank::ThreeOfAKind((sets << SET_SHIFT) | keep_n(t.values ^ sets, 2))
        } else if pairs.count_ones() >= 2 {
            let two = keep_n(pairs, 2);
            HandRank::TwoPair((two << SET_SHIFT) | keep_n(t.values ^ two, 1))
        } else if pairs != 0 {
            HandRank::OnePair((pairs << SET_SHIFT) | keep_n(t.values ^ pairs, 3))
        } else {
            HandRank::HighCard(keep_n(t.values, 5))
        }
    }

    /// Rank a hand of exactly five distinct cards.
    ///
    /// Nothing is cached, every call does the work again.
    fn rank_five(&self) -> HandRank {
        let t = Tally::of(self.cards());
        let one_suit = t.suited.iter().filter(|s| **s != 0).count() == 1;

        // With five cards the number of distinct values fixes the shape.
        match t.values.count_ones() {
            5 => match (rank_straight(t.values), one_suit) {
                (None, false) => HandRank::HighCard(t.values),
                (Some(top), false) => HandRank::Straight(top),
                (None, true) => HandRank::Flush(t.values),
                (Some(top), true) => HandRank::StraightFlush(top),
            },
            4 => HandRank::OnePair((t.pairs() << SET_SHIFT) | (t.values ^ t.pairs())),
            3 if t.sets() != 0 => {
                HandRank::ThreeOfAKind((t.sets() << SET_SHIFT) | (t.values ^ t.sets()))
            }
            3 => HandRank::TwoPair((t.pairs() << SET_SHIFT) | (t.values ^ t.pairs())),
            2 if t.sets() != 0 => {
                HandRank::FullHouse((t.sets() << SET_SHIFT) | (t.values ^ t.sets()))
            }
            2 => HandRank::FourOfAKind((t.quads() << SET_SHIFT) | (t.values ^ t.quads())),
            _ => unreachable!("rank_five needs five distinct cards"),
        }
    }

    /// Find the five cards that make the best hand by trying every five card
    /// subset and keeping the highest `rank_five`.
    ///
    /// Slower than [`Rankable::rank`] but it returns the cards, which is what
    /// a results display wants. The returned rank always equals `rank()`.
    ///
    /// Returns `None` when there are fewer than five cards.
    fn best_five(&self) -> Option<(HandRank, [Card; 5])> {
        let cards: Vec<Card> = self.cards().collect();
        let n = cards.len();
        if n < 5 {
            return None;
        }

        let mut best: Option<(HandRank, [Card; 5])> = None;
        for a in 0..n {
            for b in (a + 1)..n {
                for c in (b + 1)..n {
                    for d in (c + 1)..n {
                        for e in (d + 1)..n {
                            let hand = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                            let rank = hand[..].rank_five();
                            let better = match best {
                                Some((r, _)) => rank > r,
                                None => true,
                            };
                            if better {
                                best = Some((rank, hand));
                            }
                        }
                    }
                }
            }
        }
        best
    }
}

impl Rankable for Vec<Card> {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for [Card] {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for CardBitSet {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter()
    }
}
