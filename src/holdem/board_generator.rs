//! Generators for the missing community cards.
//!
//! Both generators produce complete five card boards as a [`CardBitSet`] that
//! already includes the known part of the board. Cards are only ever drawn
//! from the live deck, so a generated board can never reuse a hole card or a
//! known board card.
use rand::prelude::*;

use crate::core::{nck, Card, CardBitSet, CardIter};

use super::scenario::Stage;

/// How boards are produced for a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardMode {
    /// Every possible completion of the board.
    Exhaustive,
    /// A fixed number of uniformly sampled completions.
    MonteCarlo,
}

impl BoardMode {
    /// Exhaustive when asked for, or when any board card is known since the
    /// number of completions is then small. Otherwise monte carlo.
    pub fn select(exact: bool, stage: Stage) -> Self {
        if exact || stage != Stage::PreFlop {
            BoardMode::Exhaustive
        } else {
            BoardMode::MonteCarlo
        }
    }
}

/// Every completion of a board, in a fixed order.
#[derive(Debug)]
pub struct ExhaustiveBoards<'a> {
    given: CardBitSet,
    iter: CardIter<'a>,
}

impl<'a> ExhaustiveBoards<'a> {
    /// All boards that add `missing` cards from `live` to `given`.
    pub fn new(given: CardBitSet, live: &'a [Card], missing: usize) -> Self {
        Self::starting_at(given, live, missing, 0)
    }

    /// Same as [`ExhaustiveBoards::new`] but skipping the first `nth` boards.
    pub fn starting_at(given: CardBitSet, live: &'a [Card], missing: usize, nth: u64) -> Self {
        Self {
            given,
            iter: CardIter::starting_at(live, missing, nth),
        }
    }

    /// Number of boards `new` would produce.
    pub fn count_boards(live_len: usize, missing: usize) -> u64 {
        nck(live_len, missing)
    }
}

impl Iterator for ExhaustiveBoards<'_> {
    type Item = CardBitSet;

    fn next(&mut self) -> Option<CardBitSet> {
        self.iter.next().map(|drawn| drawn | self.given)
    }
}

/// Uniformly sampled completions of a board.
///
/// Each call to [`RandomBoards::draw`] is an independent draw without
/// replacement from the cards it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomBoards {
    given: CardBitSet,
    missing: usize,
}

impl RandomBoards {
    pub fn new(given: CardBitSet, missing: usize) -> Self {
        Self { given, missing }
    }

    /// Number of cards each draw takes from the live cards.
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Draw one complete board.
    ///
    /// `live` is reordered in place. It must hold at least `missing` cards.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, live: &mut [Card]) -> CardBitSet {
        let (drawn, _) = live.partial_shuffle(rng, self.missing);
        let mut board = self.given;
        for c in drawn.iter() {
            board.insert(*c);
        }
        board
    }
}
