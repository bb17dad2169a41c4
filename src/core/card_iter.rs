use crate::core::{Card, CardBitSet};

/// Pascal's triangle for n, k <= 52.
const fn make_nck() -> [[u64; 53]; 53] {
    let mut t = [[0u64; 53]; 53];
    let mut n = 0;

    while n <= 52 {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u64; 53]; 53] = make_nck();

/// Returns the binomial coefficient for n choose k, 0 when k > n.
///
/// Only defined for n <= 52, which is all a single deck needs.
#[inline]
pub fn nck(n: usize, k: usize) -> u64 {
    if k > n || n > 52 {
        0
    } else {
        NCKS[n][k]
    }
}

/// Convert n into the indices of the n-th k-combination of `0..len` in
/// lexicographic order (the combinatorial number system).
fn nth_combination(len: usize, k: usize, mut nth: u64) -> Vec<usize> {
    let mut out = Vec::with_capacity(k);
    let mut start = 0;

    for i in 0..k {
        let mut v = start;
        loop {
            // Number of combinations that keep `v` at position `i`.
            let with_v = nck(len - v - 1, k - i - 1);
            if nth < with_v {
                break;
            }
            nth -= with_v;
            v += 1;
        }
        out.push(v);
        start = v + 1;
    }

    out
}

/// Given some cards create sets of possible groups of cards.
///
/// Combinations come out in lexicographic order of their positions in
/// `possible_cards`, so `CardIter::starting_at(cards, k, n)` yields exactly
/// the tail of `CardIter::new(cards, k)` after skipping `n` items. That is
/// how the simulation splits an enumeration between threads.
#[derive(Debug)]
pub struct CardIter<'a> {
    /// All the possible cards that can be dealt
    possible_cards: &'a [Card],

    /// Set of current offsets being used to create card sets.
    idx: Vec<usize>,

    /// size of card sets requested.
    num_cards: usize,

    /// Set once the last combination has been returned.
    done: bool,
}

/// `CardIter` is a container for cards and current state.
impl CardIter<'_> {
    /// Create a new `CardIter` from a slice of cards.
    /// `num_cards` represents how many cards should be in the resulting set.
    ///
    /// Asking for zero cards yields a single empty set. Asking for more cards
    /// than there are yields nothing.
    pub fn new(possible_cards: &[Card], num_cards: usize) -> CardIter<'_> {
        CardIter::starting_at(possible_cards, num_cards, 0)
    }

    /// Create a `CardIter` positioned at the `nth` combination.
    pub fn starting_at(possible_cards: &[Card], num_cards: usize, nth: u64) -> CardIter<'_> {
        let total = nck(possible_cards.len(), num_cards);
        let done = nth >= total;
        let idx = if done {
            Vec::new()
        } else {
            nth_combination(possible_cards.len(), num_cards, nth)
        };

        CardIter {
            possible_cards,
            idx,
            num_cards,
            done,
        }
    }

    /// Total number of combinations from the start, ignoring any offset.
    pub fn total(&self) -> u64 {
        nck(self.possible_cards.len(), self.num_cards)
    }
}

/// The actual `Iterator` for `Card`'s.
impl Iterator for CardIter<'_> {
    type Item = CardBitSet;

    fn next(&mut self) -> Option<CardBitSet> {
        if self.done {
            return None;
        }

        let mut result = CardBitSet::new();
        for i in &self.idx {
            result.insert(self.possible_cards[*i]);
        }

        // Find the right most index that can still move forward.
        let n = self.possible_cards.len();
        let k = self.num_cards;
        match (0..k).rev().find(|&i| self.idx[i] < n - k + i) {
            Some(i) => {
                self.idx[i] += 1;
                // Everything after it restarts right behind it.
                for j in (i + 1)..k {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(result)
    }
}
