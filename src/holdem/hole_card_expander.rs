use rand::prelude::*;

use crate::core::{nck, Card, CardBitSet, CardIter};

/// Fills in hole cards for the players whose cards are unknown.
///
/// Every assignment gives each unknown player two live cards, and no card is
/// handed to two players. Exhaustive runs walk every assignment by index.
/// The first unknown player picks from the whole live deck, the next one from
/// what is left, and so on, so the index is a mixed radix number with one
/// digit per unknown player.
#[derive(Debug, Clone)]
pub struct HoleCardExpander<'a> {
    live: &'a [Card],
    players: Vec<usize>,
}

impl<'a> HoleCardExpander<'a> {
    /// `players` are the seat indices of the unknown players.
    pub fn new(live: &'a [Card], players: Vec<usize>) -> Self {
        Self { live, players }
    }

    /// Seat indices this expander fills in.
    pub fn players(&self) -> &[usize] {
        &self.players
    }

    /// Cards taken from the live deck by each assignment.
    pub fn cards_needed(&self) -> usize {
        self.players.len() * 2
    }

    /// Number of distinct assignments. One when nobody is unknown, `None`
    /// if the count does not fit in a u64.
    pub fn num_assignments(&self) -> Option<u64> {
        self.radices()
            .into_iter()
            .try_fold(1u64, |acc, radix| acc.checked_mul(radix))
    }

    /// Choices for each unknown player, in seat order.
    fn radices(&self) -> Vec<u64> {
        (0..self.players.len())
            .map(|i| nck(self.live.len().saturating_sub(2 * i), 2))
            .collect()
    }

    /// Write the `nth` assignment into `hands` and return the live cards it
    /// leaves over, in deck order.
    pub fn assignment(&self, mut nth: u64, hands: &mut [CardBitSet]) -> Vec<Card> {
        let mut remaining = self.live.to_vec();

        // The least significant digit is the last player.
        let radices = self.radices();
        let mut digits = vec![0; self.players.len()];
        for (digit, radix) in digits.iter_mut().zip(&radices).rev() {
            *digit = nth % radix;
            nth /= radix;
        }

        for (&player, digit) in self.players.iter().zip(digits) {
            let pair = CardIter::starting_at(&remaining, 2, digit)
                .next()
                .unwrap_or_else(CardBitSet::new);
            remaining.retain(|c| !pair.contains(*c));
            hands[player] = pair;
        }

        remaining
    }

    /// Deal random hole cards into `hands`.
    ///
    /// `live` is reordered in place and the returned slice is the part of it
    /// that was not dealt, ready for drawing the board.
    pub fn sample<'d, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        live: &'d mut [Card],
        hands: &mut [CardBitSet],
    ) -> &'d mut [Card] {
        let (dealt, rest) = live.partial_shuffle(rng, self.cards_needed());
        for (&player, pair) in self.players.iter().zip(dealt.chunks_exact(2)) {
            hands[player] = pair.iter().copied().collect();
        }
        rest
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;

    use super::*;
    use crate::core::{Deck, HoleCards};

    fn live_for(hands: &str) -> (Vec<CardBitSet>, Vec<Card>) {
        let hands = HoleCards::parse_list(hands).unwrap();
        let deck = Deck::for_scenario(&hands, &[]).unwrap();
        (hands.iter().map(|h| h.bit_set()).collect(), deck.to_vec())
    }

    #[test]
    fn test_no_unknown_players() {
        let (mut hands, live) = live_for("AsAh KsKh");
        let expander = HoleCardExpander::new(&live, vec![]);
        assert_eq!(Some(1), expander.num_assignments());
        assert_eq!(0, expander.cards_needed());

        let before = hands.clone();
        let rest = expander.assignment(0, &mut hands);
        assert_eq!(live, rest);
        assert_eq!(before, hands);
    }

    #[test]
    fn test_single_unknown_covers_every_pair() {
        let (mut hands, live) = live_for("AsAh ??");
        let expander = HoleCardExpander::new(&live, vec![1]);
        assert_eq!(Some(1225), expander.num_assignments());

        let mut seen = HashSet::new();
        for nth in 0..1225 {
            let rest = expander.assignment(nth, &mut hands);
            let pair = hands[1];
            assert_eq!(2, pair.count());
            assert!((pair & hands[0]).is_empty());
            assert_eq!(48, rest.len());
            assert!(rest.iter().all(|c| !pair.contains(*c)));
            assert!(seen.insert(pair));
        }
        assert_eq!(1225, seen.len());
    }

    #[test]
    fn test_two_unknown_players_are_disjoint() {
        let (mut hands, live) = live_for("AsAh ?? ??");
        let expander = HoleCardExpander::new(&live, vec![1, 2]);
        assert_eq!(Some(1225 * 1128), expander.num_assignments());

        let mut seen = HashSet::new();
        // Walk a spread of indices rather than all 1.3 million.
        for nth in (0..1225 * 1128).step_by(997) {
            let rest = expander.assignment(nth, &mut hands);
            assert_eq!(2, hands[1].count());
            assert_eq!(2, hands[2].count());
            assert!((hands[1] & hands[2]).is_empty());
            assert_eq!(46, rest.len());
            assert!(seen.insert((hands[1], hands[2])));
        }
    }

    #[test]
    fn test_sample_deals_from_live_cards() {
        let (mut hands, live) = live_for("AsAh ?? ??");
        let expander = HoleCardExpander::new(&live, vec![1, 2]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut deck = live.clone();
        for _ in 0..500 {
            let rest_len = expander.sample(&mut rng, &mut deck, &mut hands).len();
            assert_eq!(46, rest_len);
            assert_eq!(2, hands[1].count());
            assert_eq!(2, hands[2].count());
            assert!((hands[1] & hands[2]).is_empty());
            assert!((hands[0] & (hands[1] | hands[2])).is_empty());
        }
        // Known hands are never touched.
        assert_eq!(2, hands[0].count());
    }
}
