use std::cmp::Ordering;

use crate::core::{HandCategory, HandRank};

use super::board_generator::BoardMode;
use super::errors::{Result, SimulationError};
use super::scenario::Stage;

/// Counts for one player.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerTally {
    /// Iterations this player won alone.
    pub wins: u64,
    /// Iterations this player shared the best hand with someone else.
    pub ties: u64,
    /// How often each category was this player's best hand, indexed by
    /// [`HandCategory::index`].
    pub histogram: [u64; HandCategory::COUNT],
}

impl PlayerTally {
    /// Number of iterations where `category` was this player's best hand.
    pub fn category_count(&self, category: HandCategory) -> u64 {
        self.histogram[category.index()]
    }
}

/// Running win, tie and hand category counts for every player.
///
/// Each worker owns one of these and they are merged at the end of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationAccumulator {
    players: Vec<PlayerTally>,
    total_iterations: u64,
    tied_iterations: u64,
}

impl SimulationAccumulator {
    pub fn new(num_players: usize) -> Self {
        Self {
            players: vec![PlayerTally::default(); num_players],
            total_iterations: 0,
            tied_iterations: 0,
        }
    }

    /// Record one iteration given every player's best hand, in seat order.
    ///
    /// The highest rank wins. When more than one player holds it every one of
    /// them gets a tie and nobody gets a win.
    pub fn record(&mut self, ranks: &[HandRank]) {
        debug_assert_eq!(ranks.len(), self.players.len());

        // Fold to the best rank and how many players hold it.
        let Some((best, num_best)) = ranks.iter().fold(None, |acc, &rank| match acc {
            None => Some((rank, 1)),
            Some((best, n)) => match rank.cmp(&best) {
                Ordering::Greater => Some((rank, 1)),
                Ordering::Equal => Some((best, n + 1)),
                Ordering::Less => Some((best, n)),
            },
        }) else {
            return;
        };

        let is_tie = num_best > 1;
        self.total_iterations += 1;
        if is_tie {
            self.tied_iterations += 1;
        }

        for (tally, rank) in self.players.iter_mut().zip(ranks) {
            tally.histogram[rank.category().index()] += 1;
            if *rank == best {
                if is_tie {
                    tally.ties += 1;
                } else {
                    tally.wins += 1;
                }
            }
        }
    }

    /// Add another accumulator's counts into this one.
    pub fn merge(&mut self, other: &SimulationAccumulator) {
        debug_assert_eq!(self.players.len(), other.players.len());
        self.total_iterations += other.total_iterations;
        self.tied_iterations += other.tied_iterations;
        for (mine, theirs) in self.players.iter_mut().zip(&other.players) {
            mine.wins += theirs.wins;
            mine.ties += theirs.ties;
            for (a, b) in mine.histogram.iter_mut().zip(theirs.histogram) {
                *a += b;
            }
        }
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[PlayerTally] {
        &self.players
    }

    pub fn total_iterations(&self) -> u64 {
        self.total_iterations
    }

    /// Iterations where two or more players shared the best hand.
    pub fn tied_iterations(&self) -> u64 {
        self.tied_iterations
    }
}

/// The finished counts of a run and how it was produced.
///
/// Every fraction is over the total number of iterations, which is never
/// zero.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    stage: Stage,
    mode: BoardMode,
    counts: SimulationAccumulator,
}

impl SimulationResult {
    /// Wrap the counts of a finished run. Fails if nothing was recorded.
    pub fn new(stage: Stage, mode: BoardMode, counts: SimulationAccumulator) -> Result<Self> {
        if counts.total_iterations() == 0 {
            return Err(SimulationError::NoIterations);
        }
        Ok(Self {
            stage,
            mode,
            counts,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    /// The raw counts behind the fractions.
    pub fn counts(&self) -> &SimulationAccumulator {
        &self.counts
    }

    pub fn num_players(&self) -> usize {
        self.counts.num_players()
    }

    pub fn total_iterations(&self) -> u64 {
        self.counts.total_iterations()
    }

    fn fraction(&self, n: u64) -> f64 {
        n as f64 / self.counts.total_iterations() as f64
    }

    /// Fraction of iterations `player` won alone.
    ///
    /// # Panics
    ///
    /// If `player` is not a seat in this run.
    pub fn win_fraction(&self, player: usize) -> f64 {
        self.fraction(self.counts.players[player].wins)
    }

    /// Fraction of iterations `player` tied for the best hand.
    ///
    /// # Panics
    ///
    /// If `player` is not a seat in this run.
    pub fn tie_fraction(&self, player: usize) -> f64 {
        self.fraction(self.counts.players[player].ties)
    }

    /// Win fraction of every player in seat order.
    pub fn win_fractions(&self) -> Vec<f64> {
        self.counts
            .players
            .iter()
            .map(|t| self.fraction(t.wins))
            .collect()
    }

    /// Tie fraction of every player in seat order.
    pub fn tie_fractions(&self) -> Vec<f64> {
        self.counts
            .players
            .iter()
            .map(|t| self.fraction(t.ties))
            .collect()
    }

    /// Fraction of iterations that ended with a shared pot.
    pub fn tied_fraction(&self) -> f64 {
        self.fraction(self.counts.tied_iterations())
    }

    /// The tied fraction followed by every player's win fraction.
    ///
    /// These always sum to one.
    pub fn winning_percentages(&self) -> Vec<f64> {
        std::iter::once(self.tied_fraction())
            .chain(self.win_fractions())
            .collect()
    }

    /// How often each hand category was `player`'s best hand, indexed by
    /// [`HandCategory::index`].
    ///
    /// # Panics
    ///
    /// If `player` is not a seat in this run.
    pub fn histogram_fractions(&self, player: usize) -> [f64; HandCategory::COUNT] {
        self.counts.players[player]
            .histogram
            .map(|count| self.fraction(count))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_record_single_winner() {
        let mut acc = SimulationAccumulator::new(3);
        acc.record(&[
            HandRank::OnePair(10),
            HandRank::Flush(3),
            HandRank::HighCard(99),
        ]);

        assert_eq!(1, acc.total_iterations());
        assert_eq!(0, acc.tied_iterations());
        assert_eq!(0, acc.players()[0].wins);
        assert_eq!(1, acc.players()[1].wins);
        assert_eq!(0, acc.players()[2].wins);
        assert!(acc.players().iter().all(|p| p.ties == 0));
        assert_eq!(1, acc.players()[1].category_count(HandCategory::Flush));
        assert_eq!(1, acc.players()[2].category_count(HandCategory::HighCard));
    }

    #[test]
    fn test_record_tie_credits_only_tied_players() {
        let mut acc = SimulationAccumulator::new(3);
        acc.record(&[
            HandRank::Straight(5),
            HandRank::TwoPair(100),
            HandRank::Straight(5),
        ]);

        assert_eq!(1, acc.tied_iterations());
        assert_eq!([1, 0, 1], [0, 1, 2].map(|i| acc.players()[i].ties));
        assert!(acc.players().iter().all(|p| p.wins == 0));
    }

    #[test]
    fn test_same_category_different_key_is_not_a_tie() {
        let mut acc = SimulationAccumulator::new(2);
        acc.record(&[HandRank::OnePair(1 << 14), HandRank::OnePair(1 << 13)]);
        assert_eq!(1, acc.players()[0].wins);
        assert_eq!(0, acc.tied_iterations());
    }

    #[test]
    fn test_winner_sets_add_up() {
        let mut acc = SimulationAccumulator::new(2);
        acc.record(&[HandRank::HighCard(5), HandRank::HighCard(4)]);
        acc.record(&[HandRank::HighCard(4), HandRank::HighCard(5)]);
        acc.record(&[HandRank::HighCard(5), HandRank::HighCard(5)]);
        acc.record(&[HandRank::FullHouse(1), HandRank::HighCard(5)]);

        let wins: u64 = acc.players().iter().map(|p| p.wins).sum();
        assert_eq!(acc.total_iterations(), wins + acc.tied_iterations());
        for p in acc.players() {
            assert_eq!(acc.total_iterations(), p.histogram.iter().sum::<u64>());
        }
    }

    #[test]
    fn test_merge() {
        let mut a = SimulationAccumulator::new(2);
        a.record(&[HandRank::HighCard(5), HandRank::HighCard(4)]);
        let mut b = SimulationAccumulator::new(2);
        b.record(&[HandRank::HighCard(5), HandRank::HighCard(5)]);
        b.record(&[HandRank::OnePair(5), HandRank::HighCard(5)]);

        a.merge(&b);
        assert_eq!(3, a.total_iterations());
        assert_eq!(1, a.tied_iterations());
        assert_eq!(2, a.players()[0].wins);
        assert_eq!(1, a.players()[0].ties);
        assert_eq!(1, a.players()[1].ties);
        assert_eq!(1, a.players()[0].category_count(HandCategory::OnePair));
    }

    #[test]
    fn test_result_needs_iterations() {
        let acc = SimulationAccumulator::new(2);
        assert_eq!(
            Err(SimulationError::NoIterations),
            SimulationResult::new(Stage::PreFlop, BoardMode::MonteCarlo, acc)
        );
    }

    #[test]
    fn test_result_fractions() {
        let mut acc = SimulationAccumulator::new(2);
        acc.record(&[HandRank::OnePair(5), HandRank::HighCard(4)]);
        acc.record(&[HandRank::HighCard(4), HandRank::HighCard(5)]);
        acc.record(&[HandRank::HighCard(5), HandRank::HighCard(5)]);
        acc.record(&[HandRank::OnePair(9), HandRank::HighCard(5)]);

        let result = SimulationResult::new(Stage::River, BoardMode::Exhaustive, acc).unwrap();
        assert_relative_eq!(0.5, result.win_fraction(0));
        assert_relative_eq!(0.25, result.win_fraction(1));
        assert_relative_eq!(0.25, result.tie_fraction(1));
        assert_relative_eq!(0.25, result.tied_fraction());

        let percentages = result.winning_percentages();
        assert_eq!(3, percentages.len());
        assert_relative_eq!(1.0, percentages.iter().sum::<f64>());

        let hist = result.histogram_fractions(0);
        assert_relative_eq!(0.5, hist[HandCategory::OnePair.index()]);
        assert_relative_eq!(0.5, hist[HandCategory::HighCard.index()]);
        assert_relative_eq!(1.0, hist.iter().sum::<f64>());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_result_to_json() {
        let mut acc = SimulationAccumulator::new(2);
        acc.record(&[HandRank::Flush(31), HandRank::Straight(4)]);
        let result = SimulationResult::new(Stage::Turn, BoardMode::Exhaustive, acc).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"Turn\""));
        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
