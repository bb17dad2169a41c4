use std::fmt;

use crate::core::{Card, Deck, HoleCards};

use super::errors::{Result, SimulationError};

/// The street a hand is on, decided by how many board cards are known.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Stage {
    /// Map a board length to a stage. Only 0, 3, 4 and 5 are legal.
    pub fn from_board_len(len: usize) -> Result<Self> {
        match len {
            0 => Ok(Stage::PreFlop),
            3 => Ok(Stage::Flop),
            4 => Ok(Stage::Turn),
            5 => Ok(Stage::River),
            other => Err(SimulationError::InvalidBoardLength(other)),
        }
    }

    /// Number of board cards known at this stage.
    pub fn board_len(self) -> usize {
        match self {
            Stage::PreFlop => 0,
            Stage::Flop => 3,
            Stage::Turn => 4,
            Stage::River => 5,
        }
    }

    /// Number of board cards still to come.
    pub fn missing_cards(self) -> usize {
        5 - self.board_len()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::PreFlop => "Pre-flop",
            Stage::Flop => "Flop",
            Stage::Turn => "Turn",
            Stage::River => "River",
        };
        f.write_str(name)
    }
}

/// One equity question: every player's hole cards plus the known board.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub hole_cards: Vec<HoleCards>,
    pub board: Vec<Card>,
}

impl Scenario {
    pub fn new(hole_cards: Vec<HoleCards>, board: Vec<Card>) -> Self {
        Self { hole_cards, board }
    }

    /// Indices of the players whose hole cards are unknown.
    pub fn unknown_players(&self) -> Vec<usize> {
        self.hole_cards
            .iter()
            .enumerate()
            .filter(|(_, h)| h.is_unknown())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Check the scenario can be simulated and return its stage.
    ///
    /// Catches an empty player list, a bad board length, and any card used
    /// twice across hole cards and board.
    pub fn validate(&self) -> Result<Stage> {
        if self.hole_cards.is_empty() {
            return Err(SimulationError::NoPlayers);
        }
        let stage = Stage::from_board_len(self.board.len())?;
        Deck::for_scenario(&self.hole_cards, &self.board)?;
        Ok(stage)
    }

    /// The live deck for this scenario.
    pub fn deck(&self) -> Result<Deck> {
        Ok(Deck::for_scenario(&self.hole_cards, &self.board)?)
    }

    /// Parse one line of batch input.
    ///
    /// The format is the hole cards of every player, then optionally a `|`
    /// and the board: `"AsKs QdQh ? ? | 2c 7d 9h"`. Blank lines and lines
    /// starting with `#` give `Ok(None)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::holdem::Scenario;
    ///
    /// let s = Scenario::parse_line("AsKs QdQh | 2c7d9h").unwrap().unwrap();
    /// assert_eq!(2, s.hole_cards.len());
    /// assert_eq!(3, s.board.len());
    /// assert!(Scenario::parse_line("   ").unwrap().is_none());
    /// ```
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (hands, board) = match line.split_once('|') {
            Some((hands, board)) => (hands, board),
            None => (line, ""),
        };

        let hole_cards = HoleCards::parse_list(hands)?;
        let board = Card::parse_many(board)?;
        Ok(Some(Self::new(hole_cards, board)))
    }
}
