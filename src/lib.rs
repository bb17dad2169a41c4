//! `holdem_equity` computes win, tie and hand category statistics for Texas
//! Hold'em hole cards against a partial or complete board.
//!
//! The [`core`] module holds the card model (cards, bit sets, the live deck,
//! hole cards) and the hand ranking code. The [`holdem`] module holds the
//! simulation: board generation, unknown hole card expansion, the threaded
//! driver and the result accumulator.
//!
//! # Example
//!
//! ```
//! use holdem_equity::core::{Card, HoleCards};
//! use holdem_equity::holdem::{SimulationConfig, Simulation};
//!
//! let hole_cards = vec![
//!     "AsAh".parse::<HoleCards>().unwrap(),
//!     "KsKh".parse::<HoleCards>().unwrap(),
//! ];
//! let board = Card::parse_many("2c7d9h").unwrap();
//!
//! let result = Simulation::new(hole_cards, board, SimulationConfig::default())
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! // Aces are a big favorite on a dry flop.
//! assert!(result.win_fraction(0) > result.win_fraction(1));
//! ```
#![deny(clippy::all)]

/// Card model and hand ranking.
pub mod core;

/// Texas Hold'em equity simulation.
pub mod holdem;
