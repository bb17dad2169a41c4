use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::{event, instrument};

use crate::core::{nck, Card, CardBitSet, Deck, HandRank, HoleCards, Rankable};

use super::accumulator::{SimulationAccumulator, SimulationResult};
use super::board_generator::{BoardMode, ExhaustiveBoards, RandomBoards};
use super::config::SimulationConfig;
use super::errors::{Result, SimulationError};
use super::hole_card_expander::HoleCardExpander;
use super::scenario::{Scenario, Stage};

/// A flag shared between a running simulation and whoever wants to stop it.
///
/// Workers look at it every `batch_size` iterations. Once set, the run
/// returns [`SimulationError::Cancelled`] and all partial counts are
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A validated equity simulation ready to run.
///
/// Everything that can be wrong with the input is checked in
/// [`Simulation::new`], so running can only fail by being cancelled.
///
/// # Examples
///
/// ```
/// use holdem_equity::core::{Card, HoleCards};
/// use holdem_equity::holdem::{Simulation, SimulationConfig};
///
/// let hands = HoleCards::parse_list("AsKs QdQh").unwrap();
/// let board = Card::parse_many("2c7d9hTs").unwrap();
/// let sim = Simulation::new(hands, board, SimulationConfig::default()).unwrap();
///
/// // One card to come from the 44 left in the deck.
/// assert_eq!(44, sim.num_iterations());
/// let result = sim.run().unwrap();
/// assert_eq!(44, result.total_iterations());
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    hole_cards: Vec<HoleCards>,
    board: Vec<Card>,
    config: SimulationConfig,
    stage: Stage,
    mode: BoardMode,
    live: Vec<Card>,
    unknown: Vec<usize>,
    num_iterations: u64,
}

impl Simulation {
    /// Validate a scenario and set up a simulation for it.
    pub fn new(
        hole_cards: Vec<HoleCards>,
        board: Vec<Card>,
        config: SimulationConfig,
    ) -> Result<Self> {
        let scenario = Scenario::new(hole_cards, board);
        let stage = scenario.validate()?;
        let deck = scenario.deck()?;
        Self::build(scenario, stage, deck, config)
    }

    /// Like [`Simulation::new`] but drawing from a caller supplied deck.
    ///
    /// The deck may be missing extra cards but must not hold any card that
    /// is already in a known hand or on the board.
    pub fn with_deck(
        hole_cards: Vec<HoleCards>,
        board: Vec<Card>,
        deck: &Deck,
        config: SimulationConfig,
    ) -> Result<Self> {
        let scenario = Scenario::new(hole_cards, board);
        let stage = scenario.validate()?;
        // Seat order first, then the board.
        let in_play = scenario
            .hole_cards
            .iter()
            .filter_map(HoleCards::cards)
            .flatten()
            .chain(scenario.board.iter().copied())
            .find(|c| deck.contains(*c));
        if let Some(card) = in_play {
            return Err(SimulationError::DeckMismatch(card));
        }
        Self::build(scenario, stage, *deck, config)
    }

    fn build(scenario: Scenario, stage: Stage, deck: Deck, config: SimulationConfig) -> Result<Self> {
        let mode = BoardMode::select(config.exact, stage);
        config.validate(mode == BoardMode::MonteCarlo)?;

        let unknown = scenario.unknown_players();
        if unknown.len() > 1 && !config.allow_multiple_unknown {
            return Err(SimulationError::UnsupportedMultiUnknown(unknown.len()));
        }

        let needed = unknown.len() * 2 + stage.missing_cards();
        if needed > deck.len() {
            return Err(SimulationError::NotEnoughCards {
                needed,
                available: deck.len(),
            });
        }

        let live = deck.to_vec();
        let num_iterations = match mode {
            BoardMode::Exhaustive => {
                let boards = nck(live.len() - unknown.len() * 2, stage.missing_cards());
                HoleCardExpander::new(&live, unknown.clone())
                    .num_assignments()
                    .and_then(|a| a.checked_mul(boards))
                    .ok_or(SimulationError::TooManyIterations)?
            }
            BoardMode::MonteCarlo => config.num_trials as u64,
        };

        let Scenario { hole_cards, board } = scenario;
        Ok(Self {
            hole_cards,
            board,
            config,
            stage,
            mode,
            live,
            unknown,
            num_iterations,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of iterations a full run records.
    pub fn num_iterations(&self) -> u64 {
        self.num_iterations
    }

    /// Run to completion.
    pub fn run(&self) -> Result<SimulationResult> {
        self.run_with_cancel(&CancelToken::new())
    }

    /// Run until done or until `cancel` is set.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            players = self.hole_cards.len(),
            stage = %self.stage,
            mode = ?self.mode,
            iterations = self.num_iterations,
        )
    )]
    pub fn run_with_cancel(&self, cancel: &CancelToken) -> Result<SimulationResult> {
        if cancel.is_cancelled() {
            return Err(SimulationError::Cancelled);
        }

        let num_tasks = self.config.num_threads;
        event!(
            tracing::Level::DEBUG,
            num_tasks,
            unknown = self.unknown.len(),
            live_cards = self.live.len(),
            "Starting simulation"
        );

        let partials: Vec<Option<SimulationAccumulator>> = thread::scope(|s| {
            let handles: Vec<_> = (0..num_tasks)
                .map(|task_id| {
                    let (start, end) = split_range(self.num_iterations, num_tasks, task_id);
                    s.spawn(move || match self.mode {
                        BoardMode::Exhaustive => self.run_exhaustive(task_id, start, end, cancel),
                        BoardMode::MonteCarlo => self.run_monte_carlo(task_id, end - start, cancel),
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(partial) => partial,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let mut counts = SimulationAccumulator::new(self.hole_cards.len());
        for partial in partials {
            match partial {
                Some(acc) => counts.merge(&acc),
                None => return Err(SimulationError::Cancelled),
            }
        }

        event!(
            tracing::Level::DEBUG,
            total = counts.total_iterations(),
            tied = counts.tied_iterations(),
            "Simulation finished"
        );
        SimulationResult::new(self.stage, self.mode, counts)
    }

    fn initial_hands(&self) -> Vec<CardBitSet> {
        self.hole_cards.iter().map(HoleCards::bit_set).collect()
    }

    fn given_board(&self) -> CardBitSet {
        self.board.iter().copied().collect()
    }

    /// Walk iterations `start..end` of the flattened
    /// (hole card assignment, board) space.
    fn run_exhaustive(
        &self,
        task_id: usize,
        start: u64,
        end: u64,
        cancel: &CancelToken,
    ) -> Option<SimulationAccumulator> {
        let missing = self.stage.missing_cards();
        let expander = HoleCardExpander::new(&self.live, self.unknown.clone());
        let boards_per_assignment = nck(
            self.live.len() - expander.cards_needed(),
            missing,
        );
        let given = self.given_board();

        let mut hands = self.initial_hands();
        let mut ranks = vec![HandRank::HighCard(0); hands.len()];
        let mut acc = SimulationAccumulator::new(hands.len());
        let mut batch = Batch::new(self.config.effective_batch_size(), cancel);

        let mut idx = start;
        while idx < end {
            let offset = idx % boards_per_assignment;
            let rest = expander.assignment(idx / boards_per_assignment, &mut hands);
            let take = (boards_per_assignment - offset).min(end - idx);

            for board in ExhaustiveBoards::starting_at(given, &rest, missing, offset)
                .take(usize::try_from(take).unwrap_or(usize::MAX))
            {
                rank_all(&hands, board, &mut ranks);
                acc.record(&ranks);
                if batch.tick() {
                    return None;
                }
            }
            idx += take;
        }

        event!(
            tracing::Level::TRACE,
            task_id,
            iterations = acc.total_iterations(),
            "Exhaustive worker done"
        );
        Some(acc)
    }

    fn run_monte_carlo(
        &self,
        task_id: usize,
        trials: u64,
        cancel: &CancelToken,
    ) -> Option<SimulationAccumulator> {
        let expander = HoleCardExpander::new(&self.live, self.unknown.clone());
        let boards = RandomBoards::new(self.given_board(), self.stage.missing_cards());
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(task_id as u64)),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut deck = self.live.clone();
        let mut hands = self.initial_hands();
        let mut ranks = vec![HandRank::HighCard(0); hands.len()];
        let mut acc = SimulationAccumulator::new(hands.len());
        let mut batch = Batch::new(self.config.effective_batch_size(), cancel);

        for _ in 0..trials {
            let rest = expander.sample(&mut rng, &mut deck, &mut hands);
            let board = boards.draw(&mut rng, rest);
            rank_all(&hands, board, &mut ranks);
            acc.record(&ranks);
            if batch.tick() {
                return None;
            }
        }

        event!(
            tracing::Level::TRACE,
            task_id,
            iterations = acc.total_iterations(),
            "Monte carlo worker done"
        );
        Some(acc)
    }
}

/// Counts iterations and polls the cancel token once per batch.
struct Batch<'a> {
    size: usize,
    count: usize,
    cancel: &'a CancelToken,
}

impl<'a> Batch<'a> {
    fn new(size: usize, cancel: &'a CancelToken) -> Self {
        Self {
            size,
            count: 0,
            cancel,
        }
    }

    /// Returns true when the run should stop.
    #[inline]
    fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count < self.size {
            return false;
        }
        self.count = 0;
        self.cancel.is_cancelled()
    }
}

#[inline]
fn rank_all(hands: &[CardBitSet], board: CardBitSet, ranks: &mut [HandRank]) {
    for (rank, hand) in ranks.iter_mut().zip(hands) {
        *rank = (*hand | board).rank();
    }
}

/// The `task_id`'th of `num_tasks` nearly equal slices of `0..total`.
fn split_range(total: u64, num_tasks: usize, task_id: usize) -> (u64, u64) {
    let num_tasks = num_tasks as u64;
    let task_id = task_id as u64;
    let base = total / num_tasks;
    let extra = total % num_tasks;
    // The first `extra` tasks take one more.
    let start = task_id * base + task_id.min(extra);
    let len = base + u64::from(task_id < extra);
    (start, start + len)
}

/// What [`run_simulation`] hands back.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Win fraction of every player, in seat order.
    pub win_fractions: Vec<f64>,
    /// The full counts, only filled in when asked for.
    pub details: Option<SimulationResult>,
}

/// Run a simulation drawing from `deck`.
///
/// An absent or empty `given_board` means pre-flop. Boards are enumerated
/// when `exact_mode` is set or when any board card is known, otherwise
/// `num_trials` boards are sampled. With `verbose` the outcome also carries
/// the full counts.
pub fn run_simulation(
    hole_cards: &[HoleCards],
    num_trials: usize,
    exact_mode: bool,
    given_board: Option<&[Card]>,
    deck: &Deck,
    verbose: bool,
) -> Result<SimulationOutcome> {
    let config = SimulationConfig::default()
        .with_num_trials(num_trials)
        .with_exact(exact_mode);
    let board = given_board.map(<[Card]>::to_vec).unwrap_or_default();
    let result = Simulation::with_deck(hole_cards.to_vec(), board, deck, config)?.run()?;

    Ok(SimulationOutcome {
        win_fractions: result.win_fractions(),
        details: verbose.then_some(result),
    })
}

/// Parse text input and run a simulation on it.
///
/// `hole_cards` is every player's cards, `"AsKs QdQh"` or `"AsKs ? ?"`.
/// `board` is `None` or the known board such as `"2c7d9h"`.
///
/// # Examples
///
/// ```
/// use holdem_equity::holdem::calculate;
///
/// let outcome = calculate(Some("AdKdQdJd3c"), true, 0, "Td2s 9c9h", false).unwrap();
/// // A royal flush on the river.
/// assert_eq!(vec![1.0, 0.0], outcome.win_fractions);
/// ```
pub fn calculate(
    board: Option<&str>,
    exact: bool,
    num_trials: usize,
    hole_cards: &str,
    verbose: bool,
) -> Result<SimulationOutcome> {
    let hole_cards = HoleCards::parse_list(hole_cards)?;
    let board = match board {
        Some(text) => Card::parse_many(text)?,
        None => Vec::new(),
    };
    Stage::from_board_len(board.len())?;
    let deck = Deck::for_scenario(&hole_cards, &board)?;
    run_simulation(&hole_cards, num_trials, exact, Some(&board), &deck, verbose)
}
