/// Errors that stop a simulation.
mod errors;
/// Export `SimulationError` and the result alias.
pub use self::errors::{Result, SimulationError};

/// Settings for a simulation run.
mod config;
/// Export `SimulationConfig` and its defaults.
pub use self::config::{SimulationConfig, DEFAULT_BATCH_SIZE, DEFAULT_NUM_TRIALS};

/// Hole cards plus board, the stage they imply, and the batch line format.
mod scenario;
/// Export `Scenario` and `Stage`
pub use self::scenario::{Scenario, Stage};

/// Exhaustive and random completion of the board.
mod board_generator;
/// Export the board generators.
pub use self::board_generator::{BoardMode, ExhaustiveBoards, RandomBoards};

/// Filling in hole cards for unknown players.
mod hole_card_expander;
/// Export `HoleCardExpander`
pub use self::hole_card_expander::HoleCardExpander;

/// Win, tie and hand category counts.
mod accumulator;
/// Export the accumulator and the finished result.
pub use self::accumulator::{PlayerTally, SimulationAccumulator, SimulationResult};

/// The threaded driver that ties everything together.
mod simulation;
/// Export `Simulation` and the one call entry points.
pub use self::simulation::{
    calculate, run_simulation, CancelToken, Simulation, SimulationOutcome,
};

/// Rule of thumb advice before the flop.
mod preflop_advice;
/// Export the advice function and its types.
pub use self::preflop_advice::{preflop_advice, PreflopAction, PreflopReason};
