use std::num::NonZeroUsize;
use std::thread;

use super::errors::{Result, SimulationError};

/// Default number of monte carlo trials.
pub const DEFAULT_NUM_TRIALS: usize = 100_000;

/// How many iterations a worker runs between cancellation checks.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Configuration for running a simulation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of boards to sample in monte carlo mode. Ignored when the
    /// simulation is exhaustive.
    pub num_trials: usize,
    /// Enumerate every board even when no board cards are known.
    pub exact: bool,
    /// Number of worker threads.
    pub num_threads: usize,
    /// Seed for monte carlo sampling. Each worker derives its own stream
    /// from it. `None` seeds from the thread rng.
    pub seed: Option<u64>,
    /// Allow more than one player with unknown hole cards.
    ///
    /// Exhaustive runs then enumerate the full cross product of hole cards,
    /// which grows by roughly a thousand times per extra unknown player.
    pub allow_multiple_unknown: bool,
    /// Iterations between checks of the cancel token.
    pub batch_size: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_trials: DEFAULT_NUM_TRIALS,
            exact: false,
            num_threads: thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            seed: None,
            allow_multiple_unknown: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = num_trials;
        self
    }

    pub fn with_exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_allow_multiple_unknown(mut self, allow: bool) -> Self {
        self.allow_multiple_unknown = allow;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Validate the settings that don't depend on the scenario.
    ///
    /// The trial count is only checked when `monte_carlo` is true since it's
    /// ignored by exhaustive runs.
    pub fn validate(&self, monte_carlo: bool) -> Result<()> {
        if self.num_threads == 0 {
            return Err(SimulationError::InvalidThreadCount);
        }

        if monte_carlo && self.num_trials == 0 {
            return Err(SimulationError::InvalidTrialCount);
        }

        Ok(())
    }

    /// Batch size with a floor of one so loops always make progress.
    pub(crate) fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}
