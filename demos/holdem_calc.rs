//! Command line equity calculator.
//!
//! ```text
//! cargo run --release --example holdem_calc -- AsKs QdQh -b 2c 7d 9h
//! cargo run --release --example holdem_calc -- AsKs ? ? -n 200000
//! cargo run --release --example holdem_calc -- --input hands.txt
//! ```
//!
//! Input files hold one scenario per line in the form
//! `AsKs QdQh | 2c 7d 9h`. Blank lines and `#` comments are skipped.
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use holdem_equity::core::{Card, HandCategory, HoleCards};
use holdem_equity::holdem::{
    preflop_advice, PreflopAction, Scenario, Simulation, SimulationConfig, SimulationResult,
    Stage, DEFAULT_NUM_TRIALS,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// CLI arguments for controlling tracing output.
#[derive(clap::Args, Debug, Clone)]
struct TracingArgs {
    /// Increase logging verbosity (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbosity: u8,

    /// Suppress all output except warnings and errors
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,

    /// Log output format
    #[arg(long = "log-format", default_value = "compact", global = true)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum LogFormat {
    /// Compact single-line format (default)
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
}

impl TracingArgs {
    /// `RUST_LOG` wins when set, otherwise the flags pick the level.
    fn init_tracing(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            let level = if self.quiet {
                "warn"
            } else {
                match self.verbosity {
                    0 => "info",
                    1 => "debug",
                    _ => "trace",
                }
            };
            EnvFilter::new(format!("{level},holdem_equity={level}"))
        };

        match self.log_format {
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Texas Hold'em win and tie odds")]
struct Args {
    /// Hole cards for every player, `?` for unknown: AsKs QdQh or AsKs ? ?
    hole_cards: Vec<String>,

    /// Known board cards
    #[arg(short = 'b', long = "board", num_args = 1..)]
    board: Vec<String>,

    /// Number of monte carlo trials
    #[arg(short = 'n', long = "num", default_value_t = DEFAULT_NUM_TRIALS)]
    num_trials: usize,

    /// Enumerate every board instead of sampling
    #[arg(long)]
    exact: bool,

    /// Read scenarios from a file, one per line
    #[arg(long)]
    input: Option<PathBuf>,

    /// Worker threads, defaults to the number of cores
    #[arg(long)]
    threads: Option<usize>,

    /// Seed for repeatable monte carlo runs
    #[arg(long)]
    seed: Option<u64>,

    /// Allow more than one player with unknown hole cards
    #[arg(long)]
    allow_multiple_unknown: bool,

    #[command(flatten)]
    tracing: TracingArgs,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::new()
            .with_num_trials(self.num_trials)
            .with_exact(self.exact)
            .with_allow_multiple_unknown(self.allow_multiple_unknown);
        if let Some(threads) = self.threads {
            config = config.with_num_threads(threads);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    fn scenarios(&self) -> Result<Vec<Scenario>, String> {
        match &self.input {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| format!("Unable to read {}: {e}", path.display()))?;
                text.lines()
                    .enumerate()
                    .filter_map(|(n, line)| {
                        Scenario::parse_line(line)
                            .map_err(|e| format!("Line {}: {e}", n + 1))
                            .transpose()
                    })
                    .collect()
            }
            None => {
                let hole_cards =
                    HoleCards::parse_list(&self.hole_cards.join(" ")).map_err(|e| e.to_string())?;
                let board = Card::parse_many(&self.board.join(" ")).map_err(|e| e.to_string())?;
                Ok(vec![Scenario::new(hole_cards, board)])
            }
        }
    }
}

fn print_advice(scenario: &Scenario) {
    let Some(reason) = scenario.hole_cards.first().and_then(preflop_advice) else {
        return;
    };
    println!("Suggested action: {} ({reason})", reason.action());
    if reason.action() == PreflopAction::CallOrRaise {
        println!("Consider raising 3 or 4 big blinds.");
    }
}

fn print_result(scenario: &Scenario, result: &SimulationResult) {
    println!(
        "Iterations: {} ({:?})",
        result.total_iterations(),
        result.mode()
    );
    println!("Ties: {:.2}%", result.tied_fraction() * 100.0);

    for (idx, hole_cards) in scenario.hole_cards.iter().enumerate() {
        println!(
            "Player {} {hole_cards}: Win {:.2}%  Tie {:.2}%",
            idx + 1,
            result.win_fraction(idx) * 100.0,
            result.tie_fraction(idx) * 100.0,
        );
        let histogram = result.histogram_fractions(idx);
        for category in HandCategory::ALL.iter().rev() {
            let fraction = histogram[category.index()];
            if fraction > 0.0 {
                println!("    {category:<16} {:>6.2}%", fraction * 100.0);
            }
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.tracing.init_tracing();

    let scenarios = match args.scenarios() {
        Ok(scenarios) => scenarios,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let mut failed = false;
    for scenario in &scenarios {
        match Stage::from_board_len(scenario.board.len()) {
            Ok(stage) => println!("Game stage: {stage}"),
            Err(e) => {
                eprintln!("{e}");
                failed = true;
                continue;
            }
        }
        if scenario.board.is_empty() {
            print_advice(scenario);
        }

        let run = Simulation::new(
            scenario.hole_cards.clone(),
            scenario.board.clone(),
            args.config(),
        )
        .and_then(|sim| sim.run());
        match run {
            Ok(result) => print_result(scenario, &result),
            Err(e) => {
                eprintln!("{e}");
                failed = true;
            }
        }
        println!("-----------------------------------");
    }
    println!("Time elapsed: {:.3}s", start.elapsed().as_secs_f64());

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
