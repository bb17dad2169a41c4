use std::thread;
use std::time::Duration;

use approx::assert_relative_eq;
use holdem_equity::core::{Card, HandCategory, HoleCards};
use holdem_equity::holdem::{
    calculate, BoardMode, CancelToken, Scenario, Simulation, SimulationConfig, SimulationError,
    SimulationResult, Stage,
};

fn run(hands: &str, board: &str, config: SimulationConfig) -> SimulationResult {
    Simulation::new(
        HoleCards::parse_list(hands).unwrap(),
        Card::parse_many(board).unwrap(),
        config,
    )
    .unwrap()
    .run()
    .unwrap()
}

fn assert_consistent(result: &SimulationResult) {
    let counts = result.counts();
    let wins: u64 = counts.players().iter().map(|p| p.wins).sum();
    assert_eq!(counts.total_iterations(), wins + counts.tied_iterations());

    let ties: u64 = counts.players().iter().map(|p| p.ties).sum();
    assert!(ties >= 2 * counts.tied_iterations());

    for player in counts.players() {
        assert_eq!(
            counts.total_iterations(),
            player.histogram.iter().sum::<u64>()
        );
        assert!(player.wins + player.ties <= counts.total_iterations());
    }
    assert_relative_eq!(
        1.0,
        result.winning_percentages().iter().sum::<f64>(),
        epsilon = 1e-9
    );
}

#[test_log::test]
fn aces_against_kings_exact_preflop() {
    let result = run(
        "AsAh KsKh",
        "",
        SimulationConfig::new().with_exact(true),
    );
    assert_eq!(Stage::PreFlop, result.stage());
    assert_eq!(BoardMode::Exhaustive, result.mode());
    // 48 choose 5 boards.
    assert_eq!(1_712_304, result.total_iterations());

    let win = result.win_fractions();
    assert!(win[0] > 0.80 && win[0] < 0.85, "aces won {}", win[0]);
    assert!(win[1] > 0.15 && win[1] < 0.19, "kings won {}", win[1]);
    assert_consistent(&result);
}

#[test_log::test]
fn aces_against_kings_monte_carlo() {
    let config = SimulationConfig::new()
        .with_num_trials(20_000)
        .with_seed(1234)
        .with_num_threads(4);
    let result = run("AsAh KsKh", "", config);
    assert_eq!(BoardMode::MonteCarlo, result.mode());
    assert_eq!(20_000, result.total_iterations());
    assert_relative_eq!(0.82, result.win_fraction(0), epsilon = 0.03);
    assert_consistent(&result);
}

#[test_log::test]
fn flop_draw_against_made_hand() {
    // Open ended straight flush draw against top pair.
    let result = run("9h8h AcKd", "7hThAs", SimulationConfig::default());
    assert_eq!(Stage::Flop, result.stage());
    assert_eq!(990, result.total_iterations());
    assert!(result.win_fraction(0) > 0.5);

    // Any heart makes a flush except the jack and six which make a
    // straight flush. 360 of the 990 runouts hold a heart, 87 of them one of
    // those two.
    let hist = result.histogram_fractions(0);
    assert_relative_eq!(273.0 / 990.0, hist[HandCategory::Flush.index()]);
    assert_relative_eq!(87.0 / 990.0, hist[HandCategory::StraightFlush.index()]);
    assert_consistent(&result);
}

#[test_log::test]
fn seeded_monte_carlo_is_repeatable() {
    let config = SimulationConfig::new()
        .with_num_trials(3_000)
        .with_seed(99)
        .with_num_threads(3);
    let a = run("QsJs ? ?", "", config.clone());
    let b = run("QsJs ? ?", "", config);
    assert_eq!(a, b);
}

#[test_log::test]
fn unknown_opponent_exact_turn() {
    let result = run("AsAh ? ?", "Kd7c2s9h", SimulationConfig::default());
    // 1035 opponent hands, 44 rivers each.
    assert_eq!(1035 * 44, result.total_iterations());
    assert!(result.win_fraction(0) > 0.8);
    assert_consistent(&result);
}

#[test_log::test]
fn unknown_opponent_monte_carlo() {
    let config = SimulationConfig::new().with_num_trials(20_000).with_seed(5);
    let result = run("AsAh ? ?", "", config);
    assert_relative_eq!(0.85, result.win_fraction(0), epsilon = 0.04);
    assert_consistent(&result);
}

#[test_log::test]
fn multiple_unknown_players() {
    let hands = HoleCards::parse_list("AsAh ? ? ? ?").unwrap();
    assert_eq!(
        SimulationError::UnsupportedMultiUnknown(2),
        Simulation::new(hands.clone(), vec![], SimulationConfig::default()).unwrap_err()
    );

    let config = SimulationConfig::new()
        .with_allow_multiple_unknown(true)
        .with_num_trials(20_000)
        .with_seed(17);
    let result = Simulation::new(hands, vec![], config).unwrap().run().unwrap();
    assert_relative_eq!(0.73, result.win_fraction(0), epsilon = 0.05);
    assert_consistent(&result);

    // Exhaustive on the river: pairs for the first unknown times pairs for
    // the second from what is left.
    let config = SimulationConfig::new().with_allow_multiple_unknown(true);
    let result = run("AsAh ? ? ? ?", "Kd7c2s9h3c", config);
    assert_eq!(990 * 903, result.total_iterations());
    assert_consistent(&result);
}

#[test_log::test]
fn river_is_decided() {
    let outcome = calculate(Some("Ks Qs Js 2d 3c"), false, 1, "AsTs 2h2c", true).unwrap();
    assert_eq!(vec![1.0, 0.0], outcome.win_fractions);
    let details = outcome.details.unwrap();
    assert_eq!(1, details.total_iterations());
    assert_eq!(
        1,
        details.counts().players()[0].category_count(HandCategory::StraightFlush)
    );
    assert_eq!(
        1,
        details.counts().players()[1].category_count(HandCategory::ThreeOfAKind)
    );
}

#[test_log::test]
fn bad_input_fails_before_running() {
    assert!(matches!(
        calculate(None, false, 10, "AsKs As2d", false),
        Err(SimulationError::DuplicateCard(_))
    ));
    assert!(matches!(
        calculate(Some("2c"), false, 10, "AsKs QdQh", false),
        Err(SimulationError::InvalidBoardLength(1))
    ));
    // A short board is reported even when its card is also in a hand.
    assert!(matches!(
        calculate(Some("Ks"), false, 10, "AsKs QdQh", false),
        Err(SimulationError::InvalidBoardLength(1))
    ));
    assert!(matches!(
        calculate(None, false, 0, "AsKs QdQh", false),
        Err(SimulationError::InvalidTrialCount)
    ));
    assert!(matches!(
        calculate(Some("Ks Qs Js"), false, 10, "AsKx QdQh", false),
        Err(SimulationError::Card(_))
    ));
}

#[test_log::test]
fn cancel_stops_a_long_run() {
    // Over two billion iterations, far more than the test will wait for.
    let config = SimulationConfig::new()
        .with_exact(true)
        .with_num_threads(2)
        .with_batch_size(1024);
    let sim = Simulation::new(HoleCards::parse_list("AsKs ? ?").unwrap(), vec![], config).unwrap();

    let cancel = CancelToken::new();
    let result = thread::scope(|s| {
        let runner = s.spawn(|| sim.run_with_cancel(&cancel));
        thread::sleep(Duration::from_millis(50));
        cancel.cancel();
        runner.join().unwrap()
    });
    assert_eq!(Err(SimulationError::Cancelled), result);
}

#[test_log::test]
fn batch_lines() {
    let input = "\n# heads up\nAsKs QdQh | 2c 7d 9h\n\nJcJd ? ?\nAhKh ? 8s8c | 2d3d4d\n";
    let scenarios: Vec<Scenario> = input
        .lines()
        .filter_map(|line| Scenario::parse_line(line).unwrap())
        .collect();
    assert_eq!(3, scenarios.len());
    assert_eq!(Ok(Stage::Flop), scenarios[0].validate());
    assert_eq!(Ok(Stage::PreFlop), scenarios[1].validate());
    assert_eq!(vec![1], scenarios[1].unknown_players());
    // A lone `?` is a whole unknown hand.
    assert_eq!(3, scenarios[2].hole_cards.len());
    assert_eq!(vec![1], scenarios[2].unknown_players());
}
