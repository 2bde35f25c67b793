//! RollManager facade: seeding, history bookkeeping, dice and statistics.

use seedroll_core::{stats, RollConfig, RollError, RollManager, Seed, MAX_SAFE_INTEGER};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn uniform_draws_are_recorded_in_order() {
    let mut roller = RollManager::with_seed(42u64);
    let draws: Vec<f64> = (0..5).map(|_| roller.uniform()).collect();
    assert_eq!(roller.history(), draws);
    assert!(draws.iter().all(|x| (0.0..1.0).contains(x)));
}

#[test]
fn random_is_an_alias_for_uniform() {
    let mut a = RollManager::with_seed(3u64);
    let mut b = RollManager::with_seed(3u64);
    assert_eq!(a.random(), b.uniform());
    assert_eq!(a.history(), b.history());
}

#[test]
fn set_seed_clears_history_and_reports_the_seed() {
    let mut roller = RollManager::with_seed(1u64);
    roller.uniform();
    roller.uniform();

    let applied = roller.set_seed(vec![5u64, 6, 7]).clone();

    assert_eq!(applied, Seed::Array(vec![5, 6, 7]));
    assert_eq!(roller.seed(), &applied);
    assert!(roller.history().is_empty());
}

#[test]
fn invalid_seed_falls_back_to_crypto() {
    init_logging();
    let mut roller = RollManager::with_seed(u64::MAX);
    assert!(matches!(roller.seed(), Seed::Array(words) if (20..=623).contains(&words.len())));

    let applied = roller.set_seed(Seed::Array(vec![])).clone();
    assert!(matches!(applied, Seed::Array(words) if !words.is_empty()));
}

#[test]
fn reseed_without_a_seed_uses_entropy() {
    let mut roller = RollManager::with_seed(4u64);
    roller.uniform();
    let applied = roller.reseed(None).clone();
    assert!(matches!(applied, Seed::Array(ref words) if words.len() >= 20));
    assert!(roller.history().is_empty());
}

#[test]
fn d_rolls_stay_on_the_die() {
    let mut roller = RollManager::with_seed(8u64);
    for sides in [1.0, 2.0, 6.0, 20.0, 100.0] {
        for _ in 0..500 {
            let roll = roller.d(sides).unwrap();
            assert!(roll >= 1 && roll as f64 <= sides, "d{sides} rolled {roll}");
        }
    }
}

#[test]
fn d_one_always_rolls_one() {
    let mut roller = RollManager::with_seed(8u64);
    assert!((0..100).all(|_| roller.d(1.0).unwrap() == 1));
}

#[test]
fn fractional_sides_are_truncated() {
    let mut roller = RollManager::with_seed(8u64);
    for _ in 0..1000 {
        assert!(roller.d(6.9).unwrap() <= 6);
    }
}

#[test]
fn invalid_sides_yield_no_value() {
    init_logging();
    let mut roller = RollManager::with_seed(8u64);
    for sides in [f64::NAN, f64::INFINITY, 0.0, 0.5, -6.0] {
        assert!(matches!(roller.d(sides), Err(RollError::InvalidSides { .. })));
    }
    assert!(roller.history().is_empty());
}

#[test]
fn sides_beyond_safe_integers_are_rejected() {
    init_logging();
    let mut roller = RollManager::with_seed(42u64);
    for sides in [1e20, f64::MAX, MAX_SAFE_INTEGER as f64 + 2.0] {
        assert!(matches!(roller.d(sides), Err(RollError::InvalidSides { .. })), "d{sides}");
    }
    assert!(roller.history().is_empty());
}

#[test]
fn largest_die_returns_what_it_records() {
    let mut roller = RollManager::with_seed(42u64);
    let roll = roller.d(MAX_SAFE_INTEGER as f64).unwrap();
    assert!((1..=MAX_SAFE_INTEGER).contains(&roll));
    assert_eq!(roller.history(), vec![roll as f64]);
}

#[test]
fn d_records_the_rolled_face() {
    let mut roller = RollManager::with_seed(8u64);
    let roll = roller.d(6.0).unwrap();
    assert_eq!(roller.history(), vec![roll as f64]);
}

#[test]
fn pick_selects_an_element() {
    let endings = ["!", "?", "...", "."];
    let mut roller = RollManager::with_seed(13u64);
    for _ in 0..200 {
        let ending = roller.pick(&endings).expect("non-empty");
        assert!(endings.contains(ending));
    }
    let empty: [&str; 0] = [];
    assert!(roller.pick(&empty).is_none());
}

#[test]
fn max_history_trims_and_bounds() {
    let mut roller = RollManager::with_seed(2u64);
    assert_eq!(roller.max_history(), 1000);

    let draws: Vec<f64> = (0..10).map(|_| roller.uniform()).collect();
    assert_eq!(roller.set_max_history(3), 3);
    assert_eq!(roller.history(), draws[7..].to_vec());

    for _ in 0..10 {
        roller.uniform();
        assert!(roller.history().len() <= roller.max_history());
    }
}

#[test]
fn clear_history_keeps_capacity() {
    let mut roller = RollManager::with_seed(2u64);
    roller.set_max_history(12);
    roller.uniform();
    roller.clear_history();
    assert!(roller.history().is_empty());
    assert_eq!(roller.max_history(), 12);
}

#[test]
fn history_is_a_snapshot() {
    let mut roller = RollManager::with_seed(2u64);
    roller.uniform();
    let mut copy = roller.history();
    copy.clear();
    assert_eq!(roller.history().len(), 1);
}

#[test]
fn recording_can_be_disabled() {
    let mut roller = RollManager::from_config(&RollConfig {
        record_history: false,
        ..RollConfig::default_test()
    });
    roller.uniform();
    roller.d(6.0).unwrap();
    roller.gaussian(0.0).unwrap();
    assert!(!roller.records_history());
    assert!(roller.history().is_empty());
}

#[test]
fn config_controls_seed_and_capacity() {
    let config = RollConfig::from_json(r#"{"seed": 42, "max_history": 4}"#).unwrap();
    let mut from_config = RollManager::from_config(&config);
    let mut direct = RollManager::with_seed(42u64);

    assert_eq!(from_config.max_history(), 4);
    assert_eq!(from_config.uniform(), direct.uniform());
}

#[test]
fn statistics_default_to_history() {
    let mut roller = RollManager::with_seed(21u64);
    for _ in 0..50 {
        roller.d(6.0).unwrap();
    }
    let history = roller.history();

    assert_eq!(roller.mean(None).unwrap(), stats::mean(&history).unwrap());
    assert_eq!(roller.median(None).unwrap(), stats::median(&history).unwrap());
    assert_eq!(roller.modes(None).unwrap(), stats::modes(&history).unwrap());
    assert_eq!(
        roller.standard_deviation(None).unwrap(),
        stats::std_dev(&history).unwrap()
    );
}

#[test]
fn statistics_prefer_an_explicit_sample() {
    let mut roller = RollManager::with_seed(21u64);
    roller.uniform();
    let sample = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(roller.mean(Some(&sample[..])).unwrap(), 2.5);
    assert_eq!(roller.median(Some(&sample[..])).unwrap(), 2.5);
    assert_eq!(roller.modes(Some(&[1.0, 1.0, 2.0, 3.0][..])).unwrap(), vec![1.0]);
}

#[test]
fn statistics_on_empty_history_are_errors() {
    let roller = RollManager::with_seed(21u64);
    assert!(matches!(roller.mean(None), Err(RollError::EmptySample)));
}

#[test]
fn one_shot_helpers() {
    for _ in 0..20 {
        let x = seedroll_core::random();
        assert!((0.0..1.0).contains(&x));
        let roll = seedroll_core::d(6.0).unwrap();
        assert!((1..=6).contains(&roll));
    }
    assert!(seedroll_core::d(f64::NAN).is_err());
    assert!(seedroll_core::create_random_seed().is_valid());
    assert_eq!(seedroll_core::scale(5.0, [0.0, 10.0], [0.0, 100.0]), 50.0);
    assert_eq!(seedroll_core::clip(15.0, [0.0, 10.0]), 10.0);
    assert_eq!(seedroll_core::round(3.14159, 2), 3.14);
    assert_eq!(seedroll_core::fix(0.1 + 0.2), 0.3);
}

#[test]
fn default_manager_is_crypto_seeded() {
    let roller = RollManager::default();
    assert!(matches!(roller.seed(), Seed::Array(_)));
    assert_eq!(roller.gaussian_mode(), seedroll_core::GaussianMode::Strict);
}
