//! End-to-end selection scenarios: distribution, modes, and fault cases.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rotator::{
    choose_key, select_key, CandidateSet, Error, RotationMode, RotationPolicy, WeightedSelector,
};

const N: usize = 100_000;

fn set(pairs: &[(&str, u32)]) -> CandidateSet {
    CandidateSet::from_pairs(pairs.iter().copied()).unwrap()
}

fn counts(
    s: &CandidateSet,
    mode: RotationMode,
    previous: Option<&str>,
    seed: u64,
) -> BTreeMap<String, usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = BTreeMap::new();
    for _ in 0..N {
        let k = select_key(s, mode, previous, &mut rng).unwrap();
        *out.entry(k).or_insert(0) += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Weighted draw
// ---------------------------------------------------------------------------

#[test]
fn full_weight_key_always_wins() {
    let s = set(&[("abc", 100), ("def", 0)]);
    let mut sel = WeightedSelector::with_seed(1);
    let mut abc = 0;
    for _ in 0..N {
        if sel.choose(&s).unwrap() == "abc" {
            abc += 1;
        }
    }
    assert_eq!(abc, N);
}

#[test]
fn even_split_is_roughly_even() {
    let c = counts(&set(&[("abc", 50), ("def", 50)]), RotationMode::Random, None, 2);
    let abc = c.get("abc").copied().unwrap_or(0);
    let def = c.get("def").copied().unwrap_or(0);
    assert!(abc > N * 4 / 10, "abc={abc}");
    assert!(def > N * 4 / 10, "def={def}");
    assert_eq!(abc + def, N);
}

#[test]
fn uneven_split_matches_weights() {
    let s = set(&[("a", 10), ("b", 30), ("c", 60)]);
    let probs = s.probabilities();
    let c = counts(&s, RotationMode::Random, None, 3);
    for (k, p) in &probs {
        let freq = c.get(k).copied().unwrap_or(0) as f64 / N as f64;
        assert!((freq - p).abs() < 0.01, "{k}: freq={freq} p={p}");
    }
}

#[test]
fn every_positive_key_is_covered_and_nothing_else() {
    let s = set(&[("a", 1), ("b", 0), ("c", 1), ("d", 500)]);
    let c = counts(&s, RotationMode::Random, None, 4);
    assert!(c.contains_key("a"));
    assert!(c.contains_key("c"));
    assert!(c.contains_key("d"));
    assert!(!c.contains_key("b"));
    for k in c.keys() {
        assert!(s.contains(k));
    }
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

#[test]
fn always_same_repeats_previous() {
    let s = set(&[("abc", 50), ("def", 50)]);
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..10 {
        let k = select_key(&s, RotationMode::AlwaysSame, Some("abc"), &mut rng).unwrap();
        assert_eq!(k, "abc");
    }
}

#[test]
fn always_different_avoids_previous() {
    let s = set(&[("abc", 50), ("def", 50)]);
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..10 {
        let k = select_key(&s, RotationMode::AlwaysDifferent, Some("abc"), &mut rng).unwrap();
        assert_eq!(k, "def");
    }
}

#[test]
fn random_mode_ignores_previous() {
    let c = counts(
        &set(&[("abc", 50), ("def", 50)]),
        RotationMode::Random,
        Some("abc"),
        7,
    );
    assert!(c["abc"] > N * 4 / 10);
    assert!(c["def"] > N * 4 / 10);
}

#[test]
fn missing_previous_is_safe_in_sticky_modes() {
    let s = set(&[("abc", 50), ("def", 50)]);
    let mut rng = StdRng::seed_from_u64(8);
    for mode in [RotationMode::AlwaysSame, RotationMode::AlwaysDifferent] {
        let k = select_key(&s, mode, None, &mut rng).unwrap();
        assert!(s.contains(&k));
    }
}

#[test]
fn always_different_keeps_proportions_among_the_rest() {
    let s = set(&[("prev", 10), ("a", 25), ("b", 75)]);
    let c = counts(&s, RotationMode::AlwaysDifferent, Some("prev"), 9);
    assert!(!c.contains_key("prev"));
    let a = c["a"] as f64 / N as f64;
    assert!((a - 0.25).abs() < 0.01, "a={a}");
}

#[test]
fn always_different_does_not_mutate_caller_set() {
    let s = set(&[("abc", 50), ("def", 50), ("ghi", 5)]);
    let before = s.clone();
    let mut rng = StdRng::seed_from_u64(10);
    for _ in 0..100 {
        RotationPolicy::new(RotationMode::AlwaysDifferent)
            .select(&s, Some("abc"), &mut rng)
            .unwrap();
    }
    assert_eq!(s, before);
    assert_eq!(s.len(), 3);
    assert_eq!(s.get("abc"), Some(50));
}

// ---------------------------------------------------------------------------
// Faults
// ---------------------------------------------------------------------------

#[test]
fn empty_set_is_invalid_argument_in_every_mode() {
    let empty = CandidateSet::new();
    let mut rng = StdRng::seed_from_u64(11);
    for mode in RotationMode::ALL {
        for prev in [None, Some("abc"), Some("")] {
            let err = select_key(&empty, mode, prev, &mut rng).unwrap_err();
            assert!(err.is_invalid_argument(), "{mode}: {err}");
        }
    }
    assert_eq!(choose_key(&empty, &mut rng), Err(Error::EmptyCandidates));
}

#[test]
fn all_zero_weights_are_invalid_argument() {
    let s = set(&[("a", 0), ("b", 0)]);
    let mut rng = StdRng::seed_from_u64(12);
    let err = select_key(&s, RotationMode::AlwaysSame, Some("a"), &mut rng).unwrap_err();
    assert_eq!(err, Error::ZeroTotalWeight { count: 2 });
}
