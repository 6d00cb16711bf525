//! Property tests over random small preference matrices.
//!
//! Weights are small integers so every score is exact in `f64` and
//! optimality can be compared with `==` against brute force.

use proptest::prelude::*;
use u_kemeny::optimizer::{OptimizerConfig, OptimizerRunner};
use rand::seq::SliceRandom;
use u_kemeny::random::{create_rng, trial_seed};
use u_kemeny::ranked_pairs::{RankedPairsConfig, RankedPairsRunner};
use u_kemeny::score::validate_permutation_of;
use u_kemeny::split_merge::{SplitMergeConfig, SplitMergeRunner};
use u_kemeny::{
    merge, optimize, random_nontrivial_split, ranked_pairs, score, solve_exact, PreferenceMatrix,
};

fn matrix(max_size: usize) -> impl Strategy<Value = PreferenceMatrix> {
    matrix_between(1, max_size)
}

fn matrix_between(min_size: usize, max_size: usize) -> impl Strategy<Value = PreferenceMatrix> {
    (min_size..=max_size).prop_flat_map(|n| {
        prop::collection::vec(0u32..50, n * n).prop_map(move |w| {
            let weights = w.into_iter().map(f64::from).collect();
            PreferenceMatrix::from_flat(n, weights).unwrap()
        })
    })
}

fn all_permutations(items: &[usize]) -> Vec<Vec<usize>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for k in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(k);
        for mut tail in all_permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

fn interleavings(l: &[usize], m: &[usize]) -> Vec<Vec<usize>> {
    if l.is_empty() {
        return vec![m.to_vec()];
    }
    if m.is_empty() {
        return vec![l.to_vec()];
    }
    let mut out = Vec::new();
    for mut rest in interleavings(&l[1..], m) {
        rest.insert(0, l[0]);
        out.push(rest);
    }
    for mut rest in interleavings(l, &m[1..]) {
        rest.insert(0, m[0]);
        out.push(rest);
    }
    out
}

fn best_of(a: &PreferenceMatrix, orders: &[Vec<usize>]) -> f64 {
    orders
        .iter()
        .map(|o| score(a, o).unwrap())
        .fold(f64::NEG_INFINITY, f64::max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_exact_matches_brute_force(a in matrix(6)) {
        let best = solve_exact(&a, None).unwrap();
        prop_assert!(validate_permutation_of(&best.order, &a.indices()).is_ok());
        prop_assert_eq!(best.score, score(&a, &best.order).unwrap());
        prop_assert_eq!(best.score, best_of(&a, &all_permutations(&a.indices())));
    }

    #[test]
    fn prop_score_plus_reverse_is_total(a in matrix(8)) {
        let order = a.indices();
        let reversed: Vec<usize> = order.iter().rev().copied().collect();
        let total: f64 = order
            .iter()
            .flat_map(|&i| order.iter().map(move |&j| (i, j)))
            .filter(|(i, j)| i != j)
            .map(|(i, j)| a.get(i, j))
            .sum();
        prop_assert_eq!(score(&a, &order).unwrap() + score(&a, &reversed).unwrap(), total);
    }

    #[test]
    fn prop_merge_is_best_interleaving(a in matrix(8), cut in 0usize..8, seed in any::<u64>()) {
        let mut ids = a.indices();
        ids.shuffle(&mut create_rng(seed));
        let (l, m) = ids.split_at(cut.min(ids.len()));

        let merged = merge(&a, l, m).unwrap();
        prop_assert!(validate_permutation_of(&merged.order, &ids).is_ok());
        prop_assert_eq!(merged.score, score(&a, &merged.order).unwrap());
        prop_assert_eq!(merged.score, best_of(&a, &interleavings(l, m)));
    }

    #[test]
    fn prop_merge_of_split_never_worse(a in matrix(10), seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let mut order = a.indices();
        order.shuffle(&mut rng);
        let split = random_nontrivial_split(&order, None, &mut rng);
        let merged = merge(&a, &split.first, &split.second).unwrap();
        prop_assert!(merged.score >= score(&a, &order).unwrap());
    }

    #[test]
    fn prop_split_merge_history_monotone(a in matrix(12), seed in any::<u64>()) {
        let start = a.indices();
        let config = SplitMergeConfig::default().with_max_steps(20).with_seed(seed);
        let result = SplitMergeRunner::run(&a, &start, &config).unwrap();
        prop_assert!(validate_permutation_of(&result.best.order, &start).is_ok());
        for w in result.score_history.windows(2) {
            prop_assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn prop_divide_exact_below_threshold(a in matrix(6), seed in any::<u64>()) {
        let approx = optimize(&a, None, &mut create_rng(seed)).unwrap();
        prop_assert_eq!(approx, solve_exact(&a, None).unwrap());
    }

    #[test]
    fn prop_ranked_pairs_acyclic(a in matrix(10), seed in any::<u64>()) {
        let outcome = ranked_pairs(&a, None, &mut create_rng(seed)).unwrap();
        prop_assert!(outcome.graph.is_acyclic());
        prop_assert!(validate_permutation_of(&outcome.ranking.order, &a.indices()).is_ok());
        let n = a.size();
        prop_assert_eq!(outcome.graph.edges().len(), n * n.saturating_sub(1) / 2);
    }

    #[test]
    fn prop_iterated_ranked_pairs_is_best_trial(a in matrix(8), base in 0u64..1000) {
        let config = RankedPairsConfig::default()
            .with_trials(6)
            .with_base_seed(base)
            .with_parallel(false);
        let result = RankedPairsRunner::run(&a, None, &config).unwrap();
        let best = (0..6)
            .map(|t| {
                ranked_pairs(&a, None, &mut create_rng(trial_seed(base, t)))
                    .unwrap()
                    .ranking
                    .score
            })
            .fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(result.best.score, best);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    #[test]
    fn prop_exact_matches_brute_force_large(a in matrix_between(7, 8)) {
        let best = solve_exact(&a, None).unwrap();
        prop_assert_eq!(best.score, score(&a, &best.order).unwrap());
        prop_assert_eq!(best.score, best_of(&a, &all_permutations(&a.indices())));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_optimizer_reproducible(a in matrix(20), seed in any::<u64>()) {
        let config = OptimizerConfig::default().with_rounds(5).with_seed(seed);
        let r1 = OptimizerRunner::run(&a, None, &config).unwrap();
        let r2 = OptimizerRunner::run(&a, None, &config).unwrap();
        prop_assert_eq!(&r1.best, &r2.best);
        prop_assert!(r1.best.score >= r1.seed.score);
    }
}

// ---------------------------------------------------------------------------
// Known scenarios
// ---------------------------------------------------------------------------

fn three() -> PreferenceMatrix {
    PreferenceMatrix::from_rows(&[
        vec![0.0, 6.0, 9.0],
        vec![7.0, 0.0, 11.0],
        vec![13.0, 12.0, 0.0],
    ])
    .unwrap()
}

#[test]
fn scenario_three_entities() {
    let a = three();
    assert_eq!(score(&a, &[2, 1, 0]).unwrap(), 32.0);
    assert_eq!(solve_exact(&a, None).unwrap().order, vec![2, 1, 0]);
    assert_eq!(merge(&a, &[1, 0], &[2]).unwrap().order, vec![2, 1, 0]);

    let outcome = ranked_pairs(&a, None, &mut create_rng(7)).unwrap();
    assert_eq!(outcome.ranking.order, vec![2, 1, 0]);
    assert_eq!(outcome.graph.edges(), &[(2, 0), (2, 1), (1, 0)]);
}

#[test]
fn scenario_sinusoid_nine() {
    let a = PreferenceMatrix::sinusoid(9);
    let best = solve_exact(&a, None).unwrap();
    assert_eq!(best.order, vec![5, 4, 6, 0, 3, 7, 8, 1, 2]);
    assert_eq!(best.score, 27_047_279_315_230.0);

    let approx = optimize(&a, None, &mut create_rng(0)).unwrap();
    assert!(approx.score <= best.score);
}

#[test]
fn scenario_contested_optimizer_pipeline() {
    let a = PreferenceMatrix::contested(80, 3, 2, 100, &mut create_rng(1)).unwrap();
    let rp = RankedPairsRunner::run(&a, None, &RankedPairsConfig::default().with_trials(8)).unwrap();
    let opt = OptimizerRunner::run(
        &a,
        None,
        &OptimizerConfig::default().with_rounds(20).with_seed(1),
    )
    .unwrap();
    assert!(validate_permutation_of(&rp.best.order, &a.indices()).is_ok());
    assert!(validate_permutation_of(&opt.best.order, &a.indices()).is_ok());
    assert_eq!(opt.score_history.len(), 21);
}
