//! Anytime optimization loop.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::rngs::StdRng;
use rayon::prelude::*;

use super::config::OptimizerConfig;
use crate::budget::{Budget, Stop};
use crate::divide::optimize;
use crate::error::Result;
use crate::matrix::PreferenceMatrix;
use crate::merge::MergeWorkspace;
use crate::random::{create_rng, rng_for, trial_seed, DEFAULT_SEED};
use crate::score::{moved_count, resolve_items};
use crate::split_merge::polish;
use crate::types::Ranking;

/// Result of an anytime optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerResult {
    /// Best ranking over all chains.
    pub best: Ranking,

    /// The divide-and-conquer ranking every chain started from.
    pub seed: Ranking,

    /// Index of the chain that produced `best`.
    pub best_chain: usize,

    /// Completed rounds, summed over chains.
    pub rounds: usize,

    /// Rounds that strictly improved their chain's best, summed over chains.
    pub improvements: usize,

    /// Entities of `best` that left their relative order in `seed`.
    pub moved_from_seed: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the wall-clock limit ended the run.
    pub timed_out: bool,

    /// Best score of the winning chain: the seed score, then one entry per
    /// completed round.
    pub score_history: Vec<f64>,
}

/// Outcome of one polishing chain.
struct Chain {
    best: Ranking,
    rounds: usize,
    improvements: usize,
    stop: Option<Stop>,
    history: Vec<f64>,
}

/// Seeds with divide-and-conquer, then polishes with split-merge rounds
/// until the round or time budget runs out.
///
/// # Usage
///
/// ```
/// use u_kemeny::optimizer::{OptimizerConfig, OptimizerRunner};
/// use u_kemeny::PreferenceMatrix;
///
/// let a = PreferenceMatrix::small_sinusoid(20);
/// let config = OptimizerConfig::default().with_rounds(20).with_seed(1);
/// let result = OptimizerRunner::run(&a, None, &config).unwrap();
/// assert!(result.best.score >= result.seed.score);
/// ```
pub struct OptimizerRunner;

impl OptimizerRunner {
    /// Optimizes the order of `subset` (default: every entity).
    pub fn run(
        a: &PreferenceMatrix,
        subset: Option<&[usize]>,
        config: &OptimizerConfig,
    ) -> Result<OptimizerResult> {
        Self::run_with_cancel(a, subset, config, None)
    }

    /// Optimizes with an optional cancellation token, checked before every
    /// round. The divide-and-conquer seed is always computed in full.
    pub fn run_with_cancel(
        a: &PreferenceMatrix,
        subset: Option<&[usize]>,
        config: &OptimizerConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<OptimizerResult> {
        config.validate()?;
        let items = resolve_items(a, subset)?;
        let budget = Budget::new(config.time_limit_ms, cancel);
        let base_seed = config.seed.unwrap_or(DEFAULT_SEED);

        let mut rng = rng_for(config.seed);
        let seed = optimize(a, Some(&items), &mut rng)?;
        tracing::info!(
            entities = items.len(),
            score = seed.score,
            elapsed_ms = budget.elapsed_ms(),
            "divide-and-conquer seed ready"
        );

        let mut chains: Vec<Chain> = if config.chains == 1 {
            vec![run_chain(a, &seed, config, &budget, rng)]
        } else {
            let start_chain = |c: usize| {
                let rng = create_rng(trial_seed(base_seed, c + 1));
                run_chain(a, &seed, config, &budget, rng)
            };
            if config.parallel {
                (0..config.chains).into_par_iter().map(start_chain).collect()
            } else {
                (0..config.chains).map(start_chain).collect()
            }
        };

        let rounds = chains.iter().map(|c| c.rounds).sum();
        let improvements = chains.iter().map(|c| c.improvements).sum();
        let cancelled = chains.iter().any(|c| c.stop == Some(Stop::Cancelled));
        let timed_out = !cancelled && chains.iter().any(|c| c.stop == Some(Stop::TimedOut));

        // Earliest chain wins ties, independent of scheduling.
        let mut best_chain = 0;
        for (c, chain) in chains.iter().enumerate().skip(1) {
            if chain.best.score > chains[best_chain].best.score {
                best_chain = c;
            }
        }
        let Chain { best, history, .. } = chains.swap_remove(best_chain);

        let moved_from_seed = moved_count(&best.order, &seed.order);
        tracing::info!(
            score = best.score,
            seed_score = seed.score,
            rounds,
            improvements,
            moved_from_seed,
            elapsed_ms = budget.elapsed_ms(),
            "optimization finished"
        );

        Ok(OptimizerResult {
            best,
            seed,
            best_chain,
            rounds,
            improvements,
            moved_from_seed,
            cancelled,
            timed_out,
            score_history: history,
        })
    }
}

fn run_chain(
    a: &PreferenceMatrix,
    seed: &Ranking,
    config: &OptimizerConfig,
    budget: &Budget,
    mut rng: StdRng,
) -> Chain {
    let mut ws = MergeWorkspace::new();
    let mut best = seed.clone();
    let mut history = vec![best.score];
    let mut rounds = 0usize;
    let mut improvements = 0usize;
    let mut stop = None;

    while rounds < config.rounds {
        stop = budget.check();
        if stop.is_some() {
            break;
        }

        let candidate = polish(
            a,
            best.clone(),
            config.steps_per_round,
            config.first_len,
            &mut rng,
            &mut ws,
        );
        rounds += 1;

        if candidate.score > best.score {
            improvements += 1;
            tracing::debug!(
                round = rounds,
                score = candidate.score,
                new_changes = moved_count(&candidate.order, &best.order),
                total_changes = moved_count(&candidate.order, &seed.order),
                "polishing improved"
            );
            best = candidate;
        }
        history.push(best.score);
    }

    Chain {
        best,
        rounds,
        improvements,
        stop,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{score, validate_permutation_of};

    fn contested(m: usize, seed: u64) -> PreferenceMatrix {
        PreferenceMatrix::contested(m, 3, 2, 100, &mut create_rng(seed)).unwrap()
    }

    #[test]
    fn test_never_below_seed() {
        let a = contested(40, 1);
        let config = OptimizerConfig::default().with_rounds(30).with_seed(3);
        let result = OptimizerRunner::run(&a, None, &config).unwrap();
        assert!(result.best.score >= result.seed.score);
        assert_eq!(result.rounds, 30);
        assert!(validate_permutation_of(&result.best.order, &a.indices()).is_ok());
        assert_eq!(result.best.score, score(&a, &result.best.order).unwrap());
    }

    #[test]
    fn test_history_non_decreasing() {
        let a = contested(30, 2);
        let config = OptimizerConfig::default().with_rounds(25).with_seed(8);
        let result = OptimizerRunner::run(&a, None, &config).unwrap();
        assert_eq!(result.score_history.len(), 26);
        assert_eq!(result.score_history[0], result.seed.score);
        for w in result.score_history.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_reproducible() {
        let a = contested(25, 3);
        let config = OptimizerConfig::default().with_rounds(15).with_seed(11);
        let r1 = OptimizerRunner::run(&a, None, &config).unwrap();
        let r2 = OptimizerRunner::run(&a, None, &config).unwrap();
        assert_eq!(r1.best, r2.best);
        assert_eq!(r1.score_history, r2.score_history);
    }

    #[test]
    fn test_parallel_chains_match_sequential() {
        let a = contested(25, 4);
        let seq = OptimizerConfig::default()
            .with_rounds(10)
            .with_chains(4)
            .with_parallel(false)
            .with_seed(5);
        let par = seq.clone().with_parallel(true);
        let r_seq = OptimizerRunner::run(&a, None, &seq).unwrap();
        let r_par = OptimizerRunner::run(&a, None, &par).unwrap();
        assert_eq!(r_seq.best, r_par.best);
        assert_eq!(r_seq.best_chain, r_par.best_chain);
        assert_eq!(r_seq.rounds, 40);
    }

    #[test]
    fn test_chain_seeds_offset_from_base() {
        let a = contested(20, 9);
        let config = OptimizerConfig::default()
            .with_rounds(8)
            .with_chains(2)
            .with_parallel(false)
            .with_seed(30);
        let result = OptimizerRunner::run(&a, None, &config).unwrap();

        let budget = Budget::new(None, None);
        let chains: Vec<Chain> = (0..2u64)
            .map(|c| run_chain(&a, &result.seed, &config, &budget, create_rng(30 + c + 1)))
            .collect();
        let expected = usize::from(chains[1].best.score > chains[0].best.score);
        assert_eq!(result.best_chain, expected);
        assert_eq!(result.best, chains[expected].best);
    }

    #[test]
    fn test_cancel_returns_seed() {
        let a = contested(20, 5);
        let config = OptimizerConfig::default().with_rounds(1000).with_seed(1);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = OptimizerRunner::run_with_cancel(&a, None, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.rounds, 0);
        assert_eq!(result.best, result.seed);
        assert_eq!(result.moved_from_seed, 0);
    }

    #[test]
    fn test_time_limit_stops() {
        let a = contested(60, 6);
        let config = OptimizerConfig::default()
            .with_rounds(usize::MAX)
            .with_time_limit_ms(50)
            .with_seed(2);
        let result = OptimizerRunner::run(&a, None, &config).unwrap();
        assert!(result.timed_out);
        assert!(result.best.score >= result.seed.score);
    }

    #[test]
    fn test_subset_and_errors() {
        let a = contested(12, 7);
        let subset = [11, 4, 0, 7, 3, 9, 1, 2];
        let config = OptimizerConfig::default().with_rounds(5);
        let result = OptimizerRunner::run(&a, Some(&subset), &config).unwrap();
        assert!(validate_permutation_of(&result.best.order, &subset).is_ok());
        assert!(OptimizerRunner::run(&a, Some(&[0, 12]), &config).is_err());
        assert!(OptimizerRunner::run(&a, None, &config.with_chains(0)).is_err());
    }

    #[test]
    fn test_empty_subset() {
        let a = contested(4, 8);
        let config = OptimizerConfig::default().with_rounds(3);
        let result = OptimizerRunner::run(&a, Some(&[]), &config).unwrap();
        assert_eq!(result.best, Ranking::empty());
    }
}
