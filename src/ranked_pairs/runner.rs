//! Iterated ranked pairs.
//!
//! Repeats the ranked-pairs procedure under many seeds, which changes how
//! exact ties between candidate edges are broken, and keeps the trial with
//! the highest Kemeny score. Trials share the matrix read-only and own all
//! of their mutable state, so they run in parallel without locking; the
//! reduction takes the earliest trial among equal scores, which makes the
//! result independent of scheduling.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rayon::prelude::*;

use super::config::RankedPairsConfig;
use super::trial::ranked_pairs_unchecked;
use crate::budget::{Budget, Stop};
use crate::error::Result;
use crate::matrix::PreferenceMatrix;
use crate::random::{create_rng, trial_seed};
use crate::score::resolve_items;
use crate::types::Ranking;

/// Result of an iterated ranked-pairs run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedPairsResult {
    /// Highest-scoring ranking over all completed trials.
    pub best: Ranking,

    /// Index of the trial that produced `best`.
    pub best_trial: usize,

    /// Number of completed trials.
    pub trials: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the wall-clock limit ended the run.
    pub timed_out: bool,

    /// Best score after each completed trial.
    pub score_history: Vec<f64>,
}

/// Executes ranked pairs over many seeds.
pub struct RankedPairsRunner;

impl RankedPairsRunner {
    /// Runs all configured trials on `subset` (default: every entity).
    pub fn run(
        a: &PreferenceMatrix,
        subset: Option<&[usize]>,
        config: &RankedPairsConfig,
    ) -> Result<RankedPairsResult> {
        Self::run_with_cancel(a, subset, config, None)
    }

    /// Runs with an optional cancellation token, checked between trials
    /// (or batches of trials in parallel mode).
    ///
    /// At least one trial always completes.
    pub fn run_with_cancel(
        a: &PreferenceMatrix,
        subset: Option<&[usize]>,
        config: &RankedPairsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RankedPairsResult> {
        config.validate()?;
        let items = resolve_items(a, subset)?;
        let budget = Budget::new(config.time_limit_ms, cancel);

        let run_trial = |t: usize| {
            let mut rng = create_rng(trial_seed(config.base_seed, t));
            ranked_pairs_unchecked(a, &items, &mut rng).ranking
        };

        let batch = if config.parallel {
            rayon::current_num_threads().max(1)
        } else {
            1
        };

        let mut tracker = BestTracker::default();
        let mut stop = None;
        let mut next = 0usize;

        while next < config.trials {
            if next > 0 {
                stop = budget.check();
                if stop.is_some() {
                    break;
                }
            }
            let end = (next + batch).min(config.trials);
            if config.parallel {
                let results: Vec<Ranking> = (next..end).into_par_iter().map(&run_trial).collect();
                for (t, ranking) in (next..end).zip(results) {
                    tracker.offer(t, ranking);
                }
            } else {
                for t in next..end {
                    tracker.offer(t, run_trial(t));
                }
            }
            next = end;
        }

        tracing::debug!(
            trials = next,
            best_trial = tracker.best_trial,
            score = tracker.best_score(),
            elapsed_ms = budget.elapsed_ms(),
            "ranked pairs finished"
        );

        let (best, best_trial, score_history) = tracker.finish();
        Ok(RankedPairsResult {
            best,
            best_trial,
            trials: next,
            cancelled: stop == Some(Stop::Cancelled),
            timed_out: stop == Some(Stop::TimedOut),
            score_history,
        })
    }
}

/// Keeps the earliest highest-scoring ranking offered, in trial order.
#[derive(Default)]
struct BestTracker {
    best: Option<Ranking>,
    best_trial: usize,
    history: Vec<f64>,
}

impl BestTracker {
    fn offer(&mut self, trial: usize, ranking: Ranking) {
        let better = self
            .best
            .as_ref()
            .is_none_or(|best| ranking.score > best.score);
        if better {
            if self.best.is_some() {
                tracing::trace!(trial, score = ranking.score, "new best ranked-pairs order");
            }
            self.best = Some(ranking);
            self.best_trial = trial;
        }
        self.history.push(self.best_score());
    }

    fn best_score(&self) -> f64 {
        self.best.as_ref().map_or(0.0, |b| b.score)
    }

    fn finish(self) -> (Ranking, usize, Vec<f64>) {
        (
            self.best.unwrap_or_else(Ranking::empty),
            self.best_trial,
            self.history,
        )
    }
}
