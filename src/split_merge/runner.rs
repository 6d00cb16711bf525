//! Split-Merge execution loop.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;

use super::config::SplitMergeConfig;
use crate::budget::{Budget, Stop};
use crate::error::Result;
use crate::matrix::PreferenceMatrix;
use crate::merge::MergeWorkspace;
use crate::random::rng_for;
use crate::score::{score_unchecked, validate_order};
use crate::split::random_nontrivial_split;
use crate::types::Ranking;

/// Result of a Split-Merge run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitMergeResult {
    /// The best (and final) order and its score.
    pub best: Ranking,

    /// Number of completed split+merge steps.
    pub steps: usize,

    /// Steps whose merge strictly raised the score.
    pub improving_steps: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the wall-clock limit ended the run.
    pub timed_out: bool,

    /// Score before the first step followed by the score after every step.
    pub score_history: Vec<f64>,
}

/// Runs `steps` split+merge steps on `order` and returns the result.
///
/// # Errors
/// A shape error if `order` repeats an index or leaves the matrix.
///
/// # Examples
///
/// ```
/// use u_kemeny::{split_merge, PreferenceMatrix};
/// use u_kemeny::random::create_rng;
///
/// let a = PreferenceMatrix::small_sinusoid(12);
/// let start: Vec<usize> = (0..12).rev().collect();
/// let before = u_kemeny::score(&a, &start).unwrap();
///
/// let mut rng = create_rng(1);
/// let after = split_merge(&a, &start, 50, None, &mut rng).unwrap();
/// assert!(after.score >= before);
/// ```
pub fn split_merge<R: Rng>(
    a: &PreferenceMatrix,
    order: &[usize],
    steps: usize,
    first_len: Option<usize>,
    rng: &mut R,
) -> Result<Ranking> {
    validate_order(a, order)?;
    let start = Ranking::new(order.to_vec(), score_unchecked(a, order));
    Ok(polish(a, start, steps, first_len, rng, &mut MergeWorkspace::new()))
}

/// Fixed-step polishing on an already validated ranking.
pub(crate) fn polish<R: Rng>(
    a: &PreferenceMatrix,
    mut current: Ranking,
    steps: usize,
    first_len: Option<usize>,
    rng: &mut R,
    ws: &mut MergeWorkspace,
) -> Ranking {
    for _ in 0..steps {
        current = step(a, current, first_len, rng, ws);
    }
    current
}

/// One split+merge step. The merged order replaces `current` unless its
/// score is lower, which only rounding in non-integer weights can cause.
fn step<R: Rng>(
    a: &PreferenceMatrix,
    current: Ranking,
    first_len: Option<usize>,
    rng: &mut R,
    ws: &mut MergeWorkspace,
) -> Ranking {
    let split = random_nontrivial_split(&current.order, first_len, rng);
    if split.is_trivial() {
        return current;
    }
    let merged = ws.merge(a, &split.first, &split.second);
    if merged.score >= current.score {
        merged
    } else {
        current
    }
}

/// Executes Split-Merge search under a step and time budget.
pub struct SplitMergeRunner;

impl SplitMergeRunner {
    /// Runs Split-Merge from `order`.
    pub fn run(
        a: &PreferenceMatrix,
        order: &[usize],
        config: &SplitMergeConfig,
    ) -> Result<SplitMergeResult> {
        Self::run_with_cancel(a, order, config, None)
    }

    /// Runs Split-Merge with an optional cancellation token.
    ///
    /// The flag and the time limit are checked before every step; a set
    /// flag stops the run with the best order found so far.
    pub fn run_with_cancel(
        a: &PreferenceMatrix,
        order: &[usize],
        config: &SplitMergeConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SplitMergeResult> {
        config.validate()?;
        validate_order(a, order)?;

        let budget = Budget::new(config.time_limit_ms, cancel);
        let mut rng = rng_for(config.seed);
        let mut ws = MergeWorkspace::new();

        let mut current = Ranking::new(order.to_vec(), score_unchecked(a, order));
        let mut score_history = Vec::with_capacity(config.max_steps.min(4096) + 1);
        score_history.push(current.score);

        let mut steps = 0usize;
        let mut improving_steps = 0usize;
        let mut stop = None;

        while steps < config.max_steps {
            stop = budget.check();
            if stop.is_some() {
                break;
            }

            let before = current.score;
            current = step(a, current, config.first_len, &mut rng, &mut ws);
            steps += 1;

            if current.score > before {
                improving_steps += 1;
                tracing::trace!(step = steps, score = current.score, "split-merge improved");
            }
            score_history.push(current.score);
        }

        tracing::debug!(
            steps,
            improving_steps,
            score = current.score,
            elapsed_ms = budget.elapsed_ms(),
            "split-merge finished"
        );

        Ok(SplitMergeResult {
            best: current,
            steps,
            improving_steps,
            cancelled: stop == Some(Stop::Cancelled),
            timed_out: stop == Some(Stop::TimedOut),
            score_history,
        })
    }
}
