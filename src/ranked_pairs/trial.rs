//! A single ranked-pairs trial.

use std::cmp::Ordering;

use rand::Rng;

use super::graph::CommitmentGraph;
use crate::error::Result;
use crate::matrix::PreferenceMatrix;
use crate::score::{resolve_items, score_unchecked};
use crate::types::Ranking;

/// A candidate edge with its sort keys.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    from: usize,
    to: usize,
    strength: f64,
    counter: f64,
    tiebreak: u64,
}

/// Strongest first: `A[i][j]` descending, then `A[j][i]` ascending, then
/// the random key descending. The final `(i, j)` key makes the order
/// strict.
fn strongest_first(x: &Candidate, y: &Candidate) -> Ordering {
    y.strength
        .total_cmp(&x.strength)
        .then_with(|| x.counter.total_cmp(&y.counter))
        .then_with(|| y.tiebreak.cmp(&x.tiebreak))
        .then_with(|| (y.from, y.to).cmp(&(x.from, x.to)))
}

/// Outcome of one trial: the ranking and the graph it was read from.
#[derive(Debug, Clone)]
pub struct RankedPairsOutcome {
    pub ranking: Ranking,
    pub graph: CommitmentGraph,
}

/// All ordered pairs `(i, j)`, `i != j`, of `subset` (default: every
/// entity), strongest first. `rng` only decides exact ties.
pub fn sorted_pairs<R: Rng>(
    a: &PreferenceMatrix,
    subset: Option<&[usize]>,
    rng: &mut R,
) -> Result<Vec<(usize, usize)>> {
    let items = resolve_items(a, subset)?;
    Ok(sorted_pairs_unchecked(a, &items, rng))
}

fn sorted_pairs_unchecked<R: Rng>(
    a: &PreferenceMatrix,
    items: &[usize],
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let n = items.len();
    let mut candidates = Vec::with_capacity(n * n.saturating_sub(1));
    for &i in items {
        for &j in items {
            if i != j {
                candidates.push(Candidate {
                    from: i,
                    to: j,
                    strength: a.get(i, j),
                    counter: a.get(j, i),
                    tiebreak: rng.random(),
                });
            }
        }
    }
    candidates.sort_unstable_by(strongest_first);
    candidates.into_iter().map(|c| (c.from, c.to)).collect()
}

/// Tideman's ranked pairs on `subset` (default: every entity).
///
/// Commits candidate edges strongest first, skipping any edge whose
/// reverse is already reachable, then ranks entities by out-degree in the
/// committed graph (descending, ties by larger index first).
///
/// # Examples
///
/// ```
/// use u_kemeny::{ranked_pairs, PreferenceMatrix};
/// use u_kemeny::random::create_rng;
///
/// let a = PreferenceMatrix::from_rows(&[
///     vec![0.0, 6.0, 9.0],
///     vec![7.0, 0.0, 11.0],
///     vec![13.0, 12.0, 0.0],
/// ])
/// .unwrap();
/// let outcome = ranked_pairs(&a, None, &mut create_rng(0)).unwrap();
/// assert_eq!(outcome.ranking.order, vec![2, 1, 0]);
/// assert_eq!(outcome.ranking.score, 32.0);
/// ```
pub fn ranked_pairs<R: Rng>(
    a: &PreferenceMatrix,
    subset: Option<&[usize]>,
    rng: &mut R,
) -> Result<RankedPairsOutcome> {
    let items = resolve_items(a, subset)?;
    Ok(ranked_pairs_unchecked(a, &items, rng))
}

pub(crate) fn ranked_pairs_unchecked<R: Rng>(
    a: &PreferenceMatrix,
    items: &[usize],
    rng: &mut R,
) -> RankedPairsOutcome {
    let pairs = sorted_pairs_unchecked(a, items, rng);
    let mut graph = CommitmentGraph::new(a.size(), items);
    for (i, j) in pairs {
        graph.try_commit(i, j);
    }

    let mut order = items.to_vec();
    order.sort_unstable_by(|&x, &y| {
        graph
            .out_degree(y)
            .cmp(&graph.out_degree(x))
            .then_with(|| y.cmp(&x))
    });
    let score = score_unchecked(a, &order);

    RankedPairsOutcome {
        ranking: Ranking::new(order, score),
        graph,
    }
}
