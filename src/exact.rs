//! Exact solver by exhaustive enumeration.
//!
//! Visits every permutation of the index set in lexicographic order of
//! positions, starting from the input order itself, and keeps the first
//! permutation that reaches the maximum score. Cost is `O(n! * n^2)`, so
//! this is only practical up to roughly ten entities. It serves both as a
//! correctness oracle and as the base case of [`crate::divide::optimize`].

use crate::error::Result;
use crate::matrix::PreferenceMatrix;
use crate::score::{resolve_items, score_unchecked};
use crate::types::Ranking;

/// Index-set size above which a warning is logged before brute force.
const FACTORIAL_WARN_SIZE: usize = 11;

/// Finds a permutation of `subset` (default: every entity) maximizing `K`.
///
/// Ties are broken in favor of the permutation enumerated first.
///
/// # Examples
///
/// ```
/// use u_kemeny::{solve_exact, PreferenceMatrix};
///
/// let a = PreferenceMatrix::from_rows(&[
///     vec![0.0, 6.0, 9.0],
///     vec![7.0, 0.0, 11.0],
///     vec![13.0, 12.0, 0.0],
/// ])
/// .unwrap();
/// let best = solve_exact(&a, None).unwrap();
/// assert_eq!(best.order, vec![2, 1, 0]);
/// assert_eq!(best.score, 32.0);
/// ```
pub fn solve_exact(a: &PreferenceMatrix, subset: Option<&[usize]>) -> Result<Ranking> {
    let items = resolve_items(a, subset)?;
    Ok(solve_exact_unchecked(a, &items))
}

pub(crate) fn solve_exact_unchecked(a: &PreferenceMatrix, items: &[usize]) -> Ranking {
    let n = items.len();
    if n == 0 {
        return Ranking::empty();
    }
    if n >= FACTORIAL_WARN_SIZE {
        tracing::warn!(n, "exhaustive search over a large index set");
    }

    let mut positions: Vec<usize> = (0..n).collect();
    let mut candidate = items.to_vec();
    let mut best = Ranking::new(candidate.clone(), score_unchecked(a, &candidate));

    while next_permutation(&mut positions) {
        for (slot, &p) in candidate.iter_mut().zip(&positions) {
            *slot = items[p];
        }
        let s = score_unchecked(a, &candidate);
        if s > best.score {
            best.order.clone_from(&candidate);
            best.score = s;
        }
    }

    best
}

/// Advances `perm` to the next permutation in lexicographic order.
/// Returns `false` (leaving `perm` untouched) at the last permutation.
fn next_permutation(perm: &mut [usize]) -> bool {
    let n = perm.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}
