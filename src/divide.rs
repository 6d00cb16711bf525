//! Divide-and-conquer seed construction.
//!
//! Halves the index set at its midpoint, solves each half recursively,
//! merges the two partial orders optimally, and finishes with one
//! split+merge step to smooth out artifacts of the fixed midpoint. Index
//! sets below [`EXACT_THRESHOLD`] are brute forced. The result is a strong
//! starting point for further split+merge polishing.

use rand::Rng;

use crate::error::Result;
use crate::exact::solve_exact_unchecked;
use crate::matrix::PreferenceMatrix;
use crate::merge::MergeWorkspace;
use crate::score::resolve_items;
use crate::split_merge::polish;
use crate::types::Ranking;

/// Index sets smaller than this are solved exactly.
pub const EXACT_THRESHOLD: usize = 7;

/// Split+merge steps applied after every merge of two halves.
const POLISH_STEPS: usize = 1;

/// Approximately maximizes `K` over permutations of `subset` (default:
/// every entity).
///
/// The midpoint split is structural, not random; `rng` only drives the
/// polishing step, so equal seeds give equal results.
///
/// # Examples
///
/// ```
/// use u_kemeny::{optimize, solve_exact, PreferenceMatrix};
/// use u_kemeny::random::create_rng;
///
/// let a = PreferenceMatrix::sinusoid(6);
/// let mut rng = create_rng(0);
/// // Below the threshold the exact answer is returned.
/// assert_eq!(optimize(&a, None, &mut rng).unwrap(), solve_exact(&a, None).unwrap());
/// ```
pub fn optimize<R: Rng>(
    a: &PreferenceMatrix,
    subset: Option<&[usize]>,
    rng: &mut R,
) -> Result<Ranking> {
    let items = resolve_items(a, subset)?;
    let mut ws = MergeWorkspace::new();
    Ok(divide(a, &items, rng, &mut ws))
}

fn divide<R: Rng>(
    a: &PreferenceMatrix,
    items: &[usize],
    rng: &mut R,
    ws: &mut MergeWorkspace,
) -> Ranking {
    if items.len() < EXACT_THRESHOLD {
        return solve_exact_unchecked(a, items);
    }
    let (left, right) = items.split_at(items.len() / 2);
    let left = divide(a, left, rng, ws);
    let right = divide(a, right, rng, ws);
    let merged = ws.merge(a, &left.order, &right.order);
    polish(a, merged, POLISH_STEPS, None, rng, ws)
}
