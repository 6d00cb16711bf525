//! Kemeny score evaluation and order bookkeeping.
//!
//! `K(A, order) = sum_{i<j} A[order[i]][order[j]]`: the total weight of
//! every preference that the order agrees with. It depends only on the
//! relative order of the entities, never on their absolute positions.

use crate::error::{KemenyError, Result};
use crate::matrix::PreferenceMatrix;

/// Evaluates `K(A, order)` in O(n^2).
///
/// # Errors
/// [`KemenyError::IndexOutOfBounds`] or [`KemenyError::DuplicateIndex`] if
/// `order` is not a duplicate-free sequence of valid indices.
///
/// # Examples
///
/// ```
/// use u_kemeny::{score, PreferenceMatrix};
///
/// let a = PreferenceMatrix::from_rows(&[
///     vec![0.0, 6.0, 9.0],
///     vec![7.0, 0.0, 11.0],
///     vec![13.0, 12.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(score(&a, &[2, 1, 0]).unwrap(), 32.0);
/// assert!(score(&a, &[0, 0]).is_err());
/// ```
pub fn score(a: &PreferenceMatrix, order: &[usize]) -> Result<f64> {
    validate_order(a, order)?;
    Ok(score_unchecked(a, order))
}

/// Evaluates `K(A, order)` without validating `order`.
///
/// # Panics
/// Panics if `order` references an index outside `a`.
pub(crate) fn score_unchecked(a: &PreferenceMatrix, order: &[usize]) -> f64 {
    let mut total = 0.0;
    for j in 1..order.len() {
        let later = order[j];
        for &earlier in &order[..j] {
            total += a.get(earlier, later);
        }
    }
    total
}

/// Checks that every index of `order` is in bounds and appears once.
pub fn validate_order(a: &PreferenceMatrix, order: &[usize]) -> Result<()> {
    let mut seen = vec![false; a.size()];
    for &i in order {
        a.check_index(i)?;
        if seen[i] {
            return Err(KemenyError::DuplicateIndex { index: i });
        }
        seen[i] = true;
    }
    Ok(())
}

/// The index set an operation runs on: `subset` if given, otherwise every
/// entity of `a`, validated as an order.
pub(crate) fn resolve_items(a: &PreferenceMatrix, subset: Option<&[usize]>) -> Result<Vec<usize>> {
    let items = match subset {
        Some(s) => s.to_vec(),
        None => a.indices(),
    };
    validate_order(a, &items)?;
    Ok(items)
}

/// Checks that `order` is a permutation of `set`.
pub fn validate_permutation_of(order: &[usize], set: &[usize]) -> Result<()> {
    let mut a = order.to_vec();
    let mut b = set.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    if let Some(w) = a.windows(2).find(|w| w[0] == w[1]) {
        return Err(KemenyError::DuplicateIndex { index: w[0] });
    }
    if a != b {
        return Err(KemenyError::NotAPermutation {
            order_len: order.len(),
            set_len: set.len(),
        });
    }
    Ok(())
}

/// Score lost by swapping each entity with its successor.
///
/// Entry `r` is `A[order[r]][order[r+1]] - A[order[r+1]][order[r]]`; the
/// last entry (no successor) is `0.0`. For a locally optimal order every
/// gap is non-negative.
pub fn adjacent_gaps(a: &PreferenceMatrix, order: &[usize]) -> Result<Vec<f64>> {
    validate_order(a, order)?;
    let mut gaps: Vec<f64> = order
        .windows(2)
        .map(|w| a.get(w[0], w[1]) - a.get(w[1], w[0]))
        .collect();
    if !order.is_empty() {
        gaps.push(0.0);
    }
    Ok(gaps)
}

/// Length of the longest common subsequence of `x` and `y`.
pub fn lcs_len<T: PartialEq>(x: &[T], y: &[T]) -> usize {
    let cols = y.len() + 1;
    let mut table = vec![0usize; (x.len() + 1) * cols];
    for i in 1..=x.len() {
        for j in 1..=y.len() {
            table[i * cols + j] = if x[i - 1] == y[j - 1] {
                table[(i - 1) * cols + j - 1] + 1
            } else {
                table[(i - 1) * cols + j].max(table[i * cols + j - 1])
            };
        }
    }
    table[x.len() * cols + y.len()]
}

/// Number of entities of `new` that left the relative order of `old`.
pub fn moved_count(new: &[usize], old: &[usize]) -> usize {
    new.len() - lcs_len(new, old)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> PreferenceMatrix {
        PreferenceMatrix::from_rows(&[
            vec![0.0, 6.0, 9.0],
            vec![7.0, 0.0, 11.0],
            vec![13.0, 12.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_score_known_values() {
        let a = small();
        assert_eq!(score(&a, &[0, 1, 2]).unwrap(), 6.0 + 9.0 + 11.0);
        assert_eq!(score(&a, &[2, 1, 0]).unwrap(), 32.0);
        assert_eq!(score(&a, &[]).unwrap(), 0.0);
        assert_eq!(score(&a, &[1]).unwrap(), 0.0);
    }

    #[test]
    fn test_score_subset() {
        let a = small();
        assert_eq!(score(&a, &[2, 0]).unwrap(), 13.0);
    }

    #[test]
    fn test_score_shape_errors() {
        let a = small();
        assert_eq!(
            score(&a, &[0, 3]),
            Err(KemenyError::IndexOutOfBounds { index: 3, size: 3 })
        );
        assert_eq!(
            score(&a, &[1, 0, 1]),
            Err(KemenyError::DuplicateIndex { index: 1 })
        );
    }

    #[test]
    fn test_validate_permutation_of() {
        assert!(validate_permutation_of(&[2, 0, 1], &[0, 1, 2]).is_ok());
        assert!(validate_permutation_of(&[], &[]).is_ok());
        assert!(matches!(
            validate_permutation_of(&[0, 1], &[0, 1, 2]),
            Err(KemenyError::NotAPermutation { .. })
        ));
        assert_eq!(
            validate_permutation_of(&[0, 0, 1], &[0, 1, 2]),
            Err(KemenyError::DuplicateIndex { index: 0 })
        );
    }

    #[test]
    fn test_adjacent_gaps() {
        let a = small();
        let gaps = adjacent_gaps(&a, &[2, 1, 0]).unwrap();
        assert_eq!(gaps, vec![12.0 - 11.0, 7.0 - 6.0, 0.0]);
        assert!(adjacent_gaps(&a, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_lcs_len() {
        assert_eq!(lcs_len(&[1, 2, 3, 4], &[1, 3, 2, 4]), 3);
        assert_eq!(lcs_len::<usize>(&[], &[1, 2]), 0);
        assert_eq!(lcs_len(&[5, 6], &[5, 6]), 2);
        assert_eq!(moved_count(&[3, 0, 1, 2], &[0, 1, 2, 3]), 1);
    }
}
