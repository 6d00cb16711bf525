//! Optimal merge of two ordered sequences.
//!
//! Given disjoint orders `L` and `M`, [`merge`] returns the interleaving of
//! the two (each keeping its internal relative order) with the largest
//! Kemeny score among *all* interleavings.
//!
//! # Algorithm
//!
//! Dynamic programming over `B[i][j]`, the best score obtainable by merging
//! `L[..i]` with `M[..j]`. The last element of such a merge is either
//! `L[i-1]` or `M[j-1]`; placing it last adds the weight of every already
//! placed element's preference over it:
//!
//! ```text
//! B[i][j] = max( B[i-1][j] + sum_{x in L[..i-1] ++ M[..j]} A[x][L[i-1]],
//!                B[i][j-1] + sum_{y in L[..i] ++ M[..j-1]} A[y][M[j-1]] )
//! ```
//!
//! with `B[0][j] = K(M[..j])` and `B[i][0] = K(L[..i])`. The inbound sums
//! are carried as running prefix sums, so after an `O(|L|^2 + |M|^2)` setup
//! every cell costs O(1). A parallel choice table records which branch won
//! and the merged order is recovered by backtracking from `(|L|, |M|)`.
//!
//! Both tables are flat `(|L|+1) * (|M|+1)` arrays owned by a
//! `MergeWorkspace` that search loops reuse across steps.

use crate::error::Result;
use crate::matrix::PreferenceMatrix;
use crate::score::{score_unchecked, validate_order};
use crate::types::Ranking;

/// Which sequence supplied the last element of a DP cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Origin,
    LastFromL,
    LastFromM,
}

/// Reusable buffers for the merge tables.
#[derive(Debug, Default)]
pub(crate) struct MergeWorkspace {
    best: Vec<f64>,
    choice: Vec<Choice>,
    into_m: Vec<f64>,
}

impl MergeWorkspace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Merges `l` and `m` optimally. Inputs must already be validated as
    /// disjoint, in-bounds orders.
    pub(crate) fn merge(&mut self, a: &PreferenceMatrix, l: &[usize], m: &[usize]) -> Ranking {
        if l.is_empty() {
            return Ranking::new(m.to_vec(), score_unchecked(a, m));
        }
        if m.is_empty() {
            return Ranking::new(l.to_vec(), score_unchecked(a, l));
        }

        let (nl, nm) = (l.len(), m.len());
        let cols = nm + 1;
        let cells = (nl + 1) * cols;

        self.best.clear();
        self.best.resize(cells, 0.0);
        self.choice.clear();
        self.choice.resize(cells, Choice::Origin);

        // Inbound weight from earlier elements of the same sequence.
        let l_within = inbound_within(a, l);
        let m_within = inbound_within(a, m);

        // First row: M only.
        for j in 1..=nm {
            self.best[j] = self.best[j - 1] + m_within[j];
            self.choice[j] = Choice::LastFromM;
        }

        // into_m[j] = sum_{x in L[..i]} A[x][M[j-1]], grown one row at a time.
        self.into_m.clear();
        self.into_m.resize(cols, 0.0);

        for i in 1..=nl {
            let li = l[i - 1];
            let row = i * cols;
            let prev = (i - 1) * cols;

            // First column: L only.
            self.best[row] = self.best[prev] + l_within[i];
            self.choice[row] = Choice::LastFromL;

            for j in 1..=nm {
                self.into_m[j] += a.get(li, m[j - 1]);
            }

            // into_l = sum_{y in M[..j]} A[y][L[i-1]], grown along the row.
            let mut into_l = 0.0;
            for j in 1..=nm {
                let mj = m[j - 1];
                into_l += a.get(mj, li);

                let last_l = self.best[prev + j] + l_within[i] + into_l;
                let last_m = self.best[row + j - 1] + self.into_m[j] + m_within[j];

                if last_l > last_m {
                    self.best[row + j] = last_l;
                    self.choice[row + j] = Choice::LastFromL;
                } else {
                    self.best[row + j] = last_m;
                    self.choice[row + j] = Choice::LastFromM;
                }
            }
        }

        let order = self.backtrack(l, m);
        Ranking::new(order, self.best[nl * cols + nm])
    }

    fn backtrack(&self, l: &[usize], m: &[usize]) -> Vec<usize> {
        let cols = m.len() + 1;
        let mut merged = Vec::with_capacity(l.len() + m.len());
        let (mut i, mut j) = (l.len(), m.len());
        while i > 0 || j > 0 {
            match self.choice[i * cols + j] {
                Choice::LastFromL => {
                    merged.push(l[i - 1]);
                    i -= 1;
                }
                Choice::LastFromM => {
                    merged.push(m[j - 1]);
                    j -= 1;
                }
                Choice::Origin => unreachable!("origin is only reachable at (0, 0)"),
            }
        }
        merged.reverse();
        merged
    }
}

/// `w[k] = sum_{x in seq[..k-1]} A[x][seq[k-1]]` for `k` in `1..=len`;
/// `w[0] = 0`.
fn inbound_within(a: &PreferenceMatrix, seq: &[usize]) -> Vec<f64> {
    let mut w = vec![0.0; seq.len() + 1];
    for k in 1..=seq.len() {
        let target = seq[k - 1];
        w[k] = seq[..k - 1].iter().map(|&x| a.get(x, target)).sum();
    }
    w
}

/// Returns the best-scoring interleaving of the disjoint orders `l` and `m`.
///
/// If either input is empty the other is returned unchanged with its own
/// score; two empty inputs give an empty order with score 0.
///
/// # Errors
/// A shape error if the inputs reference out-of-bounds indices, repeat an
/// index, or share an index.
///
/// # Examples
///
/// ```
/// use u_kemeny::{merge, PreferenceMatrix};
///
/// let a = PreferenceMatrix::from_rows(&[
///     vec![0.0, 6.0, 9.0],
///     vec![7.0, 0.0, 11.0],
///     vec![13.0, 12.0, 0.0],
/// ])
/// .unwrap();
/// let merged = merge(&a, &[1, 0], &[2]).unwrap();
/// assert_eq!(merged.order, vec![2, 1, 0]);
/// assert_eq!(merged.score, 32.0);
/// ```
pub fn merge(a: &PreferenceMatrix, l: &[usize], m: &[usize]) -> Result<Ranking> {
    let combined: Vec<usize> = l.iter().chain(m).copied().collect();
    validate_order(a, &combined)?;
    Ok(MergeWorkspace::new().merge(a, l, m))
}
