//! Random order-preserving bipartitions.
//!
//! A split of an order is a pair of disjoint subsequences that together
//! cover it. Any interleaving of the two parts that respects both internal
//! orders is a valid permutation, and the original order is one of them,
//! which is what makes [`crate::merge::merge`] of a split never worse than
//! the order it came from.

use rand::seq::index;
use rand::Rng;

/// Two disjoint subsequences of an order, each in original relative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub first: Vec<usize>,
    pub second: Vec<usize>,
}

impl Split {
    /// `true` when one of the parts is empty.
    pub fn is_trivial(&self) -> bool {
        self.first.is_empty() || self.second.is_empty()
    }
}

/// Splits `order` uniformly at random.
///
/// `first` receives exactly `first_len` elements (default `len / 2`,
/// clamped to `len`); every subset of that size is equally likely.
pub fn random_split<R: Rng>(order: &[usize], first_len: Option<usize>, rng: &mut R) -> Split {
    let n = order.len();
    let k = first_len.unwrap_or(n / 2).min(n);

    let mut marked = vec![false; n];
    for p in index::sample(rng, n, k) {
        marked[p] = true;
    }

    let mut first = Vec::with_capacity(k);
    let mut second = Vec::with_capacity(n - k);
    for (&item, &m) in order.iter().zip(&marked) {
        if m {
            first.push(item);
        } else {
            second.push(item);
        }
    }
    Split { first, second }
}

/// Like [`random_split`], but both parts are non-empty whenever
/// `order.len() >= 2`.
///
/// `first_len` is clamped into `1..=len-1`, so a single draw always
/// succeeds. For shorter inputs no bipartition exists and the input is
/// returned whole as `first` with an empty `second`.
pub fn random_nontrivial_split<R: Rng>(
    order: &[usize],
    first_len: Option<usize>,
    rng: &mut R,
) -> Split {
    let n = order.len();
    if n < 2 {
        return Split {
            first: order.to_vec(),
            second: Vec::new(),
        };
    }
    let k = first_len.unwrap_or(n / 2).clamp(1, n - 1);
    random_split(order, Some(k), rng)
}
