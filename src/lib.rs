//! Kemeny rank aggregation.
//!
//! Given a pairwise preference matrix `A`, where `A[i][j]` is the weight
//! of evidence that entity `i` should rank ahead of entity `j`, find a
//! total order maximizing the Kemeny score
//! `K(A, order) = sum_{i<j} A[order[i]][order[j]]`.
//!
//! The problem is NP-hard, so the crate offers a layered toolbox:
//!
//! - **Exact**: [`solve_exact`] enumerates every permutation. A
//!   correctness oracle for small index sets.
//! - **Merge**: [`merge()`] interleaves two fixed partial orders optimally by
//!   dynamic programming in `O(|L| * |M|)`.
//! - **Split-Merge**: [`split_merge()`] and [`split_merge::SplitMergeRunner`]
//!   split an order into random halves and re-merge them. The score never
//!   decreases.
//! - **Divide-and-conquer**: [`optimize`] halves, recurses, merges and
//!   polishes. Exact below [`divide::EXACT_THRESHOLD`] entities.
//! - **Ranked pairs**: [`ranked_pairs()`] and
//!   [`ranked_pairs::RankedPairsRunner`], Tideman's method repeated over
//!   random tie-breaks.
//! - **Optimizer**: [`optimizer::OptimizerRunner`] chains the seed and the
//!   polishing loop under a time budget.
//!
//! Every randomized operation takes a caller-supplied generator or seed
//! (see [`random`]), so equal seeds always reproduce equal results.
//!
//! # Example
//!
//! ```
//! use u_kemeny::{merge, score, PreferenceMatrix};
//!
//! let a = PreferenceMatrix::from_rows(&[
//!     vec![0.0, 6.0, 9.0],
//!     vec![7.0, 0.0, 11.0],
//!     vec![13.0, 12.0, 0.0],
//! ])
//! .unwrap();
//! let merged = merge(&a, &[1, 0], &[2]).unwrap();
//! assert_eq!(merged.order, vec![2, 1, 0]);
//! assert_eq!(merged.score, score(&a, &[2, 1, 0]).unwrap());
//! ```

mod budget;
pub mod divide;
pub mod error;
pub mod exact;
pub mod matrix;
pub mod merge;
pub mod optimizer;
pub mod random;
pub mod ranked_pairs;
pub mod score;
pub mod split;
pub mod split_merge;
pub mod types;

pub use divide::optimize;
pub use error::{KemenyError, Result};
pub use exact::solve_exact;
pub use matrix::PreferenceMatrix;
pub use merge::merge;
pub use ranked_pairs::ranked_pairs;
pub use score::score;
pub use split::{random_nontrivial_split, random_split, Split};
pub use split_merge::split_merge;
pub use types::Ranking;
