//! Ranked pairs (Tideman).
//!
//! A voting-theoretic alternative to split-merge search. Candidate edges
//! `(i, j)` are ordered by strength `A[i][j]` (descending), then by
//! counter-strength `A[j][i]` (ascending), then by a random tiebreak, and
//! committed greedily into a [`CommitmentGraph`] unless they would close a
//! cycle. Entities are finally ranked by how many others they are
//! committed ahead of.
//!
//! [`RankedPairsRunner`] repeats the procedure over many seeds and keeps
//! the highest Kemeny score, which removes most tie-break artifacts.
//!
//! # References
//!
//! - Tideman, T. N. (1987), "Independence of Clones as a Criterion for
//!   Voting Rules", *Social Choice and Welfare* 4(3), 185-206.

mod config;
mod graph;
mod runner;
mod trial;

pub use config::RankedPairsConfig;
pub use graph::CommitmentGraph;
pub use runner::{RankedPairsResult, RankedPairsRunner};
pub use trial::{ranked_pairs, sorted_pairs, RankedPairsOutcome};
