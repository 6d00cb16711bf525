//! Split-Merge local search.
//!
//! An anytime improvement loop on a single order: split it into two random
//! order-preserving halves, re-merge them optimally with
//! [`crate::merge()`], and continue from the merged order. The current order
//! is always one of the interleavings the merge considers, so the score
//! never decreases from step to step and the loop can be stopped after any
//! step.
//!
//! - [`split_merge()`]: fixed step count with a caller-supplied generator
//! - [`SplitMergeRunner`]: step/time budget, cancellation, score history

mod config;
mod runner;

pub use config::SplitMergeConfig;
pub use runner::{split_merge, SplitMergeResult, SplitMergeRunner};

pub(crate) use runner::polish;
