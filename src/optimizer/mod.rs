//! Anytime Kemeny optimizer.
//!
//! Builds a divide-and-conquer seed, then keeps polishing it with rounds of
//! split-merge steps until a round or wall-clock budget runs out. A round
//! is kept only if it strictly improves the best order so far, and each
//! improvement is logged together with how many entities moved.
//!
//! Several independent chains can polish the same seed in parallel; the
//! best chain wins and earlier chains win ties.

mod config;
mod runner;

pub use config::OptimizerConfig;
pub use runner::{OptimizerResult, OptimizerRunner};
