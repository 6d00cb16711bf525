//! Split-Merge configuration.

use crate::error::{KemenyError, Result};

/// Configuration for [`SplitMergeRunner`](super::SplitMergeRunner).
///
/// # Examples
///
/// ```
/// use u_kemeny::split_merge::SplitMergeConfig;
///
/// let config = SplitMergeConfig::default()
///     .with_max_steps(500)
///     .with_first_len(3)
///     .with_seed(7);
/// assert_eq!(config.max_steps, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitMergeConfig {
    /// Maximum number of split+merge steps.
    pub max_steps: usize,

    /// Size of the first part of every split. `None` means half the order.
    pub first_len: Option<usize>,

    /// Optional wall-clock limit in milliseconds, checked before each step.
    pub time_limit_ms: Option<u64>,

    /// Random seed. `None` uses [`DEFAULT_SEED`](crate::random::DEFAULT_SEED).
    pub seed: Option<u64>,
}

impl Default for SplitMergeConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            first_len: None,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl SplitMergeConfig {
    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    pub fn with_first_len(mut self, n: usize) -> Self {
        self.first_len = Some(n);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(KemenyError::InvalidConfig(
                "max_steps must be at least 1".into(),
            ));
        }
        if self.first_len == Some(0) {
            return Err(KemenyError::InvalidConfig(
                "first_len must be positive or None".into(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(KemenyError::InvalidConfig(
                "time_limit_ms must be positive or None".into(),
            ));
        }
        Ok(())
    }
}
