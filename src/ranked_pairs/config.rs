//! Iterated ranked-pairs configuration.

use crate::error::{KemenyError, Result};

/// Configuration for [`RankedPairsRunner`](super::RankedPairsRunner).
///
/// Trial `t` uses the seed `base_seed + t`, so the set of trials (and the
/// winner) is the same whether they run sequentially or in parallel.
///
/// # Examples
///
/// ```
/// use u_kemeny::ranked_pairs::RankedPairsConfig;
///
/// let config = RankedPairsConfig::default()
///     .with_trials(20)
///     .with_base_seed(1000)
///     .with_parallel(false);
/// assert_eq!(config.trials, 20);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedPairsConfig {
    /// Number of independently seeded trials.
    pub trials: usize,

    /// Seed of trial 0.
    pub base_seed: u64,

    /// Whether to run trials on the rayon thread pool.
    pub parallel: bool,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked before every trial (sequential) or every batch of trials
    /// (parallel); a started trial always completes.
    pub time_limit_ms: Option<u64>,
}

impl Default for RankedPairsConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            base_seed: 0,
            parallel: true,
            time_limit_ms: None,
        }
    }
}

impl RankedPairsConfig {
    pub fn with_trials(mut self, n: usize) -> Self {
        self.trials = n;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(KemenyError::InvalidConfig(
                "trials must be at least 1".into(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RankedPairsConfig::default();
        assert_eq!(config.trials, 100);
        assert_eq!(config.base_seed, 0);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_trials() {
        assert!(RankedPairsConfig::default().with_trials(0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        assert!(RankedPairsConfig::default()
            .with_time_limit_ms(0)
            .validate()
            .is_err());
    }
}
