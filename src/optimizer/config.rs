//! Anytime optimizer configuration.

use crate::error::{KemenyError, Result};

/// Configuration for [`OptimizerRunner`](super::OptimizerRunner).
///
/// # Defaults
///
/// ```
/// use u_kemeny::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::default();
/// assert_eq!(config.steps_per_round, 10);
/// assert_eq!(config.chains, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_kemeny::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_rounds(500)
///     .with_time_limit_ms(2_000)
///     .with_chains(4)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Maximum polishing rounds per chain.
    pub rounds: usize,

    /// Split+merge steps per round. A round's result replaces the chain's
    /// best only if it scores strictly higher.
    pub steps_per_round: usize,

    /// Size of the first part of every split. `None` means half.
    pub first_len: Option<usize>,

    /// Optional wall-clock limit in milliseconds, shared by all chains and
    /// checked before every round.
    pub time_limit_ms: Option<u64>,

    /// Number of independent polishing chains started from the same seed
    /// order. With more than one chain, chain `c` draws from seed
    /// `seed + c + 1`; a single chain continues the seed's generator.
    pub chains: usize,

    /// Whether to run chains on the rayon thread pool.
    pub parallel: bool,

    /// Random seed. `None` uses [`DEFAULT_SEED`](crate::random::DEFAULT_SEED).
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            steps_per_round: 10,
            first_len: None,
            time_limit_ms: None,
            chains: 1,
            parallel: true,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    pub fn with_rounds(mut self, n: usize) -> Self {
        self.rounds = n;
        self
    }

    pub fn with_steps_per_round(mut self, n: usize) -> Self {
        self.steps_per_round = n;
        self
    }

    pub fn with_first_len(mut self, n: usize) -> Self {
        self.first_len = Some(n);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    ///
    /// The optimizer stops after approximately this many milliseconds,
    /// returning the best order found so far. The check happens before
    /// each round, so the runtime may exceed the limit by one round.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_chains(mut self, n: usize) -> Self {
        self.chains = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick answers: one chain, 200 rounds, 1 s.
    pub fn fast() -> Self {
        Self {
            rounds: 200,
            time_limit_ms: Some(1_000),
            ..Self::default()
        }
    }

    /// Preset balancing quality and time: two chains, 10 s.
    pub fn balanced() -> Self {
        Self {
            rounds: usize::MAX,
            time_limit_ms: Some(10_000),
            chains: 2,
            ..Self::default()
        }
    }

    /// Preset for final rankings: four chains, five minutes.
    pub fn quality() -> Self {
        Self {
            rounds: usize::MAX,
            time_limit_ms: Some(300_000),
            chains: 4,
            ..Self::default()
        }
    }

    /// Picks a preset from the number of entities.
    ///
    /// - `entity_count < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ entity_count < 300` → [`balanced()`](Self::balanced)
    /// - `entity_count ≥ 300` → [`quality()`](Self::quality)
    pub fn auto_select(entity_count: usize) -> Self {
        if entity_count < 50 {
            Self::fast()
        } else if entity_count < 300 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(KemenyError::InvalidConfig("rounds must be at least 1".into()));
        }
        if self.steps_per_round == 0 {
            return Err(KemenyError::InvalidConfig(
                "steps_per_round must be at least 1".into(),
            ));
        }
        if self.first_len == Some(0) {
            return Err(KemenyError::InvalidConfig(
                "first_len must be positive or None".into(),
            ));
        }
        if self.chains == 0 {
            return Err(KemenyError::InvalidConfig("chains must be at least 1".into()));
        }
        if self.time_limit_ms == Some(0) {
            return Err(KemenyError::InvalidConfig(
                "time_limit_ms must be positive or None".into(),
            ));
        }
        Ok(())
    }
}
