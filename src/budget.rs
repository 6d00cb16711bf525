//! Stop conditions shared by the anytime runners.
//!
//! Runners poll a [`Budget`] once per unit of work (one split+merge step,
//! one ranked-pairs trial, one polishing round) and never in the middle of
//! one, so a stopped run always returns a fully evaluated best-so-far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a runner stopped before exhausting its step budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stop {
    Cancelled,
    TimedOut,
}

/// Wall-clock limit plus optional external cancellation flag.
#[derive(Debug, Clone)]
pub(crate) struct Budget {
    start: Instant,
    limit: Option<Duration>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Budget {
    pub(crate) fn new(time_limit_ms: Option<u64>, cancel: Option<Arc<AtomicBool>>) -> Self {
        Self {
            start: Instant::now(),
            limit: time_limit_ms.map(Duration::from_millis),
            cancel,
        }
    }

    /// Returns the reason to stop, if any. Cancellation wins over timeout.
    pub(crate) fn check(&self) -> Option<Stop> {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(Stop::Cancelled);
            }
        }
        match self.limit {
            Some(limit) if self.start.elapsed() >= limit => Some(Stop::TimedOut),
            _ => None,
        }
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
