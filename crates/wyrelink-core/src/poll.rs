//! Settlement-wait pacing: bounded attempts, backoff, cooperative cancellation.
//!
//! The provider only moves a transfer to a terminal status on its own clock,
//! so the polling loop must be bounded on ours: a maximum lookup count, an
//! optional wall-clock deadline, and a cancel token the caller can flip at
//! any time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Backoff strategy between settlement lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between lookups.
    Fixed {
        /// Delay between lookups.
        delay: Duration,
    },
    /// Uses an exponential delay between lookups.
    ///
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent lookup.
        factor: f64,
        /// The maximum duration to wait between lookups.
        max: Duration,
        /// Whether to apply random jitter (+/- 50%) to the delay.
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Fixed {
            delay: Duration::from_secs(2),
        }
    }
}

impl Backoff {
    /// Calculate the delay for a given lookup attempt (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let scale = factor.powi(attempt as i32);
                let seconds = base.as_secs_f64() * scale;
                let capped_seconds = seconds.min(max.as_secs_f64());

                let mut delay = Duration::from_secs_f64(capped_seconds);

                // Jitter: +/- 50% of the delay
                if jitter {
                    let jitter_ms = (delay.as_millis() as f64 * 0.5) as u64;
                    let random_offset = fastrand::u64(0..=(jitter_ms * 2));
                    let total_ms =
                        delay.as_millis() as i64 + (random_offset as i64 - jitter_ms as i64);
                    delay = Duration::from_millis(total_ms.max(0) as u64);
                }

                delay
            }
        }
    }
}

/// Bounds for a settlement wait.
///
/// Total lookups = `max_attempts`; the wait fails once attempts are
/// exhausted or the deadline elapses, whichever comes first.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Maximum number of transfer lookups before giving up.
    pub max_attempts: u32,
    /// Wall-clock ceiling for the whole wait, measured from the first lookup.
    pub deadline: Option<Duration>,
    /// Backoff strategy between lookups.
    pub backoff: Backoff,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 150,
            deadline: Some(Duration::from_secs(600)),
            backoff: Backoff::default(),
        }
    }
}

impl PollPolicy {
    /// Fixed-delay policy with no wall-clock deadline.
    pub fn fixed(delay: Duration, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            deadline: None,
            backoff: Backoff::Fixed { delay },
        }
    }

    /// Zero-delay policy, useful for scripted-transport tests.
    pub fn no_delay(max_attempts: u32) -> Self {
        Self::fixed(Duration::ZERO, max_attempts)
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Calculate the delay after a given lookup attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}

/// Cooperative cancellation flag shared between a caller and a settlement
/// wait. Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
