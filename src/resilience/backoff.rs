//! Backoff policy with jitter.

use crate::config::B2Config;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

/// Source of the uniform draws used for jitter.
pub trait JitterSource: Send + Sync {
    /// A value uniformly distributed in `[0, 1)`.
    fn draw(&self) -> f64;
}

/// Jitter drawn from a `StdRng`.
pub struct RandomJitter {
    rng: Mutex<StdRng>,
}

impl RandomJitter {
    /// Create a source seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a reproducible source.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::new()
    }
}

impl JitterSource for RandomJitter {
    fn draw(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }
}

impl std::fmt::Debug for RandomJitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomJitter").finish_non_exhaustive()
    }
}

/// Jitter that always returns the same draw.
///
/// A draw of `0.5` removes jitter entirely.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn draw(&self) -> f64 {
        self.0
    }
}

/// Near-exponential backoff.
///
/// Waits double (plus jitter) until they pass the additive threshold, after
/// which each step only adds jitter. Jitter is symmetric noise of at most
/// ±1% of the value it is applied to.
#[derive(Clone)]
pub struct BackoffPolicy {
    initial: Duration,
    additive_threshold: Duration,
    jitter: Arc<dyn JitterSource>,
}

impl BackoffPolicy {
    /// Create a policy.
    pub fn new(
        initial: Duration,
        additive_threshold: Duration,
        jitter: Arc<dyn JitterSource>,
    ) -> Self {
        Self {
            initial,
            additive_threshold,
            jitter,
        }
    }

    /// Create a policy from configuration with entropy-seeded jitter.
    pub fn from_config(config: &B2Config) -> Self {
        Self::new(
            config.initial_backoff,
            config.additive_threshold,
            Arc::new(RandomJitter::new()),
        )
    }

    /// Replace the jitter source.
    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Baseline a fresh retry loop starts from.
    pub fn initial(&self) -> Duration {
        self.initial
    }

    /// Threshold above which growth becomes additive.
    pub fn additive_threshold(&self) -> Duration {
        self.additive_threshold
    }

    /// Compute the wait following `previous`.
    pub fn next(&self, previous: Duration) -> Duration {
        if previous > self.additive_threshold {
            self.add_jitter(previous)
        } else {
            self.add_jitter(previous.saturating_mul(2))
        }
    }

    fn add_jitter(&self, d: Duration) -> Duration {
        let secs = d.as_secs_f64();
        let f = secs / 50.0;
        let jittered = secs + f * (self.jitter.draw() - 0.5);
        Duration::try_from_secs_f64(jittered.max(0.0)).unwrap_or(Duration::MAX)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from_config(&B2Config::default())
    }
}

impl std::fmt::Debug for BackoffPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackoffPolicy")
            .field("initial", &self.initial)
            .field("additive_threshold", &self.additive_threshold)
            .finish_non_exhaustive()
    }
}
