//! Rate limiting: retry backoff and the politeness pause after each fetch.

use crate::config::Config;
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use tracing::debug;

/// Time-delay capability; tests swap in a recorder instead of sleeping.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Retry and politeness timing for the page fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayPolicy {
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Retry `n` (0-indexed) is preceded by `2^n` units
    pub backoff_unit: Duration,
    pub politeness_min: Duration,
    pub politeness_max: Duration,
}

impl DelayPolicy {
    /// Builds the policy from configuration, swapping inverted politeness bounds.
    pub fn from_config(config: &Config) -> Self {
        let (min, max) = if config.delay_min_ms <= config.delay_max_ms {
            (config.delay_min_ms, config.delay_max_ms)
        } else {
            (config.delay_max_ms, config.delay_min_ms)
        };

        Self {
            max_retries: config.max_retries,
            backoff_unit: Duration::from_millis(config.backoff_unit_ms),
            politeness_min: Duration::from_millis(min),
            politeness_max: Duration::from_millis(max),
        }
    }

    /// A policy with no waiting at all, for tests and local mirrors.
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff_unit: Duration::ZERO,
            politeness_min: Duration::ZERO,
            politeness_max: Duration::ZERO,
        }
    }

    /// Wait before retry `attempt` (0-indexed): 1, 2, 4, ... units.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_unit.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Uniformly sampled pause taken after every successful fetch.
    pub fn politeness(&self) -> Duration {
        let min = u64::try_from(self.politeness_min.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.politeness_max.as_millis()).unwrap_or(u64::MAX);
        let millis = if max > min { rand::rng().random_range(min..=max) } else { min };

        debug!("Politeness delay {}ms", millis);
        Duration::from_millis(millis)
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
