// config.rs - Engine configuration, fixed for the lifetime of an engine

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rows of a contribution calendar (one per weekday).
pub const DEFAULT_ROWS: usize = 7;
/// Columns of a contribution calendar (one per week of a year).
pub const DEFAULT_COLS: usize = 53;
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 100;
pub const DEFAULT_MAX_GENERATIONS: u64 = 1000;
pub const DEFAULT_LIVE_PROBABILITY: f64 = 0.3;

/// Configuration accepted by [`Engine::new`](crate::engine::Engine::new).
///
/// Every field has a default, so a host can deserialize a partial document:
///
/// ```
/// use calendar_engine::config::EngineConfig;
///
/// let config = EngineConfig { cols: 20, ..EngineConfig::default() };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grid height.
    pub rows: usize,

    /// Grid width.
    pub cols: usize,

    /// Minimum real time between two committed steps.
    pub step_interval_ms: u64,

    /// The scheduler stops once this many generations have been committed
    /// (0 = unlimited).
    pub max_generations: u64,

    /// Chance of a cell being live in a freshly randomized grid.
    pub live_probability: f64,

    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            max_generations: DEFAULT_MAX_GENERATIONS,
            live_probability: DEFAULT_LIVE_PROBABILITY,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Check the configuration before an engine is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.cols == 0 {
            return Err(ConfigError::ZeroCols);
        }
        if !self.live_probability.is_finite() || !(0.0..=1.0).contains(&self.live_probability) {
            return Err(ConfigError::InvalidProbability {
                value: self.live_probability,
            });
        }
        Ok(())
    }

    pub const fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}
