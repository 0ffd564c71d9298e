//! Greedy scheduler configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs of the greedy engine.
///
/// # Example
///
/// ```
/// use oven_batch::scheduler::GreedyConfig;
///
/// let config = GreedyConfig::default().with_tick(30).with_max_time_window(2);
/// assert_eq!(config.tick, 30);
/// assert_eq!(config.max_time_window, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreedyConfig {
    /// Simulation step in seconds.
    pub tick: i64,
    /// How many ticks a batch start may slip to admit more jobs.
    pub max_time_window: u32,
}

impl GreedyConfig {
    /// Creates the default configuration: one-minute ticks, one tick of slip.
    pub fn new() -> Self {
        Self {
            tick: 60,
            max_time_window: 1,
        }
    }

    /// Sets the simulation step (s). Values below 1 are raised to 1.
    pub fn with_tick(mut self, tick: i64) -> Self {
        self.tick = tick.max(1);
        self
    }

    /// Sets the look-ahead limit of the batch filler in ticks.
    pub fn with_max_time_window(mut self, ticks: u32) -> Self {
        self.max_time_window = ticks;
        self
    }
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self::new()
    }
}
