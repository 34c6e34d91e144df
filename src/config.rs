//! Store configuration.

use crate::storage::clock::{Clock, SystemClock};
use std::sync::Arc;

/// Configuration for a [`MockRedis`](crate::MockRedis) instance.
///
/// # Example
///
/// ```
/// use mockkv::{MockRedis, StoreConfig};
/// use mockkv::storage::ManualClock;
/// use std::sync::Arc;
///
/// let clock = Arc::new(ManualClock::new(0));
/// let config = StoreConfig::default()
///     .with_clock(clock.clone())
///     .with_sweep_every(100);
/// let redis = MockRedis::with_config(config);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Time source for every TTL decision (default: the system clock)
    pub clock: Arc<dyn Clock>,

    /// Run an active expiry sweep every N commands (default: never, expiry is
    /// lazy only). Sweeping changes memory use, not observable results.
    pub sweep_every: Option<u32>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            sweep_every: None,
        }
    }
}

impl StoreConfig {
    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Enables an active expiry sweep every `commands` commands.
    pub fn with_sweep_every(mut self, commands: u32) -> Self {
        self.sweep_every = Some(commands.max(1));
        self
    }
}
