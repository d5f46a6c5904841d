//! Board configuration.

use chrono::Duration;

/// Configuration parameters for one departure board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Maximum number of departures to publish.
    pub trips_limit: usize,

    /// Minimum lead time in seconds; trips departing sooner than this are
    /// suppressed from results.
    pub offset_secs: i64,
}

impl BoardConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(trips_limit: usize, offset_secs: i64) -> Self {
        Self {
            trips_limit,
            offset_secs,
        }
    }

    /// Returns the offset as a Duration.
    pub fn offset(&self) -> Duration {
        Duration::seconds(self.offset_secs)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            trips_limit: 2,
            offset_secs: 0,
        }
    }
}
