//! Board engine error types.

/// Errors from the reconciliation engine.
///
/// All of these indicate a malformed or inconsistent feed; they propagate
/// to the poller, which keeps the previous result and retries. Recoverable
/// conditions (an unresolved prediction reference, a trip past one of its
/// boundary stops) are handled locally and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// More than two stop visits survived the upstream stop filter
    #[error("trip {trip_id} has {count} stop visits, expected at most 2")]
    TooManyVisits { trip_id: String, count: usize },

    /// A stop visit carried neither an arrival nor a departure time
    #[error("stop visit {id} has neither arrival nor departure time")]
    MissingEventTime { id: String },

    /// A schedule referenced a trip absent from the included records
    #[error("no trip record for trip {0}")]
    UnknownTrip(String),
}
