//! Error taxonomy for the simulation engine.
//!
//! Two families, matching where in a run they can occur:
//!
//! - **Validation errors** are detected at the request boundary, before a
//!   single task is spawned. They are fatal to that generation request and
//!   never retried internally.
//! - **Generation errors** are raised inside a channel task and surfaced
//!   through the orchestrator's error queue. A failed channel fails the
//!   whole member; a failed member fails the whole aggregate, since
//!   partially-populated race telemetry is not meaningful to persist.
//!
//! Known limitation: when several channel tasks fail concurrently, only the
//! FIRST error drained from the error queue is reported. The remaining
//! errors are discarded. Retry policy belongs to the caller.

use crate::alarm::AlarmDirection;
use thiserror::Error;

/// Every way a generation request can fail.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Simulation duration must be a positive number of minutes.
    #[error("invalid duration: {0} minutes (must be > 0)")]
    InvalidDuration(u32),

    /// Sample rate is not one of the supported intervals.
    #[error("unsupported sample rate: {0} ms (expected 1, 10, 100 or 1000)")]
    UnsupportedSampleRate(u32),

    /// Playback-rate multiplier is not one of the supported factors.
    #[error("unsupported rate multiplier: x{0} (expected 1, 2, 4, 8, 10 or 20)")]
    UnsupportedRateMultiplier(u32),

    /// `force_alarm` and `no_alarms` are mutually exclusive intents.
    #[error("member {0}: force_alarm and no_alarms cannot both be set")]
    ConflictingAlarmFlags(String),

    /// A weighted draw was attempted over an empty or zero-weight table.
    #[error("weighted draw over an empty or zero-weight candidate table")]
    EmptyCandidateTable,

    /// The ramp ran out of samples before crossing the alarm level.
    /// Should not occur with the registry's contract thresholds; surfaced
    /// rather than silently ignored when it does.
    #[error("ramp toward {direction} alarm never reached level {level} before the series ended")]
    RampDidNotConverge {
        direction: AlarmDirection,
        level: f64,
    },

    /// Sample timestamp arithmetic overflowed chrono's representable range.
    #[error("timestamp construction overflowed at sample {sequence}")]
    TimestampOverflow { sequence: u64 },

    /// A worker task panicked or was torn down before completing.
    #[error("worker task failed: {0}")]
    TaskFailed(String),
}

impl SimulationError {
    /// True for errors a caller could have avoided by fixing the request.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDuration(_)
                | Self::UnsupportedSampleRate(_)
                | Self::UnsupportedRateMultiplier(_)
                | Self::ConflictingAlarmFlags(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_classification() {
        assert!(SimulationError::InvalidDuration(0).is_validation());
        assert!(SimulationError::UnsupportedSampleRate(7).is_validation());
        assert!(!SimulationError::EmptyCandidateTable.is_validation());
        assert!(!SimulationError::TimestampOverflow { sequence: 3 }.is_validation());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = SimulationError::UnsupportedSampleRate(250);
        assert!(err.to_string().contains("250"));

        let err = SimulationError::RampDidNotConverge {
            direction: AlarmDirection::Low,
            level: 18.0,
        };
        assert!(err.to_string().contains("low"));
        assert!(err.to_string().contains("18"));
    }
}
