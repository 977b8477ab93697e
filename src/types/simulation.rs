//! Simulation and member descriptors, plus the closed enums for the
//! supported sample rates and playback multipliers.
//!
//! Descriptors are supplied by the caller and read-only to the engine.
//! Validation happens here, at the boundary — the generation internals
//! assume they only ever see descriptors that passed `validate()`.

use crate::error::SimulationError;
use serde::{Deserialize, Serialize};

/// Supported sampling intervals.
///
/// Raw millisecond values arrive from callers; anything outside this set
/// is a validation error, never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleRate {
    Ms1,
    Ms10,
    Ms100,
    Ms1000,
}

impl SampleRate {
    /// Map a raw interval in milliseconds to a known rate.
    ///
    /// # Errors
    /// `UnsupportedSampleRate` when the value is not 1, 10, 100 or 1000.
    pub const fn from_millis(ms: u32) -> Result<Self, SimulationError> {
        match ms {
            1 => Ok(Self::Ms1),
            10 => Ok(Self::Ms10),
            100 => Ok(Self::Ms100),
            1000 => Ok(Self::Ms1000),
            other => Err(SimulationError::UnsupportedSampleRate(other)),
        }
    }

    /// Interval between consecutive samples, in milliseconds.
    #[must_use]
    pub const fn interval_ms(self) -> u64 {
        match self {
            Self::Ms1 => 1,
            Self::Ms10 => 10,
            Self::Ms100 => 100,
            Self::Ms1000 => 1000,
        }
    }
}

/// Playback-rate multiplier for external pacing.
///
/// Carried through for downstream transmission layers; the engine never
/// consults it — series content is identical at every multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateMultiplier {
    X1,
    X2,
    X4,
    X8,
    X10,
    X20,
}

impl RateMultiplier {
    /// Map a raw factor to a known multiplier.
    ///
    /// # Errors
    /// `UnsupportedRateMultiplier` for anything outside {1,2,4,8,10,20}.
    pub const fn from_factor(factor: u32) -> Result<Self, SimulationError> {
        match factor {
            1 => Ok(Self::X1),
            2 => Ok(Self::X2),
            4 => Ok(Self::X4),
            8 => Ok(Self::X8),
            10 => Ok(Self::X10),
            20 => Ok(Self::X20),
            other => Err(SimulationError::UnsupportedRateMultiplier(other)),
        }
    }

    #[must_use]
    pub const fn factor(self) -> u32 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X10 => 10,
            Self::X20 => 20,
        }
    }
}

/// One simulated session: the time window, sampling parameters, and event
/// metadata shared by every participating member. Immutable once
/// generation starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    /// Opaque identifier, stamped onto every sample
    pub id: String,
    /// Simulated window length in minutes (> 0)
    pub duration_minutes: u32,
    /// Interval between samples in ms; one of {1, 10, 100, 1000}
    pub sample_rate_ms: u32,
    /// External pacing factor; one of {1, 2, 4, 8, 10, 20}
    pub rate_multiplier: u32,
    /// Race name (event metadata, pass-through)
    pub race: String,
    /// Track name (event metadata, pass-through)
    pub track: String,
}

impl Simulation {
    /// Boundary validation of the descriptor.
    ///
    /// # Errors
    /// `InvalidDuration`, `UnsupportedSampleRate` or
    /// `UnsupportedRateMultiplier` when a field is out of contract.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.duration_minutes == 0 {
            return Err(SimulationError::InvalidDuration(self.duration_minutes));
        }
        SampleRate::from_millis(self.sample_rate_ms)?;
        RateMultiplier::from_factor(self.rate_multiplier)?;
        Ok(())
    }

    /// Number of samples in a full series for this simulation's window.
    ///
    /// # Errors
    /// `UnsupportedSampleRate` when the raw rate is out of contract.
    pub fn datum_count(&self) -> Result<usize, SimulationError> {
        let rate = SampleRate::from_millis(self.sample_rate_ms)?;
        let count = u64::from(self.duration_minutes) * 60_000 / rate.interval_ms();
        Ok(count as usize)
    }
}

/// One participating vehicle entry within a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationMember {
    /// Opaque identifier, stamped onto every sample
    pub id: String,
    /// Owning simulation id
    pub simulation_id: String,
    /// Team / entry identity
    pub team: String,
    /// Driver identity
    pub driver: String,
    /// Car number as displayed on the entry
    pub car_number: u32,
    /// Guarantee an alarm in this member's run
    pub force_alarm: bool,
    /// Suppress alarms in this member's run
    pub no_alarms: bool,
}

impl SimulationMember {
    /// Boundary validation: `force_alarm` and `no_alarms` are mutually
    /// exclusive intents and must never both be set.
    ///
    /// # Errors
    /// `ConflictingAlarmFlags` naming the member.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.force_alarm && self.no_alarms {
            return Err(SimulationError::ConflictingAlarmFlags(self.id.clone()));
        }
        Ok(())
    }
}
