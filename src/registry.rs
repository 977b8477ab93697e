//! Channel Parameter Registry
//!
//! Fixed table of the 19 telemetry channels a simulated entry reports,
//! with each channel's measurement unit, nominal operating range, and
//! alarm thresholds. The table is part of the external contract:
//! downstream alarm-counting analytics reproduce these exact boundaries,
//! so the numbers here must not drift.
//!
//! Lookup is an exhaustive match over the closed [`Channel`] enum. There
//! is no failure path — an unknown channel cannot be constructed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One monitored physical quantity on a simulated entry.
///
/// The enum is closed on purpose: generation fans out over
/// [`Channel::ALL`], and adding a channel means updating the parameter
/// table and the alarm candidate table in the same change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    BrakeTempFl,
    BrakeTempFr,
    BrakeTempRl,
    BrakeTempRr,
    TirePressureFl,
    TirePressureFr,
    TirePressureRl,
    TirePressureRr,
    OilPressure,
    OilTemp,
    CoolantTemp,
    EngineRpm,
    FuelConsumed,
    FuelFlow,
    EnergyStorageLevel,
    EnergyStorageTemp,
    MotorOutputFront,
    MotorOutputRear,
    Speed,
}

/// Per-channel constants: unit, nominal range, and alarm thresholds.
///
/// `alarm_high`/`alarm_low` are 0.0 when that alarm direction is not
/// applicable for the channel (e.g. there is no low-fuel-consumed alarm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelParameters {
    /// Measurement unit, e.g. "psi" or "°C"
    pub unit: &'static str,
    /// Nominal range lower bound
    pub range_low: f64,
    /// Nominal range upper bound
    pub range_high: f64,
    /// High-alarm threshold (0.0 when unused)
    pub alarm_high: f64,
    /// Low-alarm threshold (0.0 when unused)
    pub alarm_low: f64,
}

impl ChannelParameters {
    const fn new(
        unit: &'static str,
        range_low: f64,
        range_high: f64,
        alarm_high: f64,
        alarm_low: f64,
    ) -> Self {
        Self {
            unit,
            range_low,
            range_high,
            alarm_high,
            alarm_low,
        }
    }

    /// Midpoint of the nominal range, the ramp transform's reference point.
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.range_low + self.range_high) / 2.0
    }
}

impl Channel {
    /// Every channel, in the fixed order generation fans out over.
    pub const ALL: [Self; 19] = [
        Self::BrakeTempFl,
        Self::BrakeTempFr,
        Self::BrakeTempRl,
        Self::BrakeTempRr,
        Self::TirePressureFl,
        Self::TirePressureFr,
        Self::TirePressureRl,
        Self::TirePressureRr,
        Self::OilPressure,
        Self::OilTemp,
        Self::CoolantTemp,
        Self::EngineRpm,
        Self::FuelConsumed,
        Self::FuelFlow,
        Self::EnergyStorageLevel,
        Self::EnergyStorageTemp,
        Self::MotorOutputFront,
        Self::MotorOutputRear,
        Self::Speed,
    ];

    /// Canonical string id, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BrakeTempFl => "brake_temp_fl",
            Self::BrakeTempFr => "brake_temp_fr",
            Self::BrakeTempRl => "brake_temp_rl",
            Self::BrakeTempRr => "brake_temp_rr",
            Self::TirePressureFl => "tire_pressure_fl",
            Self::TirePressureFr => "tire_pressure_fr",
            Self::TirePressureRl => "tire_pressure_rl",
            Self::TirePressureRr => "tire_pressure_rr",
            Self::OilPressure => "oil_pressure",
            Self::OilTemp => "oil_temp",
            Self::CoolantTemp => "coolant_temp",
            Self::EngineRpm => "engine_rpm",
            Self::FuelConsumed => "fuel_consumed",
            Self::FuelFlow => "fuel_flow",
            Self::EnergyStorageLevel => "energy_storage_level",
            Self::EnergyStorageTemp => "energy_storage_temp",
            Self::MotorOutputFront => "motor_output_front",
            Self::MotorOutputRear => "motor_output_rear",
            Self::Speed => "speed",
        }
    }

    /// Registry lookup for this channel's constants.
    ///
    /// Values are chosen so every alarm candidate satisfies
    /// `|threshold - mid| >= 0.6 * (high - low)`, which keeps the ramp
    /// transform convergent within the guaranteed tail for any series of
    /// 60 samples or more.
    #[must_use]
    pub const fn parameters(self) -> ChannelParameters {
        match self {
            Self::BrakeTempFl | Self::BrakeTempFr | Self::BrakeTempRl | Self::BrakeTempRr => {
                ChannelParameters::new("°C", 400.0, 800.0, 1200.0, 0.0)
            }
            Self::TirePressureFl
            | Self::TirePressureFr
            | Self::TirePressureRl
            | Self::TirePressureRr => ChannelParameters::new("psi", 27.0, 33.0, 40.0, 18.0),
            Self::OilPressure => ChannelParameters::new("psi", 25.0, 60.0, 70.0, 15.0),
            Self::OilTemp => ChannelParameters::new("°C", 90.0, 120.0, 140.0, 0.0),
            Self::CoolantTemp => ChannelParameters::new("°C", 70.0, 105.0, 125.0, 0.0),
            Self::EngineRpm => ChannelParameters::new("rpm", 4000.0, 12000.0, 15000.0, 0.0),
            Self::FuelConsumed => ChannelParameters::new("kg", 0.0, 110.0, 0.0, 0.0),
            Self::FuelFlow => ChannelParameters::new("kg/h", 0.0, 100.0, 120.0, 0.0),
            Self::EnergyStorageLevel => ChannelParameters::new("%", 20.0, 80.0, 95.0, 5.0),
            Self::EnergyStorageTemp => ChannelParameters::new("°C", 20.0, 45.0, 60.0, 0.0),
            Self::MotorOutputFront | Self::MotorOutputRear => {
                ChannelParameters::new("kW", 0.0, 120.0, 135.0, -20.0)
            }
            Self::Speed => ChannelParameters::new("km/h", 0.0, 340.0, 360.0, 0.0),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
