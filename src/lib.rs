//! Gridsim: Race-Vehicle Telemetry Simulation
//!
//! Synthesizes multi-channel sensor telemetry for race-vehicle entries
//! over a configured time window, optionally injecting a single realistic
//! alarm event into one sensor channel per entry. Drives downstream
//! storage and analytics pipelines without a live data source.
//!
//! ## Architecture
//!
//! - **Registry**: fixed table of the 19 telemetry channels with nominal
//!   ranges and alarm thresholds (external contract)
//! - **Alarm selector**: per-member weighted decision of whether and where
//!   an alarm is injected
//! - **Engine**: per-channel series generation, the ramp-to-alarm
//!   transform, and the two-level task fan-out that assembles a full
//!   simulation result

pub mod alarm;
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
pub mod types;

// Re-export the engine entry points
pub use engine::{aggregate, generate_member};

// Re-export commonly used types
pub use alarm::{AlarmCandidate, AlarmDecision, AlarmDirection};
pub use config::EngineConfig;
pub use error::SimulationError;
pub use registry::{Channel, ChannelParameters};
pub use types::{
    RateMultiplier, Sample, SampleRate, SimMemberResult, Simulation, SimulationMember,
    SimulationResult, TelemetrySeries,
};
