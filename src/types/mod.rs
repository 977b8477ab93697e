//! Core data model: simulation descriptors and telemetry output types.

mod simulation;
mod telemetry;

pub use simulation::{RateMultiplier, SampleRate, Simulation, SimulationMember};
pub use telemetry::{Sample, SimMemberResult, SimulationResult, TelemetrySeries};
