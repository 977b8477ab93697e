//! Telemetry generation engine: series synthesis, alarm ramping, and the
//! two-level fan-out (members, then channels) that produces a full
//! simulation's worth of data.

pub mod aggregator;
pub mod generator;
pub mod orchestrator;
pub mod ramp;

pub use aggregator::aggregate;
pub use orchestrator::generate_member;
