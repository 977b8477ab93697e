//! Telemetry output types: samples, per-channel series, and the maps the
//! engine hands to downstream persistence/transmission layers.
//!
//! Every entity here is created fresh per invocation and owned exclusively
//! by the task that produced it until it is published through the results
//! queue. Nothing is mutated concurrently.

use crate::registry::Channel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// One timestamped value for one telemetry channel at one point in
/// simulated time, annotated with full identity for downstream storage.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    /// Fresh unique id per sample
    pub id: Uuid,
    /// Always true — marks data as synthesized, not live
    pub simulated: bool,
    /// Owning simulation id
    pub simulation_id: String,
    /// Owning member id
    pub member_id: String,
    /// Car number of the member
    pub car_number: u32,
    /// Source channel
    pub channel: Channel,
    /// Measurement unit from the channel registry
    pub unit: &'static str,
    /// Simulated wall-clock time of the reading
    pub timestamp: DateTime<Utc>,
    /// Reading, floored to 2 decimal places
    pub value: f64,
    /// True on the single sample that crossed the high-alarm threshold
    pub high_alarm: bool,
    /// True on the single sample that crossed the low-alarm threshold
    pub low_alarm: bool,
    /// Index within the series
    pub sequence: u64,
    /// Placeholder — vehicle position is not modeled
    pub latitude: f64,
    /// Placeholder — vehicle position is not modeled
    pub longitude: f64,
}

/// Ordered series of samples for one channel of one member.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetrySeries {
    /// Channel the series belongs to
    pub channel: Channel,
    /// Exactly `datum_count` samples, sequence-ordered
    pub samples: Vec<Sample>,
    /// Whether an alarm was injected into this series
    pub alarm_exists: bool,
    /// Index of the sample that first crossed the threshold;
    /// meaningful only when `alarm_exists` is true
    pub alarm_index: usize,
}

/// All channel series for one member, keyed by channel.
pub type SimMemberResult = HashMap<Channel, TelemetrySeries>;

/// All member results for one simulation, keyed by member id.
pub type SimulationResult = HashMap<String, SimMemberResult>;
