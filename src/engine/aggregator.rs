//! Simulation-Member Aggregator
//!
//! Runs the per-member orchestrator once for every participating entry —
//! one task per member, unbounded, since member counts are small — and
//! merges the results keyed by member id. Fails the whole aggregate on
//! the first member-level error: partially-populated telemetry for a
//! race is not meaningful to persist.

use crate::config::EngineConfig;
use crate::engine::orchestrator;
use crate::error::SimulationError;
use crate::types::{Simulation, SimulationMember, SimulationResult};
use std::collections::HashMap;
use tokio::task::JoinSet;
use tracing::info;

/// Generate telemetry for every member of a simulation.
///
/// All descriptors are validated before any generation task is spawned,
/// so a malformed member never costs a partial run.
///
/// # Errors
/// Any validation error, or the first member-level generation error.
pub async fn aggregate(
    simulation: &Simulation,
    members: &[SimulationMember],
    config: &EngineConfig,
) -> Result<SimulationResult, SimulationError> {
    simulation.validate()?;
    for member in members {
        member.validate()?;
    }

    info!(
        simulation_id = %simulation.id,
        members = members.len(),
        duration_minutes = simulation.duration_minutes,
        sample_rate_ms = simulation.sample_rate_ms,
        "Starting simulation aggregation"
    );

    let mut tasks = JoinSet::new();
    for member in members.iter().cloned() {
        let simulation = simulation.clone();
        let config = config.clone();
        tasks.spawn(async move {
            let result = orchestrator::generate_member(&simulation, &member, &config).await;
            (member.id, result)
        });
    }

    let mut results: SimulationResult = HashMap::with_capacity(members.len());
    while let Some(joined) = tasks.join_next().await {
        let (member_id, result) =
            joined.map_err(|e| SimulationError::TaskFailed(e.to_string()))?;
        results.insert(member_id, result?);
    }

    info!(
        simulation_id = %simulation.id,
        members = results.len(),
        "Simulation aggregation complete"
    );
    Ok(results)
}
