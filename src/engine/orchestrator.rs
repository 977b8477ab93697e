//! Worker Pool Orchestrator
//!
//! Produces all channel series for one member: one tokio task per
//! registry channel, admission-gated by a counting semaphore so at most
//! `worker_permits` generation tasks run at once. Finished series are
//! published to a results queue and failures to an error queue; both are
//! sized to the task count so no publish can block after consumers stop
//! waiting. A join-all barrier gates queue closure — every spawned task
//! runs to completion, error paths included, before anything is drained.
//!
//! When several channel tasks fail concurrently only the first error in
//! the queue is reported (see [`crate::error::SimulationError`]).

use crate::alarm::{self, AlarmDecision, AlarmDirection};
use crate::config::EngineConfig;
use crate::engine::{generator, ramp};
use crate::error::SimulationError;
use crate::registry::Channel;
use crate::types::{Sample, SimMemberResult, Simulation, SimulationMember, TelemetrySeries};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info};
use uuid::Uuid;

/// Everything a channel task needs, cloned once per task. Tasks share no
/// mutable state; each owns its series exclusively until it publishes.
#[derive(Debug, Clone)]
struct TaskContext {
    simulation_id: String,
    member_id: String,
    car_number: u32,
    decision: AlarmDecision,
    datum_count: usize,
    interval_ms: u64,
    start_time: DateTime<Utc>,
}

/// Generate a full [`SimMemberResult`] for one member.
///
/// Validates the descriptors, runs the alarm decision once (shared by all
/// of this member's channel tasks), fans out over the registry, and
/// collects every channel's series.
///
/// # Errors
/// Validation errors before any task is spawned; otherwise the first
/// generation error drained from the error queue.
pub async fn generate_member(
    simulation: &Simulation,
    member: &SimulationMember,
    config: &EngineConfig,
) -> Result<SimMemberResult, SimulationError> {
    simulation.validate()?;
    member.validate()?;

    let datum_count = simulation.datum_count()?;
    let interval_ms = crate::types::SampleRate::from_millis(simulation.sample_rate_ms)?
        .interval_ms();

    let decision = alarm::decide(&mut rand::thread_rng(), member)?;
    info!(
        member_id = %member.id,
        car_number = member.car_number,
        datum_count,
        will_alarm = decision.will_alarm,
        candidate_channel = %decision.candidate.channel,
        candidate_direction = %decision.candidate.direction,
        "Starting member generation"
    );

    let ctx = TaskContext {
        simulation_id: simulation.id.clone(),
        member_id: member.id.clone(),
        car_number: member.car_number,
        decision,
        datum_count,
        interval_ms,
        start_time: Utc::now(),
    };

    let permits = Arc::new(Semaphore::new(config.worker_permits()));
    let task_count = Channel::ALL.len();
    let (result_tx, mut result_rx) = mpsc::channel::<TelemetrySeries>(task_count);
    let (error_tx, mut error_rx) = mpsc::channel::<SimulationError>(task_count);

    let mut handles = Vec::with_capacity(task_count);
    for channel in Channel::ALL {
        let ctx = ctx.clone();
        let permits = Arc::clone(&permits);
        let result_tx = result_tx.clone();
        let error_tx = error_tx.clone();

        handles.push(tokio::spawn(async move {
            // The pool is never closed, so acquisition only fails if the
            // runtime is tearing down; surface that like any task failure.
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(closed) => {
                    let _ = error_tx
                        .send(SimulationError::TaskFailed(closed.to_string()))
                        .await;
                    return;
                }
            };

            match build_channel_series(&ctx, channel) {
                Ok(series) => {
                    let _ = result_tx.send(series).await;
                }
                Err(err) => {
                    let _ = error_tx.send(err).await;
                }
            }
            // Permit released on drop; errored tasks still reach the
            // barrier like any other.
        }));
    }
    drop(result_tx);
    drop(error_tx);

    // Completion barrier: every task finishes before the queues close.
    let mut first_panic: Option<SimulationError> = None;
    for handle in handles {
        if let Err(join_err) = handle.await {
            first_panic.get_or_insert(SimulationError::TaskFailed(join_err.to_string()));
        }
    }
    if let Some(err) = first_panic {
        return Err(err);
    }

    // First error wins; any further queued errors are discarded.
    if let Some(err) = error_rx.recv().await {
        return Err(err);
    }

    let mut result: SimMemberResult = HashMap::with_capacity(task_count);
    while let Some(series) = result_rx.recv().await {
        result.insert(series.channel, series);
    }

    info!(
        member_id = %member.id,
        channels = result.len(),
        alarmed = result.values().filter(|s| s.alarm_exists).count(),
        "Member generation complete"
    );
    Ok(result)
}

/// One channel task's work: raw series, optional ramp, sample stamping.
/// Pure CPU; runs inside the permit.
fn build_channel_series(
    ctx: &TaskContext,
    channel: Channel,
) -> Result<TelemetrySeries, SimulationError> {
    let params = channel.parameters();
    let mut rng = rand::thread_rng();

    let mut values = generator::generate_series(&mut rng, &params, ctx.datum_count);

    let mut alarm_index = None;
    if ctx.decision.will_alarm && ctx.decision.candidate.channel == channel {
        let outcome = ramp::ramp_to_alarm(
            &mut rng,
            &mut values,
            &params,
            ctx.decision.candidate.direction,
        )?;
        alarm_index = Some(outcome.alarm_index);
        debug!(
            member_id = %ctx.member_id,
            channel = %channel,
            direction = %ctx.decision.candidate.direction,
            alarm_index = outcome.alarm_index,
            "Alarm ramp applied"
        );
    }

    let mut samples = Vec::with_capacity(values.len());
    for (i, value) in values.into_iter().enumerate() {
        let sequence = i as u64;
        let offset = Duration::milliseconds((sequence * ctx.interval_ms) as i64);
        let timestamp = ctx
            .start_time
            .checked_add_signed(offset)
            .ok_or(SimulationError::TimestampOverflow { sequence })?;

        let (high_alarm, low_alarm) = match (alarm_index, ctx.decision.candidate.direction) {
            (Some(idx), AlarmDirection::High) if idx == i => (true, false),
            (Some(idx), AlarmDirection::Low) if idx == i => (false, true),
            _ => (false, false),
        };

        samples.push(Sample {
            id: Uuid::new_v4(),
            simulated: true,
            simulation_id: ctx.simulation_id.clone(),
            member_id: ctx.member_id.clone(),
            car_number: ctx.car_number,
            channel,
            unit: params.unit,
            timestamp,
            value,
            high_alarm,
            low_alarm,
            sequence,
            latitude: 0.0,
            longitude: 0.0,
        });
    }

    Ok(TelemetrySeries {
        channel,
        samples,
        alarm_exists: alarm_index.is_some(),
        alarm_index: alarm_index.unwrap_or(0),
    })
}
