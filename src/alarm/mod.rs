//! Alarm Decision Selector
//!
//! Decides, once per member per run, whether that member's telemetry gets
//! an injected alarm and — independently — which (channel, direction)
//! candidate the alarm would land on.
//!
//! The candidate is drawn unconditionally, even when the occurrence
//! decision is deterministic (forced or suppressed), so the shape of the
//! random-number sequence stays uniform across branches. The candidate is
//! only applied when `will_alarm` is true.

pub mod weighted;

use crate::error::SimulationError;
use crate::registry::Channel;
use crate::types::SimulationMember;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use weighted::WeightedTable;

/// Which alarm threshold the ramp converges toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmDirection {
    High,
    Low,
}

impl fmt::Display for AlarmDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("high"),
            Self::Low => f.write_str("low"),
        }
    }
}

/// A (channel, direction) pair eligible to carry the run's injected alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlarmCandidate {
    pub channel: Channel,
    pub direction: AlarmDirection,
}

/// The per-member alarm decision shared by all of that member's channel
/// generation tasks.
#[derive(Debug, Clone, Copy)]
pub struct AlarmDecision {
    /// Whether this member's run gets an alarm at all
    pub will_alarm: bool,
    /// Where the alarm lands when `will_alarm` is true
    pub candidate: AlarmCandidate,
}

/// Out of 100: how often an unconstrained member alarms.
const ALARM_OCCURRENCE_WEIGHT: u32 = 5;

/// The fixed candidate table. Tire pressure losses dominate, drivetrain
/// and energy-store failures are rare. Total weight 219.
fn candidate_entries() -> Vec<(AlarmCandidate, u32)> {
    use AlarmDirection::{High, Low};

    let candidate = |channel, direction| AlarmCandidate { channel, direction };

    vec![
        (candidate(Channel::TirePressureFl, Low), 35),
        (candidate(Channel::TirePressureFr, Low), 35),
        (candidate(Channel::TirePressureRl, Low), 35),
        (candidate(Channel::TirePressureRr, Low), 35),
        (candidate(Channel::OilPressure, High), 15),
        (candidate(Channel::OilPressure, Low), 15),
        (candidate(Channel::CoolantTemp, High), 15),
        (candidate(Channel::BrakeTempFl, High), 10),
        (candidate(Channel::OilTemp, High), 10),
        (candidate(Channel::MotorOutputFront, High), 5),
        (candidate(Channel::MotorOutputFront, Low), 5),
        (candidate(Channel::EnergyStorageLevel, High), 2),
        (candidate(Channel::EnergyStorageLevel, Low), 2),
    ]
}

/// Every candidate pair, for tests and convergence checks.
#[must_use]
pub fn all_candidates() -> Vec<AlarmCandidate> {
    candidate_entries().into_iter().map(|(c, _)| c).collect()
}

/// Decide whether (and where) this member's run alarms.
///
/// - `force_alarm` → always alarms; `no_alarms` → never alarms;
///   neither → weighted 5/95 draw.
/// - The conflicting-flags combination is a boundary validation error and
///   must be rejected before this is ever called; `debug_assert`ed here.
///
/// # Errors
/// `EmptyCandidateTable` if a weighted table cannot be built — a
/// programming error with the fixed tables above, but surfaced rather
/// than papered over.
pub fn decide<R: Rng + ?Sized>(
    rng: &mut R,
    member: &SimulationMember,
) -> Result<AlarmDecision, SimulationError> {
    debug_assert!(
        !(member.force_alarm && member.no_alarms),
        "conflicting flags must be rejected at the boundary"
    );

    let will_alarm = if member.force_alarm {
        true
    } else if member.no_alarms {
        false
    } else {
        let occurrence = WeightedTable::new(vec![
            (true, ALARM_OCCURRENCE_WEIGHT),
            (false, 100 - ALARM_OCCURRENCE_WEIGHT),
        ])?;
        *occurrence.draw(rng)
    };

    // Drawn even when will_alarm is already settled; see module docs.
    let candidates = WeightedTable::new(candidate_entries())?;
    let candidate = *candidates.draw(rng);

    Ok(AlarmDecision {
        will_alarm,
        candidate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn member(force_alarm: bool, no_alarms: bool) -> SimulationMember {
        SimulationMember {
            id: "member-1".to_string(),
            simulation_id: "sim-1".to_string(),
            team: "Apex Racing".to_string(),
            driver: "A. Driver".to_string(),
            car_number: 7,
            force_alarm,
            no_alarms,
        }
    }

    #[test]
    fn forced_member_always_alarms() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let decision = decide(&mut rng, &member(true, false)).unwrap();
            assert!(decision.will_alarm);
        }
    }

    #[test]
    fn suppressed_member_never_alarms() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let decision = decide(&mut rng, &member(false, true)).unwrap();
            assert!(!decision.will_alarm);
        }
    }

    #[test]
    fn unconstrained_rate_is_near_five_percent() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = member(false, false);
        let alarms = (0..5_000)
            .filter(|_| decide(&mut rng, &m).unwrap().will_alarm)
            .count();
        let rate = alarms as f64 / 5_000.0;
        assert!(
            (0.03..=0.07).contains(&rate),
            "alarm rate {rate} outside 5% tolerance band"
        );
    }

    #[test]
    fn candidate_table_weights_and_total() {
        let table = WeightedTable::new(candidate_entries()).unwrap();
        assert_eq!(table.total_weight(), 219);

        // Exact branch selection at the cumulative boundaries.
        let first = table.pick(0);
        assert_eq!(first.channel, Channel::TirePressureFl);
        assert_eq!(first.direction, AlarmDirection::Low);

        // 4 × 35 = 140: the first oil-pressure-high draw.
        let oil = table.pick(140);
        assert_eq!(oil.channel, Channel::OilPressure);
        assert_eq!(oil.direction, AlarmDirection::High);

        // Last unit of weight lands on the rarest candidate.
        let last = table.pick(218);
        assert_eq!(last.channel, Channel::EnergyStorageLevel);
        assert_eq!(last.direction, AlarmDirection::Low);
    }

    #[test]
    fn every_candidate_channel_is_in_the_registry() {
        for candidate in all_candidates() {
            assert!(Channel::ALL.contains(&candidate.channel));
        }
    }

    #[test]
    fn candidate_thresholds_are_usable() {
        // A candidate pointing at an unused (0.0-inside-range) threshold
        // would make the ramp nonsensical.
        for candidate in all_candidates() {
            let p = candidate.channel.parameters();
            let level = match candidate.direction {
                AlarmDirection::High => p.alarm_high,
                AlarmDirection::Low => p.alarm_low,
            };
            match candidate.direction {
                AlarmDirection::High => assert!(level > p.range_high, "{}", candidate.channel),
                AlarmDirection::Low => assert!(level < p.range_low, "{}", candidate.channel),
            }
        }
    }

    #[test]
    fn candidate_is_drawn_even_for_deterministic_outcomes() {
        // Same seed: the forced and suppressed branches must consume the
        // same draws, so the selected candidate matches across branches.
        let forced = decide(&mut StdRng::seed_from_u64(9), &member(true, false)).unwrap();
        let suppressed = decide(&mut StdRng::seed_from_u64(9), &member(false, true)).unwrap();
        assert_eq!(forced.candidate, suppressed.candidate);
    }
}
