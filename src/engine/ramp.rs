//! Ramp-to-Alarm Transform
//!
//! Rewrites the tail of a freshly generated series so it walks from
//! nominal territory to the channel's alarm threshold, then zero-fills
//! the remainder — sensor data ends because the vehicle is out of the
//! race.
//!
//! The walk starts at a randomized offset: one of the quartile indices
//! {0, N/4, N/2} drawn with equal weight, plus half a segment (N/8), so
//! at least one full quartile of room remains to ramp and observe the
//! crossing. Values are never clamped; overshooting the threshold is
//! fine — crossing is what terminates the ramp.

use crate::alarm::weighted::WeightedTable;
use crate::alarm::AlarmDirection;
use crate::engine::generator::floor2;
use crate::error::SimulationError;
use crate::registry::ChannelParameters;
use rand::Rng;

/// Where the injected alarm landed.
#[derive(Debug, Clone, Copy)]
pub struct RampOutcome {
    /// Index of the sample that first crossed the threshold. Every later
    /// sample is 0.0.
    pub alarm_index: usize,
}

/// Drive `values` toward the `direction` alarm threshold of `params`.
///
/// Step size is a tenth of the distance from the nominal midpoint to the
/// threshold, so any in-range starting value crosses well inside the
/// guaranteed tail for the registry's contract thresholds.
///
/// # Errors
/// - `EmptyCandidateTable` if the offset table cannot be built
///   (programming error).
/// - `RampDidNotConverge` when the series ends before the crossing is
///   observed — a real runtime failure mode that is surfaced, never
///   silently ignored.
pub fn ramp_to_alarm<R: Rng + ?Sized>(
    rng: &mut R,
    values: &mut [f64],
    params: &ChannelParameters,
    direction: AlarmDirection,
) -> Result<RampOutcome, SimulationError> {
    let n = values.len();
    let level = match direction {
        AlarmDirection::High => params.alarm_high,
        AlarmDirection::Low => params.alarm_low,
    };
    let step = (level - params.mid()).abs() / 10.0;

    let segment = n / 4;
    let offsets = WeightedTable::new(vec![(0usize, 1), (n / 4, 1), (n / 2, 1)])?;
    let start = offsets.draw(rng) + segment / 2;

    let crossed = |v: f64| match direction {
        AlarmDirection::High => v >= level,
        AlarmDirection::Low => v <= level,
    };

    for i in start.max(1)..n {
        let prev = values[i - 1];
        if crossed(prev) {
            for v in &mut values[i..] {
                *v = 0.0;
            }
            return Ok(RampOutcome { alarm_index: i - 1 });
        }
        values[i] = floor2(match direction {
            AlarmDirection::High => prev + step,
            AlarmDirection::Low => prev - step,
        });
    }

    Err(SimulationError::RampDidNotConverge { direction, level })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::all_candidates;
    use crate::engine::generator::generate_series;
    use crate::registry::Channel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ramp_crosses_and_zero_fills() {
        let params = Channel::TirePressureFl.parameters();
        let mut rng = StdRng::seed_from_u64(21);
        let mut values = generate_series(&mut rng, &params, 60);

        let outcome =
            ramp_to_alarm(&mut rng, &mut values, &params, AlarmDirection::Low).unwrap();

        let idx = outcome.alarm_index;
        assert!(idx < 60);
        assert!(
            values[idx] <= params.alarm_low,
            "sample at alarm_index did not cross: {}",
            values[idx]
        );
        for (i, v) in values.iter().enumerate().skip(idx + 1) {
            assert_eq!(*v, 0.0, "sample {i} after the alarm is non-zero: {v}");
        }
    }

    #[test]
    fn samples_before_crossing_stay_in_direction_bound() {
        let params = Channel::OilPressure.parameters();
        let mut rng = StdRng::seed_from_u64(22);
        let mut values = generate_series(&mut rng, &params, 120);

        let outcome =
            ramp_to_alarm(&mut rng, &mut values, &params, AlarmDirection::High).unwrap();

        // Toward-high: everything up to the crossing sits in
        // [range_low, alarm_high + one step of overshoot).
        let step = (params.alarm_high - params.mid()).abs() / 10.0;
        for v in &values[..=outcome.alarm_index] {
            assert!(*v >= params.range_low);
            assert!(*v < params.alarm_high + step);
        }
    }

    #[test]
    fn converges_for_every_candidate_at_minimum_length() {
        // Contract property: every (channel, direction) pair in the
        // candidate table converges for series length >= 60.
        let mut rng = StdRng::seed_from_u64(23);
        for candidate in all_candidates() {
            let params = candidate.channel.parameters();
            for _ in 0..100 {
                let mut values = generate_series(&mut rng, &params, 60);
                let result =
                    ramp_to_alarm(&mut rng, &mut values, &params, candidate.direction);
                assert!(
                    result.is_ok(),
                    "{} toward {} failed to converge",
                    candidate.channel,
                    candidate.direction
                );
            }
        }
    }

    #[test]
    fn too_short_series_reports_convergence_failure() {
        let params = Channel::BrakeTempFl.parameters();
        let mut rng = StdRng::seed_from_u64(24);
        // 4 samples: the walk cannot reach a threshold 400+ units away.
        let mut values = generate_series(&mut rng, &params, 4);

        let result = ramp_to_alarm(&mut rng, &mut values, &params, AlarmDirection::High);
        assert!(matches!(
            result,
            Err(SimulationError::RampDidNotConverge {
                direction: AlarmDirection::High,
                level,
            }) if level == 1200.0
        ));
    }

    #[test]
    fn ramp_values_keep_two_decimal_precision() {
        let params = Channel::EnergyStorageLevel.parameters();
        let mut rng = StdRng::seed_from_u64(25);
        let mut values = generate_series(&mut rng, &params, 60);

        let outcome =
            ramp_to_alarm(&mut rng, &mut values, &params, AlarmDirection::High).unwrap();

        for v in &values[..=outcome.alarm_index] {
            let scaled = v * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }
}
