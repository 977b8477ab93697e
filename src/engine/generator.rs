//! Per-channel raw series synthesis.
//!
//! The unconditional baseline for every channel: independent uniform
//! draws across the channel's nominal range, floored to two decimals.
//! The ramp transform overwrites the tail of exactly one series when an
//! alarm is injected.

use crate::registry::ChannelParameters;
use rand::Rng;

/// Floor to 2 decimal places — the precision every emitted value carries.
#[must_use]
pub fn floor2(v: f64) -> f64 {
    (v * 100.0).floor() / 100.0
}

/// Produce `n` independent uniform values in the channel's nominal range.
pub fn generate_series<R: Rng + ?Sized>(
    rng: &mut R,
    params: &ChannelParameters,
    n: usize,
) -> Vec<f64> {
    (0..n)
        .map(|_| floor2(rng.gen_range(params.range_low..=params.range_high)))
        .collect()
}
