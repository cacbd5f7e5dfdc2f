//! Internal clock and resonance against external periodic drivers.
//!
//! Without a field the internal rhythm is free-running noise. With a
//! field, external periods compress into the internal clock by the
//! introversion law T_int = T_ext · η^levels, and the clock is scored on
//! how close it sits to integer-multiple alignment with each driver.

use rand::rngs::StdRng;
use rand::Rng;

use super::gauss;
use crate::config::{Mode, Params, Policy};

/// Compression-level exponent: external rhythms fold inward twice before
/// driving the protocell clock.
const COMPRESSION_LEVELS: i32 = 2;
/// Floor on the free-running no-field period.
const MIN_FREE_PERIOD: f64 = 0.05;
const PERIOD_EPS: f64 = 1e-9;

/// Internal clock state for one trial.
#[derive(Clone, Copy, Debug)]
pub struct Rhythm {
    /// Internal oscillation period, in ticks.
    pub internal_period: f64,
    /// Alignment with the external drivers, in [0, 1]. Always 0 without
    /// a field.
    pub resonance: f64,
}

/// Compress the external periods into an internal one, averaged over all
/// drivers: T_int = mean(T_ext · η^levels).
pub fn inner_period(ext_periods: &[f64], f_eta: f64) -> f64 {
    let compression = f_eta.powi(COMPRESSION_LEVELS);
    let sum: f64 = ext_periods.iter().map(|t| t * compression).sum();
    sum / ext_periods.len() as f64
}

/// Linear-falloff resonance score, aggregated by mean over drivers.
///
/// For each driver T, the internal period is compared against T/k for the
/// nearest positive integer multiple k; the relative mismatch decays the
/// score linearly to zero at `tol`.
pub fn resonance_score_linear(internal_period: f64, ext_periods: &[f64], tol: f64) -> f64 {
    let mut total = 0.0;
    for &t in ext_periods {
        let k = (t / internal_period).round().max(1.0);
        let mismatch = ((t / k) - internal_period).abs() / (t + PERIOD_EPS);
        total += (1.0 - mismatch / tol).max(0.0);
    }
    total / ext_periods.len() as f64
}

/// Gaussian-falloff resonance score on the ratio-space mismatch, keeping
/// only the best-aligned driver.
pub fn resonance_score_gaussian(internal_period: f64, ext_periods: &[f64], width: f64) -> f64 {
    let mut best = 0.0_f64;
    for &t in ext_periods {
        let ratio = t / internal_period;
        let diff = ratio - ratio.round();
        let score = (-(diff * diff) / (2.0 * width * width)).exp();
        best = best.max(score);
    }
    best
}

/// Sample the trial's internal clock.
///
/// No-field trials draw a free-running period and score zero resonance
/// regardless of policy. Field trials follow the policy: the reference
/// variant averages the compressed drivers deterministically; the sweep
/// variant compresses only the fastest driver and jitters it.
pub fn sample_rhythm(params: &Params, rng: &mut StdRng) -> Rhythm {
    if params.mode == Mode::NoField {
        return Rhythm {
            internal_period: (rng.gen::<f64>() * 2.0).max(MIN_FREE_PERIOD),
            resonance: 0.0,
        };
    }

    match params.policy {
        Policy::Reference => {
            let internal_period = inner_period(&params.ext_periods, params.f_eta);
            let resonance = resonance_score_linear(
                internal_period,
                &params.ext_periods,
                params.resonance_tolerance,
            );
            Rhythm {
                internal_period,
                resonance,
            }
        }
        Policy::Sweep => {
            let fastest = params
                .ext_periods
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min);
            let internal_period =
                fastest * params.f_eta.powi(COMPRESSION_LEVELS) * gauss(rng, 1.0, 0.02);
            let resonance = resonance_score_gaussian(
                internal_period,
                &params.ext_periods,
                params.resonance_tolerance,
            );
            Rhythm {
                internal_period,
                resonance,
            }
        }
    }
}
