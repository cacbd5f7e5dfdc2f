//! Replication fidelity of the information carrier.
//!
//! Copy errors grow with code length and shrink with resonance-derived
//! protection; a trial's genetic gate passes when the effective error
//! stays under the catastrophe threshold.

use crate::config::{Mode, Policy};

/// Code length the length penalty is scaled against.
const REFERENCE_CODE_LENGTH: f64 = 64.0;
/// Ceiling on resonance-derived protection (sweep variant).
const PROTECTION_CEILING: f64 = 0.95;

/// Resonance-derived reduction of the baseline copy error, in [0, 1).
///
/// The reference variant routes resonance through a modulation factor with
/// a small floor even without a field; the sweep variant raises resonance
/// to a tunable power under a hard ceiling, so protection collapses fast
/// away from perfect alignment.
pub fn protection_factor(resonance: f64, mode: Mode, policy: Policy, power: f64) -> f64 {
    match policy {
        Policy::Reference => {
            let mod_factor = match mode {
                Mode::NoField => 0.05,
                Mode::Field => 0.2 + 0.6 * resonance,
            };
            0.6 * mod_factor
        }
        Policy::Sweep => PROTECTION_CEILING * resonance.powf(power),
    }
}

/// Effective copy-error rate after protection and the length penalty.
pub fn effective_error_rate(
    base_error: f64,
    code_length: usize,
    protection: f64,
    policy: Policy,
) -> f64 {
    let length_coeff = match policy {
        Policy::Reference => 0.5,
        Policy::Sweep => 0.1,
    };
    let length_penalty = 1.0 + length_coeff * (code_length as f64 / REFERENCE_CODE_LENGTH);
    base_error * (1.0 - protection) * length_penalty
}

/// Copy fidelity, clamped at zero.
pub fn replication_fidelity(effective_error: f64) -> f64 {
    (1.0 - effective_error).max(0.0)
}
