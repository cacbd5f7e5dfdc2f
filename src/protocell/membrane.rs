//! Membrane containment model.

use crate::config::Policy;

/// Membrane stability: a linear tradeoff between the energy gradient
/// feeding the boundary and the noise eroding it.
pub fn membrane_stability(base_threshold: f64, energy: f64, noise: f64, policy: Policy) -> f64 {
    match policy {
        Policy::Reference => base_threshold + 0.25 * energy - 0.35 * noise,
        Policy::Sweep => base_threshold + 0.30 * energy - 0.40 * noise,
    }
}

/// Whether the membrane retains the cycle at this stability level.
pub fn membrane_holds(stability: f64, policy: Policy) -> bool {
    match policy {
        Policy::Reference => stability > 0.5,
        Policy::Sweep => stability > 0.6,
    }
}
