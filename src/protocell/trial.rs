//! Single protocell trial: one shot through the full pipeline.
//!
//! Build network → sample environment → membrane → cycle → rhythm →
//! fidelity → decide. Every trial traverses all stages exactly once and
//! always produces an outcome; there are no retries.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{coherence, gauss, membrane, network, replication, rhythm};
use crate::config::{Params, Policy};

const INVARIANT_EPS: f64 = 1e-9;

/// First gate a failed trial tripped on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateFailure {
    Membrane,
    Cycle,
    Genetic,
}

/// Per-trial metrics record. Ephemeral; the aggregator only reads the
/// scalar fields it sums.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TrialMetrics {
    pub coherence: f64,
    pub cycle_score: f64,
    pub fidelity: f64,
    pub effective_error: f64,
    /// Stability invariant I = coherence / internal period. Diagnostic
    /// only; never feeds the success decision.
    pub invariant: f64,
    pub membrane_stability: f64,
    pub internal_period: f64,
    pub resonance: f64,
}

/// Outcome of one protocell trial.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub success: bool,
    /// First failed gate in priority order membrane > cycle > genetic;
    /// `None` on success.
    pub failure: Option<GateFailure>,
    pub metrics: TrialMetrics,
}

/// Stochastic environment for one trial.
struct Environment {
    energy: f64,
    noise: f64,
    leak: f64,
}

fn sample_environment(params: &Params, rng: &mut StdRng) -> Environment {
    match params.policy {
        Policy::Reference => Environment {
            energy: params.energy_grad * (1.0 + gauss(rng, 0.0, 0.1)),
            noise: (params.noise_level * (1.0 + gauss(rng, 0.0, 0.2))).max(0.0),
            leak: (params.membrane_leak * (1.0 + gauss(rng, 0.0, 0.25))).max(0.0),
        },
        Policy::Sweep => Environment {
            energy: params.energy_grad * gauss(rng, 1.0, 0.1),
            noise: params.noise_level * gauss(rng, 1.0, 0.15),
            leak: params.membrane_leak,
        },
    }
}

/// Attribute a failed trial to its first failed gate.
///
/// The priority order membrane > cycle > genetic is a fixed tie-break so
/// failure decomposition is reproducible; it never changes the success
/// boolean.
pub fn failure_reason(
    membrane_ok: bool,
    cycle_ok: bool,
    genetic_ok: bool,
) -> Option<GateFailure> {
    if !membrane_ok {
        Some(GateFailure::Membrane)
    } else if !cycle_ok {
        Some(GateFailure::Cycle)
    } else if !genetic_ok {
        Some(GateFailure::Genetic)
    } else {
        None
    }
}

/// Run one protocell trial.
///
/// Assumes `params` has passed [`Params::validate`]. The random draw
/// order is fixed (network, environment, rhythm) so a seeded stream
/// reproduces the trial bit for bit.
pub fn run_trial(params: &Params, rng: &mut StdRng) -> TrialOutcome {
    let adj = network::build_reaction_network(params.n_species, params.density, rng);
    let env = sample_environment(params, rng);

    let stability =
        membrane::membrane_stability(params.membrane_threshold, env.energy, env.noise, params.policy);
    let membrane_ok = membrane::membrane_holds(stability, params.policy);

    let assessment =
        coherence::evaluate_cycle_coherence(&adj, env.energy, env.leak, env.noise, params.policy);

    let clock = rhythm::sample_rhythm(params, rng);

    let protection = replication::protection_factor(
        clock.resonance,
        params.mode,
        params.policy,
        params.resonance_power,
    );
    let effective_error = replication::effective_error_rate(
        params.base_error_rate,
        params.code_length,
        protection,
        params.policy,
    );
    let fidelity = replication::replication_fidelity(effective_error);
    let genetic_ok = effective_error < params.crit_error_threshold;

    let invariant = match params.policy {
        Policy::Reference => assessment.coherence / (clock.internal_period + INVARIANT_EPS),
        Policy::Sweep => assessment.coherence.abs() / (clock.internal_period + INVARIANT_EPS),
    };

    TrialOutcome {
        success: membrane_ok && assessment.has_cycle && genetic_ok,
        failure: failure_reason(membrane_ok, assessment.has_cycle, genetic_ok),
        metrics: TrialMetrics {
            coherence: assessment.coherence,
            cycle_score: assessment.cycle_score,
            fidelity,
            effective_error,
            invariant,
            membrane_stability: stability,
            internal_period: clock.internal_period,
            resonance: clock.resonance,
        },
    }
}
