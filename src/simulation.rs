//! Monte Carlo aggregation over independent protocell trials.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Mode, Params, Policy};
use crate::error::ConfigError;
use crate::protocell::trial::{run_trial, TrialOutcome};

/// Aggregate result of one Monte Carlo run. Derived once; never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Fraction of successful trials, in [0, 1].
    pub success_rate: f64,
    pub mean_coherence: f64,
    pub mean_fidelity: f64,
    pub mean_invariant: f64,
    pub successes: usize,
    pub trials: usize,
    pub mode: Mode,
    pub policy: Policy,
}

/// Running sums over trials. Merging is associative and commutative, so
/// partial tallies from parallel workers combine without ordering
/// constraints.
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    successes: usize,
    trials: usize,
    coherence_sum: f64,
    fidelity_sum: f64,
    invariant_sum: f64,
}

impl Tally {
    fn record(&mut self, outcome: &TrialOutcome) {
        if outcome.success {
            self.successes += 1;
        }
        self.trials += 1;
        self.coherence_sum += outcome.metrics.coherence;
        self.fidelity_sum += outcome.metrics.fidelity;
        self.invariant_sum += outcome.metrics.invariant;
    }

    fn merge(mut self, other: Tally) -> Tally {
        self.successes += other.successes;
        self.trials += other.trials;
        self.coherence_sum += other.coherence_sum;
        self.fidelity_sum += other.fidelity_sum;
        self.invariant_sum += other.invariant_sum;
        self
    }

    /// Zero trials resolve to zeroed rates rather than dividing by zero.
    fn finish(self, params: &Params) -> SimulationResult {
        let mean = |sum: f64| {
            if self.trials == 0 {
                0.0
            } else {
                sum / self.trials as f64
            }
        };
        SimulationResult {
            success_rate: mean(self.successes as f64),
            mean_coherence: mean(self.coherence_sum),
            mean_fidelity: mean(self.fidelity_sum),
            mean_invariant: mean(self.invariant_sum),
            successes: self.successes,
            trials: self.trials,
            mode: params.mode,
            policy: params.policy,
        }
    }
}

/// Run the full Monte Carlo series sequentially off a single seeded stream.
///
/// Deterministic: identical `(params, seed)` produce bit-identical results.
pub fn run_simulation(params: &Params, seed: u64) -> Result<SimulationResult, ConfigError> {
    params.validate()?;
    debug!(
        trials = params.trials,
        mode = ?params.mode,
        policy = ?params.policy,
        seed,
        "starting sequential simulation"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut tally = Tally::default();
    for _ in 0..params.trials {
        tally.record(&run_trial(params, &mut rng));
    }

    let result = tally.finish(params);
    info!(
        success_rate = result.success_rate,
        successes = result.successes,
        trials = result.trials,
        "simulation complete"
    );
    Ok(result)
}

/// Parallel variant: each trial draws from its own stream derived from the
/// base seed and trial index, so results do not depend on worker
/// scheduling.
///
/// Uses a different stream layout than [`run_simulation`]; the two agree
/// statistically, not bit for bit.
pub fn run_simulation_parallel(
    params: &Params,
    seed: u64,
) -> Result<SimulationResult, ConfigError> {
    params.validate()?;
    debug!(
        trials = params.trials,
        mode = ?params.mode,
        policy = ?params.policy,
        seed,
        "starting parallel simulation"
    );

    let tally = (0..params.trials)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let mut partial = Tally::default();
            partial.record(&run_trial(params, &mut rng));
            partial
        })
        .reduce(Tally::default, Tally::merge);

    let result = tally.finish(params);
    info!(
        success_rate = result.success_rate,
        successes = result.successes,
        trials = result.trials,
        "simulation complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_stay_in_bounds_across_variants() {
        for policy in [Policy::Reference, Policy::Sweep] {
            for mode in [Mode::NoField, Mode::Field] {
                let params = Params {
                    trials: 200,
                    mode,
                    policy,
                    ..Params::default()
                };
                let result = run_simulation(&params, 42).unwrap();
                assert!((0.0..=1.0).contains(&result.success_rate));
                assert!(result.successes <= result.trials);
                assert_eq!(result.trials, 200);
                assert_eq!(result.mode, mode);
                assert_eq!(result.policy, policy);
            }
        }
    }

    #[test]
    fn sequential_runs_are_bit_identical() {
        // The concrete no-field regression scenario: same seed, same
        // params, same success rate every time.
        let params = Params {
            trials: 500,
            ..Params::default()
        };
        let a = run_simulation(&params, 42).unwrap();
        let b = run_simulation(&params, 42).unwrap();
        assert_eq!(a.success_rate, b.success_rate);
        assert_eq!(a.successes, b.successes);
        assert_eq!(a.mean_coherence, b.mean_coherence);
        assert_eq!(a.mean_fidelity, b.mean_fidelity);
        assert_eq!(a.mean_invariant, b.mean_invariant);
    }

    #[test]
    fn parallel_runs_are_bit_identical() {
        let params = Params {
            trials: 300,
            mode: Mode::Field,
            ..Params::default()
        };
        let a = run_simulation_parallel(&params, 7).unwrap();
        let b = run_simulation_parallel(&params, 7).unwrap();
        assert_eq!(a.success_rate, b.success_rate);
        assert_eq!(a.mean_coherence, b.mean_coherence);
        assert_eq!(a.mean_invariant, b.mean_invariant);
    }

    #[test]
    fn malformed_params_fail_before_any_trial() {
        let params = Params {
            n_species: 0,
            ..Params::default()
        };
        assert_eq!(run_simulation(&params, 1), Err(ConfigError::NoSpecies));
        assert_eq!(
            run_simulation_parallel(&params, 1),
            Err(ConfigError::NoSpecies)
        );
    }

    #[test]
    fn zero_trial_tally_yields_zeroed_rates() {
        let result = Tally::default().finish(&Params::default());
        assert_eq!(result.success_rate, 0.0);
        assert_eq!(result.mean_coherence, 0.0);
        assert_eq!(result.trials, 0);
    }

    #[test]
    fn success_rate_converges_with_trial_count() {
        let small = Params {
            trials: 100,
            ..Params::default()
        };
        let large = Params {
            trials: 10_000,
            ..Params::default()
        };
        let small_rate = run_simulation(&small, 42).unwrap().success_rate;
        let large_rate = run_simulation(&large, 42).unwrap().success_rate;
        assert!((small_rate - large_rate).abs() <= 0.02);
    }

    #[test]
    fn impossible_threshold_forces_zero_success_rate() {
        let params = Params {
            crit_error_threshold: 0.001,
            trials: 300,
            ..Params::default()
        };
        let result = run_simulation(&params, 42).unwrap();
        assert_eq!(result.success_rate, 0.0);
        assert_eq!(result.successes, 0);
    }

    #[test]
    fn parallel_and_sequential_agree_statistically() {
        let params = Params {
            trials: 2_000,
            ..Params::default()
        };
        let seq = run_simulation(&params, 42).unwrap();
        let par = run_simulation_parallel(&params, 42).unwrap();
        assert!((seq.success_rate - par.success_rate).abs() < 0.05);
    }
}
