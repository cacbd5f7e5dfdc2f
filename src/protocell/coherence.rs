//! Cycle coherence evaluation.
//!
//! Spectral + entropy + loop-strength analysis of the reaction graph:
//! does the network support a stable closed loop (autocatalysis)?

use nalgebra::{DMatrix, Normed};

use crate::config::Policy;

const ENTROPY_EPS: f64 = 1e-12;
/// Perturbation added to the diagonal before the 3-step loop measure
/// (reference variant only).
const LOOP_EPS: f64 = 1e-6;

/// Outcome of the cycle assessment for one network.
#[derive(Clone, Copy, Debug)]
pub struct CycleAssessment {
    /// Spectral coherence after the energy boost and leak/noise penalties.
    pub coherence: f64,
    /// Combined score the cycle gate thresholds against.
    pub cycle_score: f64,
    /// Whether an autocatalytic cycle is judged present.
    pub has_cycle: bool,
}

/// Largest eigenvalue magnitude of the transition matrix.
fn spectral_radius(adj: &DMatrix<f64>) -> f64 {
    adj.complex_eigenvalues()
        .iter()
        .map(|ev| ev.norm())
        .fold(0.0, f64::max)
}

/// Distribution entropy of the matrix entries, a measure of chaos.
///
/// The reference variant treats raw entries (plus epsilon) as the
/// distribution and divides by n; the sweep variant normalizes entries to
/// sum to 1 and divides by ln n.
fn network_entropy(adj: &DMatrix<f64>, policy: Policy) -> f64 {
    let n = adj.nrows();
    match policy {
        Policy::Reference => {
            let raw: f64 = adj
                .iter()
                .map(|&a| {
                    let p = a + ENTROPY_EPS;
                    -(p * p.ln())
                })
                .sum();
            raw / n as f64
        }
        Policy::Sweep => {
            if n < 2 {
                return 0.0;
            }
            let total: f64 = adj.iter().sum::<f64>() + ENTROPY_EPS;
            let raw: f64 = adj
                .iter()
                .map(|&a| {
                    let p = a / total;
                    -(p * (p + ENTROPY_EPS).ln())
                })
                .sum();
            raw / (n as f64).ln()
        }
    }
}

/// Mean 3-step return probability: average diagonal of the cubed matrix.
fn loop_strength(adj: &DMatrix<f64>, policy: Policy) -> f64 {
    let n = adj.nrows();
    let base = match policy {
        Policy::Reference => adj + DMatrix::identity(n, n) * LOOP_EPS,
        Policy::Sweep => adj.clone(),
    };
    let cubed = &base * &base * &base;
    cubed.diagonal().mean()
}

/// Judge whether the network forms a stable closed loop.
///
/// Energy raises connectivity; leaks and noise tear it down. The gate
/// adds distribution entropy and 3-step loop strength to the coherence
/// before thresholding. Degenerate networks (all-zero rows, n = 1) fall
/// through with low scores; nothing here errors.
pub fn evaluate_cycle_coherence(
    adj: &DMatrix<f64>,
    energy: f64,
    leak: f64,
    noise: f64,
    policy: Policy,
) -> CycleAssessment {
    let radius = spectral_radius(adj);
    let entropy = network_entropy(adj, policy);
    let loops = loop_strength(adj, policy);

    let (coherence, cycle_score, gate) = match policy {
        Policy::Reference => {
            let coherence = radius * (1.0 + 0.6 * energy) - (0.4 * leak + 0.3 * noise);
            let score = coherence + 0.15 * entropy + 0.5 * loops;
            (coherence, score, 0.85)
        }
        Policy::Sweep => {
            let coherence = radius * (1.0 + 0.6 * energy) - (leak + 0.5 * noise);
            let score = coherence + 0.15 * entropy + 0.6 * loops;
            (coherence, score, 1.0)
        }
    };

    CycleAssessment {
        coherence,
        cycle_score,
        has_cycle: cycle_score > gate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Directed ring over `n` species: each row has a single unit edge.
    fn ring_network(n: usize) -> DMatrix<f64> {
        DMatrix::from_fn(n, n, |i, j| if j == (i + 1) % n { 1.0 } else { 0.0 })
    }

    #[test]
    fn spectral_radius_of_permutation_is_one() {
        let swap = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        assert!((spectral_radius(&swap) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_network_has_no_cycle() {
        let adj = DMatrix::zeros(10, 10);
        for policy in [Policy::Reference, Policy::Sweep] {
            let assessment = evaluate_cycle_coherence(&adj, 1.0, 0.15, 0.25, policy);
            assert!(!assessment.has_cycle);
            assert!(assessment.coherence < 0.0);
        }
    }

    #[test]
    fn strong_ring_supports_a_cycle() {
        // A clean ring is row-stochastic with spectral radius 1; with a
        // unit energy gradient and no losses it clears both gates.
        let adj = ring_network(4);
        for policy in [Policy::Reference, Policy::Sweep] {
            let assessment = evaluate_cycle_coherence(&adj, 1.0, 0.0, 0.0, policy);
            assert!(assessment.has_cycle, "{policy:?}");
            assert!(assessment.coherence > 1.0);
        }
    }

    #[test]
    fn noise_and_leak_lower_coherence() {
        let adj = ring_network(6);
        for policy in [Policy::Reference, Policy::Sweep] {
            let calm = evaluate_cycle_coherence(&adj, 1.0, 0.0, 0.0, policy);
            let harsh = evaluate_cycle_coherence(&adj, 1.0, 0.5, 0.8, policy);
            assert!(harsh.coherence < calm.coherence);
        }
    }

    #[test]
    fn single_species_degenerates_without_panic() {
        let adj = DMatrix::zeros(1, 1);
        for policy in [Policy::Reference, Policy::Sweep] {
            let assessment = evaluate_cycle_coherence(&adj, 0.0, 0.0, 0.0, policy);
            assert!(assessment.cycle_score.is_finite());
            assert!(!assessment.has_cycle);
        }
    }

    #[test]
    fn three_ring_has_loop_strength() {
        // Every node of a 3-ring returns to itself in exactly 3 steps.
        let adj = ring_network(3);
        assert!((loop_strength(&adj, Policy::Sweep) - 1.0).abs() < 1e-9);
        // Reference adds a tiny diagonal perturbation; still close to 1.
        assert!((loop_strength(&adj, Policy::Reference) - 1.0).abs() < 1e-3);
    }
}
