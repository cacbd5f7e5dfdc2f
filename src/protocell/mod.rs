//! Single-trial protocell model.
//!
//! Leaves first:
//! - `network`: random weighted reaction graph
//! - `coherence`: spectral/entropy/loop analysis of the graph
//! - `membrane`: containment as a linear energy/noise tradeoff
//! - `rhythm`: internal clock and resonance against external drivers
//! - `replication`: copy-error rate and fidelity
//!
//! `trial` composes them into one pass/fail protocell attempt.

pub mod coherence;
pub mod membrane;
pub mod network;
pub mod replication;
pub mod rhythm;
pub mod trial;

use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Gaussian draw; degenerate distribution parameters resolve to the mean.
pub(crate) fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    Normal::new(mean, std_dev)
        .map(|dist| dist.sample(rng))
        .unwrap_or(mean)
}
