//! Monte Carlo core for protocell emergence trials.
//!
//! Tests whether a periodic resonance mechanism ("field" mode) improves the
//! odds that a random chemical reaction network yields a self-sustaining
//! protocell, against a null "no field" baseline.
//!
//! One trial builds a random weighted reaction graph and walks four gates:
//! membrane containment, autocatalytic cycle coherence, internal-clock
//! resonance against external periodic drivers, and replication fidelity.
//! [`run_simulation`] aggregates many independent trials into a success rate
//! and mean metrics; [`run_trial`] exposes per-trial detail for sweep and
//! diagnostic tooling.
//!
//! Two historical model variants are preserved as [`Policy::Reference`] and
//! [`Policy::Sweep`]; they share structure but differ in constants and in how
//! resonance is scored.

pub mod config;
pub mod error;
pub mod protocell;
pub mod simulation;

pub use config::{Mode, Params, Policy};
pub use error::ConfigError;
pub use protocell::trial::{run_trial, GateFailure, TrialMetrics, TrialOutcome};
pub use simulation::{run_simulation, run_simulation_parallel, SimulationResult};
