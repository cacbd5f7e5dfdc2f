//! Simulation configuration.
//!
//! One [`Params`] instance drives a full Monte Carlo run. Fields are plain
//! and public; [`Params::validate`] checks every bound up front so a
//! malformed configuration fails before the first trial, not inside one.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rhythm coupling mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Null baseline: the internal rhythm is random and nothing couples to
    /// the external drivers.
    NoField,
    /// Resonance mechanism active: external periods compress into the
    /// internal clock and resonance suppresses copy errors.
    Field,
}

/// Named model variant.
///
/// The two variants share the same pipeline but disagree on constants, the
/// entropy normalization, the resonance falloff shape, and whether
/// per-period resonance scores aggregate by mean or by max. Neither is
/// canonical; callers pick one explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Linear resonance falloff against the nearest integer multiple of
    /// each driver, aggregated by mean; cycle gate at 0.85.
    Reference,
    /// Gaussian falloff on the ratio-space mismatch, keeping the
    /// best-aligned driver; cycle gate at 1.0.
    Sweep,
}

/// Protocell simulation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Number of molecule species in the primordial soup.
    pub n_species: usize,
    /// Probability that any ordered species pair interacts.
    pub density: f64,
    /// Available energy gradient (volcanism / UV).
    pub energy_grad: f64,
    /// Environmental noise level.
    pub noise_level: f64,
    /// Tidal modulation amplitude. Config surface only; no arithmetic in
    /// the core reads it.
    pub tidal_mod_amp: f64,
    /// Base threshold for retaining the cycle inside the capsule.
    pub membrane_threshold: f64,
    /// Membrane leakage coefficient.
    pub membrane_leak: f64,
    /// Information-carrier length (bits / nucleotides).
    pub code_length: usize,
    /// Carrier alphabet size.
    pub alphabet: usize,
    /// Base replication error rate.
    pub base_error_rate: f64,
    /// Error catastrophe threshold.
    pub crit_error_threshold: f64,
    /// Rhythm compression coefficient η, strictly inside (0, 1).
    pub f_eta: f64,
    /// External driver periods, in ticks. Never empty after construction.
    pub ext_periods: Vec<f64>,
    /// Resonance tolerance (phase-matching precision).
    pub resonance_tolerance: f64,
    /// Resonance sensitivity exponent. Only the sweep variant reads it.
    pub resonance_power: f64,
    /// Monte Carlo trial count.
    pub trials: usize,
    /// Rhythm coupling mode.
    pub mode: Mode,
    /// Model variant.
    pub policy: Policy,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            n_species: 20,
            density: 0.6,
            energy_grad: 1.0,
            noise_level: 0.25,
            tidal_mod_amp: 0.2,
            membrane_threshold: 0.55,
            membrane_leak: 0.15,
            code_length: 64,
            alphabet: 4,
            base_error_rate: 0.02,
            crit_error_threshold: 0.04,
            f_eta: 0.32,
            // Day = 1 tick, lunar month ~29.5, core node ~8.5 years.
            ext_periods: vec![1.0, 29.5, 31025.0],
            resonance_tolerance: 0.08,
            resonance_power: 4.0,
            trials: 500,
            mode: Mode::NoField,
            policy: Policy::Reference,
        }
    }
}

impl Params {
    /// Check every field against its documented bounds.
    ///
    /// Returns the first violation found, naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_species < 1 {
            return Err(ConfigError::NoSpecies);
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::DensityOutOfRange(self.density));
        }
        if !self.energy_grad.is_finite() || self.energy_grad < 0.0 {
            return Err(ConfigError::NegativeEnergyGradient(self.energy_grad));
        }
        if !self.noise_level.is_finite() || self.noise_level < 0.0 {
            return Err(ConfigError::NegativeNoiseLevel(self.noise_level));
        }
        if !self.membrane_leak.is_finite() || self.membrane_leak < 0.0 {
            return Err(ConfigError::NegativeMembraneLeak(self.membrane_leak));
        }
        if self.code_length < 1 {
            return Err(ConfigError::EmptyCode);
        }
        if self.alphabet < 2 {
            return Err(ConfigError::AlphabetTooSmall(self.alphabet));
        }
        if !(0.0..=1.0).contains(&self.base_error_rate) {
            return Err(ConfigError::BaseErrorOutOfRange(self.base_error_rate));
        }
        if !(0.0..=1.0).contains(&self.crit_error_threshold) {
            return Err(ConfigError::CritErrorOutOfRange(self.crit_error_threshold));
        }
        if !(self.f_eta > 0.0 && self.f_eta < 1.0) {
            return Err(ConfigError::EtaOutOfRange(self.f_eta));
        }
        if self.ext_periods.is_empty() {
            return Err(ConfigError::NoExternalPeriods);
        }
        for &period in &self.ext_periods {
            if !period.is_finite() || period <= 0.0 {
                return Err(ConfigError::InvalidExternalPeriod(period));
            }
        }
        if !self.resonance_tolerance.is_finite() || self.resonance_tolerance <= 0.0 {
            return Err(ConfigError::NonPositiveTolerance(self.resonance_tolerance));
        }
        if !self.resonance_power.is_finite() || self.resonance_power <= 0.0 {
            return Err(ConfigError::NonPositivePower(self.resonance_power));
        }
        if self.trials < 1 {
            return Err(ConfigError::NoTrials);
        }
        Ok(())
    }
}
