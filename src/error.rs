//! Configuration validation errors.

use thiserror::Error;

/// A [`Params`](crate::Params) field is outside its documented bounds.
///
/// Raised before any trial runs; numerical degeneracies inside a trial
/// (all-zero network rows, degenerate distributions) never error and
/// instead resolve to low scores.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("n_species must be at least 1")]
    NoSpecies,
    #[error("density {0} must be between 0.0 and 1.0")]
    DensityOutOfRange(f64),
    #[error("energy_grad {0} must be non-negative")]
    NegativeEnergyGradient(f64),
    #[error("noise_level {0} must be non-negative")]
    NegativeNoiseLevel(f64),
    #[error("membrane_leak {0} must be non-negative")]
    NegativeMembraneLeak(f64),
    #[error("code_length must be at least 1")]
    EmptyCode,
    #[error("alphabet size {0} must be at least 2")]
    AlphabetTooSmall(usize),
    #[error("base_error_rate {0} must be between 0.0 and 1.0")]
    BaseErrorOutOfRange(f64),
    #[error("crit_error_threshold {0} must be between 0.0 and 1.0")]
    CritErrorOutOfRange(f64),
    #[error("f_eta {0} must be strictly between 0.0 and 1.0")]
    EtaOutOfRange(f64),
    #[error("ext_periods must not be empty")]
    NoExternalPeriods,
    #[error("external period {0} must be positive and finite")]
    InvalidExternalPeriod(f64),
    #[error("resonance_tolerance {0} must be positive")]
    NonPositiveTolerance(f64),
    #[error("resonance_power {0} must be positive")]
    NonPositivePower(f64),
    #[error("trials must be at least 1")]
    NoTrials,
}
