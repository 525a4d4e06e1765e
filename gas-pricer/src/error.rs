use thiserror::Error;

/// Errors produced by the gas pricer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasPricerError {
    /// The pricer configuration is invalid (e.g. negative floor, negative
    /// max change per epoch, initial price below the floor).
    #[error("Invalid gas pricer configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The target-rate supplier returned a value the ratio cannot be taken
    /// against: zero, negative, NaN or infinite.
    #[error("Invalid target gas per second: {target} (must be finite and > 0)")]
    InvalidTarget { target: f64 },

    /// The observed average gas per second for the last epoch is negative or
    /// not finite.
    #[error("Invalid observed gas per second: {observed} (must be finite and >= 0)")]
    InvalidObservedRate { observed: f64 },

    /// `current price × adjustment factor` did not produce a finite number.
    #[error("Gas price overflow: {current} × {factor} is not finite")]
    PriceOverflow { current: f64, factor: f64 },
}
