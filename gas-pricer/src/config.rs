use {
    crate::error::GasPricerError,
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// Static parameters of the epoch gas pricer.
///
/// The target gas per second is deliberately *not* part of the config: it is
/// supplied by a [`crate::target::TargetGasPerSecond`] and may change between
/// epochs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct GasPricerConfig {
    /// Price to start from. `0` means "unset" and the pricer starts at
    /// `floor_price`.
    pub initial_price: f64,

    /// Minimum gas price (floor). The pricer never outputs less.
    pub floor_price: f64,

    /// Maximum fractional change of the price in a single epoch, in either
    /// direction. `0.5` means the price may move by at most ±50 %.
    pub max_change_per_epoch: f64,
}

impl GasPricerConfig {
    /// Price the pricer will actually start from.
    #[inline]
    pub fn starting_price(&self) -> f64 {
        if self.initial_price == 0.0 {
            self.floor_price
        } else {
            self.initial_price
        }
    }

    /// Check that the config is internally consistent.
    pub fn validate(&self) -> Result<(), GasPricerError> {
        if !self.floor_price.is_finite() || self.floor_price < 0.0 {
            return Err(GasPricerError::InvalidConfig {
                reason: format!("floor_price ({}) must be finite and >= 0", self.floor_price),
            });
        }
        if !self.max_change_per_epoch.is_finite() || self.max_change_per_epoch < 0.0 {
            return Err(GasPricerError::InvalidConfig {
                reason: format!(
                    "max_change_per_epoch ({}) must be finite and >= 0",
                    self.max_change_per_epoch
                ),
            });
        }
        if !self.initial_price.is_finite() || self.initial_price < 0.0 {
            return Err(GasPricerError::InvalidConfig {
                reason: format!(
                    "initial_price ({}) must be finite and >= 0",
                    self.initial_price
                ),
            });
        }
        let starting_price = self.starting_price();
        if starting_price < self.floor_price {
            return Err(GasPricerError::InvalidConfig {
                reason: format!(
                    "initial_price ({}) < floor_price ({})",
                    self.initial_price, self.floor_price
                ),
            });
        }
        // A zero price is a fixed point of the multiplicative update.
        if starting_price == 0.0 {
            return Err(GasPricerError::InvalidConfig {
                reason: "starting price is 0; set a non-zero floor_price or initial_price"
                    .to_string(),
            });
        }
        // With a zero floor an idle epoch would scale the price by 1 - max_change <= 0.
        if self.floor_price == 0.0 && self.max_change_per_epoch >= 1.0 {
            return Err(GasPricerError::InvalidConfig {
                reason: format!(
                    "max_change_per_epoch ({}) must be < 1 when floor_price is 0",
                    self.max_change_per_epoch
                ),
            });
        }
        Ok(())
    }
}

impl Default for GasPricerConfig {
    fn default() -> Self {
        Self {
            initial_price: 0.0,         // start at the floor
            floor_price: 1.0,           // 1 unit minimum
            max_change_per_epoch: 0.5,  // ±50 % per epoch
        }
    }
}
