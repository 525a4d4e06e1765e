use {
    crate::{config::GasPricerConfig, error::GasPricerError, target::TargetGasPerSecond},
    log::{debug, info, warn},
};

/// Epoch-based L2 gas pricer.
///
/// Once per epoch the caller reports the average gas per second observed over
/// that epoch and the pricer moves the price toward the level that would bring
/// demand back to target:
///
/// ```text
/// ratio = observed / target
///
/// if ratio >= 1:  factor = min(ratio, 1 + max_change_per_epoch)
/// else:           factor = max(ratio, 1 - max_change_per_epoch)
///
/// next_price = ceil(max(floor_price, current_price × factor))
/// ```
///
/// The target is read from `T` on every calculation. Committing a new price
/// takes `&mut self`; share a pricer between threads through
/// [`crate::shared::SharedGasPricer`].
#[derive(Debug, Clone)]
pub struct GasPricer<T> {
    cur_price: f64,
    floor_price: f64,
    target: T,
    max_change_per_epoch: f64,
}

impl<T: TargetGasPerSecond> GasPricer<T> {
    /// Create a pricer from a validated config. An `initial_price` of zero
    /// starts the pricer at the floor.
    pub fn new(config: GasPricerConfig, target: T) -> Result<Self, GasPricerError> {
        config.validate()?;
        let pricer = Self {
            cur_price: config.starting_price(),
            floor_price: config.floor_price,
            target,
            max_change_per_epoch: config.max_change_per_epoch,
        };
        debug!(
            "gas pricer: start price={} floor={} max_change_per_epoch={}",
            pricer.cur_price, pricer.floor_price, pricer.max_change_per_epoch,
        );
        Ok(pricer)
    }

    /// Calculate the next gas price given the average gas per second over the
    /// last epoch. Does not change the current price.
    pub fn calc_next_gas_price(
        &self,
        avg_gas_per_second_last_epoch: f64,
    ) -> Result<f64, GasPricerError> {
        self.next_price(avg_gas_per_second_last_epoch)
            .map(|(next_price, _target)| next_price)
    }

    /// Calculate the next gas price and make it the current one. Returns the
    /// new price. On error the current price is left unchanged.
    pub fn update_gas_price(
        &mut self,
        avg_gas_per_second_last_epoch: f64,
    ) -> Result<f64, GasPricerError> {
        let (next_price, target) = self.next_price(avg_gas_per_second_last_epoch)?;
        info!(
            "gas pricer: epoch update price={} -> {} (observed_gas_per_second={}, target_gas_per_second={})",
            self.cur_price, next_price, avg_gas_per_second_last_epoch, target,
        );
        self.cur_price = next_price;
        Ok(next_price)
    }

    /// Returns `(next_price, target_used)`. The target is queried exactly once.
    fn next_price(&self, observed: f64) -> Result<(f64, f64), GasPricerError> {
        if !observed.is_finite() || observed < 0.0 {
            warn!("gas pricer: rejecting observed gas per second {observed}");
            return Err(GasPricerError::InvalidObservedRate { observed });
        }

        let target = self.target.target_gas_per_second();
        if !target.is_finite() || target <= 0.0 {
            warn!("gas pricer: rejecting target gas per second {target}");
            return Err(GasPricerError::InvalidTarget { target });
        }

        let factor = adjustment_factor(observed / target, self.max_change_per_epoch);
        let candidate = self.cur_price * factor;
        if !candidate.is_finite() {
            warn!(
                "gas pricer: price overflow, current={} factor={factor}",
                self.cur_price
            );
            return Err(GasPricerError::PriceOverflow {
                current: self.cur_price,
                factor,
            });
        }

        Ok((candidate.max(self.floor_price).ceil(), target))
    }

    #[inline]
    pub fn current_price(&self) -> f64 {
        self.cur_price
    }

    #[inline]
    pub fn floor_price(&self) -> f64 {
        self.floor_price
    }

    #[inline]
    pub fn max_change_per_epoch(&self) -> f64 {
        self.max_change_per_epoch
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

/// Clamp the observed/target ratio so the price moves by at most
/// `max_change` in either direction.
#[inline]
fn adjustment_factor(proportion_of_target: f64, max_change: f64) -> f64 {
    if proportion_of_target >= 1.0 {
        proportion_of_target.min(1.0 + max_change)
    } else {
        proportion_of_target.max(1.0 - max_change)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::target::ConstantTarget, assert_matches::assert_matches};

    fn pricer(cur_price: f64, floor_price: f64) -> GasPricer<ConstantTarget> {
        GasPricer::new(
            GasPricerConfig {
                initial_price: cur_price,
                floor_price,
                max_change_per_epoch: 0.5,
            },
            ConstantTarget(10.0),
        )
        .unwrap()
    }

    #[test]
    fn test_adjustment_factor_at_target() {
        assert_eq!(adjustment_factor(1.0, 0.5), 1.0);
    }

    #[test]
    fn test_adjustment_factor_clamps_both_ways() {
        assert_eq!(adjustment_factor(10.0, 0.5), 1.5);
        assert_eq!(adjustment_factor(0.0, 0.5), 0.5);
        assert_eq!(adjustment_factor(1.25, 0.5), 1.25);
        assert_eq!(adjustment_factor(0.75, 0.5), 0.75);
    }

    #[test]
    fn test_adjustment_factor_zero_max_change_pins() {
        assert_eq!(adjustment_factor(3.0, 0.0), 1.0);
        assert_eq!(adjustment_factor(0.2, 0.0), 1.0);
    }

    #[test]
    fn test_new_uses_floor_for_zero_initial_price() {
        let gp = pricer(0.0, 7.0);
        assert_eq!(gp.current_price(), 7.0);
        assert_eq!(gp.floor_price(), 7.0);
        assert_eq!(gp.max_change_per_epoch(), 0.5);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = GasPricer::new(
            GasPricerConfig {
                max_change_per_epoch: -1.0,
                ..Default::default()
            },
            ConstantTarget(10.0),
        );
        assert_matches!(result, Err(GasPricerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_calc_does_not_mutate() {
        let gp = pricer(100.0, 1.0);
        assert_eq!(gp.calc_next_gas_price(12.5).unwrap(), 125.0);
        assert_eq!(gp.current_price(), 100.0);
    }

    #[test]
    fn test_calc_rounds_up() {
        let gp = pricer(100.0, 1.0);
        // 100 * 1.001 = 100.1 -> 101
        assert_eq!(gp.calc_next_gas_price(10.01).unwrap(), 101.0);
        // 100 * 0.999 = 99.9 -> 100
        assert_eq!(gp.calc_next_gas_price(9.99).unwrap(), 100.0);
    }

    #[test]
    fn test_update_returns_and_stores_new_price() {
        let mut gp = pricer(100.0, 1.0);
        assert_eq!(gp.update_gas_price(100.0).unwrap(), 150.0);
        assert_eq!(gp.current_price(), 150.0);
        assert_eq!(gp.update_gas_price(100.0).unwrap(), 225.0);
        assert_eq!(gp.current_price(), 225.0);
    }

    #[test]
    fn test_zero_target_rejected() {
        let gp = GasPricer::new(GasPricerConfig::default(), || 0.0).unwrap();
        assert_matches!(
            gp.calc_next_gas_price(10.0),
            Err(GasPricerError::InvalidTarget { target }) if target == 0.0
        );
    }

    #[test]
    fn test_negative_and_nan_target_rejected() {
        let gp = GasPricer::new(GasPricerConfig::default(), || -5.0).unwrap();
        assert_matches!(
            gp.calc_next_gas_price(10.0),
            Err(GasPricerError::InvalidTarget { .. })
        );
        let gp = GasPricer::new(GasPricerConfig::default(), || f64::NAN).unwrap();
        assert_matches!(
            gp.calc_next_gas_price(10.0),
            Err(GasPricerError::InvalidTarget { .. })
        );
    }

    #[test]
    fn test_invalid_observed_rate_rejected() {
        let gp = pricer(100.0, 1.0);
        for observed in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_matches!(
                gp.calc_next_gas_price(observed),
                Err(GasPricerError::InvalidObservedRate { .. })
            );
        }
    }

    #[test]
    fn test_zero_observed_rate_drops_by_max_change() {
        let gp = pricer(100.0, 1.0);
        assert_eq!(gp.calc_next_gas_price(0.0).unwrap(), 50.0);
    }

    #[test]
    fn test_idle_epoch_with_large_max_change_lands_on_floor() {
        let mut gp = GasPricer::new(
            GasPricerConfig {
                initial_price: 100.0,
                floor_price: 5.0,
                max_change_per_epoch: 1.5,
            },
            ConstantTarget(10.0),
        )
        .unwrap();
        assert_eq!(gp.update_gas_price(0.0).unwrap(), 5.0);
        // The floor keeps the price multiplicative, so demand can raise it again.
        assert_eq!(gp.update_gas_price(1_000.0).unwrap(), 13.0);
    }

    #[test]
    fn test_zero_floor_idle_epochs_never_reach_zero() {
        let mut gp = GasPricer::new(
            GasPricerConfig {
                initial_price: 100.0,
                floor_price: 0.0,
                max_change_per_epoch: 0.9,
            },
            ConstantTarget(10.0),
        )
        .unwrap();
        for _ in 0..20 {
            gp.update_gas_price(0.0).unwrap();
        }
        assert_eq!(gp.current_price(), 1.0);
        assert_eq!(gp.update_gas_price(1_000.0).unwrap(), 2.0);
    }

    #[test]
    fn test_new_rejects_zero_floor_with_full_max_change() {
        let result = GasPricer::new(
            GasPricerConfig {
                initial_price: 100.0,
                floor_price: 0.0,
                max_change_per_epoch: 1.0,
            },
            ConstantTarget(10.0),
        );
        assert_matches!(result, Err(GasPricerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_failed_update_keeps_price() {
        let mut gp = pricer(100.0, 1.0);
        assert!(gp.update_gas_price(f64::NAN).is_err());
        assert_eq!(gp.current_price(), 100.0);
    }

    #[test]
    fn test_price_overflow() {
        let gp = GasPricer::new(
            GasPricerConfig {
                initial_price: f64::MAX,
                floor_price: 1.0,
                max_change_per_epoch: 0.5,
            },
            ConstantTarget(10.0),
        )
        .unwrap();
        assert_matches!(
            gp.calc_next_gas_price(100.0),
            Err(GasPricerError::PriceOverflow { .. })
        );
    }
}
