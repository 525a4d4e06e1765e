use {
    crate::{error::GasPricerError, pricer::GasPricer, target::TargetGasPerSecond},
    parking_lot::RwLock,
    std::sync::Arc,
};

/// Cloneable handle to a [`GasPricer`] shared between threads.
///
/// Epoch updates take the write lock, so concurrent `update_gas_price` calls
/// are applied one after another. Calculations take the read lock and always
/// see a single committed price.
#[derive(Debug)]
pub struct SharedGasPricer<T> {
    inner: Arc<RwLock<GasPricer<T>>>,
}

impl<T> Clone for SharedGasPricer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: TargetGasPerSecond> SharedGasPricer<T> {
    pub fn new(pricer: GasPricer<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(pricer)),
        }
    }

    pub fn calc_next_gas_price(
        &self,
        avg_gas_per_second_last_epoch: f64,
    ) -> Result<f64, GasPricerError> {
        self.inner
            .read()
            .calc_next_gas_price(avg_gas_per_second_last_epoch)
    }

    pub fn update_gas_price(
        &self,
        avg_gas_per_second_last_epoch: f64,
    ) -> Result<f64, GasPricerError> {
        self.inner
            .write()
            .update_gas_price(avg_gas_per_second_last_epoch)
    }

    pub fn current_price(&self) -> f64 {
        self.inner.read().current_price()
    }
}

impl<T> From<GasPricer<T>> for SharedGasPricer<T>
where
    T: TargetGasPerSecond,
{
    fn from(pricer: GasPricer<T>) -> Self {
        Self::new(pricer)
    }
}
