//! # TRv1 Gas Pricer
//!
//! An **epoch-based gas price controller** for the TRv1 L2 execution layer.
//!
//! At the end of every epoch the node reports the average gas per second it
//! observed. The pricer compares that with a **target gas per second** and
//! scales the price toward the level that would bring demand back to target,
//! moving at most `max_change_per_epoch` in either direction and never below
//! the **floor price**. Prices are whole units: every result is rounded up.
//!
//! ## Quick start
//!
//! ```rust
//! use trv1_gas_pricer::{ConstantTarget, GasPricer, GasPricerConfig};
//!
//! let config = GasPricerConfig {
//!     initial_price: 100.0,
//!     floor_price: 1.0,
//!     max_change_per_epoch: 0.5,
//! };
//! let mut pricer = GasPricer::new(config, ConstantTarget(10.0)).unwrap();
//!
//! // Demand was 25 % above target last epoch.
//! assert_eq!(pricer.calc_next_gas_price(12.5).unwrap(), 125.0);
//!
//! // Commit it at the epoch boundary.
//! pricer.update_gas_price(12.5).unwrap();
//! assert_eq!(pricer.current_price(), 125.0);
//! ```
//!
//! The target is supplied by any [`TargetGasPerSecond`] (including plain
//! closures) and is queried on every calculation. See [`pricer`] for the
//! formula and [`shared`] for a thread-safe handle.

pub mod config;
pub mod error;
pub mod pricer;
pub mod shared;
pub mod target;


// Re-exports for convenience.
pub use config::GasPricerConfig;
pub use error::GasPricerError;
pub use pricer::GasPricer;
pub use shared::SharedGasPricer;
pub use target::{ConstantTarget, SharedTarget, TargetGasPerSecond};
