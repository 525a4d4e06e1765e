//! Suppliers of the target gas per second.
//!
//! The pricer queries its supplier once per calculation, so a supplier may
//! return a different value every epoch (e.g. when the sequencer fleet is
//! resized). Any `Fn() -> f64` closure is a supplier; [`ConstantTarget`] and
//! [`SharedTarget`] cover the two common cases.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Source of the desired average gas per second for the current epoch.
pub trait TargetGasPerSecond {
    fn target_gas_per_second(&self) -> f64;
}

impl<F> TargetGasPerSecond for F
where
    F: Fn() -> f64,
{
    #[inline]
    fn target_gas_per_second(&self) -> f64 {
        self()
    }
}

impl<T: TargetGasPerSecond + ?Sized> TargetGasPerSecond for Arc<T> {
    #[inline]
    fn target_gas_per_second(&self) -> f64 {
        (**self).target_gas_per_second()
    }
}

/// A target that never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantTarget(pub f64);

impl TargetGasPerSecond for ConstantTarget {
    #[inline]
    fn target_gas_per_second(&self) -> f64 {
        self.0
    }
}

/// A target that other parts of the node can update at runtime.
///
/// Clones share the same value. The `f64` is stored as its bit pattern in an
/// `AtomicU64`.
#[derive(Debug, Clone)]
pub struct SharedTarget {
    bits: Arc<AtomicU64>,
}

impl SharedTarget {
    pub fn new(target: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(target.to_bits())),
        }
    }

    /// Replace the target. Takes effect on the next price calculation.
    pub fn set(&self, target: f64) {
        self.bits.store(target.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl TargetGasPerSecond for SharedTarget {
    #[inline]
    fn target_gas_per_second(&self) -> f64 {
        self.get()
    }
}
