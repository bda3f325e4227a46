//! Blocking synchronization for phase-structured worker pools.
//!
//! Under `--cfg loom` the primitives come from `loom` so the barrier protocol
//! can be model-checked; otherwise they are the `std` ones.

mod barrier;

pub use barrier::{BarrierError, GenerationalBarrier, WorkerRelease};

#[cfg(loom)]
pub(crate) use loom::sync::{Condvar, Mutex, MutexGuard};
#[cfg(not(loom))]
pub(crate) use std::sync::{Condvar, Mutex, MutexGuard};

/// Locks `mutex`, recovering the guard if a previous holder panicked.
///
/// Every state guarded this way stays consistent across a panic, so
/// poisoning carries no information.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(all(test, not(loom)))]
mod tests;
