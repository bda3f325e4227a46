//! Synchronization building blocks for the level-synchronous traversal.
//!
//! - [`sync`]: the reusable generational barrier shared by the workers and
//!   the coordinator.
//! - [`atomic`]: word-packed atomic bitsets used for claim-once visited flags.

pub mod atomic;
pub mod sync;

pub use atomic::AtomicBitset;
pub use sync::{BarrierError, GenerationalBarrier, WorkerRelease};
