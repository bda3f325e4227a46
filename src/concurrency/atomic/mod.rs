//! Atomic primitives.

pub mod bitset;

pub use bitset::AtomicBitset;
