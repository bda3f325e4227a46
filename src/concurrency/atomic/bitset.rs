//! Word-packed atomic bitsets.
//!
//! This is a dense alternative to `Vec<AtomicBool>` for visited sets: one
//! `fetch_or` claims a bit, and 64 nodes share a cache-friendly word.

use core::sync::atomic::{AtomicUsize, Ordering};

/// A fixed-size bitset whose bits can be set concurrently.
pub struct AtomicBitset {
    bits: usize,
    words: Box<[AtomicUsize]>,
}

impl AtomicBitset {
    /// Creates a new bitset with `bits` bits, all cleared.
    pub fn new(bits: usize) -> Self {
        let words_len = bits.div_ceil(usize::BITS as usize);
        let words = (0..words_len).map(|_| AtomicUsize::new(0)).collect();
        Self { bits, words }
    }

    /// Number of bits.
    pub fn len_bits(&self) -> usize {
        self.bits
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    /// Returns whether `bit` is set.
    ///
    /// # Panics
    /// Panics if `bit >= len_bits()`.
    pub fn is_set(&self, bit: usize) -> bool {
        assert!(bit < self.bits, "bit {bit} out of range for {} bits", self.bits);
        let (word, mask) = bit_word_mask(bit);
        (self.words[word].load(Ordering::Acquire) & mask) != 0
    }

    /// Sets `bit` and returns `true` iff this call observed it previously cleared.
    ///
    /// Among any number of threads racing on the same bit, exactly one
    /// observes `true`.
    ///
    /// # Panics
    /// Panics if `bit >= len_bits()`.
    pub fn test_and_set(&self, bit: usize, order: Ordering) -> bool {
        assert!(bit < self.bits, "bit {bit} out of range for {} bits", self.bits);
        let (word, mask) = bit_word_mask(bit);
        let prev = self.words[word].fetch_or(mask, order);
        (prev & mask) == 0
    }
}

impl core::fmt::Debug for AtomicBitset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AtomicBitset")
            .field("bits", &self.bits)
            .field("set", &self.count_ones())
            .finish()
    }
}

#[inline(always)]
fn bit_word_mask(bit: usize) -> (usize, usize) {
    // `usize::BITS` is a power of two, so division reduces to shifts.
    let word_bits = usize::BITS as usize;
    (bit / word_bits, 1usize << (bit % word_bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_boundaries_are_independent() {
        let b = AtomicBitset::new(130);
        assert!(b.test_and_set(63, Ordering::Relaxed));
        assert!(b.test_and_set(64, Ordering::Relaxed));
        assert!(!b.is_set(62));
        assert!(!b.is_set(65));
        assert_eq!(b.count_ones(), 2);
    }

    #[test]
    fn concurrent_claims_succeed_once_per_bit() {
        let b = AtomicBitset::new(1000);
        let wins = AtomicUsize::new(0);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for bit in 0..1000 {
                        if b.test_and_set(bit, Ordering::AcqRel) {
                            wins.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });
        assert_eq!(wins.load(Ordering::Relaxed), 1000);
        assert_eq!(b.count_ones(), 1000);
    }
}
