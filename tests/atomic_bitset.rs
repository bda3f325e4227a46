use core::sync::atomic::Ordering;

use frontier::concurrency::atomic::AtomicBitset;

#[test]
fn atomic_bitset_basic() {
    let b = AtomicBitset::new(130);
    assert_eq!(b.len_bits(), 130);

    assert!(!b.is_set(0));
    assert!(b.test_and_set(0, Ordering::Relaxed));
    assert!(b.is_set(0));
    assert!(!b.test_and_set(0, Ordering::Relaxed));

    assert!(b.test_and_set(129, Ordering::Relaxed));
    assert!(b.is_set(129));
    assert_eq!(b.count_ones(), 2);
    assert!(!b.is_set(128));
}

#[test]
#[should_panic(expected = "out of range")]
fn atomic_bitset_rejects_out_of_range_bit() {
    let b = AtomicBitset::new(10);
    b.test_and_set(10, Ordering::Relaxed);
}
