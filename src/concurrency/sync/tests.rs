use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Drives `generations` full cycles over `workers` threads and checks that
/// the coordinator always observes every worker's phase work.
fn drive(workers: usize, generations: usize) {
    let barrier = GenerationalBarrier::new(workers);
    let done = AtomicUsize::new(0);

    thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let barrier = &barrier;
                let done = &done;
                s.spawn(move || {
                    let mut phases = 0usize;
                    loop {
                        done.fetch_add(1, Ordering::Relaxed);
                        phases += 1;
                        if barrier.worker_arrive() == WorkerRelease::Shutdown {
                            return phases;
                        }
                    }
                })
            })
            .collect();

        for k in 0..=generations {
            if k > 0 {
                barrier.start_next_generation();
            }
            barrier.coordinator_wait().unwrap();
            assert_eq!(done.load(Ordering::Relaxed), (k + 1) * workers);
        }
        barrier.shut_down();

        for h in handles {
            assert_eq!(h.join().unwrap(), generations + 1);
        }
    });
}

#[test]
fn test_barrier_single_worker() {
    drive(1, 10);
}

#[test]
fn test_barrier_liveness_grid() {
    for workers in 1..=4 {
        for generations in 0..=6 {
            drive(workers, generations);
        }
    }
}

#[test]
fn test_barrier_many_generations() {
    drive(8, 200);
}

#[test]
fn test_generation_counter_advances_once_per_release() {
    let barrier = GenerationalBarrier::new(2);
    assert_eq!(barrier.generation(), 0);

    thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| while barrier.worker_arrive() == WorkerRelease::Continue {});
        }
        barrier.coordinator_wait().unwrap();
        barrier.start_next_generation();
        barrier.coordinator_wait().unwrap();
        assert_eq!(barrier.generation(), 1);
        barrier.shut_down();
    });

    assert_eq!(barrier.generation(), 2);
}

#[test]
fn test_workers_stay_parked_until_release() {
    let barrier = GenerationalBarrier::new(3);
    let passed = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..3 {
            s.spawn(|| {
                let release = barrier.worker_arrive();
                passed.fetch_add(1, Ordering::SeqCst);
                release
            });
        }

        barrier.coordinator_wait().unwrap();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(passed.load(Ordering::SeqCst), 0);
        barrier.shut_down();
    });

    assert_eq!(passed.load(Ordering::SeqCst), 3);
}

#[test]
fn test_abandoned_barrier_fails_coordinator() {
    let barrier = GenerationalBarrier::new(2);

    thread::scope(|s| {
        let arriving = s.spawn(|| barrier.worker_arrive());
        s.spawn(|| {
            thread::sleep(Duration::from_millis(10));
            barrier.abandon();
        });

        assert_eq!(barrier.coordinator_wait(), Err(BarrierError::Abandoned));
        barrier.shut_down();
        assert_eq!(arriving.join().unwrap(), WorkerRelease::Shutdown);
    });
}

#[test]
#[should_panic(expected = "at least one worker")]
fn test_zero_workers_rejected() {
    let _ = GenerationalBarrier::new(0);
}

#[test]
fn test_arrival_after_shutdown_does_not_block() {
    let barrier = GenerationalBarrier::new(2);

    thread::scope(|s| {
        let early = s.spawn(|| barrier.worker_arrive());
        barrier.abandon();
        assert_eq!(barrier.coordinator_wait(), Err(BarrierError::Abandoned));
        barrier.shut_down();
        assert_eq!(early.join().unwrap(), WorkerRelease::Shutdown);
    });

    // A worker that was still mid-phase during the shutdown arrives late.
    let generation = barrier.generation();
    assert_eq!(barrier.worker_arrive(), WorkerRelease::Shutdown);
    assert_eq!(barrier.worker_arrive(), WorkerRelease::Shutdown);
    assert_eq!(barrier.generation(), generation);
}
