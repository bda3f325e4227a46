//! `GenerationalBarrier`: one coordinator, `N` workers, unbounded reuse.
//!
//! Every generation follows the same cycle:
//!
//! 1. each worker finishes its share and calls [`worker_arrive`];
//! 2. the last arrival flags the coordinator and then blocks like the others;
//! 3. the coordinator returns from [`coordinator_wait`], touches shared
//!    state while every worker is parked, and calls [`start_next_generation`]
//!    (or [`shut_down`]) to release them.
//!
//! Workers wait on a captured generation number rather than on a raw signal,
//! so a spurious wakeup or a late `notify_all` can never release a worker
//! twice. The coordinator waits on a `ready` flag that it consumes.
//!
//! [`worker_arrive`]: GenerationalBarrier::worker_arrive
//! [`coordinator_wait`]: GenerationalBarrier::coordinator_wait
//! [`start_next_generation`]: GenerationalBarrier::start_next_generation
//! [`shut_down`]: GenerationalBarrier::shut_down

use super::{lock, Condvar, Mutex};

/// What a worker should do after the barrier releases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRelease {
    /// A new generation started; run the next phase.
    Continue,
    /// The coordinator is tearing the pool down; exit the worker loop.
    Shutdown,
}

/// Failure observed by the coordinator while waiting for a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierError {
    /// A worker unwound before arriving, so the generation can never complete.
    Abandoned,
}

impl core::fmt::Display for BarrierError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Abandoned => f.write_str("a worker abandoned the barrier"),
        }
    }
}

impl std::error::Error for BarrierError {}

#[derive(Debug)]
struct State {
    /// Workers that arrived in the current generation.
    arrived: usize,
    generation: u64,
    /// All workers arrived and the coordinator has not consumed it yet.
    ready: bool,
    shutdown: bool,
    abandoned: bool,
}

/// A reusable barrier separating the phases of a fixed worker pool.
///
/// Exactly one thread may act as the coordinator; exactly `workers` threads
/// call [`worker_arrive`](Self::worker_arrive), once per generation.
pub struct GenerationalBarrier {
    workers: usize,
    state: Mutex<State>,
    /// Workers park here until the generation changes.
    released: Condvar,
    /// The coordinator parks here until `ready` is set.
    all_arrived: Condvar,
}

impl core::fmt::Debug for GenerationalBarrier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("GenerationalBarrier")
            .field("workers", &self.workers)
            .field("state", &*state)
            .finish()
    }
}

impl GenerationalBarrier {
    /// Creates a barrier for `workers` worker threads plus one coordinator.
    ///
    /// # Panics
    /// Panics if `workers == 0`.
    pub fn new(workers: usize) -> Self {
        assert!(workers != 0, "barrier needs at least one worker");
        Self {
            workers,
            state: Mutex::new(State {
                arrived: 0,
                generation: 0,
                ready: false,
                shutdown: false,
                abandoned: false,
            }),
            released: Condvar::new(),
            all_arrived: Condvar::new(),
        }
    }

    /// Number of worker participants.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Current generation number.
    pub fn generation(&self) -> u64 {
        lock(&self.state).generation
    }

    /// Marks the calling worker as done with the current generation and
    /// blocks until the coordinator starts the next one.
    ///
    /// The last of the `N` arrivals notifies the coordinator before parking.
    /// Once the barrier is shut down, arrivals return
    /// [`WorkerRelease::Shutdown`] without blocking, so a worker still busy
    /// when the coordinator bails out can never park for good.
    pub fn worker_arrive(&self) -> WorkerRelease {
        let mut state = lock(&self.state);
        if state.shutdown {
            return WorkerRelease::Shutdown;
        }
        let observed = state.generation;

        state.arrived += 1;
        if state.arrived == self.workers {
            state.arrived = 0;
            state.ready = true;
            self.all_arrived.notify_one();
        }

        while state.generation == observed && !state.shutdown {
            state = self
                .released
                .wait(state)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }

        if state.shutdown {
            WorkerRelease::Shutdown
        } else {
            WorkerRelease::Continue
        }
    }

    /// Blocks the coordinator until all workers arrived in the current
    /// generation, then consumes the arrival signal.
    ///
    /// # Errors
    /// Returns [`BarrierError::Abandoned`] if a worker unwound instead of arriving.
    pub fn coordinator_wait(&self) -> Result<(), BarrierError> {
        let mut state = lock(&self.state);
        while !state.ready {
            if state.abandoned {
                return Err(BarrierError::Abandoned);
            }
            state = self
                .all_arrived
                .wait(state)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
        state.ready = false;
        Ok(())
    }

    /// Starts the next generation, releasing every parked worker.
    ///
    /// Only the coordinator calls this, after [`coordinator_wait`](Self::coordinator_wait)
    /// returned for the current generation.
    pub fn start_next_generation(&self) {
        let mut state = lock(&self.state);
        state.generation = state.generation.wrapping_add(1);
        self.released.notify_all();
    }

    /// Starts a final generation in which every worker is told to exit.
    ///
    /// Safe to call while workers are still mid-phase: their next arrival
    /// returns immediately.
    pub fn shut_down(&self) {
        let mut state = lock(&self.state);
        state.shutdown = true;
        state.generation = state.generation.wrapping_add(1);
        self.released.notify_all();
    }

    /// Records that a worker will never arrive again and wakes the coordinator.
    ///
    /// Called from a worker's unwinding path.
    pub fn abandon(&self) {
        let mut state = lock(&self.state);
        state.abandoned = true;
        self.all_arrived.notify_one();
    }
}
