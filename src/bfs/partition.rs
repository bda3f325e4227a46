//! Splitting a frontier of `F` entries across `N` workers.
//!
//! Both policies yield, for every worker, a set of disjoint index ranges into
//! the frontier; across all workers the ranges cover `0..F` exactly once.

use core::ops::Range;

use serde::{Deserialize, Serialize};

/// How frontier indices are assigned to workers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionPolicy {
    /// One contiguous range of `ceil(F / N)` entries per worker; trailing
    /// workers may receive an empty or shorter range.
    Static,
    /// Chunks of `chunk_size` entries dealt out as `chunk c -> worker c mod N`;
    /// the final partial chunk belongs to worker 0.
    #[default]
    RoundRobin,
}

/// Partitioning parameters fixed for a whole traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    policy: PartitionPolicy,
    workers: usize,
    chunk_size: usize,
}

impl Partitioner {
    /// Creates a partitioner for `workers` workers.
    ///
    /// # Panics
    /// Panics if `workers` or `chunk_size` is zero.
    pub fn new(policy: PartitionPolicy, workers: usize, chunk_size: usize) -> Self {
        assert!(workers != 0, "workers must be > 0");
        assert!(chunk_size != 0, "chunk_size must be > 0");
        Self {
            policy,
            workers,
            chunk_size,
        }
    }

    /// Number of workers sharing each frontier.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Index ranges owned by `worker` in a frontier of `len` entries.
    pub fn assignment(&self, len: usize, worker: usize) -> Assignment {
        debug_assert!(worker < self.workers);
        match self.policy {
            PartitionPolicy::Static => {
                let share = len.div_ceil(self.workers);
                let start = (worker * share).min(len);
                let end = ((worker + 1) * share).min(len);
                Assignment {
                    inner: AssignmentInner::Single(Some(start..end).filter(|r| !r.is_empty())),
                }
            }
            PartitionPolicy::RoundRobin => {
                let full_chunks = len / self.chunk_size;
                let tail_start = full_chunks * self.chunk_size;
                let tail = (worker == 0 && tail_start < len).then_some(tail_start..len);
                Assignment {
                    inner: AssignmentInner::Chunks {
                        next_chunk: worker,
                        full_chunks,
                        stride: self.workers,
                        chunk_size: self.chunk_size,
                        tail,
                    },
                }
            }
        }
    }
}

/// Iterator over the index ranges of one worker, in ascending order.
#[derive(Debug, Clone)]
pub struct Assignment {
    inner: AssignmentInner,
}

#[derive(Debug, Clone)]
enum AssignmentInner {
    Single(Option<Range<usize>>),
    Chunks {
        next_chunk: usize,
        full_chunks: usize,
        stride: usize,
        chunk_size: usize,
        tail: Option<Range<usize>>,
    },
}

impl Iterator for Assignment {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        match &mut self.inner {
            AssignmentInner::Single(range) => range.take(),
            AssignmentInner::Chunks {
                next_chunk,
                full_chunks,
                stride,
                chunk_size,
                tail,
            } => {
                if *next_chunk < *full_chunks {
                    let start = *next_chunk * *chunk_size;
                    *next_chunk += *stride;
                    Some(start..start + *chunk_size)
                } else {
                    tail.take()
                }
            }
        }
    }
}
