//! Worker-scheduling policies for the parallel multiply
//!
//! The parallel multiply treats the n×n output as a flat space of n² cells,
//! each cell being one dot-product-and-store. This module decides how that
//! cell space is cut into chunks and handed to workers:
//!
//! - **Static**: contiguous equal splits fixed up front, one per worker.
//!   Lowest overhead, no redistribution.
//! - **Dynamic**: fixed-size chunks claimed from a shared cursor as workers
//!   finish previous chunks.
//! - **Guided**: like dynamic, but the chunk size starts at
//!   `remaining / workers` and shrinks geometrically as the space drains.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::YunqueError;

/// Scheduling policy for distributing output cells across workers
///
/// A pure input parameter to the parallel multiply: it carries no state and
/// never affects the numeric result, only how the iteration space is divided
/// and therefore the wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schedule {
    /// Contiguous equal-size chunks assigned once, up front
    Static,
    /// Small fixed-size chunks pulled from a shared queue
    Dynamic,
    /// Shrinking chunks: large while much work remains, small near the end
    Guided,
}

impl Schedule {
    /// All schedules, in benchmark-report order
    pub const ALL: [Schedule; 3] = [Schedule::Static, Schedule::Dynamic, Schedule::Guided];

    /// Returns the lowercase name used in reports and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Schedule::Static => "static",
            Schedule::Dynamic => "dynamic",
            Schedule::Guided => "guided",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Schedule {
    type Err = YunqueError;

    /// Parses a schedule name
    ///
    /// The set is closed: anything other than `static`, `dynamic` or
    /// `guided` is `UnknownSchedule`, never silently ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(Schedule::Static),
            "dynamic" => Ok(Schedule::Dynamic),
            "guided" => Ok(Schedule::Guided),
            other => Err(YunqueError::UnknownSchedule(other.to_string())),
        }
    }
}

/// Target number of dynamic chunks per worker
///
/// OpenMP's `schedule(dynamic)` defaults to single-cell chunks, which makes
/// claim overhead dominate for cheap cells. Sizing chunks so each worker
/// averages ~16 claims keeps the queue contended enough to balance load
/// without a claim per cell.
const DYNAMIC_CHUNKS_PER_WORKER: usize = 16;

/// Contiguous cell range owned by worker `index` under static scheduling
///
/// The cell space `[0, total)` is split into `workers` contiguous spans whose
/// sizes differ by at most one; the first `total % workers` spans take the
/// extra cell. Workers beyond `total` receive an empty range.
pub(crate) fn static_span(total: usize, workers: usize, index: usize) -> Range<usize> {
    debug_assert!(workers > 0);
    debug_assert!(index < workers);
    let base = total / workers;
    let extra = total % workers;
    let start = index * base + index.min(extra);
    let len = base + usize::from(index < extra);
    start..start + len
}

/// Shared chunk queue for dynamic and guided scheduling
///
/// A single atomic cursor over the flat cell space. Workers claim
/// `[start, end)` ranges by advancing the cursor with a compare-exchange, so
/// claimed ranges are disjoint and together cover exactly `[0, total)`.
pub(crate) struct WorkQueue {
    cursor: AtomicUsize,
    total: usize,
    policy: ChunkPolicy,
}

enum ChunkPolicy {
    /// Fixed chunk size (dynamic scheduling)
    Fixed(usize),
    /// Chunk size `max(remaining / workers, 1)` (guided scheduling)
    Shrinking { workers: usize },
}

impl WorkQueue {
    /// Queue handing out fixed-size chunks (dynamic scheduling)
    pub(crate) fn dynamic(total: usize, workers: usize) -> Self {
        let chunk = (total / (workers * DYNAMIC_CHUNKS_PER_WORKER)).max(1);
        WorkQueue {
            cursor: AtomicUsize::new(0),
            total,
            policy: ChunkPolicy::Fixed(chunk),
        }
    }

    /// Queue handing out geometrically shrinking chunks (guided scheduling)
    pub(crate) fn guided(total: usize, workers: usize) -> Self {
        WorkQueue {
            cursor: AtomicUsize::new(0),
            total,
            policy: ChunkPolicy::Shrinking { workers },
        }
    }

    /// Claims the next chunk, or `None` once the cell space is drained
    pub(crate) fn claim(&self) -> Option<Range<usize>> {
        loop {
            let start = self.cursor.load(Ordering::Acquire);
            if start >= self.total {
                return None;
            }
            let size = match self.policy {
                ChunkPolicy::Fixed(chunk) => chunk,
                ChunkPolicy::Shrinking { workers } => ((self.total - start) / workers).max(1),
            };
            let end = (start + size).min(self.total);
            // CAS rather than fetch_add: the guided chunk size depends on the
            // cursor value it was computed from.
            if self
                .cursor
                .compare_exchange_weak(start, end, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Some(start..end);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_round_trip() {
        for schedule in Schedule::ALL {
            assert_eq!(schedule.as_str().parse::<Schedule>().unwrap(), schedule);
        }
    }

    #[test]
    fn test_schedule_unknown_name() {
        let err = "gided".parse::<Schedule>().unwrap_err();
        assert_eq!(err, YunqueError::UnknownSchedule("gided".to_string()));
        assert!("STATIC".parse::<Schedule>().is_err());
        assert!("".parse::<Schedule>().is_err());
    }

    #[test]
    fn test_static_span_partitions_exactly() {
        for (total, workers) in [(16, 4), (17, 4), (3, 8), (0, 2), (100, 7), (1, 1)] {
            let mut covered = vec![0usize; total];
            for w in 0..workers {
                for idx in static_span(total, workers, w) {
                    covered[idx] += 1;
                }
            }
            assert!(
                covered.iter().all(|&c| c == 1),
                "static_span must cover each of {total} cells exactly once with {workers} workers"
            );
        }
    }

    #[test]
    fn test_static_span_sizes_differ_by_at_most_one() {
        let sizes: Vec<usize> = (0..4).map(|w| static_span(17, 4, w).len()).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 17);
        let min = sizes.iter().min().unwrap();
        let max = sizes.iter().max().unwrap();
        assert!(max - min <= 1);
    }

    #[test]
    fn test_static_span_excess_workers_get_nothing() {
        // More workers than cells: trailing workers see empty ranges.
        let spans: Vec<_> = (0..8).map(|w| static_span(3, 8, w)).collect();
        assert!(spans[..3].iter().all(|s| s.len() == 1));
        assert!(spans[3..].iter().all(|s| s.is_empty()));
    }

    fn drain(queue: &WorkQueue, total: usize) -> Vec<Range<usize>> {
        let mut chunks = Vec::new();
        while let Some(chunk) = queue.claim() {
            chunks.push(chunk);
        }
        let mut covered = vec![0usize; total];
        for chunk in &chunks {
            for idx in chunk.clone() {
                covered[idx] += 1;
            }
        }
        assert!(covered.iter().all(|&c| c == 1));
        chunks
    }

    #[test]
    fn test_dynamic_queue_drains_exactly_once() {
        for (total, workers) in [(256, 4), (100, 3), (5, 8), (1, 1)] {
            drain(&WorkQueue::dynamic(total, workers), total);
        }
    }

    #[test]
    fn test_guided_queue_drains_exactly_once() {
        for (total, workers) in [(256, 4), (100, 3), (5, 8), (1, 1)] {
            drain(&WorkQueue::guided(total, workers), total);
        }
    }

    #[test]
    fn test_guided_chunks_shrink() {
        let chunks = drain(&WorkQueue::guided(1024, 4), 1024);
        assert_eq!(chunks[0].len(), 256);
        for pair in chunks.windows(2) {
            assert!(pair[1].len() <= pair[0].len());
        }
        // Tail chunks bottom out at a single cell.
        assert_eq!(chunks.last().unwrap().len(), 1);
    }

    #[test]
    fn test_dynamic_chunk_never_zero() {
        // total < workers * DYNAMIC_CHUNKS_PER_WORKER would truncate to 0.
        let chunks = drain(&WorkQueue::dynamic(7, 8), 7);
        assert!(chunks.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_empty_queue_yields_nothing() {
        assert!(WorkQueue::dynamic(0, 4).claim().is_none());
        assert!(WorkQueue::guided(0, 4).claim().is_none());
    }

    #[test]
    fn test_concurrent_claims_are_disjoint() {
        use std::sync::Mutex;

        let total = 4096;
        let queue = WorkQueue::dynamic(total, 4);
        let claimed = Mutex::new(vec![0usize; total]);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    while let Some(chunk) = queue.claim() {
                        let mut claimed = claimed.lock().unwrap();
                        for idx in chunk {
                            claimed[idx] += 1;
                        }
                    }
                });
            }
        });

        assert!(claimed.into_inner().unwrap().iter().all(|&c| c == 1));
    }
}
