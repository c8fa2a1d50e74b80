//! Matrix multiplication engine
//!
//! Owns the three square operand/result matrices and implements both the
//! sequential reference multiply and the parallel multiply under the three
//! worker-scheduling policies.
//!
//! # Example
//!
//! ```
//! use yunque::{MatrixEngine, Schedule};
//!
//! let mut engine = MatrixEngine::new(32)?;
//! engine.initialize();
//!
//! let sequential_secs = engine.multiply_sequential();
//! let reference = engine.result().clone();
//!
//! let parallel_secs = engine.multiply_parallel(4, Schedule::Guided)?;
//! assert_eq!(engine.result(), &reference);
//! # let _ = (sequential_secs, parallel_secs);
//! # Ok::<(), yunque::YunqueError>(())
//! ```

use std::ops::{Range, RangeInclusive};
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::schedule::{static_span, WorkQueue};
use crate::{Matrix, Result, Schedule, YunqueError};

/// Closed interval `initialize()` draws operand entries from
pub const OPERAND_RANGE: RangeInclusive<i64> = -100..=100;

/// Benchmark engine for square integer matrix multiplication
///
/// Owns three n×n matrices: operands A and B (randomly populated or supplied
/// by the caller) and result C (always re-derived, never externally set).
/// All three share the dimension fixed at construction; C is the zero matrix
/// until the first multiply and is fully overwritten by every multiply.
///
/// Both multiply operations compute `C[i][j] = Σ_k A[i][k] * B[k][j]` with
/// wrapping `i64` arithmetic and return the elapsed wall-clock seconds of the
/// multiplication loop only. The parallel multiply must produce output
/// element-wise identical to the sequential one for any thread count and
/// schedule; only the timing may differ.
#[derive(Debug)]
pub struct MatrixEngine {
    n: usize,
    a: Matrix,
    b: Matrix,
    c: Matrix,
}

impl MatrixEngine {
    /// Creates an engine for n×n matrices
    ///
    /// A, B and C all start as zero matrices.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if `n` is 0.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(YunqueError::InvalidDimension(n));
        }
        Ok(MatrixEngine {
            n,
            a: Matrix::zeros(n),
            b: Matrix::zeros(n),
            c: Matrix::zeros(n),
        })
    }

    /// Returns the matrix dimension n
    pub fn n(&self) -> usize {
        self.n
    }

    /// Overwrites A and B with uniform random values in [`OPERAND_RANGE`]
    ///
    /// C is not touched.
    pub fn initialize(&mut self) {
        self.a.fill_random(OPERAND_RANGE);
        self.b.fill_random(OPERAND_RANGE);
    }

    /// Replaces operand A
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the supplied matrix is not n×n; the
    /// previous A is left untouched.
    pub fn set_operand_a(&mut self, matrix: Matrix) -> Result<()> {
        self.check_shape(&matrix)?;
        self.a = matrix;
        Ok(())
    }

    /// Replaces operand B
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the supplied matrix is not n×n; the
    /// previous B is left untouched.
    pub fn set_operand_b(&mut self, matrix: Matrix) -> Result<()> {
        self.check_shape(&matrix)?;
        self.b = matrix;
        Ok(())
    }

    /// Read-only view of operand A
    pub fn operand_a(&self) -> &Matrix {
        &self.a
    }

    /// Read-only view of operand B
    pub fn operand_b(&self) -> &Matrix {
        &self.b
    }

    /// Read-only view of the result C
    pub fn result(&self) -> &Matrix {
        &self.c
    }

    fn check_shape(&self, matrix: &Matrix) -> Result<()> {
        if matrix.n() != self.n {
            return Err(YunqueError::ShapeMismatch {
                expected: self.n,
                actual: matrix.n(),
            });
        }
        Ok(())
    }

    /// Sequential multiply: `C = A · B` on the calling thread
    ///
    /// The reference implementation for correctness and the "linear"
    /// performance baseline. Overwrites all of C and returns the elapsed
    /// wall-clock seconds of the triple loop.
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(n = self.n)))]
    pub fn multiply_sequential(&mut self) -> f64 {
        let n = self.n;
        let a = self.a.as_slice();
        let b = self.b.as_slice();
        let c = self.c.as_mut_slice();

        let start = Instant::now();
        for i in 0..n {
            for j in 0..n {
                c[i * n + j] = dot(a, b, n, i, j);
            }
        }
        start.elapsed().as_secs_f64()
    }

    /// Parallel multiply: `C = A · B` across `threads` workers
    ///
    /// Builds a worker pool of exactly `threads` threads for this call,
    /// partitions the n² output cells according to `schedule`, joins all
    /// workers, and returns the elapsed wall-clock seconds of the parallel
    /// region (pool construction excluded).
    ///
    /// A thread count of 1 is a valid degenerate invocation and produces the
    /// same result as [`multiply_sequential`](Self::multiply_sequential).
    /// Requesting more threads than there are cells is also valid; excess
    /// workers receive no work.
    ///
    /// # Errors
    ///
    /// Returns `InvalidThreadCount` if `threads` is 0, or `ThreadPool` if the
    /// worker pool cannot be built. A failed call leaves A, B and C
    /// untouched.
    #[cfg_attr(
        feature = "tracing",
        instrument(skip(self), fields(n = self.n, threads, schedule = %schedule))
    )]
    pub fn multiply_parallel(&mut self, threads: usize, schedule: Schedule) -> Result<f64> {
        if threads == 0 {
            return Err(YunqueError::InvalidThreadCount);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("yunque-worker-{i}"))
            .build()
            .map_err(|e| YunqueError::ThreadPool(e.to_string()))?;

        let n = self.n;
        let total = n * n;
        let a = self.a.as_slice();
        let b = self.b.as_slice();
        let out = SharedOut {
            ptr: self.c.as_mut_slice().as_mut_ptr(),
        };

        let queue = match schedule {
            Schedule::Static => None,
            Schedule::Dynamic => Some(WorkQueue::dynamic(total, threads)),
            Schedule::Guided => Some(WorkQueue::guided(total, threads)),
        };

        let start = Instant::now();
        pool.broadcast(|ctx| match &queue {
            // Static: each worker owns one contiguous span, fixed up front.
            None => compute_span(a, b, n, &out, static_span(total, threads, ctx.index())),
            // Dynamic/guided: workers pull chunks until the queue drains.
            Some(queue) => {
                while let Some(span) = queue.claim() {
                    compute_span(a, b, n, &out, span);
                }
            }
        });
        Ok(start.elapsed().as_secs_f64())
    }
}

/// Dot product of row `i` of `a` and column `j` of `b`, wrapping on overflow
#[inline]
fn dot(a: &[i64], b: &[i64], n: usize, i: usize, j: usize) -> i64 {
    let mut sum = 0i64;
    for k in 0..n {
        sum = sum.wrapping_add(a[i * n + k].wrapping_mul(b[k * n + j]));
    }
    sum
}

/// Raw pointer to the result matrix, shared across workers
///
/// Lock-free parallelization strategy: every output cell is claimed by
/// exactly one worker (static spans are disjoint by construction; the chunk
/// queue advances a single atomic cursor), so no two threads ever write the
/// same element and C needs no locks or atomic writes.
struct SharedOut {
    ptr: *mut i64,
}

// SAFETY: workers write through `ptr` only at cell indices they have claimed,
// and the claim sets are pairwise disjoint. All workers join before
// `multiply_parallel` returns, and the engine is exclusively borrowed for the
// duration of the call, so no other access to C can overlap the writes.
unsafe impl Send for SharedOut {}
unsafe impl Sync for SharedOut {}

/// Computes every cell in `span` and stores it into the shared result
fn compute_span(a: &[i64], b: &[i64], n: usize, out: &SharedOut, span: Range<usize>) {
    for idx in span {
        let value = dot(a, b, n, idx / n, idx % n);
        // SAFETY: `idx` is within [0, n²) and claimed by this worker alone;
        // see the invariant on `SharedOut`.
        unsafe {
            *out.ptr.add(idx) = value;
        }
    }
}
