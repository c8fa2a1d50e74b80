//! Yunque: Matrix-Multiply Scheduling Workbench
//!
//! **Yunque** (Spanish: "anvil") benchmarks dense square integer matrix
//! multiplication under a sequential baseline and three parallel
//! work-scheduling policies, reporting wall-clock time and speedup ratios.
//!
//! The engine owns three n×n `i64` matrices (operands A and B, result C) and
//! exposes two multiplies with identical numeric contracts:
//!
//! 1. **Sequential** - the triple-loop reference, also the "linear" baseline
//! 2. **Parallel** - the n² output cells partitioned across a per-call worker
//!    pool under a [`Schedule`]: static, dynamic or guided
//!
//! # Design Principles
//!
//! - **Scheduling never changes the answer**: every policy and thread count
//!   must produce output element-wise identical to the sequential multiply
//! - **Per-call parallelism**: the thread count is a parameter of one
//!   invocation, never process-wide state, so independent engines can
//!   benchmark concurrently
//! - **Closed policy set**: [`Schedule`] is a tagged enum validated at the
//!   boundary; there is no string fall-through that silently does no work
//! - **One arithmetic contract**: `i64` elements and accumulators with
//!   documented wraparound, no overflow detection
//!
//! # Quick Start
//!
//! ```
//! use yunque::{Matrix, MatrixEngine, Schedule};
//!
//! let mut engine = MatrixEngine::new(2)?;
//! engine.set_operand_a(Matrix::from_rows(vec![vec![1, 2], vec![3, 4]])?)?;
//! engine.set_operand_b(Matrix::from_rows(vec![vec![2, 0], vec![1, 2]])?)?;
//!
//! engine.multiply_parallel(2, Schedule::Dynamic)?;
//! assert_eq!(engine.result().as_slice(), &[4, 4, 10, 8]);
//! # Ok::<(), yunque::YunqueError>(())
//! ```

pub mod engine;
pub mod error;
pub mod matrix;
pub mod report;
pub mod schedule;

pub use engine::{MatrixEngine, OPERAND_RANGE};
pub use error::{Result, YunqueError};
pub use matrix::Matrix;
pub use report::{speedup, BenchRecord};
pub use schedule::Schedule;
