//! Error types for yunque operations

use thiserror::Error;

/// Result type for yunque operations
pub type Result<T> = std::result::Result<T, YunqueError>;

/// Errors that can occur during yunque operations
///
/// All variants are caller-input errors, reported synchronously at the point
/// of the call. A failed call never modifies engine state: the operands and
/// the result matrix are exactly what they were before the call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum YunqueError {
    /// Matrix dimension of zero requested at construction
    #[error("Invalid matrix dimension: {0} (must be at least 1)")]
    InvalidDimension(usize),

    /// Operand replacement with a matrix of the wrong dimension
    #[error("Operand shape mismatch: expected {expected}x{expected}, got {actual}x{actual}")]
    ShapeMismatch {
        /// Engine dimension
        expected: usize,
        /// Supplied matrix dimension
        actual: usize,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Thread count of zero requested for a parallel multiply
    #[error("Invalid thread count: 0 (must be at least 1)")]
    InvalidThreadCount,

    /// Schedule name that is not one of static, dynamic, guided
    #[error("Unknown schedule '{0}' (expected 'static', 'dynamic' or 'guided')")]
    UnknownSchedule(String),

    /// Worker pool construction failure
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}
