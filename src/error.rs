//! Error types for Teja operations

use thiserror::Error;

/// Result type for Teja operations
pub type Result<T> = std::result::Result<T, TejaError>;

/// Errors that can occur during Teja operations
#[derive(Debug, Error)]
pub enum TejaError {
    /// Thread count is not a perfect square
    #[error("thread count must be a perfect square, got {threads}")]
    NotPerfectSquare {
        /// Requested thread count
        threads: usize,
    },

    /// The n x n output grid cannot be split evenly across the threads
    #[error("{n}^2 must be divisible by the thread count, got n = {n}, threads = {threads}")]
    NotDivisible {
        /// Matrix dimension
        n: usize,
        /// Requested thread count
        threads: usize,
    },

    /// Size mismatch between operands
    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Expected size
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// Failed to create a worker thread
    #[error("failed to spawn worker {rank}: {source}")]
    Spawn {
        /// Rank of the worker that could not be spawned
        rank: usize,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error from the loader or persister
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
