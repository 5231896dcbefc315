//! Teja: Block-Parallel Integer Matrix Multiplication
//!
//! **Teja** (Spanish: "roof tile") computes the product of two `n x n`
//! integer matrices by tiling the output into a `sqrt(p) x sqrt(p)` grid of
//! equal square blocks and assigning one block to each of `p` worker threads.
//!
//! # Design Principles
//!
//! - **Disjoint partition, no locks**: every output cell belongs to exactly
//!   one worker's block, so the hot path needs no locking, no atomics, and no
//!   transactions — only the fork-join barrier itself.
//! - **Validate before spawn**: the `(n, p)` combination is checked once, up
//!   front, and encoded in a [`GridConfig`] whose invariants hold by
//!   construction. No thread is created for an invalid configuration.
//! - **One buffer per matrix**: flat row-major storage, a single owned
//!   allocation, released deterministically on every exit path.
//!
//! # Quick Start
//!
//! ```rust
//! use teja::{parallel, GridConfig, Matrix};
//!
//! let grid = GridConfig::new(4, 4).unwrap();
//! let a = Matrix::identity(4);
//! let b = Matrix::from_vec(4, (1..=16).collect()).unwrap();
//!
//! // Four workers, one 2x2 block of the output each.
//! let c = parallel::multiply(&a, &b, &grid).unwrap();
//! assert_eq!(c, b);
//! ```

pub mod error;
pub mod grid;
pub mod io;
pub mod matrix;
pub mod parallel;

pub use error::{Result, TejaError};
pub use grid::{Block, GridConfig};
pub use matrix::Matrix;
