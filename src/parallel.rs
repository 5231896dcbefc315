//! Fork-join block-parallel matrix multiplication
//!
//! [`multiply`] spawns one OS thread per rank, each computing the dot
//! products for its own output block, and returns the product only after
//! every worker has joined. The hot path is lock-free: operands are
//! shared-read, and output writes land in the disjoint per-rank blocks of
//! the tiling, so no cell is ever written by two threads.

use std::marker::PhantomData;
use std::thread;

use tracing::debug;

use crate::{GridConfig, Matrix, Result, TejaError};

/// Shared write handle to the output matrix, partitioned by the grid tiling.
///
/// Holds a raw pointer so that all workers can write their blocks of the one
/// output buffer concurrently. Soundness rests on the tiling invariant, not
/// on any runtime synchronization: callers of [`OutputTiles::store`] must own
/// the cell they write.
struct OutputTiles<'c> {
    ptr: *mut i32,
    n: usize,
    _owner: PhantomData<&'c mut Matrix>,
}

// SAFETY: workers write through `ptr` only at cells inside their own block,
// and blocks of distinct ranks are disjoint by construction (GridConfig
// tiling invariant). No two threads ever touch the same cell, and the
// borrowed Matrix outlives every worker because they are scope-bound.
unsafe impl Sync for OutputTiles<'_> {}

impl<'c> OutputTiles<'c> {
    fn new(c: &'c mut Matrix) -> Self {
        OutputTiles {
            n: c.dim(),
            ptr: c.as_mut_slice().as_mut_ptr(),
            _owner: PhantomData,
        }
    }

    /// Writes one output cell.
    ///
    /// # Safety
    ///
    /// `(row, col)` must lie within the calling worker's block and within
    /// the `n x n` buffer. Exclusive ownership of the cell is the caller's
    /// obligation; this function performs no synchronization.
    unsafe fn store(&self, row: usize, col: usize, value: i32) {
        *self.ptr.add(row * self.n + col) = value;
    }
}

/// Per-worker descriptor, created before spawn and immutable afterwards.
///
/// Carries the rank as a typed field together with shared references to the
/// operands, the output handle, and the grid parameters.
struct WorkerContext<'a> {
    rank: usize,
    a: &'a Matrix,
    b: &'a Matrix,
    output: &'a OutputTiles<'a>,
    grid: &'a GridConfig,
}

impl WorkerContext<'_> {
    /// Computes every cell of this rank's block: `C[i][j] = sum A[i][m] * B[m][j]`.
    ///
    /// Runs start-to-finish without blocking or yielding. Reads of A and B
    /// are unsynchronized (nobody mutates them during the parallel phase);
    /// writes are unsynchronized (the block is exclusively owned). Wrapping
    /// multiply-accumulate keeps two's-complement fixed-width semantics.
    fn run(&self) {
        let block = self.grid.block(self.rank);
        let n = self.grid.n();

        debug!(
            rank = self.rank,
            rows = ?block.rows,
            cols = ?block.cols,
            "worker started"
        );

        for i in block.rows.clone() {
            let a_row = self.a.row(i);
            for j in block.cols.clone() {
                let mut sum = 0i32;
                for m in 0..n {
                    sum = sum.wrapping_add(a_row[m].wrapping_mul(self.b.at(m, j)));
                }
                // SAFETY: (i, j) lies inside this rank's block, and blocks of
                // distinct ranks are disjoint, so this thread is the sole
                // writer of the cell.
                unsafe { self.output.store(i, j, sum) };
            }
        }
    }
}

/// Block-parallel product: `C = a * b` across `grid.threads()` workers
///
/// Spawns exactly one thread per rank, each bound to a [`WorkerContext`]
/// carrying that rank, and joins them all before returning. The output is
/// observable only on the success path, after the join, so a caller can
/// never read a partially computed product.
///
/// # Errors
///
/// - `SizeMismatch` if either operand's dimension differs from `grid.n()`
/// - `Spawn` if a worker thread cannot be created; the workers already
///   spawned are joined and the partial output is discarded, since a partial
///   thread set would leave blocks of the tiling uncomputed
///
/// # Example
///
/// ```
/// use teja::{parallel, GridConfig, Matrix};
///
/// let grid = GridConfig::new(2, 1).unwrap();
/// let a = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
/// let b = Matrix::from_vec(2, vec![5, 6, 7, 8]).unwrap();
/// let c = parallel::multiply(&a, &b, &grid).unwrap();
/// assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
/// ```
pub fn multiply(a: &Matrix, b: &Matrix, grid: &GridConfig) -> Result<Matrix> {
    for operand in [a, b] {
        if operand.dim() != grid.n() {
            return Err(TejaError::SizeMismatch {
                expected: grid.n(),
                actual: operand.dim(),
            });
        }
    }

    let mut c = Matrix::zeros(grid.n());
    let tiles = OutputTiles::new(&mut c);

    // Fork-join barrier: the scope joins every spawned worker before it
    // returns, on the error path as well, so `c` is complete when we get it
    // back and never escapes earlier.
    thread::scope(|scope| -> Result<()> {
        for rank in 0..grid.threads() {
            let context = WorkerContext {
                rank,
                a,
                b,
                output: &tiles,
                grid,
            };
            // The handle is dropped here; the scope itself joins the worker.
            let _worker = thread::Builder::new()
                .name(format!("block-{rank}"))
                .spawn_scoped(scope, move || context.run())
                .map_err(|source| TejaError::Spawn { rank, source })?;
            debug!(rank, "worker spawned");
        }
        Ok(())
    })?;

    debug!(threads = grid.threads(), "all workers joined");
    drop(tiles);
    Ok(c)
}
