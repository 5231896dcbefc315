//! Thread-grid configuration and rank-to-block mapping
//!
//! A [`GridConfig`] is the validated description of one run: matrix dimension
//! `n` and thread count `p`, with `p` a perfect square that divides `n^2`.
//! Both checks happen in [`GridConfig::new`], before any matrix is allocated
//! or any thread is spawned, so every constructed value satisfies the tiling
//! invariant: the blocks of ranks `0..p` cover each output cell exactly once.

use std::ops::Range;

use crate::{Result, TejaError};

/// The square sub-region of the output matrix owned by one worker
///
/// Ranges are half-open. A block is derived from a rank on demand and never
/// stored; it is a view into the grid, not an entity of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Rows owned by the worker
    pub rows: Range<usize>,
    /// Columns owned by the worker
    pub cols: Range<usize>,
}

impl Block {
    /// Number of cells in the block
    pub fn cells(&self) -> usize {
        self.rows.len() * self.cols.len()
    }
}

/// Validated `(n, threads)` configuration for one block-parallel run
///
/// # Example
///
/// ```
/// use teja::GridConfig;
///
/// let grid = GridConfig::new(4, 4).unwrap();
/// assert_eq!(grid.side(), 2);
/// assert_eq!(grid.block_dim(), 2);
///
/// // 3 is not a perfect square
/// assert!(GridConfig::new(4, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    n: usize,
    threads: usize,
    side: usize,
    block_dim: usize,
}

impl GridConfig {
    /// Validates `(n, threads)` and builds the grid description
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `threads` is zero
    /// - `NotPerfectSquare` if `threads` has no integer square root
    /// - `NotDivisible` if `threads` does not divide `n^2`
    ///
    /// Note that both checks passing implies `sqrt(threads)` divides `n`
    /// (prime valuations double when squaring), so the block side below is
    /// always exact.
    pub fn new(n: usize, threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(TejaError::InvalidInput(
                "thread count must be positive".to_string(),
            ));
        }
        let side = threads.isqrt();
        if side * side != threads {
            return Err(TejaError::NotPerfectSquare { threads });
        }
        if (n * n) % threads != 0 {
            return Err(TejaError::NotDivisible { n, threads });
        }
        Ok(GridConfig {
            n,
            threads,
            side,
            block_dim: n / side,
        })
    }

    /// Matrix dimension
    pub fn n(&self) -> usize {
        self.n
    }

    /// Worker count
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Blocks per grid row/column, `sqrt(threads)`
    pub fn side(&self) -> usize {
        self.side
    }

    /// Side length of each block, `n / sqrt(threads)`
    pub fn block_dim(&self) -> usize {
        self.block_dim
    }

    /// Maps a worker rank to the output block it owns
    ///
    /// Rank `k` lands on grid cell `(k / side, k mod side)`. Over ranks
    /// `0..threads` the returned blocks tile the `n x n` output exactly once
    /// with no gaps and no overlaps.
    ///
    /// # Example
    ///
    /// ```
    /// use teja::GridConfig;
    ///
    /// let grid = GridConfig::new(4, 4).unwrap();
    /// let block = grid.block(3);
    /// assert_eq!(block.rows, 2..4);
    /// assert_eq!(block.cols, 2..4);
    /// ```
    pub fn block(&self, rank: usize) -> Block {
        debug_assert!(rank < self.threads, "rank {rank} out of range");
        let x = rank / self.side;
        let y = rank % self.side;
        Block {
            rows: x * self.block_dim..(x + 1) * self.block_dim,
            cols: y * self.block_dim..(y + 1) * self.block_dim,
        }
    }

    /// Iterates the blocks of all ranks in rank order
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        (0..self.threads).map(|rank| self.block(rank))
    }
}
