//! Square integer matrices with flat row-major storage
//!
//! # Example
//!
//! ```
//! use teja::Matrix;
//!
//! let m = Matrix::zeros(3);
//! assert_eq!(m.dim(), 3);
//! assert_eq!(m.get(1, 2), Some(&0));
//! ```

use std::fmt;

use crate::{Result, TejaError};

/// An `n x n` matrix of `i32` with row-major storage
///
/// Data lives in a single contiguous buffer, so element access is one
/// multiply-add away and the whole matrix is one allocation that is released
/// when the value drops. Consecutive elements in memory belong to the same
/// row, which keeps the inner reduction loop of a product cache-friendly.
///
/// # Storage Layout
///
/// For a 2x2 matrix:
/// ```text
/// [[a, b],
///  [c, d]]
/// ```
/// Data is stored as: `[a, b, c, d]`
///
/// # Example
///
/// ```
/// use teja::Matrix;
///
/// let m = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(m.get(0, 1), Some(&2));
/// assert_eq!(m.get(1, 0), Some(&3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    n: usize,
    data: Vec<i32>,
}

impl Matrix {
    /// Creates an `n x n` matrix filled with zeros
    ///
    /// # Example
    ///
    /// ```
    /// use teja::Matrix;
    ///
    /// let m = Matrix::zeros(4);
    /// assert_eq!(m.get(3, 3), Some(&0));
    /// ```
    pub fn zeros(n: usize) -> Self {
        Matrix {
            n,
            data: vec![0; n * n],
        }
    }

    /// Creates a matrix from a vector of data in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != n * n`
    ///
    /// # Example
    ///
    /// ```
    /// use teja::Matrix;
    ///
    /// let m = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(m.dim(), 2);
    /// assert!(Matrix::from_vec(2, vec![1, 2, 3]).is_err());
    /// ```
    pub fn from_vec(n: usize, data: Vec<i32>) -> Result<Self> {
        if data.len() != n * n {
            return Err(TejaError::InvalidInput(format!(
                "Data length {} does not match matrix dimensions {n}x{n} (expected {})",
                data.len(),
                n * n
            )));
        }
        Ok(Matrix { n, data })
    }

    /// Creates an identity matrix (1s on the diagonal)
    ///
    /// # Example
    ///
    /// ```
    /// use teja::Matrix;
    ///
    /// let m = Matrix::identity(3);
    /// assert_eq!(m.get(0, 0), Some(&1));
    /// assert_eq!(m.get(0, 1), Some(&0));
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0; n * n];
        for i in 0..n {
            data[i * n + i] = 1;
        }
        Matrix { n, data }
    }

    /// Returns the side length of the matrix
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Gets a reference to an element at (row, col)
    ///
    /// Returns `None` if either index is out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&i32> {
        if row >= self.n || col >= self.n {
            None
        } else {
            self.data.get(row * self.n + col)
        }
    }

    /// Gets a mutable reference to an element at (row, col)
    ///
    /// Returns `None` if either index is out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut i32> {
        if row >= self.n || col >= self.n {
            None
        } else {
            let idx = row * self.n + col;
            self.data.get_mut(idx)
        }
    }

    /// Element at (row, col). Panics on out-of-bounds indices.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.n + col]
    }

    /// Returns row `i` as a contiguous slice
    #[inline]
    pub fn row(&self, i: usize) -> &[i32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Returns a reference to the underlying data
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    /// Returns a mutable reference to the underlying data
    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.data
    }

    /// Serial reference product: `C = self * other`
    ///
    /// Plain i-j-m triple loop with wrapping multiply-accumulate, matching
    /// two's-complement fixed-width semantics. The block-parallel path in
    /// [`crate::parallel::multiply`] must agree with this cell for cell.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the operands have different dimensions
    ///
    /// # Example
    ///
    /// ```
    /// use teja::Matrix;
    ///
    /// let a = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
    /// let b = Matrix::from_vec(2, vec![5, 6, 7, 8]).unwrap();
    /// let c = a.multiply(&b).unwrap();
    /// assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.n != other.n {
            return Err(TejaError::SizeMismatch {
                expected: self.n,
                actual: other.n,
            });
        }

        let n = self.n;
        let mut result = Matrix::zeros(n);
        for i in 0..n {
            let a_row = self.row(i);
            for j in 0..n {
                let mut sum = 0i32;
                for m in 0..n {
                    sum = sum.wrapping_add(a_row[m].wrapping_mul(other.at(m, j)));
                }
                result.data[i * n + j] = sum;
            }
        }
        Ok(result)
    }
}

impl fmt::Display for Matrix {
    /// Renders rows with width-4 right-aligned cells, one row per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            for j in 0..self.n {
                write!(f, "{:4} ", self.at(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
