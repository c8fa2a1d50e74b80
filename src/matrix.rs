//! Square integer matrix container
//!
//! Storage for the multiplication engine: fixed-dimension square matrices of
//! `i64` elements in row-major order.
//!
//! # Example
//!
//! ```
//! use yunque::Matrix;
//!
//! let m = Matrix::zeros(3);
//! assert_eq!(m.n(), 3);
//! assert_eq!(m.get(1, 1), Some(&0));
//! ```

use std::ops::RangeInclusive;

use rand::distributions::Uniform;
use rand::Rng;

use crate::{Result, YunqueError};

/// A square n×n matrix of `i64` with row-major storage
///
/// Data is stored in row-major format (C-style): consecutive elements in
/// memory belong to the same row, so element (i, j) lives at index
/// `i * n + j`. The dimension is fixed at construction and immutable
/// thereafter.
///
/// Arithmetic on matrix elements uses wrapping `i64` semantics throughout the
/// crate: products and sums that exceed the 64-bit range wrap around, with no
/// overflow detection or saturation.
///
/// # Example
///
/// ```
/// use yunque::Matrix;
///
/// let m = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(m.get(0, 1), Some(&2));
/// assert_eq!(m.get(1, 0), Some(&3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    n: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// Creates an n×n matrix filled with zeros
    ///
    /// # Example
    ///
    /// ```
    /// use yunque::Matrix;
    ///
    /// let m = Matrix::zeros(4);
    /// assert_eq!(m.n(), 4);
    /// assert!(m.as_slice().iter().all(|&v| v == 0));
    /// ```
    pub fn zeros(n: usize) -> Self {
        Matrix {
            n,
            data: vec![0; n * n],
        }
    }

    /// Creates an n×n identity matrix (1s on the diagonal)
    ///
    /// # Example
    ///
    /// ```
    /// use yunque::Matrix;
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

    /// Creates a matrix from a flat vector in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != n * n`
    ///
    /// # Example
    ///
    /// ```
    /// use yunque::Matrix;
    ///
    /// let m = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(m.n(), 2);
    /// assert!(Matrix::from_vec(2, vec![1, 2, 3]).is_err());
    /// ```
    pub fn from_vec(n: usize, data: Vec<i64>) -> Result<Self> {
        if data.len() != n * n {
            return Err(YunqueError::InvalidInput(format!(
                "Data length {} does not match matrix dimension {}x{} (expected {})",
                data.len(),
                n,
                n,
                n * n
            )));
        }
        Ok(Matrix { n, data })
    }

    /// Creates a matrix from nested rows
    ///
    /// Convenient for literal matrices in tests and examples.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the rows do not form a square matrix
    /// (any row length differs from the number of rows).
    ///
    /// # Example
    ///
    /// ```
    /// use yunque::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(m.get(1, 1), Some(&4));
    /// ```
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(YunqueError::InvalidInput(format!(
                    "Row {} has length {} in a matrix of {} rows (must be square)",
                    i,
                    row.len(),
                    n
                )));
            }
            data.extend(row);
        }
        Ok(Matrix { n, data })
    }

    /// Returns the dimension n
    pub fn n(&self) -> usize {
        self.n
    }

    /// Gets a reference to the element at (row, col)
    ///
    /// Returns `None` if either index is out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&i64> {
        if row >= self.n || col >= self.n {
            None
        } else {
            self.data.get(row * self.n + col)
        }
    }

    /// Returns row `i` as a slice
    ///
    /// # Panics
    ///
    /// Panics if `i >= n`
    pub fn row(&self, i: usize) -> &[i64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Returns the underlying row-major data
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [i64] {
        &mut self.data
    }

    /// Overwrites every element with a value drawn uniformly at random from
    /// the closed interval `range`
    ///
    /// # Example
    ///
    /// ```
    /// use yunque::Matrix;
    ///
    /// let mut m = Matrix::zeros(8);
    /// m.fill_random(-100..=100);
    /// assert!(m.as_slice().iter().all(|&v| (-100..=100).contains(&v)));
    /// ```
    pub fn fill_random(&mut self, range: RangeInclusive<i64>) {
        let dist = Uniform::new_inclusive(*range.start(), *range.end());
        let mut rng = rand::thread_rng();
        for v in &mut self.data {
            *v = rng.sample(dist);
        }
    }
}
