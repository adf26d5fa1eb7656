//! Dense matrix math for homogeneous 3D coordinates
//!
//! Multiplication convention: `m.pre_multiply(&other)` stores `other × m`
//! in `m`. The argument is the LEFT operand. Transform chains rely on this,
//! so a newly added step always acts after everything already in the chain.

use std::fmt;
use std::ops::{Index, IndexMut};

use thiserror::Error;

/// Shape failure in a matrix operation; the receiver is left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("cannot {op} matrices of shape {left:?} and {right:?}")]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
}

/// Row-major matrix of f64
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Matrix {
    /// All-zero matrix
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Build from explicit rows; every row must have the same length
    pub fn from_rows<const C: usize>(rows: &[[f64; C]]) -> Self {
        Self {
            rows: rows.len(),
            cols: C,
            values: rows.iter().flatten().copied().collect(),
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Scale along each axis (4x4 homogeneous)
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Self::identity(4);
        m.set(0, 0, sx);
        m.set(1, 1, sy);
        m.set(2, 2, sz);
        m
    }

    /// Move by (tx, ty, tz)
    pub fn translate(tx: f64, ty: f64, tz: f64) -> Self {
        let mut m = Self::identity(4);
        m.set(0, 3, tx);
        m.set(1, 3, ty);
        m.set(2, 3, tz);
        m
    }

    /// Rotate by `theta` radians about an axis (0 = x, 1 = y, 2 = z).
    /// The two remaining axes, taken cyclically, get a standard 2D rotation.
    pub fn rotate_axis(theta: f64, axis: usize) -> Self {
        let mut m = Self::identity(4);
        let (s, c) = theta.sin_cos();
        let a1 = (axis + 1) % 3;
        let a2 = (axis + 2) % 3;
        m.set(a1, a1, c);
        m.set(a1, a2, -s);
        m.set(a2, a1, s);
        m.set(a2, a2, c);
        m
    }

    /// Projection for a camera at the origin looking down -z, with the
    /// image plane at distance `d`. z is moved into w, so the homogeneous
    /// divide performs the perspective division.
    pub fn perspective(d: f64) -> Self {
        let mut m = Self::scale(d, d, d);
        m.set(3, 2, 1.0);
        m.set(3, 3, 0.0);
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Panics if (r, c) is out of bounds
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self[(r, c)]
    }

    /// Panics if (r, c) is out of bounds
    pub fn set(&mut self, r: usize, c: usize, value: f64) {
        self[(r, c)] = value;
    }

    /// Take over another matrix's shape and values
    pub fn replace(&mut self, other: &Matrix) {
        self.rows = other.rows;
        self.cols = other.cols;
        self.values.clone_from(&other.values);
    }

    /// `self += scale * other`; use a negative scale to subtract
    pub fn add(&mut self, other: &Matrix, scale: f64) -> Result<(), MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::DimensionMismatch {
                op: "add",
                left: self.shape(),
                right: other.shape(),
            });
        }
        for (v, o) in self.values.iter_mut().zip(&other.values) {
            *v += scale * o;
        }
        Ok(())
    }

    /// Replace `self` with `left × self`.
    ///
    /// Requires `left.cols() == self.rows()`. The result has `left.rows()`
    /// rows and `self.cols()` columns.
    pub fn pre_multiply(&mut self, left: &Matrix) -> Result<(), MatrixError> {
        if left.cols != self.rows {
            return Err(MatrixError::DimensionMismatch {
                op: "multiply",
                left: left.shape(),
                right: self.shape(),
            });
        }

        let mut product = Matrix::zero(left.rows, self.cols);
        for i in 0..left.rows {
            for j in 0..self.cols {
                let mut sum = 0.0;
                for k in 0..self.rows {
                    sum += left[(i, k)] * self[(k, j)];
                }
                product[(i, j)] = sum;
            }
        }

        *self = product;
        Ok(())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        assert!(r < self.rows && c < self.cols, "matrix index ({}, {}) out of bounds", r, c);
        &self.values[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        assert!(r < self.rows && c < self.cols, "matrix index ({}, {}) out of bounds", r, c);
        &mut self.values[r * self.cols + c]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                write!(f, "{:.2} ", self[(r, c)])?;
            }
            if r + 1 != self.rows {
                writeln!(f)?;
            }
        }
        write!(f, "]")
    }
}
