//! Ordered chains of 4x4 matrices

use std::fmt;

use super::math::{Matrix, MatrixError};
use crate::world::Point;

/// A sequence of homogeneous transforms collapsed into one matrix.
///
/// Steps act on points in the order they were added: after `add(a)` then
/// `add(b)` the cumulative matrix is `b × a`, so `a` happens first.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    steps: Vec<Matrix>,
    cumulative: Matrix,
}

impl Transform {
    /// Identity chain: one identity step, identity cumulative
    pub fn new() -> Self {
        let mut steps = Vec::with_capacity(8);
        steps.push(Matrix::identity(4));
        Self {
            steps,
            cumulative: Matrix::identity(4),
        }
    }

    /// Append a step. Non-4x4 matrices are rejected and the chain is unchanged.
    pub fn add(&mut self, matrix: Matrix) -> Result<(), MatrixError> {
        if matrix.shape() != (4, 4) {
            return Err(MatrixError::DimensionMismatch {
                op: "compose",
                left: matrix.shape(),
                right: self.cumulative.shape(),
            });
        }
        self.cumulative.pre_multiply(&matrix)?;
        log::debug!("transform step {} composed", self.steps.len());
        self.steps.push(matrix);
        Ok(())
    }

    /// Builder-style `add`
    pub fn then(mut self, matrix: Matrix) -> Result<Self, MatrixError> {
        self.add(matrix)?;
        Ok(self)
    }

    /// The cumulative matrix
    pub fn matrix(&self) -> &Matrix {
        &self.cumulative
    }

    /// Every stored step, starting with the initial identity
    pub fn steps(&self) -> &[Matrix] {
        &self.steps
    }

    pub fn step(&self, i: usize) -> Option<&Matrix> {
        self.steps.get(i)
    }

    /// Number of stored steps (at least 1)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Transform a point in place, including the homogeneous divide
    pub fn apply(&self, point: &mut Point) {
        point.transform(self);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{}", step)?;
        }
        write!(f, "{}", self.cumulative)
    }
}
