//! Look-at perspective camera built as a transform chain

use std::f64::consts::{FRAC_PI_2, PI};

use super::geometry::Point;
use crate::rasterizer::{Matrix, MatrixError, Transform};

/// Perspective view transform for a camera at `eye` looking along `direction`,
/// with the image plane `focal` units in front of it.
///
/// The chain is, in order: move the eye to the origin, turn the view
/// direction into the xz plane, tilt it onto -z, twist a quarter turn so
/// screen-up matches world-up, then project. After the homogeneous divide
/// every visible point has z == `focal`.
///
/// `direction` must not be zero-length.
pub fn build_camera(eye: &Point, direction: &Point, focal: f64) -> Result<Transform, MatrixError> {
    debug_assert!(direction.length() > 0.0, "camera direction must be non-zero");

    let theta = direction.theta();
    let phi = direction.phi();

    Transform::new()
        .then(Matrix::translate(-eye.x(), -eye.y(), -eye.z()))?
        .then(Matrix::rotate_axis(-phi, 2))?
        .then(Matrix::rotate_axis(PI - theta, 1))?
        .then(Matrix::rotate_axis(-FRAC_PI_2, 2))?
        .then(Matrix::perspective(focal))
}
