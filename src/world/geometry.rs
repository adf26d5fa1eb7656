//! Homogeneous points and the shapes built from them
//!
//! Pure data structures with minimal behavior. Drawing lives on the canvas.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::rasterizer::{Matrix, MatrixError, Transform};

/// A 3D point stored as a 4x1 homogeneous column.
///
/// Every transform ends with the homogeneous divide, so w is back to 1
/// whenever the point is observable.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coords: Matrix,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: Matrix::from_rows(&[[x], [y], [z], [1.0]]),
        }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// The homogeneous column
    pub fn matrix(&self) -> &Matrix {
        &self.coords
    }

    /// Cartesian coordinate `i` (0 = x, 1 = y, 2 = z)
    pub fn get(&self, i: usize) -> f64 {
        self.coords.get(i, 0) / self.coords.get(3, 0)
    }

    pub fn x(&self) -> f64 {
        self.get(0)
    }

    pub fn y(&self) -> f64 {
        self.get(1)
    }

    pub fn z(&self) -> f64 {
        self.get(2)
    }

    pub fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x(), self.y(), self.z())
    }

    /// Distance from the origin
    pub fn length(&self) -> f64 {
        let (x, y, z) = self.to_tuple();
        (x * x + y * y + z * z).sqrt()
    }

    /// Scale to unit length; zero-length points are left alone
    pub fn normalize(&mut self) {
        let len = self.length();
        if len == 0.0 {
            return;
        }
        let (x, y, z) = self.to_tuple();
        *self = Point::new(x / len, y / len, z / len);
    }

    /// Polar angle from +z
    pub fn theta(&self) -> f64 {
        (self.z() / self.length()).acos()
    }

    /// Azimuth in the xy plane; pi/2 on the x = 0 plane
    pub fn phi(&self) -> f64 {
        let (x, y) = (self.x(), self.y());
        if x == 0.0 {
            return FRAC_PI_2;
        }
        if x > 0.0 {
            (y / x).atan()
        } else {
            (y / x).atan() + PI
        }
    }

    /// Transform by a single matrix, then divide by w
    pub fn apply_matrix(&mut self, matrix: &Matrix) -> Result<(), MatrixError> {
        self.coords.pre_multiply(matrix)?;
        let w = self.coords.get(3, 0);
        for i in 0..3 {
            let v = self.coords.get(i, 0);
            self.coords.set(i, 0, v / w);
        }
        self.coords.set(3, 0, 1.0);
        Ok(())
    }

    /// Transform by a chain's cumulative matrix
    pub fn transform(&mut self, transform: &Transform) {
        if let Err(e) = self.apply_matrix(transform.matrix()) {
            log::warn!("point transform skipped: {}", e);
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::origin()
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Point::new(x, y, z)
    }
}

/// Three owned points; vertex order only decides which edges get drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    points: [Point; 3],
}

impl Triangle {
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        Self { points: [p1, p2, p3] }
    }

    pub fn points(&self) -> &[Point; 3] {
        &self.points
    }

    pub fn point(&self, i: usize) -> Option<&Point> {
        self.points.get(i)
    }

    /// Transform every vertex in place
    pub fn transform(&mut self, transform: &Transform) {
        for p in &mut self.points {
            p.transform(transform);
        }
    }

    /// Transform one stored step at a time, tracing each intermediate vertex.
    /// Ends where `transform` would, up to rounding.
    pub fn transform_traced(&mut self, transform: &Transform) -> Result<(), MatrixError> {
        for (i, step) in transform.steps().iter().enumerate() {
            for (v, p) in self.points.iter_mut().enumerate() {
                p.apply_matrix(step)?;
                log::trace!("step {} vertex {}: {:?}", i, v, p.to_tuple());
            }
        }
        Ok(())
    }
}

/// Axis-aligned box as 12 triangles, two per face
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    triangles: [Triangle; Cube::TRIANGLES],
}

impl Cube {
    pub const TRIANGLES: usize = 12;

    /// Build from two opposite corners
    pub fn new(p1: &Point, p2: &Point) -> Self {
        let (x1, y1, z1) = p1.to_tuple();
        let (x2, y2, z2) = p2.to_tuple();
        let tri = |a: (f64, f64, f64), b: (f64, f64, f64), c: (f64, f64, f64)| {
            Triangle::new(a.into(), b.into(), c.into())
        };

        let triangles = [
            // y = y1 and y = y2
            tri((x1, y1, z1), (x1, y1, z2), (x2, y1, z1)),
            tri((x1, y1, z2), (x2, y1, z2), (x2, y1, z1)),
            tri((x1, y2, z1), (x1, y2, z2), (x2, y2, z1)),
            tri((x1, y2, z2), (x2, y2, z2), (x2, y2, z1)),
            // x = x1 and x = x2
            tri((x1, y1, z1), (x1, y1, z2), (x1, y2, z1)),
            tri((x1, y1, z2), (x1, y2, z2), (x1, y2, z1)),
            tri((x2, y1, z1), (x2, y1, z2), (x2, y2, z1)),
            tri((x2, y1, z2), (x2, y2, z2), (x2, y2, z1)),
            // z = z2 and z = z1
            tri((x1, y1, z2), (x1, y2, z2), (x2, y2, z2)),
            tri((x1, y1, z2), (x2, y2, z2), (x1, y2, z2)),
            tri((x1, y1, z1), (x1, y2, z1), (x2, y2, z1)),
            tri((x1, y1, z1), (x2, y2, z1), (x1, y2, z1)),
        ];

        Self { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle(&self, i: usize) -> Option<&Triangle> {
        self.triangles.get(i)
    }

    /// Center of the box spanned by the current vertices
    pub fn center(&self) -> Point {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for p in self.triangles.iter().flat_map(|t| t.points()) {
            for i in 0..3 {
                min[i] = min[i].min(p.get(i));
                max[i] = max[i].max(p.get(i));
            }
        }
        Point::new(
            (min[0] + max[0]) * 0.5,
            (min[1] + max[1]) * 0.5,
            (min[2] + max[2]) * 0.5,
        )
    }

    pub fn transform(&mut self, transform: &Transform) {
        for t in &mut self.triangles {
            t.transform(transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_point_accessors() {
        let p = Point::new(3.0, 4.0, 0.0);
        assert_eq!(p.to_tuple(), (3.0, 4.0, 0.0));
        assert_eq!(p.length(), 5.0);
        assert_eq!(p.matrix().shape(), (4, 1));
        assert_eq!(p.matrix().get(3, 0), 1.0);
    }

    #[test]
    fn test_normalize() {
        let mut p = Point::new(0.0, 3.0, 4.0);
        p.normalize();
        assert!((p.length() - 1.0).abs() < EPS);
        assert!((p.z() - 0.8).abs() < EPS);

        let mut z = Point::origin();
        z.normalize();
        assert_eq!(z, Point::origin());
    }

    #[test]
    fn test_spherical_angles() {
        assert!((Point::new(0.0, 0.0, 1.0).theta()).abs() < EPS);
        assert!((Point::new(0.0, 0.0, -1.0).theta() - PI).abs() < EPS);
        assert!((Point::new(1.0, 0.0, 0.0).theta() - FRAC_PI_2).abs() < EPS);

        assert!(Point::new(1.0, 0.0, 0.0).phi().abs() < EPS);
        assert!((Point::new(-1.0, 0.0, 0.0).phi() - PI).abs() < EPS);
        assert!((Point::new(-1.0, -1.0, 0.0).phi() - 1.25 * PI).abs() < EPS);
        assert_eq!(Point::new(0.0, -2.0, 0.0).phi(), FRAC_PI_2);
    }

    #[test]
    fn test_apply_matrix_divides_w() {
        let mut p = Point::new(2.0, 4.0, -2.0);
        p.apply_matrix(&Matrix::perspective(1.0)).unwrap();
        assert_eq!(p.matrix().get(3, 0), 1.0);
        assert!((p.x() + 1.0).abs() < EPS);
        assert!((p.y() + 2.0).abs() < EPS);
        assert!((p.z() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_apply_matrix_rejects_bad_shape() {
        let mut p = Point::new(1.0, 2.0, 3.0);
        assert!(p.apply_matrix(&Matrix::identity(3)).is_err());
        assert_eq!(p, Point::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_triangle_transform_each_vertex() {
        let mut t = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );
        let mut tr = Transform::new();
        tr.add(Matrix::translate(1.0, 2.0, 3.0)).unwrap();
        t.transform(&tr);
        assert_eq!(t.point(0).unwrap().to_tuple(), (1.0, 2.0, 3.0));
        assert_eq!(t.point(1).unwrap().to_tuple(), (2.0, 2.0, 3.0));
        assert_eq!(t.point(2).unwrap().to_tuple(), (1.0, 3.0, 3.0));
        assert!(t.point(3).is_none());
    }

    #[test]
    fn test_traced_matches_cumulative() {
        let base = Triangle::new(
            Point::new(1.0, 0.0, -3.0),
            Point::new(0.0, 2.0, -4.0),
            Point::new(-1.0, 1.0, -5.0),
        );
        let mut tr = Transform::new();
        tr.add(Matrix::rotate_axis(0.3, 0)).unwrap();
        tr.add(Matrix::translate(0.5, 0.0, -1.0)).unwrap();
        tr.add(Matrix::perspective(2.0)).unwrap();

        let mut a = base.clone();
        let mut b = base;
        a.transform(&tr);
        b.transform_traced(&tr).unwrap();
        for (p, q) in a.points().iter().zip(b.points()) {
            assert!((p.x() - q.x()).abs() < EPS);
            assert!((p.y() - q.y()).abs() < EPS);
            assert!((p.z() - q.z()).abs() < EPS);
        }
    }

    #[test]
    fn test_cube_topology() {
        let cube = Cube::new(&Point::new(0.0, 0.0, 0.0), &Point::new(1.0, 2.0, 3.0));
        assert_eq!(cube.triangles().len(), Cube::TRIANGLES);

        let corners: HashSet<(i64, i64, i64)> = cube
            .triangles()
            .iter()
            .flat_map(|t| t.points())
            .map(|p| (p.x() as i64, p.y() as i64, p.z() as i64))
            .collect();
        assert_eq!(corners.len(), 8);
        for p in &corners {
            assert!(p.0 == 0 || p.0 == 1);
            assert!(p.1 == 0 || p.1 == 2);
            assert!(p.2 == 0 || p.2 == 3);
        }

        let c = cube.center();
        assert!((c.x() - 0.5).abs() < EPS);
        assert!((c.y() - 1.0).abs() < EPS);
        assert!((c.z() - 1.5).abs() < EPS);
    }

    #[test]
    fn test_cube_transform_moves_all_triangles() {
        let mut cube = Cube::new(&Point::new(-1.0, -1.0, -1.0), &Point::new(1.0, 1.0, 1.0));
        let mut tr = Transform::new();
        tr.add(Matrix::translate(10.0, 0.0, 0.0)).unwrap();
        cube.transform(&tr);
        assert!(cube
            .triangles()
            .iter()
            .flat_map(|t| t.points())
            .all(|p| p.x() == 9.0 || p.x() == 11.0));
    }
}
