//! World module - geometry, cameras and scene files
//!
//! - Homogeneous points, triangles and boxes
//! - Look-at perspective camera built from transform steps
//! - RON scene descriptions for the demo driver

mod camera;
mod geometry;
mod scene;

pub use camera::*;
pub use geometry::*;
pub use scene::*;
