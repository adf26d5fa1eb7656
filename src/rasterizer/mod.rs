//! Software rasterizer for text terminals
//!
//! Features:
//! - Homogeneous 4x4 matrix chains with perspective divide
//! - Integer Bresenham lines and midpoint circles
//! - Supersampled canvas with box-filtered glyph output
//! - Dirty-cell tracking so only changed cells reach the terminal

mod math;
mod render;
mod scan;
mod terminal;
mod transform;
mod types;

pub use math::*;
pub use render::*;
pub use scan::*;
pub use terminal::*;
pub use transform::*;
pub use types::*;

/// Samples per display cell along each axis
pub const DEFAULT_SUPERSAMPLE: usize = 3;
