//! Wireterm: wireframe 3D rendering for text terminals
//!
//! Points, triangles and boxes go through homogeneous transform chains
//! (optionally a look-at perspective camera), get scan-converted into a
//! supersampled canvas, and come out as luminance glyphs. Only cells that
//! changed since the previous frame are redrawn.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod rasterizer;
pub mod world;
