//! Core types for the rasterizer

use serde::{Deserialize, Serialize};

/// Glyph ramp from empty to bright
pub const PALETTE: &str = " .:-=+*#%@";

/// Linear RGB color (0.0-1.0 per channel)
///
/// Channels are capped at 1.0 on construction. There is no lower clamp:
/// negative values pass through so callers can build "subtractive" colors,
/// and glyph lookup clamps the resulting index instead.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(f64, f64, f64)", into = "(f64, f64, f64)")]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0 };

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: cap(r),
            g: cap(g),
            b: cap(b),
        }
    }

    /// Gray with all three channels set to `v`
    pub fn gray(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn rgb(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Mean of the three channels
    pub fn luminance(&self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Glyph for this color in the default ramp
    pub fn glyph(&self) -> char {
        self.glyph_from(&PALETTE.chars().collect::<Vec<_>>())
    }

    /// Map luminance onto an ordered glyph ramp (dark first).
    /// An empty ramp yields a space.
    pub fn glyph_from(&self, palette: &[char]) -> char {
        let Some(last) = palette.len().checked_sub(1) else {
            return ' ';
        };
        let scaled = self.luminance() * last as f64;
        let index = if scaled.is_nan() || scaled < 0.0 {
            0
        } else {
            (scaled as usize).min(last)
        };
        palette[index]
    }

    /// Multiply every channel by `factor` (re-capped at 1.0)
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Overwrite this color in place
    pub fn copy_from(&mut self, other: &Color) {
        self.r = other.r;
        self.g = other.g;
        self.b = other.b;
    }

    /// Change-detection comparison used by the canvas.
    ///
    /// Returns true when ANY one channel is equal, not all three. A cell
    /// whose stored color shares a single channel with the incoming one is
    /// therefore not rewritten. Use `==` for exact equality.
    pub fn matches(&self, other: &Color) -> bool {
        self.r == other.r || self.g == other.g || self.b == other.b
    }
}

/// Upper clamp only; NaN passes through (`f64::min` would replace it)
fn cap(v: f64) -> f64 {
    if v > 1.0 {
        1.0
    } else {
        v
    }
}

impl From<(f64, f64, f64)> for Color {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Color::new(r, g, b)
    }
}

impl From<Color> for (f64, f64, f64) {
    fn from(c: Color) -> Self {
        (c.r, c.g, c.b)
    }
}

/// One supersample of the canvas.
///
/// The color is read-only outside the crate so every change goes through
/// the canvas's dirty tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    color: Color,
    /// Depth slot; stored but never consulted for occlusion
    depth: f64,
}

impl Cell {
    pub fn new(color: Color) -> Self {
        Self { color, depth: 0.0 }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn color_mut(&mut self) -> &mut Color {
        &mut self.color
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: f64) {
        self.depth = depth;
    }
}
