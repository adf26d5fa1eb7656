//! Supersampled text canvas
//!
//! Every display cell is backed by an S×S block of samples. Drawing writes
//! samples; rendering box-filters each block down to one glyph and only
//! emits display cells whose samples changed since the last pass.
//! Canvas coordinates start at the bottom left.

use std::io;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scan::{bresenham_circle, bresenham_line, triangle_outline};
use super::terminal::Terminal;
use super::types::{Cell, Color, PALETTE};
use super::DEFAULT_SUPERSAMPLE;
use crate::world::{Cube, Triangle};

/// Error type for canvas export
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Primitives with a sample coordinate beyond this magnitude are skipped
/// (typically vertices projected from near the camera plane)
const MAX_REACH: i32 = 1 << 16;

fn within_reach(cells: &[(i32, i32)]) -> bool {
    let reach = MAX_REACH.unsigned_abs();
    cells.iter().all(|&(x, y)| x.unsigned_abs() <= reach && y.unsigned_abs() <= reach)
}

/// Canvas construction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Samples per display cell along each axis (0 is treated as 1)
    pub supersample: usize,
    /// Glyph ramp from dark to bright
    pub palette: String,
    /// Text drawn for each border cell
    pub border: String,
    /// Color used by `clear_background`
    pub background: Color,
    /// Default drawing color
    pub foreground: Color,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            supersample: DEFAULT_SUPERSAMPLE,
            palette: PALETTE.to_string(),
            border: "##".to_string(),
            background: Color::BLACK,
            foreground: Color::WHITE,
        }
    }
}

/// What a render pass wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Interior display cells emitted
    pub cells: usize,
    /// Border cells emitted (only on the first pass)
    pub border: usize,
}

/// Supersampled drawing surface with per-cell dirty tracking
pub struct Canvas {
    width: usize,
    height: usize,
    factor: usize,
    samples: Vec<Cell>,
    dirty: Vec<bool>,
    frame_rendered: bool,
    palette: Vec<char>,
    border: String,
    background: Color,
    foreground: Color,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_settings(width, height, &CanvasSettings::default())
    }

    pub fn with_settings(width: usize, height: usize, settings: &CanvasSettings) -> Self {
        let factor = settings.supersample.max(1);
        log::debug!(
            "canvas {}x{} cells, {}x supersampling ({} samples)",
            width,
            height,
            factor,
            width * height * factor * factor
        );
        Self {
            width,
            height,
            factor,
            samples: vec![Cell::new(Color::BLACK); width * factor * height * factor],
            dirty: vec![true; width * height],
            frame_rendered: false,
            palette: settings.palette.chars().collect(),
            border: settings.border.clone(),
            background: settings.background,
            foreground: settings.foreground,
        }
    }

    /// Width in display cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in display cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Supersample factor S
    pub fn supersample(&self) -> usize {
        self.factor
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    /// True once the border has been drawn
    pub fn frame_rendered(&self) -> bool {
        self.frame_rendered
    }

    fn sample_width(&self) -> usize {
        self.width * self.factor
    }

    fn sample_height(&self) -> usize {
        self.height * self.factor
    }

    fn sample_index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x < self.sample_width() && y < self.sample_height() {
            Some(y * self.sample_width() + x)
        } else {
            None
        }
    }

    /// Sample at supersample coordinates
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        let i = self.sample_index(x, y)?;
        Some(&self.samples[i])
    }

    /// Mutable sample access; only the depth slot is writable through it
    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        let i = self.sample_index(x, y)?;
        Some(&mut self.samples[i])
    }

    /// Whether display cell (x, y) will be emitted by the next render
    pub fn is_dirty(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.dirty[y * self.width + x]
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.iter().filter(|&&d| d).count()
    }

    /// Write one sample in supersample space. Out-of-range writes are
    /// ignored. The display cell is marked dirty only if the stored color
    /// does not `match` the new one (any-channel comparison).
    pub fn write_sample(&mut self, x: i32, y: i32, color: &Color) {
        let Some(idx) = self.sample_index(x, y) else {
            return;
        };
        let stored = self.samples[idx].color_mut();
        if !stored.matches(color) {
            stored.copy_from(color);
            let display = (y as usize / self.factor) * self.width + x as usize / self.factor;
            self.dirty[display] = true;
        }
    }

    /// Fill every sample of display cell (x, y)
    pub fn write_pixel(&mut self, x: i32, y: i32, color: &Color) {
        let s = self.factor as i32;
        let (bx, by) = (x.saturating_mul(s), y.saturating_mul(s));
        for i in 0..s {
            for j in 0..s {
                self.write_sample(bx.saturating_add(i), by.saturating_add(j), color);
            }
        }
    }

    /// Fill an S×S block of samples centered on sample (x, y)
    pub fn write_antialiased(&mut self, x: i32, y: i32, color: &Color) {
        let s = self.factor as i32;
        let lo = -(s / 2);
        for i in lo..lo + s {
            for j in lo..lo + s {
                self.write_sample(x.saturating_add(i), y.saturating_add(j), color);
            }
        }
    }

    /// Box-filtered color of display cell (x, y)
    pub fn sample_color(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let mut sum = [0.0; 3];
        for j in 0..self.factor {
            let row = (y * self.factor + j) * self.sample_width();
            for i in 0..self.factor {
                let rgb = self.samples[row + x * self.factor + i].color().rgb();
                for (s, v) in sum.iter_mut().zip(rgb) {
                    *s += v;
                }
            }
        }
        let n = (self.factor * self.factor) as f64;
        Some(Color::new(sum[0] / n, sum[1] / n, sum[2] / n))
    }

    /// Write `color` into every sample
    pub fn clear(&mut self, color: &Color) {
        for y in 0..self.sample_height() as i32 {
            for x in 0..self.sample_width() as i32 {
                self.write_sample(x, y, color);
            }
        }
    }

    /// `clear` with the configured background
    pub fn clear_background(&mut self) {
        let bg = self.background;
        self.clear(&bg);
    }

    /// Screen position of canvas cell (x, y), border included (x, y in 0..=size+1).
    /// Cells are two characters wide; canvas y grows upwards.
    fn screen_pos(&self, x: usize, y: usize) -> (u16, u16) {
        let col = u16::try_from(2 * x).unwrap_or(u16::MAX);
        let row = u16::try_from(self.height + 1 - y).unwrap_or(u16::MAX);
        (col, row)
    }

    /// Emit the border (first pass only) and every dirty cell, then flush.
    pub fn render<T: Terminal>(&mut self, term: &mut T) -> io::Result<RenderStats> {
        let mut stats = RenderStats::default();

        for x in 0..=self.width + 1 {
            for y in 0..=self.height + 1 {
                let on_border = x == 0 || y == 0 || x == self.width + 1 || y == self.height + 1;
                if on_border {
                    if self.frame_rendered {
                        continue;
                    }
                    let (col, row) = self.screen_pos(x, y);
                    term.move_to(col, row)?;
                    term.write_str(&self.border)?;
                    stats.border += 1;
                    continue;
                }

                let idx = (y - 1) * self.width + (x - 1);
                if !self.dirty[idx] {
                    continue;
                }
                let Some(color) = self.sample_color(x - 1, y - 1) else {
                    continue;
                };
                let glyph = color.glyph_from(&self.palette);
                let (col, row) = self.screen_pos(x, y);
                term.move_to(col, row)?;
                term.write_str(&format!("{glyph}{glyph}"))?;
                self.dirty[idx] = false;
                stats.cells += 1;
            }
        }

        // Park the cursor below the frame
        let below = u16::try_from(self.height + 2).unwrap_or(u16::MAX);
        term.move_to(0, below)?;
        self.frame_rendered = true;
        term.flush()?;

        Ok(stats)
    }

    /// Fill display cell (x, y)
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: &Color) {
        self.write_pixel(x, y, color);
    }

    /// Line between display cells, traced one sample wide in supersample space
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: &Color) {
        let s = self.factor as i32;
        let a = (x1.saturating_mul(s), y1.saturating_mul(s));
        let b = (x2.saturating_mul(s), y2.saturating_mul(s));
        self.trace_segment(a, b, color);
    }

    /// Line between fractional display coordinates
    pub fn draw_line_f(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &Color) {
        let (Some(a), Some(b)) = (self.to_sample(x1, y1), self.to_sample(x2, y2)) else {
            return;
        };
        self.trace_segment(a, b, color);
    }

    fn trace_segment(&mut self, a: (i32, i32), b: (i32, i32), color: &Color) {
        if !within_reach(&[a, b]) {
            return;
        }
        for (x, y) in bresenham_line(a.0, a.1, b.0, b.1) {
            self.write_sample(x, y, color);
        }
    }

    /// Circle outline; each traced sample is widened to an S×S block
    pub fn draw_circle(&mut self, xc: f64, yc: f64, r: f64, color: &Color) {
        if !(xc.is_finite() && yc.is_finite() && r.is_finite()) {
            return;
        }
        let s = self.factor as f64;
        let (cx, cy, r) = ((xc * s) as i32, (yc * s) as i32, (r * s) as i32);
        if !within_reach(&[(cx, cy), (r, r)]) {
            return;
        }
        for (x, y) in bresenham_circle(cx, cy, r) {
            self.write_antialiased(x, y, color);
        }
    }

    /// Triangle outline from its vertices' projected x and y
    pub fn draw_triangle(&mut self, triangle: &Triangle, color: &Color) {
        let [p1, p2, p3] = triangle.points();
        let (Some(a), Some(b), Some(c)) = (
            self.to_sample(p1.x(), p1.y()),
            self.to_sample(p2.x(), p2.y()),
            self.to_sample(p3.x(), p3.y()),
        ) else {
            return;
        };
        if !within_reach(&[a, b, c]) {
            return;
        }
        for (x, y) in triangle_outline(a, b, c) {
            self.write_sample(x, y, color);
        }
    }

    pub fn draw_cube(&mut self, cube: &Cube, color: &Color) {
        for triangle in cube.triangles() {
            self.draw_triangle(triangle, color);
        }
    }

    /// Display coordinates to the enclosing sample (saturating). None for
    /// non-finite input, e.g. a vertex sitting on the eye.
    fn to_sample(&self, x: f64, y: f64) -> Option<(i32, i32)> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let s = self.factor as f64;
        Some(((x * s).floor() as i32, (y * s).floor() as i32))
    }

    /// Box-filtered frame at display resolution, top row first
    pub fn to_image(&self) -> RgbImage {
        let (w, h) = (self.width as u32, self.height as u32);
        RgbImage::from_fn(w, h, |x, row| {
            let y = (h - 1 - row) as usize;
            let color = self.sample_color(x as usize, y).unwrap_or(self.background);
            let [r, g, b] = color.rgb().map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
            Rgb([r, g, b])
        })
    }

    /// Save `to_image` as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        self.to_image().save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
