//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::camera::build_camera;
use super::geometry::{Cube, Point};
use crate::rasterizer::{Canvas, CanvasSettings, Color, Matrix, MatrixError, Transform};

/// Error type for scene loading
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub eye: (f64, f64, f64),
    /// View direction; must be non-zero
    pub direction: (f64, f64, f64),
    /// Distance from the eye to the image plane
    pub focal: f64,
}

impl CameraConfig {
    pub fn build(&self) -> Result<Transform, MatrixError> {
        build_camera(&self.eye.into(), &self.direction.into(), self.focal)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: (4.0, 3.0, 8.0),
            direction: (-4.0, -3.0, -8.0),
            focal: 5.0,
        }
    }
}

/// A wireframe box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeConfig {
    pub min: (f64, f64, f64),
    pub max: (f64, f64, f64),
    /// Falls back to the canvas foreground when unset
    #[serde(default)]
    pub color: Option<Color>,
    /// Radians per frame about the x, y and z axes through the box center
    #[serde(default)]
    pub spin: (f64, f64, f64),
}

impl CubeConfig {
    pub fn build(&self) -> Cube {
        Cube::new(&self.min.into(), &self.max.into())
    }

    /// Model transform for `frame`: spin in place about the center
    pub fn model_transform(&self, frame: usize) -> Result<Transform, MatrixError> {
        let c = self.build().center();
        let t = frame as f64;
        Transform::new()
            .then(Matrix::translate(-c.x(), -c.y(), -c.z()))?
            .then(Matrix::rotate_axis(self.spin.0 * t, 0))?
            .then(Matrix::rotate_axis(self.spin.1 * t, 1))?
            .then(Matrix::rotate_axis(self.spin.2 * t, 2))?
            .then(Matrix::translate(c.x(), c.y(), c.z()))
    }
}

/// Everything the demo driver needs to animate a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Canvas size in display cells
    pub width: usize,
    pub height: usize,
    pub canvas: CanvasSettings,
    pub camera: CameraConfig,
    /// Display cells per image-plane unit
    pub zoom: f64,
    pub cubes: Vec<CubeConfig>,
    pub frames: usize,
    pub frame_ms: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            width: 40,
            height: 24,
            canvas: CanvasSettings::default(),
            camera: CameraConfig::default(),
            zoom: 12.0,
            cubes: vec![CubeConfig {
                min: (-1.0, -1.0, -1.0),
                max: (1.0, 1.0, 1.0),
                color: None,
                spin: (0.0, 0.0, 0.05),
            }],
            frames: 200,
            frame_ms: 50,
        }
    }
}

impl Scene {
    /// Camera, then map the image plane onto canvas cells (origin at the center)
    pub fn view_transform(&self) -> Result<Transform, MatrixError> {
        self.camera
            .build()?
            .then(Matrix::scale(self.zoom, self.zoom, 1.0))?
            .then(Matrix::translate(self.width as f64 / 2.0, self.height as f64 / 2.0, 0.0))
    }

    /// Canvas sized and configured for this scene
    pub fn canvas(&self) -> Canvas {
        Canvas::with_settings(self.width, self.height, &self.canvas)
    }

    /// Draw every cube as it looks at `frame`
    pub fn draw_frame(&self, canvas: &mut Canvas, frame: usize) -> Result<(), MatrixError> {
        let view = self.view_transform()?;
        for cube_config in &self.cubes {
            let mut cube = cube_config.build();
            cube.transform(&cube_config.model_transform(frame)?);
            cube.transform(&view);
            let color = cube_config.color.unwrap_or(canvas.foreground());
            canvas.draw_cube(&cube, &color);
        }
        Ok(())
    }

    /// Project a world point to canvas coordinates
    pub fn project(&self, point: (f64, f64, f64)) -> Result<(f64, f64), MatrixError> {
        let mut p: Point = point.into();
        self.view_transform()?.apply(&mut p);
        Ok((p.x(), p.y()))
    }
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<Scene, SceneError> {
    Ok(ron::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::TextScreen;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_partial_scene_uses_defaults() {
        let scene = load_scene_from_str("(width: 10, height: 5, cubes: [])").unwrap();
        assert_eq!(scene.width, 10);
        assert_eq!(scene.height, 5);
        assert!(scene.cubes.is_empty());
        assert_eq!(scene.canvas, CanvasSettings::default());
        assert_eq!(scene.camera, CameraConfig::default());
    }

    #[test]
    fn test_full_cube_config_parses() {
        let text = r#"(
            canvas: (supersample: 2, palette: " #"),
            cubes: [(min: (0.0, 0.0, 0.0), max: (1.0, 1.0, 1.0), color: Some((1.0, 0.5, 0.0)))],
        )"#;
        let scene = load_scene_from_str(text).unwrap();
        assert_eq!(scene.canvas.supersample, 2);
        assert_eq!(scene.canvas.palette, " #");
        assert_eq!(scene.canvas.border, "##");
        assert_eq!(scene.cubes[0].color, Some(Color::new(1.0, 0.5, 0.0)));
        assert_eq!(scene.cubes[0].spin, (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(load_scene_from_str("(width: \"wide\")"), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("wireterm-scene-{}.ron", std::process::id()));
        let scene = Scene::default();
        save_scene(&scene, &path).unwrap();
        let loaded = load_scene(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(load_scene("/nonexistent/scene.ron"), Err(SceneError::Io(_))));
    }

    #[test]
    fn test_view_centers_look_target() {
        let scene = Scene::default();
        let (x, y) = scene.project((0.0, 0.0, 0.0)).unwrap();
        assert!((x - 20.0).abs() < EPS);
        assert!((y - 12.0).abs() < EPS);
    }

    #[test]
    fn test_model_transform_spins_in_place() {
        let config = CubeConfig {
            min: (1.0, 1.0, 1.0),
            max: (3.0, 3.0, 3.0),
            color: None,
            spin: (0.1, 0.2, 0.3),
        };
        let mut cube = config.build();
        cube.transform(&config.model_transform(7).unwrap());
        let c = cube.center();
        assert!((c.x() - 2.0).abs() < EPS);
        assert!((c.y() - 2.0).abs() < EPS);
        assert!((c.z() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_draw_frame_touches_canvas() {
        let scene = Scene::default();
        let mut canvas = scene.canvas();
        let mut screen = TextScreen::new(100, 30);
        canvas.render(&mut screen).unwrap();

        scene.draw_frame(&mut canvas, 0).unwrap();
        assert!(canvas.dirty_count() > 0);
        // the cube projects around the center; the far corner stays untouched
        assert!(!canvas.is_dirty(0, 0));
    }
}
