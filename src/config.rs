//! Render configuration.
//!
//! Loaded from YAML with precedence: CLI > file > defaults. A config fully
//! describes one frame: raster size, render mode, camera, lights and the
//! scene itself (balls plus bones given as ball index pairs).

use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::Point3d;
use crate::scene::{Ball, BallId, Bone, Figure, Scene, WorldView};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How a frame is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Per-pixel depth-composited tracing.
    #[default]
    Traced,
    /// Painter's-order rasterization without depth test.
    Flat,
}

impl std::str::FromStr for RenderMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "traced" => Ok(Self::Traced),
            "flat" => Ok(Self::Flat),
            other => Err(Error::Config(format!("unknown render mode '{other}'"))),
        }
    }
}

/// Pinhole camera settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera position.
    #[serde(default = "default_camera_position")]
    pub position: Point3d,
    /// Point the camera looks at.
    #[serde(default)]
    pub look_at: Point3d,
    /// Focal length in pixels.
    #[serde(default = "default_focal_length")]
    pub focal_length: f64,
}

fn default_camera_position() -> Point3d {
    Point3d::new(0.0, 0.0, -400.0)
}
fn default_focal_length() -> f64 {
    400.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            look_at: Point3d::ZERO,
            focal_length: default_focal_length(),
        }
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLightConfig {
    /// Position in screen-depth space.
    pub position: Point3d,
    /// Distance over which the light halves.
    pub half_life: f64,
}

/// Lighting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingConfig {
    /// Directional light; the zero vector disables it.
    #[serde(default = "default_light_direction")]
    pub directional: Point3d,
    /// Point lights applied on top of the directional light.
    #[serde(default)]
    pub point_lights: Vec<PointLightConfig>,
}

fn default_light_direction() -> Point3d {
    Point3d::new(0.0, 1.0, 0.5)
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            directional: default_light_direction(),
            point_lights: Vec::new(),
        }
    }
}

/// One ball of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallConfig {
    /// World-space center.
    pub center: Point3d,
    /// World-space radius.
    pub radius: f64,
    /// RGB color.
    pub color: [u8; 3],
}

/// Scene description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Balls, referenced by index from `bones`.
    #[serde(default)]
    pub balls: Vec<BallConfig>,
    /// Bones as pairs of ball indices.
    #[serde(default)]
    pub bones: Vec<[usize; 2]>,
}

impl SceneConfig {
    /// Small built-in figure: a head, a neck and a horn.
    #[must_use]
    pub fn demo() -> Self {
        let ball = |x: f64, y: f64, z: f64, radius: f64, color: [u8; 3]| BallConfig {
            center: Point3d::new(x, y, z),
            radius,
            color,
        };
        Self {
            balls: vec![
                ball(0.0, 40.0, 20.0, 50.0, [235, 200, 220]),
                ball(60.0, -30.0, 0.0, 35.0, [235, 200, 220]),
                ball(90.0, 100.0, 40.0, 25.0, [200, 160, 190]),
                ball(75.0, -70.0, -10.0, 8.0, [250, 230, 120]),
                ball(95.0, -140.0, -20.0, 2.0, [255, 250, 200]),
            ],
            bones: vec![[0, 1], [0, 2], [3, 4]],
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Raster height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Background RGB color.
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    /// Render mode.
    #[serde(default)]
    pub mode: RenderMode,
    /// Edge shading strength for flat mode (0 disables).
    #[serde(default = "default_shading")]
    pub shading: f64,
    /// Camera settings.
    #[serde(default)]
    pub camera: CameraConfig,
    /// Lighting settings.
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Scene description.
    #[serde(default = "SceneConfig::demo")]
    pub scene: SceneConfig,
}

fn default_width() -> u32 {
    400
}
fn default_height() -> u32 {
    400
}
fn default_background() -> [u8; 3] {
    [90, 140, 200]
}
fn default_shading() -> f64 {
    0.25
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
            mode: RenderMode::default(),
            shading: default_shading(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            scene: SceneConfig::demo(),
        }
    }
}

impl RenderConfig {
    /// Default config file location (`<config dir>/unicorn-raster/config.yaml`).
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("unicorn-raster").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if parsing or validation fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults when the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// A file that exists but is invalid is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Check value ranges and bone references.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.camera.focal_length.is_nan() || self.camera.focal_length <= 0.0 {
            return Err(Error::Config(format!(
                "focal_length must be positive, got {}",
                self.camera.focal_length
            )));
        }
        if let Some((i, b)) = self
            .scene
            .balls
            .iter()
            .enumerate()
            .find(|(_, b)| b.radius.is_nan() || b.radius < 0.0)
        {
            return Err(Error::Config(format!("ball {i} has negative radius {}", b.radius)));
        }
        let count = self.scene.balls.len();
        if let Some(bone) = self.scene.bones.iter().find(|[a, b]| *a >= count || *b >= count) {
            return Err(Error::Config(format!(
                "bone {bone:?} references a missing ball (have {count})"
            )));
        }
        Ok(())
    }

    /// The camera for a raster of this config's size.
    #[must_use]
    pub fn world_view(&self) -> WorldView {
        WorldView::new(
            self.camera.position,
            self.camera.look_at,
            self.camera.focal_length,
            (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0),
        )
    }

    /// Background color.
    #[must_use]
    pub fn background_color(&self) -> Color {
        Color::from(self.background)
    }

    /// Build the scene arena and the root figure.
    ///
    /// Bones come first in the figure, then every ball not used by a bone.
    #[must_use]
    pub fn build_scene(&self) -> (Scene, Figure) {
        let mut scene = Scene::new();
        let ids: Vec<BallId> = self
            .scene
            .balls
            .iter()
            .map(|b| scene.add_ball(Ball::at(b.center, b.radius, Color::from(b.color))))
            .collect();

        let mut figure = Figure::new();
        let mut used = vec![false; ids.len()];
        for &[a, b] in &self.scene.bones {
            figure.add(Bone::new(ids[a], ids[b]));
            used[a] = true;
            used[b] = true;
        }
        for (id, _) in ids.iter().zip(&used).filter(|(_, used)| !**used) {
            figure.add(*id);
        }
        log::debug!(
            "scene: {} balls, {} bones",
            scene.len(),
            self.scene.bones.len()
        );
        (scene, figure)
    }
}
