// Configuration file support.
//
// Settings are read from `~/.config/logo-painter/config.toml`. Every section
// is optional; missing values fall back to the editor's stock defaults
// (500x500 white canvas, black 3px brush, 1-20px radius range).
//
// Example:
//
// [canvas]
// width = 500
// height = 500
// background = "white"
//
// [brush]
// default_color = [40, 40, 40]
// default_radius = 3.0
// min_radius = 1.0
// max_radius = 20.0
// radius_step = 1.0
//
// [import]
// blend = "over"
//
// [store]
// directory = "/srv/logos"

use crate::brush::DEFAULT_RADIUS;
use crate::composite::BlendMode;
use crate::palette::name_to_color;
use crate::types::Color;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "logo-painter";
const MAX_CANVAS_SIDE: usize = 4096;
const RADIUS_LIMITS: (f32, f32) = (0.5, 200.0);

/// Color given either by name ("red", "white", ...) or as `[r, g, b]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Name(String),
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolve to an opaque color; unknown names yield `fallback` with a warning.
    pub fn to_color(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Name(name) => name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using fallback", name);
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::rgb(*r, *g, *b),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub brush: BrushConfig,

    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// Canvas size and background. The background doubles as the eraser color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_side")]
    pub width: usize,

    #[serde(default = "default_canvas_side")]
    pub height: usize,

    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_side(),
            height: default_canvas_side(),
            background: default_background(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushConfig {
    #[serde(default = "default_brush_color")]
    pub default_color: ColorSpec,

    #[serde(default = "default_radius")]
    pub default_radius: f32,

    #[serde(default = "default_min_radius")]
    pub min_radius: f32,

    #[serde(default = "default_max_radius")]
    pub max_radius: f32,

    /// Amount `+`/`-` change the radius by.
    #[serde(default = "default_radius_step")]
    pub radius_step: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_color: default_brush_color(),
            default_radius: default_radius(),
            min_radius: default_min_radius(),
            max_radius: default_max_radius(),
            radius_step: default_radius_step(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default)]
    pub blend: BlendMode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Where brand logos live. Defaults to `<data dir>/logo-painter/brands`.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_canvas_side() -> usize {
    500
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_brush_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_radius() -> f32 {
    DEFAULT_RADIUS
}

fn default_min_radius() -> f32 {
    1.0
}

fn default_max_radius() -> f32 {
    20.0
}

fn default_radius_step() -> f32 {
    1.0
}

impl Config {
    /// Clamp every value into a range the editor can work with, warning on each fix.
    pub fn validate_and_clamp(&mut self) {
        for (label, side) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if !(1..=MAX_CANVAS_SIDE).contains(&*side) {
                warn!(
                    "Invalid canvas {} {}, clamping to 1-{} range",
                    label, side, MAX_CANVAS_SIDE
                );
                *side = (*side).clamp(1, MAX_CANVAS_SIDE);
            }
        }

        let (lo, hi) = RADIUS_LIMITS;
        let brush = &mut self.brush;
        for (label, value, fallback) in [
            ("min_radius", &mut brush.min_radius, default_min_radius()),
            ("max_radius", &mut brush.max_radius, default_max_radius()),
            ("default_radius", &mut brush.default_radius, DEFAULT_RADIUS),
        ] {
            if value.is_nan() {
                warn!("Invalid {} NaN, using {:.1}", label, fallback);
                *value = fallback;
            } else if !(lo..=hi).contains(&*value) {
                warn!(
                    "Invalid {} {:.1}, clamping to {:.1}-{:.1} range",
                    label, value, lo, hi
                );
                *value = value.clamp(lo, hi);
            }
        }

        if brush.min_radius > brush.max_radius {
            warn!(
                "min_radius {:.1} exceeds max_radius {:.1}, swapping",
                brush.min_radius, brush.max_radius
            );
            std::mem::swap(&mut brush.min_radius, &mut brush.max_radius);
        }

        if !(brush.min_radius..=brush.max_radius).contains(&brush.default_radius) {
            warn!(
                "default_radius {:.1} outside {:.1}-{:.1}, clamping",
                brush.default_radius, brush.min_radius, brush.max_radius
            );
            brush.default_radius = brush.default_radius.clamp(brush.min_radius, brush.max_radius);
        }

        if !(brush.radius_step.is_finite() && brush.radius_step > 0.0) {
            warn!(
                "Invalid radius_step {:.1}, using {:.1}",
                brush.radius_step,
                default_radius_step()
            );
            brush.radius_step = default_radius_step();
        }
    }

    pub fn background(&self) -> Color {
        self.canvas.background.to_color(Color::WHITE)
    }

    pub fn brush_color(&self) -> Color {
        self.brush.default_color.to_color(Color::BLACK)
    }

    /// `~/.config/logo-painter/config.toml`.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join(APP_DIR);
        Ok(config_dir.join("config.toml"))
    }

    /// Configured store directory, or `<data dir>/logo-painter/brands`.
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.store.directory {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir().context("Could not find data directory")?;
        Ok(data_dir.join(APP_DIR).join("brands"))
    }

    /// Load from the default location, or defaults if there is no file.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load and validate a specific file. A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);
        Ok(config)
    }
}
