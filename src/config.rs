//! Host settings: the drawing defaults, the palette, the size presets and where
//! exports go. Read from a JSON file; anything missing falls back to defaults.
//!
//! Validation lives here, on the host side: the surface assumes every fixed size
//! it receives is positive.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Error;
use crate::types::{CanvasSize, Color, DrawingConfig};

/// Env var naming the settings file.
pub const CONFIG_ENV: &str = "DOODLE_PAD_CONFIG";
/// Picked up from the working directory when the env var is not set.
pub const DEFAULT_CONFIG_FILE: &str = "doodle-pad.json";

pub const MIN_BRUSH: u32 = 1;
pub const MAX_BRUSH: u32 = 100;
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;
pub const ZOOM_STEP: f32 = 0.1;

pub const PRESET_COLORS: [&str; 12] = [
    "#000000", "#FFFFFF", "#EF4444", "#F97316", "#EAB308", "#84CC16", "#22C55E", "#14B8A6",
    "#06B6D4", "#3B82F6", "#8B5CF6", "#EC4899",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizePreset {
    pub label: String,
    pub size: CanvasSize,
}

impl SizePreset {
    fn new(label: &str, size: CanvasSize) -> Self {
        Self { label: label.to_string(), size }
    }
}

fn default_presets() -> Vec<SizePreset> {
    vec![
        SizePreset::new("Fit Screen", CanvasSize::FitScreen),
        SizePreset::new("Square (1024x1024)", CanvasSize::Fixed { width: 1024, height: 1024 }),
        SizePreset::new("Portrait (768x1024)", CanvasSize::Fixed { width: 768, height: 1024 }),
        SizePreset::new("Landscape (1024x768)", CanvasSize::Fixed { width: 1024, height: 768 }),
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// What the pad starts with.
    pub drawing: DrawingConfig,
    pub palette: Vec<Color>,
    pub presets: Vec<SizePreset>,
    /// Appended after the presets when cycling sizes.
    pub custom_size: CanvasSize,
    pub export_dir: PathBuf,
    pub window_title: String,
    pub window_width: usize,
    pub window_height: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            drawing: DrawingConfig::default(),
            palette: PRESET_COLORS.iter().filter_map(|c| c.parse().ok()).collect(),
            presets: default_presets(),
            custom_size: CanvasSize::Fixed { width: 1280, height: 720 },
            export_dir: PathBuf::from("."),
            window_title: "Doodle Pad".to_string(),
            window_width: 1024,
            window_height: 768,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `path`, or defaults when there is no path.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let Some(path) = path else {
            info!("no settings file, using defaults");
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Settings(format!("{}: {e}", path.display())))?;
        let settings = Self::from_json(&text)?;
        info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// `$DOODLE_PAD_CONFIG`, else `./doodle-pad.json` if it exists.
    pub fn locate() -> Option<PathBuf> {
        if let Some(p) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(p));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.is_file().then_some(local)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let bad = |msg: String| Err(Error::Settings(msg));
        let d = &self.drawing;
        if !(MIN_BRUSH..=MAX_BRUSH).contains(&d.brush_size) {
            return bad(format!("brush_size {} outside {MIN_BRUSH}..={MAX_BRUSH}", d.brush_size));
        }
        if !d.zoom.is_finite() || !(MIN_ZOOM..=MAX_ZOOM).contains(&d.zoom) {
            return bad(format!("zoom {} outside {MIN_ZOOM}..={MAX_ZOOM}", d.zoom));
        }
        validate_size(d.canvas_size)?;
        validate_size(self.custom_size)?;
        for p in &self.presets {
            validate_size(p.size)?;
        }
        if self.palette.is_empty() {
            return bad("palette must not be empty".to_string());
        }
        if self.window_width == 0 || self.window_height == 0 {
            return bad("window size must be positive".to_string());
        }
        Ok(())
    }

    /// Presets followed by the custom size, the order `P` cycles through.
    pub fn size_cycle(&self) -> Vec<CanvasSize> {
        self.presets.iter().map(|p| p.size).chain(std::iter::once(self.custom_size)).collect()
    }
}

/// Fixed sizes must be at least 1x1.
pub fn validate_size(size: CanvasSize) -> Result<(), Error> {
    match size {
        CanvasSize::Fixed { width, height } if width == 0 || height == 0 => {
            Err(Error::Settings(format!("canvas size {width}x{height} must be positive")))
        }
        _ => Ok(()),
    }
}

// Zoom moves in tenths; rounding keeps repeated steps from drifting (0.30000001).
fn snap(z: f32) -> f32 {
    (z * 10.0).round() / 10.0
}

pub fn zoom_in(z: f32) -> f32 {
    snap(z + ZOOM_STEP).min(MAX_ZOOM)
}

pub fn zoom_out(z: f32) -> f32 {
    snap(z - ZOOM_STEP).max(MIN_ZOOM)
}

pub fn clamp_brush(size: i64) -> u32 {
    size.clamp(MIN_BRUSH as i64, MAX_BRUSH as i64) as u32
}
