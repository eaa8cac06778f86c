// Core types shared by the sizer, the stroke recorder and the host.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGBA color. Packed into the raster as 0xAARRGGBB.
/// Files and the host talk in hex strings ("#EF4444"), hence the serde impls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    #[inline]
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn from_argb(px: u32) -> Self {
        Self {
            a: (px >> 24) as u8,
            r: (px >> 16) as u8,
            g: (px >> 8) as u8,
            b: px as u8,
        }
    }

    /// "#RRGGBB", upper case. Alpha is dropped (strokes are always opaque).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Drawing surfaces are filled with this before anything else touches them.
pub const BACKGROUND: Color = Color::WHITE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?} (expected #RGB or #RRGGBB)", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts "#RGB", "#RRGGBB" and the two CSS names the pad itself uses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let t = s.trim();
        match t.to_ascii_lowercase().as_str() {
            "white" => return Ok(Color::WHITE),
            "black" => return Ok(Color::BLACK),
            _ => {}
        }
        let hex = t.strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| err());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            // #RGB expands each digit (F -> FF)
            3 => Ok(Color::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
}

impl Tool {
    pub fn label(self) -> &'static str {
        match self {
            Tool::Brush => "BRUSH",
            Tool::Eraser => "ERASER",
        }
    }
}

/// What size the raster should be: follow the container, or exactly W x H.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CanvasSizeRepr", into = "CanvasSizeRepr")]
pub enum CanvasSize {
    #[default]
    FitScreen,
    Fixed { width: u32, height: u32 },
}

impl CanvasSize {
    pub fn label(self) -> String {
        match self {
            CanvasSize::FitScreen => "FIT".to_string(),
            CanvasSize::Fixed { width, height } => format!("{width}X{height}"),
        }
    }
}

// On disk: either the literal "FIT_SCREEN" or {"width": .., "height": ..}.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CanvasSizeRepr {
    Symbol(String),
    Fixed { width: u32, height: u32 },
}

impl TryFrom<CanvasSizeRepr> for CanvasSize {
    type Error = String;
    fn try_from(r: CanvasSizeRepr) -> Result<Self, Self::Error> {
        match r {
            CanvasSizeRepr::Symbol(s) if s == "FIT_SCREEN" => Ok(CanvasSize::FitScreen),
            CanvasSizeRepr::Symbol(s) => Err(format!("unknown canvas size {s:?}")),
            CanvasSizeRepr::Fixed { width, height } => Ok(CanvasSize::Fixed { width, height }),
        }
    }
}

impl From<CanvasSize> for CanvasSizeRepr {
    fn from(c: CanvasSize) -> Self {
        match c {
            CanvasSize::FitScreen => CanvasSizeRepr::Symbol("FIT_SCREEN".to_string()),
            CanvasSize::Fixed { width, height } => CanvasSizeRepr::Fixed { width, height },
        }
    }
}

/// Everything the host hands the surface on every change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    pub tool: Tool,
    pub color: Color,
    pub brush_size: u32,
    pub canvas_size: CanvasSize,
    pub zoom: f32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            color: Color::BLACK,
            brush_size: 5,
            canvas_size: CanvasSize::FitScreen,
            zoom: 1.0,
        }
    }
}

impl DrawingConfig {
    /// The color a segment is actually stroked with: the eraser paints background.
    pub fn stroke_color(&self) -> Color {
        match self.tool {
            Tool::Eraser => BACKGROUND,
            Tool::Brush => self.color,
        }
    }
}

/// Integer pixel size (raster dimensions or a measured container box).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extent {
    pub width: i64,
    pub height: i64,
}

impl Extent {
    pub const ZERO: Extent = Extent { width: 0, height: 0 };

    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// Both sides > 0, i.e. something we can allocate.
    pub fn is_measurable(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A point in raster (buffer) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A point in window/client space (before undoing zoom).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClientPoint {
    pub x: f32,
    pub y: f32,
}

impl ClientPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
