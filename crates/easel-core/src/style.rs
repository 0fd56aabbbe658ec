//! Shape style records.
//!
//! Every shape carries its own copy of a [`Style`], seeded from the scene's
//! ambient default at spawn time. Mutation goes through [`StylePatch`] so
//! shape kinds can react to the keys that changed (text reflows on font
//! changes, for example).

use kurbo::Vec2;
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Convert to a peniko color for the drawing surface.
    pub fn color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    /// This color with its alpha scaled by `opacity` in [0, 1].
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (f64::from(self.a) * opacity.clamp(0.0, 1.0)) as u8;
        Self { a, ..self }
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        color.color()
    }
}

/// Error parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("missing '#' prefix")]
    MissingHash,
    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
    #[error("unsupported hex color length {0}, expected 3, 6 or 8 digits")]
    BadLength(usize),
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into an [`Rgba`].
pub fn parse_hex(input: &str) -> Result<Rgba, ColorParseError> {
    let hex = input
        .strip_prefix('#')
        .ok_or(ColorParseError::MissingHash)?
        .trim();
    let digit = |range: &str| {
        u8::from_str_radix(range, 16).map_err(|_| ColorParseError::InvalidDigit(input.to_string()))
    };
    match hex.len() {
        3 => Ok(Rgba::new(
            digit(&hex[0..1])? * 17,
            digit(&hex[1..2])? * 17,
            digit(&hex[2..3])? * 17,
            255,
        )),
        6 => Ok(Rgba::new(
            digit(&hex[0..2])?,
            digit(&hex[2..4])?,
            digit(&hex[4..6])?,
            255,
        )),
        8 => Ok(Rgba::new(
            digit(&hex[0..2])?,
            digit(&hex[2..4])?,
            digit(&hex[4..6])?,
            digit(&hex[6..8])?,
        )),
        n => Err(ColorParseError::BadLength(n)),
    }
}

/// Stroke line cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Stroke line join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// How text behaves when it exceeds a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextOverflow {
    #[default]
    NoWrap,
    Wrap,
    Truncate,
}

/// Drop shadow parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub color: Rgba,
}

impl Shadow {
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Fill color (None = no fill).
    pub fill: Option<Rgba>,
    /// Stroke color (None = no stroke).
    pub stroke: Option<Rgba>,
    /// Stroke width; a zero width disables stroking.
    pub line_width: f64,
    pub line_join: LineJoin,
    pub line_cap: LineCap,
    /// Dash pattern; empty means solid.
    pub dash: Vec<f64>,
    pub font_size: f64,
    pub font_family: String,
    pub font_color: Rgba,
    /// Vertical gap between text lines.
    pub line_gap: f64,
    pub text_overflow: TextOverflow,
    /// Corner radius for rectangles, images, and boxes.
    pub radius: f64,
    pub shadow: Option<Shadow>,
    /// Overall opacity (0 = transparent, 1 = opaque).
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Rgba::new(0xFF, 0x55, 0x66, 0xFF)),
            stroke: Some(Rgba::new(0x22, 0x22, 0x22, 0xFF)),
            line_width: 2.0,
            line_join: LineJoin::Round,
            line_cap: LineCap::Round,
            dash: Vec::new(),
            font_size: 16.0,
            font_family: "Arial".to_string(),
            font_color: Rgba::new(0x55, 0x55, 0x55, 0xFF),
            line_gap: 5.0,
            text_overflow: TextOverflow::NoWrap,
            radius: 0.0,
            shadow: None,
            opacity: 1.0,
        }
    }
}

/// A key identifying one [`Style`] field, reported to shapes on change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleKey {
    Fill,
    Stroke,
    LineWidth,
    LineJoin,
    LineCap,
    Dash,
    FontSize,
    FontFamily,
    FontColor,
    LineGap,
    TextOverflow,
    Radius,
    Shadow,
    Opacity,
}

/// A partial style: `Some` fields are merged into the target record.
///
/// Clearable fields (`fill`, `stroke`, `shadow`) are doubly optional so a
/// patch can distinguish "leave alone" from "set to none".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePatch {
    pub fill: Option<Option<Rgba>>,
    pub stroke: Option<Option<Rgba>>,
    pub line_width: Option<f64>,
    pub line_join: Option<LineJoin>,
    pub line_cap: Option<LineCap>,
    pub dash: Option<Vec<f64>>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_color: Option<Rgba>,
    pub line_gap: Option<f64>,
    pub text_overflow: Option<TextOverflow>,
    pub radius: Option<f64>,
    pub shadow: Option<Option<Shadow>>,
    pub opacity: Option<f64>,
}

impl Style {
    /// Merge a patch into this style, returning the keys that were present
    /// in the patch.
    pub fn apply(&mut self, patch: &StylePatch) -> Vec<StyleKey> {
        let mut changed = Vec::new();
        macro_rules! merge {
            ($field:ident, $key:expr) => {
                if let Some(value) = &patch.$field {
                    self.$field = value.clone();
                    changed.push($key);
                }
            };
        }
        merge!(fill, StyleKey::Fill);
        merge!(stroke, StyleKey::Stroke);
        merge!(line_width, StyleKey::LineWidth);
        merge!(line_join, StyleKey::LineJoin);
        merge!(line_cap, StyleKey::LineCap);
        merge!(dash, StyleKey::Dash);
        merge!(font_size, StyleKey::FontSize);
        merge!(font_family, StyleKey::FontFamily);
        merge!(font_color, StyleKey::FontColor);
        merge!(line_gap, StyleKey::LineGap);
        merge!(text_overflow, StyleKey::TextOverflow);
        merge!(radius, StyleKey::Radius);
        merge!(shadow, StyleKey::Shadow);
        merge!(opacity, StyleKey::Opacity);
        changed
    }

    /// The stroke pen, or None when stroking is disabled.
    pub fn pen(&self) -> Option<Pen<'_>> {
        let stroke = self.stroke?;
        if self.line_width <= 0.0 {
            return None;
        }
        Some(Pen {
            color: stroke.color(),
            width: self.line_width,
            cap: self.line_cap,
            join: self.line_join,
            dash: &self.dash,
        })
    }

    /// The font specification for text drawing and measurement.
    pub fn font(&self) -> FontSpec<'_> {
        FontSpec {
            size: self.font_size,
            family: &self.font_family,
        }
    }

    /// Height of one text line (font size plus line gap).
    pub fn line_height(&self) -> f64 {
        self.font_size + self.line_gap
    }
}

/// Stroke parameters handed to the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen<'a> {
    pub color: Color,
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub dash: &'a [f64],
}

/// Font parameters handed to the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec<'a> {
    pub size: f64,
    pub family: &'a str,
}
