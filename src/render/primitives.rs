use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(self) -> PlotResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command for a connected polyline in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub color: Color,
}

impl PolylinePrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, stroke_width: f64, color: Color) -> Self {
        Self {
            points,
            stroke_width,
            color,
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.points.len() < 2 {
            return Err(PlotError::InvalidData(
                "polyline needs at least two points".to_owned(),
            ));
        }
        for (x, y) in &self.points {
            if !x.is_finite() || !y.is_finite() {
                return Err(PlotError::InvalidData(
                    "polyline coordinates must be finite".to_owned(),
                ));
            }
        }
        validate_stroke(self.stroke_width)?;
        self.color.validate()
    }
}

/// Draw command for a filled, optionally stroked, axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub stroke: Option<(f64, Color)>,
}

impl RectPrimitive {
    #[must_use]
    pub const fn filled(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill,
            stroke: None,
        }
    }

    pub fn validate(self) -> PlotResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(PlotError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(PlotError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        self.fill.validate()?;
        if let Some((width, color)) = self.stroke {
            validate_stroke(width)?;
            color.validate()?;
        }
        Ok(())
    }
}

/// Draw command for a filled region between an upper and lower pixel path.
///
/// Both paths share x positions index by index; the backend closes the
/// polygon by walking the lower path in reverse.
#[derive(Debug, Clone, PartialEq)]
pub struct BandPrimitive {
    pub upper: Vec<(f64, f64)>,
    pub lower: Vec<(f64, f64)>,
    pub fill: Color,
}

impl BandPrimitive {
    #[must_use]
    pub fn new(upper: Vec<(f64, f64)>, lower: Vec<(f64, f64)>, fill: Color) -> Self {
        Self { upper, lower, fill }
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.upper.len() < 2 || self.upper.len() != self.lower.len() {
            return Err(PlotError::InvalidData(
                "band paths must have matching length >= 2".to_owned(),
            ));
        }
        for (x, y) in self.upper.iter().chain(&self.lower) {
            if !x.is_finite() || !y.is_finite() {
                return Err(PlotError::InvalidData(
                    "band coordinates must be finite".to_owned(),
                ));
            }
        }
        self.fill.validate()
    }
}

/// Shape of a point marker glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    Circle,
    Square,
    Diamond,
}

/// Draw command for one point marker centered on a pixel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPrimitive {
    pub x: f64,
    pub y: f64,
    pub size_px: f64,
    pub shape: MarkerShape,
    pub color: Color,
}

impl MarkerPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, size_px: f64, shape: MarkerShape, color: Color) -> Self {
        Self {
            x,
            y,
            size_px,
            shape,
            color,
        }
    }

    pub fn validate(self) -> PlotResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(PlotError::InvalidData(
                "marker position must be finite".to_owned(),
            ));
        }
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(PlotError::InvalidData(
                "marker size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.text.is_empty() {
            return Err(PlotError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(PlotError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(PlotError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Which plot edge a tick mark hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEdge {
    Bottom,
    Left,
}

/// Draw command for one axis tick mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPrimitive {
    /// Pixel position along the edge.
    pub position_px: f64,
    pub edge: TickEdge,
    pub length_px: f64,
    pub color: Color,
}

impl TickPrimitive {
    #[must_use]
    pub const fn new(position_px: f64, edge: TickEdge, length_px: f64, color: Color) -> Self {
        Self {
            position_px,
            edge,
            length_px,
            color,
        }
    }

    pub fn validate(self) -> PlotResult<()> {
        if !self.position_px.is_finite() {
            return Err(PlotError::InvalidData(
                "tick position must be finite".to_owned(),
            ));
        }
        if !self.length_px.is_finite() || self.length_px <= 0.0 {
            return Err(PlotError::InvalidData(
                "tick length must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

fn validate_stroke(width: f64) -> PlotResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(PlotError::InvalidData(
            "stroke width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
