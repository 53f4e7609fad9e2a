//! The layout document model
//!
//! Documents are trees of [`Layout`] nodes: framed plot canvases, text
//! blocks, and horizontal row containers. Nodes are plain data constructed
//! with struct literals over [`Default`], then handed to the export
//! functions by reference; exporting never mutates a document.

pub mod color;
pub mod theme;

pub use color::Color;
pub use theme::{PlotAttrs, Theme, ThemeAttrs};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 1-dimensional data range mapped onto one axis of a plot frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range1d {
    pub start: f64,
    pub end: f64,
}

impl Range1d {
    pub fn new(start: f64, end: f64) -> Self {
        Range1d { start, end }
    }

    pub(crate) fn span(&self) -> f64 {
        self.end - self.start
    }
}

impl Default for Range1d {
    fn default() -> Self {
        Range1d { start: 0.0, end: 1.0 }
    }
}

/// Output backend of a plot: raster canvas or native vector markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Canvas,
    Svg,
}

/// A tri-state styling attribute.
///
/// `Unset` resolves through the active theme and then a builtin default;
/// `Transparent` suppresses the paint entirely; `Solid` always wins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Paint {
    #[default]
    Unset,
    Transparent,
    Solid(Color),
}

impl Paint {
    pub fn is_unset(&self) -> bool {
        matches!(self, Paint::Unset)
    }

    /// The explicitly set color, if any (no theme or default fallback).
    pub fn explicit(&self) -> Option<Color> {
        match self {
            Paint::Solid(color) => Some(*color),
            _ => None,
        }
    }

    /// Resolve against a theme override and a builtin default.
    pub(crate) fn resolve(&self, themed: Option<Color>, default: Color) -> Option<Color> {
        match self {
            Paint::Solid(color) => Some(*color),
            Paint::Transparent => None,
            Paint::Unset => Some(themed.unwrap_or(default)),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Paint::Solid(color) => color.serialize(serializer),
            // Unset is skipped at the field level, so null means transparent
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Paint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match Option::<Color>::deserialize(deserializer)? {
            Some(color) => Paint::Solid(color),
            None => Paint::Transparent,
        })
    }
}

/// A glyph renderer placed in data coordinates on a plot frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Glyph {
    /// An axis-aligned rectangle centered on (x, y).
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(default, skip_serializing_if = "Paint::is_unset")]
        fill_color: Paint,
        #[serde(default, skip_serializing_if = "Paint::is_unset")]
        line_color: Paint,
    },
    /// A filled circle of `radius` (in data units) centered on (x, y).
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        #[serde(default, skip_serializing_if = "Paint::is_unset")]
        fill_color: Paint,
    },
}

/// A plot: a framed canvas with data ranges and glyph renderers.
///
/// The frame is the plot area inset by `min_border` on every side; glyph
/// coordinates map onto it through `x_range`/`y_range` (y grows upward).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plot {
    /// Outer width in logical pixels
    pub width: u32,
    /// Outer height in logical pixels
    pub height: u32,
    /// Inset between the canvas edge and the frame
    pub min_border: u32,
    pub x_range: Range1d,
    pub y_range: Range1d,
    /// Frame fill, behind the glyphs
    #[serde(skip_serializing_if = "Paint::is_unset")]
    pub background_fill: Paint,
    /// Border-band fill, outside the frame
    #[serde(skip_serializing_if = "Paint::is_unset")]
    pub border_fill: Paint,
    /// One-pixel frame outline
    #[serde(skip_serializing_if = "Paint::is_unset")]
    pub outline_line: Paint,
    pub output_backend: Backend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub glyphs: Vec<Glyph>,
}

impl Default for Plot {
    fn default() -> Self {
        Plot {
            width: 600,
            height: 600,
            min_border: 5,
            x_range: Range1d::default(),
            y_range: Range1d::default(),
            background_fill: Paint::Unset,
            border_fill: Paint::Unset,
            outline_line: Paint::Unset,
            output_backend: Backend::Canvas,
            title: None,
            glyphs: Vec::new(),
        }
    }
}

impl Plot {
    pub fn add_glyph(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
    }
}

/// A block of text with CSS-style (possibly fractional) dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Div {
    pub text: String,
    pub width: f64,
    pub height: f64,
}

impl Default for Div {
    fn default() -> Self {
        Div { text: String::new(), width: 300.0, height: 100.0 }
    }
}

/// A container laying children out left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub children: Vec<Layout>,
}

/// A node of the layout document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layout {
    Plot(Plot),
    Div(Div),
    Row(Row),
}

impl Layout {
    /// Logical width in CSS pixels.
    pub fn width(&self) -> f64 {
        match self {
            Layout::Plot(plot) => plot.width as f64,
            Layout::Div(div) => div.width,
            Layout::Row(row) => row.children.iter().map(Layout::width).sum(),
        }
    }

    /// Logical height in CSS pixels.
    pub fn height(&self) -> f64 {
        match self {
            Layout::Plot(plot) => plot.height as f64,
            Layout::Div(div) => div.height,
            Layout::Row(row) => row
                .children
                .iter()
                .map(Layout::height)
                .fold(0.0, f64::max),
        }
    }
}

impl From<Plot> for Layout {
    fn from(plot: Plot) -> Self {
        Layout::Plot(plot)
    }
}

impl From<Div> for Layout {
    fn from(div: Div) -> Self {
        Layout::Div(div)
    }
}

impl From<Row> for Layout {
    fn from(row: Row) -> Self {
        Layout::Row(row)
    }
}

/// Lay out children in a single horizontal row.
pub fn row<I: IntoIterator<Item = Layout>>(children: I) -> Layout {
    Layout::Row(Row { children: children.into_iter().collect() })
}
