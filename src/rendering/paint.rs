//! Paint command set shared by the raster and vector backends

use serde::Serialize;

use crate::model::Color;

/// A single drawing operation in surface-local logical coordinates.
///
/// Coordinates are unoffset; each backend applies its own half-pixel crisp
/// offset (the vector serializer in logical units, the rasterizer in device
/// units) so both cover identical geometry at every scale factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PaintCommand {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke: Color,
        line_width: f64,
    },
    FillEllipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        fill: Color,
    },
    FillText {
        x: f64,
        y: f64,
        text: String,
        fill: Color,
    },
}
