//! SVG serialization
//!
//! Emits a stable markup shape: one `<svg version="1.1">` root with a single
//! `<defs/>`, `<path>` elements for primitives, `<g transform="matrix(...)">`
//! wrappers for offset children, and base64 PNG `<image>` embeds for raster
//! surfaces. Markup is deterministic: equal pages serialize to equal strings.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as Base64Engine;

use crate::model::Color;
use crate::rendering::layout::{Page, Surface, SurfaceBackend};
use crate::rendering::paint::PaintCommand;
use crate::Result;

/// Crisp offset for surface-local geometry, matching the canvas backend.
const CRISP: f64 = 0.5;

/// Serialize the page as one composite SVG document.
///
/// `raster_png` supplies encoded PNG bytes for raster surfaces; the driver
/// decides the encoder profile.
pub fn page_svg<F>(page: &Page, mut raster_png: F) -> Result<String>
where
    F: FnMut(&Surface) -> Result<Vec<u8>>,
{
    if !page.composite {
        // leaf export: the root surface's own document, no composite clear
        let surface = match page.surfaces.first() {
            Some(surface) => surface,
            None => return Ok(format!("{}<defs/></svg>", svg_open(page.width, page.height))),
        };
        return match surface.backend {
            SurfaceBackend::Vector => Ok(surface_svg(surface)),
            SurfaceBackend::Raster => Ok(fallback_svg(surface, &raster_png(surface)?)),
        };
    }

    let mut out = svg_open(page.width, page.height);
    out.push_str("<defs/>");
    // composite canvases are cleared before children are painted
    out.push_str(&fill_path(
        rect_path(0.0, 0.0, page.width, page.height),
        Color::TRANSPARENT,
    ));
    for surface in &page.surfaces {
        let offset = surface.x != 0.0 || surface.y != 0.0;
        if offset {
            out.push_str(&format!(
                r#"<g transform="matrix(1, 0, 0, 1, {}, {})">"#,
                num(surface.x),
                num(surface.y)
            ));
        }
        match surface.backend {
            SurfaceBackend::Vector => {
                for cmd in &surface.commands {
                    write_command(&mut out, cmd);
                }
            }
            SurfaceBackend::Raster => {
                out.push_str(&image_element(surface, &raster_png(surface)?));
            }
        }
        if offset {
            out.push_str("</g>");
        }
    }
    out.push_str("</svg>");
    Ok(out)
}

/// One standalone document per vector surface, in document order.
pub fn surface_svgs(page: &Page) -> Vec<String> {
    page.surfaces
        .iter()
        .filter(|surface| surface.backend == SurfaceBackend::Vector)
        .map(surface_svg)
        .collect()
}

fn surface_svg(surface: &Surface) -> String {
    let mut out = svg_open(surface.width, surface.height);
    out.push_str("<defs/>");
    for cmd in &surface.commands {
        write_command(&mut out, cmd);
    }
    out.push_str("</svg>");
    out
}

fn fallback_svg(surface: &Surface, png: &[u8]) -> String {
    format!(
        "{}<defs/>{}</svg>",
        svg_open(surface.width, surface.height),
        image_element(surface, png)
    )
}

fn svg_open(width: f64, height: f64) -> String {
    format!(
        r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        num(width),
        num(height)
    )
}

fn image_element(surface: &Surface, png: &[u8]) -> String {
    format!(
        r#"<image width="{}" height="{}" preserveAspectRatio="none" href="data:image/png;base64,{}"/>"#,
        num(surface.width),
        num(surface.height),
        BASE64.encode(png)
    )
}

fn write_command(out: &mut String, cmd: &PaintCommand) {
    match cmd {
        PaintCommand::FillRect { x, y, width, height, fill } => {
            out.push_str(&fill_path(
                rect_path(x + CRISP, y + CRISP, *width, *height),
                *fill,
            ));
        }
        PaintCommand::StrokeRect { x, y, width, height, stroke, line_width } => {
            out.push_str(&format!(
                r#"<path fill="none" stroke="{}" stroke-width="{}" paint-order="stroke" d="{}" stroke-opacity="{}"/>"#,
                stroke.css(),
                num(*line_width),
                rect_path(x + CRISP, y + CRISP, *width, *height),
                num(stroke.opacity())
            ));
        }
        PaintCommand::FillEllipse { cx, cy, rx, ry, fill } => {
            // two arcs close the full outline
            let (cx, cy) = (cx + CRISP, cy + CRISP);
            let d = format!(
                "M {} {} A {} {} 0 1 0 {} {} A {} {} 0 1 0 {} {} Z",
                num(cx - rx),
                num(cy),
                num(*rx),
                num(*ry),
                num(cx + rx),
                num(cy),
                num(*rx),
                num(*ry),
                num(cx - rx),
                num(cy)
            );
            out.push_str(&fill_path(d, *fill));
        }
        PaintCommand::FillText { x, y, text, fill } => {
            out.push_str(&format!(
                r#"<text x="{}" y="{}" fill="{}">{}</text>"#,
                num(x + CRISP),
                num(y + CRISP + 10.0),
                fill.css(),
                escape_text(text)
            ));
        }
    }
}

fn fill_path(d: String, fill: Color) -> String {
    format!(
        r#"<path fill="{}" stroke="none" paint-order="stroke" d="{}" fill-opacity="{}"/>"#,
        fill.css(),
        d,
        num(fill.opacity())
    )
}

fn rect_path(x: f64, y: f64, w: f64, h: f64) -> String {
    let (x1, y1) = (x + w, y + h);
    format!(
        "M {x} {y} L {x1} {y} L {x1} {y1} L {x} {y1} L {x} {y} Z",
        x = num(x),
        y = num(y),
        x1 = num(x1),
        y1 = num(y1)
    )
}

/// Shortest decimal form: integral values print without a fractional part.
fn num(v: f64) -> String {
    // normalize negative zero so cleared origins print as "0"
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v}")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
