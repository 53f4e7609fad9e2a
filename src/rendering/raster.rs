//! Software rasterizer
//!
//! Executes display lists into RGBA buffers with deterministic pixel-center
//! coverage: a pixel is painted iff its center lies inside the half-open
//! device-space extent of the primitive. No antialiasing, no blending;
//! later commands overwrite earlier ones.

use crate::model::Color;
use crate::rendering::layout::{Page, Surface};
use crate::rendering::paint::PaintCommand;
use crate::rendering::Screenshot;

/// Device size of a logical length at a given scale, never zero.
///
/// Fractional CSS sizes occupy their ceiling pixel (100.64 logical pixels
/// render 101 device pixels). The epsilon keeps exact products like
/// 100 * 2.5 from rounding up an extra pixel.
pub(crate) fn device_px(logical: f64, scale: f64) -> u32 {
    ((logical * scale) - 1e-6).ceil().max(1.0) as u32
}

/// Rasterize a resolved page at the given scale factor.
pub fn rasterize_page(page: &Page, scale: f64) -> Screenshot {
    let mut shot = Screenshot::new(device_px(page.width, scale), device_px(page.height, scale));
    for surface in &page.surfaces {
        paint_surface(&mut shot, surface, surface.x, surface.y, scale);
    }
    shot
}

/// Rasterize a single surface at the origin (used for SVG image fallbacks).
pub fn rasterize_surface(surface: &Surface, scale: f64) -> Screenshot {
    let mut shot = Screenshot::new(
        device_px(surface.width, scale),
        device_px(surface.height, scale),
    );
    paint_surface(&mut shot, surface, 0.0, 0.0, scale);
    shot
}

fn paint_surface(shot: &mut Screenshot, surface: &Surface, ox: f64, oy: f64, scale: f64) {
    // half a device pixel keeps integer geometry crisp under any scale
    let tx = |v: f64| (ox + v) * scale + 0.5;
    let ty = |v: f64| (oy + v) * scale + 0.5;
    for cmd in &surface.commands {
        match cmd {
            PaintCommand::FillRect { x, y, width, height, fill } => {
                fill_rect(shot, tx(*x), ty(*y), width * scale, height * scale, *fill);
            }
            PaintCommand::StrokeRect { x, y, width, height, stroke, line_width } => {
                // strokes are inset so they never bleed outside the rect
                let lw = (line_width * scale).max(1.0);
                let (x, y) = (tx(*x), ty(*y));
                let (w, h) = (width * scale, height * scale);
                fill_rect(shot, x, y, w, lw, *stroke);
                fill_rect(shot, x, y + h - lw, w, lw, *stroke);
                fill_rect(shot, x, y + lw, lw, h - 2.0 * lw, *stroke);
                fill_rect(shot, x + w - lw, y + lw, lw, h - 2.0 * lw, *stroke);
            }
            PaintCommand::FillEllipse { cx, cy, rx, ry, fill } => {
                fill_ellipse(shot, tx(*cx), ty(*cy), rx * scale, ry * scale, *fill);
            }
            PaintCommand::FillText { x, y, text, fill } => {
                fill_text(shot, tx(*x), ty(*y), scale, text, *fill);
            }
        }
    }
}

/// Covered pixel indices for the device-space interval [a, b).
fn span(a: f64, b: f64, limit: u32) -> (u32, u32) {
    let first = (a - 0.5).ceil().max(0.0) as u32;
    let end = (b - 0.5).ceil().clamp(0.0, limit as f64) as u32;
    (first.min(limit), end)
}

fn fill_rect(shot: &mut Screenshot, x: f64, y: f64, w: f64, h: f64, color: Color) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let (x0, x1) = span(x, x + w, shot.width);
    let (y0, y1) = span(y, y + h, shot.height);
    fill_rows(shot, x0, x1, y0, y1, color);
}

fn fill_ellipse(shot: &mut Screenshot, cx: f64, cy: f64, rx: f64, ry: f64, color: Color) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let (y0, y1) = span(cy - ry, cy + ry, shot.height);
    for py in y0..y1 {
        let dy = (py as f64 + 0.5 - cy) / ry;
        if dy.abs() > 1.0 {
            continue;
        }
        let half = rx * (1.0 - dy * dy).sqrt();
        let (x0, x1) = span(cx - half, cx + half, shot.width);
        fill_rows(shot, x0, x1, py, py + 1, color);
    }
}

/// Codepoint-derived bar glyphs: enough to make text deterministic and
/// visible without a font dependency. Each char cell is 8x12 logical pixels
/// with up to six vertical bars switched by the codepoint value.
const CELL_W: f64 = 8.0;
const CELL_H: f64 = 12.0;

fn fill_text(shot: &mut Screenshot, x: f64, y: f64, scale: f64, text: &str, color: Color) {
    for (i, ch) in text.chars().enumerate() {
        let bits = (ch as u32 % 63) + 1;
        let cell_x = x + i as f64 * CELL_W * scale;
        for bar in 0..6u32 {
            if bits & (1 << bar) != 0 {
                fill_rect(
                    shot,
                    cell_x + (1.0 + bar as f64) * scale,
                    y + scale,
                    scale,
                    (CELL_H - 2.0) * scale,
                    color,
                );
            }
        }
    }
}

fn fill_rows(shot: &mut Screenshot, x0: u32, x1: u32, y0: u32, y1: u32, color: Color) {
    let rgba = color.rgba();
    let width = shot.width as usize;
    for py in y0..y1 {
        for px in x0..x1 {
            let idx = (py as usize * width + px as usize) * 4;
            shot.pixels[idx..idx + 4].copy_from_slice(&rgba);
        }
    }
}
