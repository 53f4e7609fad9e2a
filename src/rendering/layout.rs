//! Layout resolution
//!
//! Turns a layout document into a [`Page`]: children placed at absolute
//! offsets, styling resolved against the active theme, and one display list
//! per surface. Resolution never mutates the input document; dimension
//! overrides are applied to a private copy of the root plot.

use serde::Serialize;

use crate::model::{Backend, Color, Div, Glyph, Layout, Plot, Range1d, Theme};
use crate::rendering::paint::PaintCommand;
use crate::resources::Resources;
use crate::{Error, Result};

/// Builtin outline color for plots with no theme override.
const OUTLINE_DEFAULT: Color = Color::rgb(0xe5, 0xe5, 0xe5);

/// Builtin fill for glyphs that leave their paint unset.
const GLYPH_FILL_DEFAULT: Color = Color::rgb(0x80, 0x80, 0x80);

/// Title used for snapshots of documents without a titled root plot.
const UNTITLED: &str = "figshot document";

/// A fully resolved, render-ready document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    /// True when the root is a container; composite vector output clears the
    /// canvas before painting children
    pub composite: bool,
    pub title: String,
    pub resources: Resources,
    pub surfaces: Vec<Surface>,
}

/// One paintable child at an absolute offset within the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub backend: SurfaceBackend,
    pub commands: Vec<PaintCommand>,
}

/// Whether a surface can be exported as native vector markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SurfaceBackend {
    Vector,
    Raster,
}

/// Resolve a layout into a render-ready [`Page`].
///
/// `width`/`height` override the root plot's dimensions for this resolution
/// only. Overrides on a non-plot root are rejected.
pub fn resolve(
    layout: &Layout,
    theme: &Theme,
    width: Option<u32>,
    height: Option<u32>,
    resources: &Resources,
) -> Result<Page> {
    let sized;
    let layout = if width.is_some() || height.is_some() {
        match layout {
            Layout::Plot(plot) => {
                let mut plot = plot.clone();
                if let Some(w) = width {
                    plot.width = w;
                }
                if let Some(h) = height {
                    plot.height = h;
                }
                sized = Layout::Plot(plot);
                &sized
            }
            _ => {
                return Err(Error::InvalidArgument(
                    "width/height overrides are only valid for plot roots".into(),
                ))
            }
        }
    } else {
        layout
    };

    let mut surfaces = Vec::new();
    collect(layout, theme, 0.0, 0.0, &mut surfaces);
    Ok(Page {
        width: layout.width(),
        height: layout.height(),
        composite: matches!(layout, Layout::Row(_)),
        title: page_title(layout),
        resources: *resources,
        surfaces,
    })
}

fn page_title(layout: &Layout) -> String {
    match layout {
        Layout::Plot(plot) => plot.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
        _ => UNTITLED.to_string(),
    }
}

fn collect(node: &Layout, theme: &Theme, x: f64, y: f64, out: &mut Vec<Surface>) {
    match node {
        Layout::Plot(plot) => out.push(plot_surface(plot, theme, x, y)),
        Layout::Div(div) => out.push(div_surface(div, x, y)),
        Layout::Row(row) => {
            let mut cx = x;
            for child in &row.children {
                collect(child, theme, cx, y, out);
                cx += child.width();
            }
        }
    }
}

/// The inner frame of a plot, mapping data coordinates to surface pixels.
struct Frame {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    x_range: Range1d,
    y_range: Range1d,
}

impl Frame {
    fn sx(&self, v: f64) -> f64 {
        self.x + (v - self.x_range.start) / self.x_range.span() * self.width
    }

    // screen y grows downward while data y grows upward
    fn sy(&self, v: f64) -> f64 {
        self.y + (self.y_range.end - v) / self.y_range.span() * self.height
    }
}

fn plot_surface(plot: &Plot, theme: &Theme, x: f64, y: f64) -> Surface {
    let w = plot.width as f64;
    let h = plot.height as f64;
    let b = plot.min_border as f64;
    let themed = &theme.attrs.plot;
    let mut commands = Vec::new();

    if let Some(fill) = plot.border_fill.resolve(themed.border_fill_color, Color::WHITE) {
        commands.push(PaintCommand::FillRect {
            x: 0.0,
            y: 0.0,
            width: w,
            height: h,
            fill,
        });
    }
    if let Some(fill) = plot
        .background_fill
        .resolve(themed.background_fill_color, Color::WHITE)
    {
        commands.push(PaintCommand::FillRect {
            x: b,
            y: b,
            width: w - 2.0 * b,
            height: h - 2.0 * b,
            fill,
        });
    }

    let frame = Frame {
        x: b,
        y: b,
        width: w - 2.0 * b,
        height: h - 2.0 * b,
        x_range: plot.x_range,
        y_range: plot.y_range,
    };
    for glyph in &plot.glyphs {
        glyph_commands(glyph, &frame, &mut commands);
    }

    if let Some(stroke) = plot
        .outline_line
        .resolve(themed.outline_line_color, OUTLINE_DEFAULT)
    {
        commands.push(PaintCommand::StrokeRect {
            x: b,
            y: b,
            width: w - 2.0 * b,
            height: h - 2.0 * b,
            stroke,
            line_width: 1.0,
        });
    }
    if let Some(title) = &plot.title {
        commands.push(PaintCommand::FillText {
            x: b,
            y: 2.0,
            text: title.clone(),
            fill: Color::BLACK,
        });
    }

    Surface {
        x,
        y,
        width: w,
        height: h,
        backend: match plot.output_backend {
            Backend::Svg => SurfaceBackend::Vector,
            Backend::Canvas => SurfaceBackend::Raster,
        },
        commands,
    }
}

fn glyph_commands(glyph: &Glyph, frame: &Frame, out: &mut Vec<PaintCommand>) {
    match glyph {
        Glyph::Rect { x, y, width, height, fill_color, line_color } => {
            // clip to the frame
            let x0 = frame.sx(x - width / 2.0).max(frame.x);
            let x1 = frame.sx(x + width / 2.0).min(frame.x + frame.width);
            let y0 = frame.sy(y + height / 2.0).max(frame.y);
            let y1 = frame.sy(y - height / 2.0).min(frame.y + frame.height);
            if x1 <= x0 || y1 <= y0 {
                return;
            }
            if let Some(fill) = fill_color.resolve(None, GLYPH_FILL_DEFAULT) {
                out.push(PaintCommand::FillRect {
                    x: x0,
                    y: y0,
                    width: x1 - x0,
                    height: y1 - y0,
                    fill,
                });
            }
            if let Some(stroke) = line_color.explicit() {
                out.push(PaintCommand::StrokeRect {
                    x: x0,
                    y: y0,
                    width: x1 - x0,
                    height: y1 - y0,
                    stroke,
                    line_width: 1.0,
                });
            }
        }
        Glyph::Circle { x, y, radius, fill_color } => {
            if let Some(fill) = fill_color.resolve(None, GLYPH_FILL_DEFAULT) {
                out.push(PaintCommand::FillEllipse {
                    cx: frame.sx(*x),
                    cy: frame.sy(*y),
                    rx: radius / frame.x_range.span().abs() * frame.width,
                    ry: radius / frame.y_range.span().abs() * frame.height,
                    fill,
                });
            }
        }
    }
}

fn div_surface(div: &Div, x: f64, y: f64) -> Surface {
    let mut commands = Vec::new();
    if !div.text.is_empty() {
        commands.push(PaintCommand::FillText {
            x: 2.0,
            y: 2.0,
            text: div.text.clone(),
            fill: Color::BLACK,
        });
    }
    Surface {
        x,
        y,
        width: div.width,
        height: div.height,
        backend: SurfaceBackend::Raster,
        commands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{row, Paint};

    fn green_plot(width: u32, height: u32) -> Plot {
        Plot {
            width,
            height,
            background_fill: Paint::Solid(Color::rgb(0, 255, 0)),
            border_fill: Paint::Solid(Color::rgb(0, 255, 0)),
            outline_line: Paint::Transparent,
            ..Default::default()
        }
    }

    #[test]
    fn uniform_plot_resolves_to_two_fill_rects() {
        let layout = Layout::Plot(green_plot(20, 20));
        let page =
            resolve(&layout, &Theme::default(), None, None, &Resources::default()).unwrap();

        assert!(!page.composite);
        assert_eq!(page.surfaces.len(), 1);
        let commands = &page.surfaces[0].commands;
        assert_eq!(
            commands[0],
            PaintCommand::FillRect {
                x: 0.0,
                y: 0.0,
                width: 20.0,
                height: 20.0,
                fill: Color::rgb(0, 255, 0)
            }
        );
        assert_eq!(
            commands[1],
            PaintCommand::FillRect {
                x: 5.0,
                y: 5.0,
                width: 10.0,
                height: 10.0,
                fill: Color::rgb(0, 255, 0)
            }
        );
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn row_children_are_offset_left_to_right() {
        let layout = row([
            Layout::Plot(green_plot(20, 20)),
            Layout::Div(Div { width: 30.0, height: 10.0, ..Default::default() }),
            Layout::Plot(green_plot(20, 20)),
        ]);
        let page =
            resolve(&layout, &Theme::default(), None, None, &Resources::default()).unwrap();

        assert!(page.composite);
        assert_eq!(page.width, 70.0);
        assert_eq!(page.height, 20.0);
        let offsets: Vec<(f64, f64)> = page.surfaces.iter().map(|s| (s.x, s.y)).collect();
        assert_eq!(offsets, vec![(0.0, 0.0), (20.0, 0.0), (50.0, 0.0)]);
    }

    #[test]
    fn dimension_overrides_never_touch_the_input() {
        let layout = Layout::Plot(Plot { width: 250, height: 200, ..Default::default() });
        let page =
            resolve(&layout, &Theme::default(), Some(100), Some(100), &Resources::default())
                .unwrap();
        assert_eq!((page.width, page.height), (100.0, 100.0));
        match &layout {
            Layout::Plot(plot) => assert_eq!((plot.width, plot.height), (250, 200)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn dimension_overrides_require_a_plot_root() {
        let layout = row([Layout::Plot(Plot::default())]);
        let res = resolve(&layout, &Theme::default(), Some(100), None, &Resources::default());
        assert!(matches!(res, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn theme_fills_only_unset_attributes() {
        let theme =
            Theme::from_json(r##"{"attrs": {"Plot": {"background_fill_color": "#2f3f4f"}}}"##)
                .unwrap();
        let layout = Layout::Plot(Plot {
            width: 20,
            height: 20,
            border_fill: Paint::Solid(Color::WHITE),
            outline_line: Paint::Transparent,
            ..Default::default()
        });
        let page = resolve(&layout, &theme, None, None, &Resources::default()).unwrap();
        let commands = &page.surfaces[0].commands;
        // border keeps its explicit white, background picks up the theme
        assert_eq!(
            commands[0],
            PaintCommand::FillRect {
                x: 0.0,
                y: 0.0,
                width: 20.0,
                height: 20.0,
                fill: Color::WHITE
            }
        );
        assert_eq!(
            commands[1],
            PaintCommand::FillRect {
                x: 5.0,
                y: 5.0,
                width: 10.0,
                height: 10.0,
                fill: Color::rgb(0x2f, 0x3f, 0x4f)
            }
        );
    }

    #[test]
    fn full_frame_rect_glyph_spans_the_frame_exactly() {
        let mut plot = green_plot(44, 44);
        plot.x_range = Range1d::new(-1.0, 1.0);
        plot.y_range = Range1d::new(-1.0, 1.0);
        plot.add_glyph(Glyph::Rect {
            x: 0.0,
            y: 0.0,
            width: 2.0,
            height: 2.0,
            fill_color: Paint::Solid(Color::rgb(255, 0, 0)),
            line_color: Paint::Unset,
        });
        let page = resolve(
            &Layout::Plot(plot),
            &Theme::default(),
            None,
            None,
            &Resources::default(),
        )
        .unwrap();
        assert_eq!(
            page.surfaces[0].commands[2],
            PaintCommand::FillRect {
                x: 5.0,
                y: 5.0,
                width: 34.0,
                height: 34.0,
                fill: Color::rgb(255, 0, 0)
            }
        );
    }

    #[test]
    fn oversized_glyphs_are_clipped_to_the_frame() {
        let mut plot = green_plot(20, 20);
        plot.add_glyph(Glyph::Rect {
            x: 0.5,
            y: 0.5,
            width: 10.0,
            height: 10.0,
            fill_color: Paint::Solid(Color::BLACK),
            line_color: Paint::Unset,
        });
        let page = resolve(
            &Layout::Plot(plot),
            &Theme::default(),
            None,
            None,
            &Resources::default(),
        )
        .unwrap();
        match &page.surfaces[0].commands[2] {
            PaintCommand::FillRect { x, y, width, height, .. } => {
                assert_eq!((*x, *y), (5.0, 5.0));
                assert_eq!((*width, *height), (10.0, 10.0));
            }
            other => panic!("expected a fill rect, got {other:?}"),
        }
    }
}
