//! The export surface
//!
//! Entry points for turning a layout into pixels, vector markup, or an HTML
//! snapshot. Every function takes the layout by shared reference and leaves
//! it untouched; dimension overrides act on a resolved copy. The `*_default`
//! variants borrow the process-wide driver from
//! [`driver_control`](crate::driver::driver_control).

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::driver::{driver_control, Driver};
use crate::model::Layout;
use crate::rendering::layout::{resolve, Page};
use crate::rendering::{html, Screenshot};
use crate::resources::Resources;
use crate::state::state;
use crate::{Error, Result};

/// Options accepted by [`rasterize`].
#[derive(Debug, Clone, Default)]
pub struct RasterOptions {
    /// Resource-bundling descriptor; never alters pixel output
    pub resources: Resources,
    /// Capture width override (plot roots only)
    pub width: Option<u32>,
    /// Capture height override (plot roots only)
    pub height: Option<u32>,
    /// Capture scale factor; must not exceed the driver's device pixel ratio
    pub scale_factor: Option<f64>,
}

/// Render the layout into an RGBA screenshot.
///
/// The buffer measures the layout's logical size times the effective scale
/// factor, each logical length rounded up to whole device pixels.
pub fn rasterize(
    layout: &Layout,
    driver: &mut dyn Driver,
    options: &RasterOptions,
) -> Result<Screenshot> {
    let scale = options.scale_factor.unwrap_or(1.0);
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "scale factor must be finite and positive, got {scale}"
        )));
    }
    // a capture above the device pixel ratio cannot be produced losslessly,
    // so fail before the driver is invoked
    if scale > driver.device_pixel_ratio() {
        return Err(Error::InvalidArgument(format!(
            "scale factor {} exceeds the driver's device pixel ratio {}",
            scale,
            driver.device_pixel_ratio()
        )));
    }
    let page = resolve_current(layout, options.width, options.height, &options.resources)?;
    driver.render_pixels(&page, scale)
}

/// [`rasterize`] through the process default driver.
pub fn rasterize_default(layout: &Layout, options: &RasterOptions) -> Result<Screenshot> {
    let mut control = driver_control().lock().unwrap_or_else(|e| e.into_inner());
    rasterize(layout, control.default_driver()?, options)
}

/// Serialize the layout as one composite SVG document.
///
/// The result is a one-element sequence for symmetry with
/// [`vectorize_each`]. Raster-only roots are embedded as PNG images.
pub fn vectorize(layout: &Layout, driver: &mut dyn Driver) -> Result<Vec<String>> {
    let page = resolve_current(layout, None, None, &Resources::default())?;
    Ok(vec![driver.render_svg(&page)?])
}

/// [`vectorize`] through the process default driver.
pub fn vectorize_default(layout: &Layout) -> Result<Vec<String>> {
    let mut control = driver_control().lock().unwrap_or_else(|e| e.into_inner());
    vectorize(layout, control.default_driver()?)
}

/// One standalone SVG document per vector-backend plot, in document order.
///
/// Layouts without vector plots yield an empty sequence.
pub fn vectorize_each(layout: &Layout, driver: &mut dyn Driver) -> Result<Vec<String>> {
    let page = resolve_current(layout, None, None, &Resources::default())?;
    driver.render_svgs(&page)
}

/// [`vectorize_each`] through the process default driver.
pub fn vectorize_each_default(layout: &Layout) -> Result<Vec<String>> {
    let mut control = driver_control().lock().unwrap_or_else(|e| e.into_inner());
    vectorize_each(layout, control.default_driver()?)
}

/// Build the standalone HTML snapshot of the layout.
///
/// `height`/`width` override the root plot's dimensions for this snapshot
/// only; the stored layout keeps its configured size.
pub fn snapshot_html(
    layout: &Layout,
    resources: &Resources,
    height: Option<u32>,
    width: Option<u32>,
) -> Result<String> {
    let page = resolve_current(layout, width, height, resources)?;
    html::page_html(&page)
}

/// Rasterize and write a PNG file, returning the path written.
pub fn save_png<P: AsRef<Path>>(
    layout: &Layout,
    driver: &mut dyn Driver,
    options: &RasterOptions,
    path: P,
) -> Result<PathBuf> {
    let shot = rasterize(layout, driver, options)?;
    let path = path.as_ref().to_path_buf();
    fs::write(&path, shot.encode_png()?)?;
    Ok(path)
}

/// Vectorize and write the composite SVG document.
pub fn save_svg<P: AsRef<Path>>(
    layout: &Layout,
    driver: &mut dyn Driver,
    path: P,
) -> Result<Vec<PathBuf>> {
    write_markup(vectorize(layout, driver)?, path.as_ref())
}

/// Vectorize each plot and write one file per document.
///
/// The first document lands at `path`; the rest at numbered siblings
/// (`plot.svg`, `plot_1.svg`, ...).
pub fn save_svgs<P: AsRef<Path>>(
    layout: &Layout,
    driver: &mut dyn Driver,
    path: P,
) -> Result<Vec<PathBuf>> {
    write_markup(vectorize_each(layout, driver)?, path.as_ref())
}

fn write_markup(documents: Vec<String>, path: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(documents.len());
    for (i, doc) in documents.iter().enumerate() {
        let target = if i == 0 { path.to_path_buf() } else { numbered(path, i) };
        fs::write(&target, doc)?;
        written.push(target);
    }
    Ok(written)
}

fn numbered(path: &Path, index: usize) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("export");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("svg");
    path.with_file_name(format!("{stem}_{index}.{ext}"))
}

fn resolve_current(
    layout: &Layout,
    width: Option<u32>,
    height: Option<u32>,
    resources: &Resources,
) -> Result<Page> {
    warn_missing_renderers(layout);
    let theme = state().lock().unwrap_or_else(|e| e.into_inner()).theme().clone();
    resolve(layout, &theme, width, height, resources)
}

fn warn_missing_renderers(layout: &Layout) {
    match layout {
        Layout::Plot(plot) if plot.glyphs.is_empty() => {
            warn!("plot has no glyph renderers; export may render a blank frame");
        }
        Layout::Row(row) => row.children.iter().for_each(warn_missing_renderers),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver;
    use crate::model::{row, Color, Paint, Plot};

    fn plain_plot() -> Layout {
        Layout::Plot(Plot {
            width: 20,
            height: 20,
            background_fill: Paint::Solid(Color::rgb(0, 255, 0)),
            border_fill: Paint::Solid(Color::rgb(0, 255, 0)),
            outline_line: Paint::Transparent,
            ..Default::default()
        })
    }

    #[test]
    fn rasterize_rejects_scales_above_the_device_ratio() {
        let mut drv = driver::create("argon", Some(2.5)).unwrap();
        let options = RasterOptions { scale_factor: Some(3.5), ..Default::default() };
        let err = rasterize(&plain_plot(), drv.as_mut(), &options).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        driver::terminate(drv).unwrap();
    }

    #[test]
    fn rasterize_rejects_nonpositive_scales() {
        let mut drv = driver::create("argon", None).unwrap();
        for bad in [0.0, -1.0, f64::NAN] {
            let options = RasterOptions { scale_factor: Some(bad), ..Default::default() };
            assert!(rasterize(&plain_plot(), drv.as_mut(), &options).is_err());
        }
        driver::terminate(drv).unwrap();
    }

    #[test]
    fn numbered_paths_insert_the_index_before_the_extension() {
        let base = Path::new("/tmp/figs/plot.svg");
        assert_eq!(numbered(base, 1), PathBuf::from("/tmp/figs/plot_1.svg"));
        assert_eq!(numbered(base, 12), PathBuf::from("/tmp/figs/plot_12.svg"));
        assert_eq!(
            numbered(Path::new("bare"), 2),
            PathBuf::from("bare_2.svg")
        );
    }

    #[test]
    fn save_svgs_writes_one_file_per_document() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("plot.svg");
        let svg_plot = |fill| {
            Layout::Plot(Plot {
                width: 20,
                height: 20,
                background_fill: Paint::Solid(fill),
                border_fill: Paint::Transparent,
                outline_line: Paint::Transparent,
                output_backend: crate::model::Backend::Svg,
                ..Default::default()
            })
        };
        let layout = row([svg_plot(Color::rgb(255, 0, 0)), svg_plot(Color::rgb(0, 0, 255))]);

        let mut drv = driver::create("argon", None).unwrap();
        let written = save_svgs(&layout, drv.as_mut(), &target).unwrap();
        driver::terminate(drv).unwrap();

        assert_eq!(
            written,
            vec![target.clone(), dir.path().join("plot_1.svg")]
        );
        for path in &written {
            let text = fs::read_to_string(path).unwrap();
            assert!(text.starts_with("<svg version=\"1.1\""), "got {text}");
        }
    }

    #[test]
    fn save_png_round_trips_through_the_codec() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("shot.png");

        let mut drv = driver::create("neon", None).unwrap();
        let written =
            save_png(&plain_plot(), drv.as_mut(), &RasterOptions::default(), &target).unwrap();
        driver::terminate(drv).unwrap();

        let decoded = Screenshot::from_png(&fs::read(written).unwrap()).unwrap();
        assert_eq!((decoded.width, decoded.height), (20, 20));
        assert_eq!(decoded.pixels, Color::rgb(0, 255, 0).rgba().repeat(400));
    }
}
