//! Markup-exact SVG export tests.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use pretty_assertions::assert_eq;

use figshot::model::{row, Backend, Color, Div, Glyph, Layout, Paint, Plot, Range1d, Theme};
use figshot::{
    driver, vectorize, vectorize_default, vectorize_each, vectorize_each_default, Screenshot,
};

const RED_PLOT_SVG: &str = concat!(
    r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="20" height="20">"#,
    "<defs/>",
    r#"<path fill="rgb(255,0,0)" stroke="none" paint-order="stroke" d="M 5.5 5.5 L 15.5 5.5 L 15.5 15.5 L 5.5 15.5 L 5.5 5.5 Z" fill-opacity="1"/>"#,
    "</svg>"
);

/// A 20x20 plot whose background is the only paint, on the given backend.
fn plain_plot(fill: Color, backend: Backend) -> Layout {
    Layout::Plot(Plot {
        width: 20,
        height: 20,
        background_fill: Paint::Solid(fill),
        border_fill: Paint::Transparent,
        outline_line: Paint::Transparent,
        output_backend: backend,
        ..Default::default()
    })
}

fn decode_embedded_png(svg: &str) -> Screenshot {
    let marker = r#"href="data:image/png;base64,"#;
    let start = svg.find(marker).expect("an image embed") + marker.len();
    let end = start + svg[start..].find('"').expect("a closing quote");
    let png = BASE64.decode(&svg[start..end]).expect("valid base64");
    Screenshot::from_png(&png).expect("a decodable png")
}

#[test]
fn vector_plots_serialize_to_the_pinned_document() {
    let layout = plain_plot(Color::rgb(255, 0, 0), Backend::Svg);
    let mut drv = driver::create("argon", None).expect("create driver");

    let svgs = vectorize(&layout, drv.as_mut()).expect("vectorize");
    assert_eq!(svgs.len(), 1);
    assert_eq!(svgs[0], RED_PLOT_SVG);

    // serialization is deterministic
    let again = vectorize(&layout, drv.as_mut()).expect("vectorize again");
    assert_eq!(again, svgs);

    driver::terminate(drv).expect("terminate");
}

#[test]
fn composite_documents_clear_then_paint_offset_children() {
    let layout = row([
        plain_plot(Color::rgb(255, 0, 0), Backend::Svg),
        plain_plot(Color::rgb(0, 0, 255), Backend::Svg),
    ]);
    let mut drv = driver::create("argon", None).expect("create driver");
    let svgs = vectorize(&layout, drv.as_mut()).expect("vectorize");
    driver::terminate(drv).expect("terminate");

    assert_eq!(svgs.len(), 1);
    assert_eq!(
        svgs[0],
        concat!(
            r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="40" height="20">"#,
            "<defs/>",
            r#"<path fill="rgb(0,0,0)" stroke="none" paint-order="stroke" d="M 0 0 L 40 0 L 40 20 L 0 20 L 0 0 Z" fill-opacity="0"/>"#,
            r#"<path fill="rgb(255,0,0)" stroke="none" paint-order="stroke" d="M 5.5 5.5 L 15.5 5.5 L 15.5 15.5 L 5.5 15.5 L 5.5 5.5 Z" fill-opacity="1"/>"#,
            r#"<g transform="matrix(1, 0, 0, 1, 20, 0)">"#,
            r#"<path fill="rgb(0,0,255)" stroke="none" paint-order="stroke" d="M 5.5 5.5 L 15.5 5.5 L 15.5 15.5 L 5.5 15.5 L 5.5 5.5 Z" fill-opacity="1"/>"#,
            "</g>",
            "</svg>"
        )
    );
}

#[test]
fn composite_documents_embed_raster_children_as_images() {
    let layout = row([
        plain_plot(Color::rgb(255, 0, 0), Backend::Svg),
        Layout::Div(Div { width: 30.0, height: 10.0, ..Default::default() }),
    ]);
    let mut drv = driver::create("argon", None).expect("create driver");
    let svgs = vectorize(&layout, drv.as_mut()).expect("vectorize");
    driver::terminate(drv).expect("terminate");

    let svg = &svgs[0];
    assert!(
        svg.contains(concat!(
            r#"<g transform="matrix(1, 0, 0, 1, 20, 0)">"#,
            r#"<image width="30" height="10" preserveAspectRatio="none" href="data:image/png;base64,"#
        )),
        "got {svg}"
    );

    // the embed decodes back to the child's pixels: an empty div is blank
    let shot = decode_embedded_png(svg);
    assert_eq!((shot.width, shot.height), (30, 10));
    assert_eq!(shot.pixels, vec![0u8; 30 * 10 * 4]);
}

#[test]
fn raster_roots_fall_back_to_an_image_document() {
    let layout = plain_plot(Color::rgb(0, 255, 0), Backend::Canvas);
    let mut drv = driver::create("neon", None).expect("create driver");
    let svgs = vectorize(&layout, drv.as_mut()).expect("vectorize");
    driver::terminate(drv).expect("terminate");

    let svg = &svgs[0];
    let prefix = concat!(
        r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="20" height="20">"#,
        "<defs/>",
        r#"<image width="20" height="20" preserveAspectRatio="none" href="data:image/png;base64,"#
    );
    assert!(svg.starts_with(prefix), "got {svg}");
    assert!(svg.ends_with(r#""/></svg>"#), "got {svg}");

    // the frame carries the background; the transparent border band does not
    let shot = decode_embedded_png(svg);
    assert_eq!((shot.width, shot.height), (20, 20));
    let center = ((10 * 20 + 10) * 4) as usize;
    assert_eq!(&shot.pixels[center..center + 4], &[0x00, 0xff, 0x00, 0xff][..]);
    assert_eq!(&shot.pixels[..4], &[0, 0, 0, 0][..]);
}

#[test]
fn vectorize_each_yields_one_document_per_vector_plot() {
    let layout = row([
        plain_plot(Color::rgb(255, 0, 0), Backend::Svg),
        plain_plot(Color::rgb(0, 255, 0), Backend::Canvas),
        plain_plot(Color::rgb(0, 0, 255), Backend::Svg),
    ]);
    let mut drv = driver::create("argon", None).expect("create driver");
    let svgs = vectorize_each(&layout, drv.as_mut()).expect("vectorize each");
    driver::terminate(drv).expect("terminate");

    // the canvas child is skipped; the rest are standalone documents with no
    // composite clear and no transform wrapper
    assert_eq!(svgs.len(), 2);
    assert_eq!(svgs[0], RED_PLOT_SVG);
    assert_eq!(svgs[1], RED_PLOT_SVG.replace("rgb(255,0,0)", "rgb(0,0,255)"));
}

#[test]
fn vectorize_default_serializes_the_pinned_document() {
    // explicit paints keep this immune to any theme another test installs
    let layout = plain_plot(Color::rgb(255, 0, 0), Backend::Svg);
    let svgs = vectorize_default(&layout).expect("vectorize");
    assert_eq!(svgs.len(), 1);
    assert_eq!(svgs[0], RED_PLOT_SVG);
    figshot::driver::driver_control()
        .lock()
        .unwrap()
        .cleanup()
        .expect("cleanup default driver");
}

#[test]
fn vectorize_each_is_empty_without_vector_plots() {
    let layout = plain_plot(Color::rgb(0, 255, 0), Backend::Canvas);
    let svgs = vectorize_each_default(&layout).expect("vectorize each");
    assert!(svgs.is_empty());
    figshot::driver::driver_control()
        .lock()
        .unwrap()
        .cleanup()
        .expect("cleanup default driver");
}

#[test]
fn titles_are_escaped_in_markup() {
    let layout = Layout::Plot(Plot {
        width: 20,
        height: 20,
        background_fill: Paint::Transparent,
        border_fill: Paint::Transparent,
        outline_line: Paint::Transparent,
        output_backend: Backend::Svg,
        title: Some("<b> & done".to_string()),
        ..Default::default()
    });
    let mut drv = driver::create("argon", None).expect("create driver");
    let svgs = vectorize(&layout, drv.as_mut()).expect("vectorize");
    driver::terminate(drv).expect("terminate");

    assert!(
        svgs[0].contains(r#"<text x="5.5" y="12.5" fill="rgb(0,0,0)">&lt;b&gt; &amp; done</text>"#),
        "got {}",
        svgs[0]
    );
}

#[test]
fn the_process_theme_applies_until_reset() {
    let layout = row([circle_plot(Color::rgb(255, 0, 0)), circle_plot(Color::rgb(0, 0, 255))]);
    let mut drv = driver::create("argon", None).expect("create driver");

    let theme = Theme::from_json(r##"{"attrs": {"Plot": {"background_fill_color": "#2f3f4f"}}}"##)
        .expect("parse theme");
    figshot::state::state().lock().unwrap().set_theme(theme);
    let themed = vectorize(&layout, drv.as_mut()).expect("vectorize themed");

    figshot::state::state().lock().unwrap().reset();
    let reverted = vectorize(&layout, drv.as_mut()).expect("vectorize reverted");
    driver::terminate(drv).expect("terminate");

    // both plot backgrounds picked up the theme color while it was active
    assert_eq!(themed[0].matches(r#"fill="rgb(47,63,79)""#).count(), 2);
    assert_eq!(reverted[0].matches(r#"fill="rgb(47,63,79)""#).count(), 0);
}

/// A 200x200 plot leaving its background unset so the theme decides it.
fn circle_plot(fill: Color) -> Layout {
    let mut plot = Plot {
        width: 200,
        height: 200,
        x_range: Range1d::new(-1.0, 1.0),
        y_range: Range1d::new(-1.0, 1.0),
        output_backend: Backend::Svg,
        ..Default::default()
    };
    plot.add_glyph(Glyph::Circle { x: 0.0, y: 0.0, radius: 1.0, fill_color: Paint::Solid(fill) });
    Layout::Plot(plot)
}
