//! Figshot Export Engine
//!
//! A headless figure-export engine for Rust that renders in-memory layout
//! documents (plots, divs, row containers) into raw RGBA screenshots,
//! standalone SVG documents, or HTML snapshots.
//!
//! # Design
//!
//! - **Swappable drivers**: exports run through the [`Driver`] seam; the two
//!   built-in engines ("argon" and "neon") produce identical pixels and may
//!   only differ in encoded PNG bytes
//! - **Immutable documents**: export functions take layouts by shared
//!   reference, so dimension overrides never leak back into the document
//! - **Deterministic output**: the same document and driver always produce
//!   the same pixels and the same markup
//!
//! # Example
//!
//! ```
//! use figshot::model::{Color, Layout, Paint, Plot};
//! use figshot::{driver, rasterize, RasterOptions};
//!
//! # fn main() -> figshot::Result<()> {
//! let layout = Layout::Plot(Plot {
//!     width: 40,
//!     height: 30,
//!     background_fill: Paint::Solid(Color::rgb(0x00, 0xff, 0x00)),
//!     border_fill: Paint::Solid(Color::rgb(0x00, 0xff, 0x00)),
//!     outline_line: Paint::Transparent,
//!     ..Default::default()
//! });
//!
//! let mut driver = driver::create("argon", None)?;
//! let shot = rasterize(&layout, driver.as_mut(), &RasterOptions::default())?;
//! assert_eq!((shot.width, shot.height), (40, 30));
//! driver::terminate(driver)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

// The layout document model (plots, divs, rows, colors, themes)
pub mod model;

// Process-wide state consulted during resolution (active theme)
pub mod state;

// Resource-bundling descriptor for HTML snapshots
pub mod resources;
pub use resources::{ResourceMode, Resources};

// Rendering pipeline: resolution, raster, vector, and HTML backends
pub mod rendering;
pub use rendering::Screenshot;

// Render drivers ("argon"/"neon" engines behind the Driver seam)
pub mod driver;
pub use driver::Driver;

// Export entry points (rasterize/vectorize/snapshot and file helpers)
pub mod export;
pub use export::{
    rasterize, rasterize_default, save_png, save_svg, save_svgs, snapshot_html, vectorize,
    vectorize_default, vectorize_each, vectorize_each_default, RasterOptions,
};

// Async-friendly export facade (worker-thread backed)
pub mod async_api;

// Re-export the Exporter type at the crate root for ergonomic examples
pub use async_api::Exporter;
