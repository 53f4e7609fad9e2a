//! Render drivers
//!
//! A [`Driver`] is the narrow seam between the export surface and a
//! rendering engine. Two built-in engines, "argon" and "neon", share the
//! software renderer and differ only in PNG encoder profile: pixel output
//! is interchangeable while encoded bytes may differ.

use std::sync::{Mutex, OnceLock};

use log::debug;

use crate::rendering::layout::Page;
use crate::rendering::{raster, vector, Screenshot};
use crate::{Error, Result};

/// Engine used when no driver is supplied explicitly.
pub const DEFAULT_ENGINE: &str = "argon";

/// A handle onto a rendering engine serving sequential export calls.
///
/// Drivers are `Send`: the process-wide control and the async facade hand
/// them to worker threads.
pub trait Driver: Send {
    /// Engine name this driver was created for.
    fn name(&self) -> &'static str;

    /// Device pixel ratio fixed at creation (1.0 unless requested
    /// otherwise). Raster captures above this ratio are rejected before the
    /// driver is invoked.
    fn device_pixel_ratio(&self) -> f64;

    /// Render the resolved page into an RGBA buffer at `scale`.
    fn render_pixels(&mut self, page: &Page, scale: f64) -> Result<Screenshot>;

    /// Render the resolved page as one composite SVG document.
    fn render_svg(&mut self, page: &Page) -> Result<String>;

    /// Render one standalone SVG document per vector surface.
    fn render_svgs(&mut self, page: &Page) -> Result<Vec<String>>;

    /// Release the engine. Every created driver must be terminated.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Built-in engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Argon,
    Neon,
}

impl EngineKind {
    pub fn parse(name: &str) -> Result<EngineKind> {
        match name {
            "argon" => Ok(EngineKind::Argon),
            "neon" => Ok(EngineKind::Neon),
            other => Err(Error::UnknownEngine(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Argon => "argon",
            EngineKind::Neon => "neon",
        }
    }

    /// PNG encoder profile: argon favors speed, neon favors density.
    fn png_profile(&self) -> (png::Compression, png::FilterType) {
        match self {
            EngineKind::Argon => (png::Compression::Fast, png::FilterType::NoFilter),
            EngineKind::Neon => (png::Compression::Best, png::FilterType::Paeth),
        }
    }
}

/// The built-in software-renderer driver.
pub struct PixelDriver {
    kind: EngineKind,
    dpr: f64,
}

impl PixelDriver {
    fn new(kind: EngineKind, scale_factor: Option<f64>) -> Result<PixelDriver> {
        let dpr = scale_factor.unwrap_or(1.0);
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "device pixel ratio must be finite and positive, got {dpr}"
            )));
        }
        Ok(PixelDriver { kind, dpr })
    }
}

impl Driver for PixelDriver {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn render_pixels(&mut self, page: &Page, scale: f64) -> Result<Screenshot> {
        debug!(
            "{}: rasterizing {}x{} at scale {}",
            self.kind.name(),
            page.width,
            page.height,
            scale
        );
        Ok(raster::rasterize_page(page, scale))
    }

    fn render_svg(&mut self, page: &Page) -> Result<String> {
        let (compression, filter) = self.kind.png_profile();
        vector::page_svg(page, |surface| {
            raster::rasterize_surface(surface, 1.0).encode_png_with(compression, filter)
        })
    }

    fn render_svgs(&mut self, page: &Page) -> Result<Vec<String>> {
        Ok(vector::surface_svgs(page))
    }

    fn close(self: Box<Self>) -> Result<()> {
        debug!("{}: driver closed", self.kind.name());
        Ok(())
    }
}

/// Create a driver for the named engine.
///
/// `scale_factor` fixes the driver's device pixel ratio; `None` means 1.0.
pub fn create(engine: &str, scale_factor: Option<f64>) -> Result<Box<dyn Driver>> {
    let kind = EngineKind::parse(engine)?;
    let driver = PixelDriver::new(kind, scale_factor)?;
    debug!(
        "created {} driver with device pixel ratio {}",
        driver.name(),
        driver.device_pixel_ratio()
    );
    Ok(Box::new(driver))
}

/// Terminate a driver, releasing its engine.
pub fn terminate(driver: Box<dyn Driver>) -> Result<()> {
    driver.close()
}

/// Owner of the driver used by the plain export entry points.
///
/// Construct one per scope for dependency injection, or use
/// [`driver_control()`] for the process-wide instance. The default driver is
/// created on first use and lives until [`DriverControl::cleanup`].
#[derive(Default)]
pub struct DriverControl {
    current: Option<Box<dyn Driver>>,
}

impl DriverControl {
    pub fn new() -> Self {
        DriverControl { current: None }
    }

    /// The default driver, created lazily (argon, device pixel ratio 1.0).
    pub fn default_driver(&mut self) -> Result<&mut dyn Driver> {
        if self.current.is_none() {
            self.current = Some(create(DEFAULT_ENGINE, None)?);
        }
        match self.current.as_mut() {
            Some(driver) => Ok(driver.as_mut()),
            None => Err(Error::Other("default driver unavailable".into())),
        }
    }

    /// Tear down the default driver if one was ever created.
    pub fn cleanup(&mut self) -> Result<()> {
        if let Some(driver) = self.current.take() {
            driver.close()?;
        }
        Ok(())
    }
}

static CONTROL: OnceLock<Mutex<DriverControl>> = OnceLock::new();

/// The process-wide driver control behind the plain export entry points.
pub fn driver_control() -> &'static Mutex<DriverControl> {
    CONTROL.get_or_init(|| Mutex::new(DriverControl::new()))
}
