use std::sync::mpsc::{self, Sender};
use std::thread;

use tokio::sync::oneshot;

use crate::driver;
use crate::export::{self, RasterOptions};
use crate::model::Layout;
use crate::rendering::Screenshot;
use crate::resources::Resources;
use crate::{Error, Result};

enum Command {
    Raster(Layout, RasterOptions, oneshot::Sender<Result<Screenshot>>),
    Svg(Layout, oneshot::Sender<Result<Vec<String>>>),
    Svgs(Layout, oneshot::Sender<Result<Vec<String>>>),
    Html(
        Layout,
        Resources,
        Option<u32>,
        Option<u32>,
        oneshot::Sender<Result<String>>,
    ),
    Close(oneshot::Sender<Result<()>>),
}

/// An async-friendly export facade backed by a dedicated worker thread.
///
/// The worker thread owns a synchronous driver and executes commands sent
/// from async tasks so callers can use an async interface without requiring
/// the driver to be `Send` across threads.
#[derive(Clone)]
pub struct Exporter {
    cmd_tx: Sender<Command>,
}

impl Exporter {
    /// Create a new exporter (spawns a background thread that owns the
    /// driver for `engine`).
    pub async fn new(engine: &str, scale_factor: Option<f64>) -> Result<Self> {
        let engine = engine.to_string();

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            // Initialize the driver on the worker thread
            let mut driver = match driver::create(&engine, scale_factor) {
                Ok(d) => d,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            // Signal successful creation (no-op when previous send returned Err)
            let _ = init_tx.send(Ok(()));

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Raster(layout, options, resp) => {
                        let res = export::rasterize(&layout, driver.as_mut(), &options);
                        let _ = resp.send(res);
                    }
                    Command::Svg(layout, resp) => {
                        let res = export::vectorize(&layout, driver.as_mut());
                        let _ = resp.send(res);
                    }
                    Command::Svgs(layout, resp) => {
                        let res = export::vectorize_each(&layout, driver.as_mut());
                        let _ = resp.send(res);
                    }
                    Command::Html(layout, resources, height, width, resp) => {
                        let res = export::snapshot_html(&layout, &resources, height, width);
                        let _ = resp.send(res);
                    }
                    Command::Close(resp) => {
                        let res = driver::terminate(driver);
                        let _ = resp.send(res);
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report initialization success or failure
        let init_res = init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))?;
        init_res?;

        Ok(Self { cmd_tx })
    }

    /// Render the layout into an RGBA screenshot.
    pub async fn rasterize(&self, layout: Layout, options: RasterOptions) -> Result<Screenshot> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Raster(layout, options, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Rasterize canceled: {}", e)))?
    }

    /// Serialize the layout as one composite SVG document.
    pub async fn vectorize(&self, layout: Layout) -> Result<Vec<String>> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Svg(layout, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Vectorize canceled: {}", e)))?
    }

    /// One standalone SVG document per vector-backend plot.
    pub async fn vectorize_each(&self, layout: Layout) -> Result<Vec<String>> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Svgs(layout, tx));
        rx.await
            .map_err(|e| Error::Other(format!("VectorizeEach canceled: {}", e)))?
    }

    /// Build the standalone HTML snapshot of the layout.
    pub async fn snapshot_html(
        &self,
        layout: Layout,
        resources: Resources,
        height: Option<u32>,
        width: Option<u32>,
    ) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        let _ = self
            .cmd_tx
            .send(Command::Html(layout, resources, height, width, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Snapshot canceled: {}", e)))?
    }

    /// Shutdown the background worker and terminate the driver.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }
}
